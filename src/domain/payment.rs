use super::country::CountryCode;
use super::phone;
use super::validators::{validate_amount, validate_callback_url};
use crate::error::{Result, ShwaryError};
use rust_decimal::Decimal;
use serde::Serialize;

/// What happens to a callback URL that fails [`validate_callback_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackPolicy {
    /// Log a warning and send the URL anyway.
    #[default]
    Advisory,
    /// Reject the request with a validation error.
    Enforce,
}

/// A payment request that passed every local check.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    country: CountryCode,
    amount: Decimal,
    phone: String,
    callback_url: Option<String>,
}

impl PaymentRequest {
    pub fn country(&self) -> CountryCode {
        self.country
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Phone number in E.164 form.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    /// Request body sent to the payment endpoint.
    pub fn payload(&self) -> PaymentPayload<'_> {
        PaymentPayload {
            amount: self.amount,
            client_phone_number: &self.phone,
            callback_url: self.callback_url.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload<'a> {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub client_phone_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<&'a str>,
}

/// Applies the business rules for a payment, stopping at the first failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentRequestValidator {
    callback_policy: CallbackPolicy,
}

impl PaymentRequestValidator {
    pub fn new(callback_policy: CallbackPolicy) -> Self {
        Self { callback_policy }
    }

    pub fn validate(
        &self,
        country: &str,
        amount: Decimal,
        phone_number: &str,
        callback_url: Option<&str>,
    ) -> Result<PaymentRequest> {
        let country: CountryCode = country.parse()?;

        let phone = phone::normalize(phone_number, country)?;
        if !phone.starts_with(country.dialing_prefix()) {
            return Err(ShwaryError::Validation(format!(
                "phone number {phone} does not belong to {country} (expected prefix {})",
                country.dialing_prefix()
            )));
        }

        validate_amount(amount, country)?;

        if !validate_callback_url(callback_url) {
            match self.callback_policy {
                CallbackPolicy::Enforce => {
                    return Err(ShwaryError::Validation(format!(
                        "callback URL {:?} must be an absolute http(s) URL",
                        callback_url.unwrap_or_default()
                    )));
                }
                CallbackPolicy::Advisory => {
                    tracing::warn!("callback URL does not look like an http(s) URL, sending it anyway");
                }
            }
        }

        Ok(PaymentRequest {
            country,
            amount,
            phone,
            callback_url: callback_url.map(str::to_string),
        })
    }
}

/// Converts a floating point amount, rejecting NaN and infinities.
pub fn amount_from_f64(amount: f64) -> Result<Decimal> {
    if !amount.is_finite() {
        return Err(ShwaryError::Validation(format!(
            "amount must be a finite number, received {amount}"
        )));
    }
    Decimal::try_from(amount)
        .map_err(|e| ShwaryError::Validation(format!("amount {amount} is out of range: {e}")))
}
