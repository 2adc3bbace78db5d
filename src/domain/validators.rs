//! Standalone checks that callers may run before building a client or a
//! request. Only [`validate_amount`] is enforced by the payment pipeline;
//! the others are advisory.

use super::country::CountryCode;
use crate::error::{Result, ShwaryError};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;
use url::Url;

static MERCHANT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("merchant id pattern is valid")
});

static TRANSACTION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[0-9a-f\-]{32,40}$").expect("transaction id pattern is valid"));

/// True when `url` is absent/empty or an absolute http(s) URL with a host.
pub fn validate_callback_url(url: Option<&str>) -> bool {
    match url {
        None => true,
        Some(raw) if raw.is_empty() => true,
        Some(raw) => Url::parse(raw)
            .map(|parsed| {
                matches!(parsed.scheme(), "http" | "https")
                    && parsed.host_str().is_some_and(|host| !host.is_empty())
            })
            .unwrap_or(false),
    }
}

/// Merchant identifiers are UUIDs.
pub fn validate_merchant_id(merchant_id: &str) -> bool {
    MERCHANT_ID.is_match(merchant_id)
}

pub fn validate_transaction_id(transaction_id: &str) -> bool {
    TRANSACTION_ID.is_match(transaction_id)
}

/// Rejects non-positive amounts and amounts under the country minimum.
pub fn validate_amount(amount: Decimal, country: CountryCode) -> Result<()> {
    let minimum = country.minimum_amount();
    if amount <= Decimal::ZERO {
        return Err(ShwaryError::Validation(format!(
            "amount must be positive (minimum for {country} is {minimum})"
        )));
    }

    if amount < minimum {
        return Err(ShwaryError::Validation(format!(
            "minimum amount for {country} is {minimum}, received {amount}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_callback_urls() {
        assert!(validate_callback_url(Some("https://example.com/webhook")));
        assert!(validate_callback_url(Some("http://localhost:8000/hooks")));
        assert!(validate_callback_url(None));
        assert!(validate_callback_url(Some("")));

        assert!(!validate_callback_url(Some("not a url")));
        assert!(!validate_callback_url(Some("example.com/webhook")));
        assert!(!validate_callback_url(Some("ftp://example.com/webhook")));
    }

    #[test]
    fn test_merchant_ids() {
        assert!(validate_merchant_id("550e8400-e29b-41d4-a716-446655440000"));
        assert!(validate_merchant_id("550E8400-E29B-41D4-A716-446655440000"));

        assert!(!validate_merchant_id("550e8400e29b41d4a716446655440000"));
        assert!(!validate_merchant_id("not-a-uuid"));
        assert!(!validate_merchant_id("550e8400-e29b-41d4-a716-446655440000-extra"));
    }

    #[test]
    fn test_transaction_ids() {
        assert!(validate_transaction_id("c0fdfe50-24be-4de1-9f66-84608fd45a5f"));
        assert!(!validate_transaction_id("c0fdfe50"));
        assert!(!validate_transaction_id("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"));
    }

    #[test]
    fn test_amount_rules() {
        assert!(validate_amount(dec!(2900), CountryCode::Drc).is_ok());
        assert!(validate_amount(dec!(10000), CountryCode::Drc).is_ok());
        assert!(validate_amount(dec!(1), CountryCode::Kenya).is_ok());
        assert!(validate_amount(dec!(1), CountryCode::Uganda).is_ok());

        let err = validate_amount(dec!(2899.99), CountryCode::Drc).unwrap_err();
        assert!(err.to_string().contains("2900"));
        assert!(err.to_string().contains("DRC"));

        let err = validate_amount(dec!(0), CountryCode::Kenya).unwrap_err();
        assert!(err.to_string().contains("amount must be positive"));
        assert!(validate_amount(dec!(-5), CountryCode::Uganda).is_err());
    }
}
