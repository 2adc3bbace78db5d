use crate::application::classifier::classify;
use crate::application::retry::RetryPolicy;
use crate::config::ClientConfig;
use crate::domain::endpoint::{self, Endpoint};
use crate::domain::payment::PaymentRequestValidator;
use crate::domain::phone;
use crate::domain::ports::{HttpRequest, TransportBox};
use crate::domain::transaction::{PaymentResponse, TransactionRecord};
use crate::domain::validators::validate_merchant_id;
use crate::error::{Result, ShwaryError};
use crate::infrastructure::http::HttpTransport;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Asynchronous client for the payment API.
///
/// The client is `Send + Sync`: wrap it in an `Arc` to issue payments from
/// several tasks at once. Results arrive in the order the underlying calls
/// complete. Call [`close`](Self::close) when done; dropping the client also
/// releases its connections.
pub struct ShwaryClient {
    transport: TransportBox,
    validator: PaymentRequestValidator,
    retry: RetryPolicy,
    sandbox: bool,
    closed: AtomicBool,
    closing: Notify,
}

impl ShwaryClient {
    /// Creates a client talking HTTP to `config.base_url`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    /// Creates a client on top of any [`Transport`](crate::domain::ports::Transport).
    pub fn with_transport(config: ClientConfig, transport: TransportBox) -> Self {
        if !validate_merchant_id(config.credentials.merchant_id()) {
            tracing::warn!("merchant id is not a UUID, requests will likely be rejected");
        }

        Self {
            transport,
            validator: PaymentRequestValidator::new(config.callback_policy),
            retry: config.retry,
            sandbox: config.sandbox,
            closed: AtomicBool::new(false),
            closing: Notify::new(),
        }
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Validates the request locally, then asks the API to collect `amount`
    /// from `phone_number`.
    ///
    /// Invalid input fails with [`ShwaryError::Validation`] before anything
    /// is sent. Connection failures and timeouts are retried according to
    /// the configured [`RetryPolicy`].
    pub async fn initiate_payment(
        &self,
        country: &str,
        amount: Decimal,
        phone_number: &str,
        callback_url: Option<&str>,
    ) -> Result<PaymentResponse> {
        self.ensure_open()?;

        let request = self
            .validator
            .validate(country, amount, phone_number, callback_url)
            .inspect_err(|err| {
                tracing::warn!(category = err.category(), "payment rejected before dispatch")
            })?;
        let endpoint = endpoint::resolve(request.country(), self.sandbox);
        let body = serde_json::to_value(request.payload())?;

        tracing::info!(
            endpoint = %endpoint,
            amount = %request.amount(),
            phone = %phone::mask(request.phone()),
            sandbox = self.sandbox,
            "dispatching payment"
        );

        let response: PaymentResponse = self.execute(HttpRequest::post(endpoint, body)).await?;

        tracing::info!(
            transaction_id = %response.id,
            status = %response.status,
            "payment initiated"
        );
        Ok(response)
    }

    /// Fetches the current state of a transaction.
    ///
    /// An unknown id surfaces as [`ShwaryError::Api`] with status 404.
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<TransactionRecord> {
        self.ensure_open()?;

        tracing::debug!(transaction_id, "fetching transaction");
        let record: TransactionRecord = self
            .execute(HttpRequest::get(Endpoint::transaction(transaction_id)))
            .await?;

        tracing::info!(
            transaction_id = %record.id,
            status = %record.status,
            "transaction fetched"
        );
        Ok(record)
    }

    /// Releases the transport. Safe to call more than once; every later
    /// request fails with [`ShwaryError::Closed`], and so do requests still
    /// in flight.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.closing.notify_waiters();
        self.transport.close().await;
        tracing::info!("client closed");
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(ShwaryError::Closed)
        } else {
            Ok(())
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let operation = request.endpoint.path();
        self.retry
            .run(&operation, |_| self.send_once(&request))
            .await
            .inspect_err(|err| {
                tracing::error!(endpoint = %operation, category = err.category(), "request failed")
            })
    }

    async fn send_once<T: DeserializeOwned>(&self, request: &HttpRequest) -> Result<T> {
        // Registered before the check so a concurrent close() cannot slip in between.
        let closing = self.closing.notified();
        self.ensure_open()?;

        let response = tokio::select! {
            response = self.transport.send(request) => response?,
            _ = closing => return Err(ShwaryError::Closed),
        };
        self.ensure_open()?;
        tracing::debug!(
            endpoint = %request.endpoint,
            status = response.status,
            "response received"
        );

        classify(response.status, &response.body)?;
        Ok(serde_json::from_str(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MerchantCredentials;
    use crate::domain::ports::{HttpMethod, HttpResponse};
    use crate::infrastructure::in_memory::InMemoryTransport;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::new(MerchantCredentials::new(
            "550e8400-e29b-41d4-a716-446655440000",
            "test-secret-key",
        ))
        .with_sandbox(true)
    }

    #[tokio::test]
    async fn test_payment_goes_to_sandbox_endpoint() {
        let transport = InMemoryTransport::from_responses([Ok(HttpResponse::json(
            200,
            &json!({"id": "trans-123", "status": "pending", "isSandbox": true}),
        ))]);
        let client = ShwaryClient::with_transport(config(), Box::new(transport.clone()));

        let response = client
            .initiate_payment("DRC", dec!(5000), "+243972345678", None)
            .await
            .unwrap();
        assert_eq!(response.id, "trans-123");

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].request.method, HttpMethod::Post);
        assert_eq!(sent[0].request.endpoint.path(), "/payment/sandbox/DRC");
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let transport = InMemoryTransport::from_responses([]);
        let client = ShwaryClient::with_transport(config(), Box::new(transport.clone()));

        let err = client
            .initiate_payment("DRC", dec!(100), "+243840000000", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ShwaryError::Validation(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_final() {
        let transport = InMemoryTransport::from_responses([]);
        let client = ShwaryClient::with_transport(config(), Box::new(transport.clone()));

        client.close().await;
        client.close().await;
        assert!(client.is_closed());
        assert!(transport.is_closed());

        let err = client.get_transaction("tx-1").await.unwrap_err();
        assert!(matches!(err, ShwaryError::Closed));
        assert!(transport.requests().is_empty());
    }
}
