use crate::application::client::ShwaryClient;
use crate::config::ClientConfig;
use crate::domain::ports::TransportBox;
use crate::domain::transaction::{PaymentResponse, TransactionRecord};
use crate::error::Result;
use rust_decimal::Decimal;
use tokio::runtime::{Builder, Runtime};

/// Blocking counterpart of [`ShwaryClient`].
///
/// Each call occupies the calling thread until it completes, retry waits
/// included. The client drives its own single-threaded runtime, so it must
/// not be created or used from inside an async context.
pub struct BlockingShwaryClient {
    inner: ShwaryClient,
    runtime: Runtime,
}

impl BlockingShwaryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let runtime = build_runtime()?;
        let inner = {
            let _guard = runtime.enter();
            ShwaryClient::new(config)?
        };
        Ok(Self { inner, runtime })
    }

    pub fn with_transport(config: ClientConfig, transport: TransportBox) -> Result<Self> {
        Ok(Self {
            inner: ShwaryClient::with_transport(config, transport),
            runtime: build_runtime()?,
        })
    }

    pub fn is_sandbox(&self) -> bool {
        self.inner.is_sandbox()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// See [`ShwaryClient::initiate_payment`].
    pub fn initiate_payment(
        &self,
        country: &str,
        amount: Decimal,
        phone_number: &str,
        callback_url: Option<&str>,
    ) -> Result<PaymentResponse> {
        self.runtime.block_on(
            self.inner
                .initiate_payment(country, amount, phone_number, callback_url),
        )
    }

    /// See [`ShwaryClient::get_transaction`].
    pub fn get_transaction(&self, transaction_id: &str) -> Result<TransactionRecord> {
        self.runtime
            .block_on(self.inner.get_transaction(transaction_id))
    }

    pub fn close(&self) {
        self.runtime.block_on(self.inner.close());
    }
}

fn build_runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}
