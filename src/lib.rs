//! Client for the Shwary mobile-money payment API.
//!
//! Payments are validated locally (phone number, country, minimum amount)
//! before anything is sent; API failures come back as typed
//! [`ShwaryError`] variants and transient network failures are retried with
//! bounded exponential backoff.
//!
//! ```no_run
//! use rust_decimal_macros::dec;
//! use shwary::{ClientConfig, MerchantCredentials, ShwaryClient};
//!
//! # async fn run() -> shwary::Result<()> {
//! let config = ClientConfig::new(MerchantCredentials::new("merchant-id", "merchant-key"))
//!     .with_sandbox(true);
//! let client = ShwaryClient::new(config)?;
//! let payment = client
//!     .initiate_payment("DRC", dec!(5000), "+243972345678", None)
//!     .await?;
//! println!("{} is {}", payment.id, payment.status);
//! client.close().await;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod logging;

pub use application::blocking::BlockingShwaryClient;
pub use application::client::ShwaryClient;
pub use application::retry::RetryPolicy;
pub use config::{ClientConfig, MerchantCredentials};
pub use domain::country::CountryCode;
pub use domain::payment::CallbackPolicy;
pub use domain::transaction::{PaymentResponse, TransactionRecord, WebhookNotification};
pub use error::{Result, ShwaryError, TransportError};
pub use logging::{LoggingConfig, configure_logging};
