//! Application layer orchestrating a payment call.
//!
//! [`client::ShwaryClient`] runs the pipeline: local validation, endpoint
//! resolution, transport send under the [`retry::RetryPolicy`], response
//! classification and decoding. [`blocking::BlockingShwaryClient`] exposes
//! the same operations to synchronous callers.

pub mod blocking;
pub mod classifier;
pub mod client;
pub mod retry;
