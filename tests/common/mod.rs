#![allow(dead_code)]

use serde_json::{Value, json};
use shwary::domain::ports::HttpResponse;
use shwary::{ClientConfig, MerchantCredentials, RetryPolicy};
use std::time::Duration;

pub const MERCHANT_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const MERCHANT_KEY: &str = "test-secret-key";

pub fn sandbox_config() -> ClientConfig {
    ClientConfig::new(MerchantCredentials::new(MERCHANT_ID, MERCHANT_KEY)).with_sandbox(true)
}

/// Same attempt count as the default policy, with millisecond waits.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10), Duration::from_millis(50))
}

pub fn payment_body(id: &str) -> Value {
    json!({"id": id, "status": "pending", "isSandbox": true})
}

pub fn pending_payment(id: &str) -> HttpResponse {
    HttpResponse::json(200, &payment_body(id))
}

pub fn error_response(status: u16, message: &str) -> HttpResponse {
    HttpResponse::json(status, &json!({"message": message}))
}
