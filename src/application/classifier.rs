use crate::error::{Result, ShwaryError};
use serde_json::{Map, Value};

/// Turns a non-2xx response into the matching error; 2xx passes through.
pub fn classify(status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let parsed =
        serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::Object(Map::new()));
    let message = parsed
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(body)
        .to_string();

    // Balance errors share status 400 with every other rejected request.
    if status == 400 && message.to_lowercase().contains("balance") {
        return Err(ShwaryError::InsufficientFunds(message));
    }

    Err(match status {
        401 => ShwaryError::Authentication(message),
        429 => ShwaryError::RateLimited(message),
        _ => ShwaryError::Api {
            status,
            message,
            body: parsed,
        },
    })
}
