use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failures raised by a [`Transport`](crate::domain::ports::Transport) before
/// any HTTP response was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Connection failures and timeouts are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum ShwaryError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("insufficient balance: {0}")]
    InsufficientFunds(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("API error {status} ({}): {message}", status_name(.status))]
    Api {
        status: u16,
        message: String,
        body: Value,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("client is closed")]
    Closed,
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShwaryError {
    /// Stable label used in log events instead of the error payload.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Authentication(_) => "authentication",
            Self::InsufficientFunds(_) => "insufficient_funds",
            Self::RateLimited(_) => "rate_limited",
            Self::Api { .. } => "api",
            Self::Transport(e) if e.is_transient() => "transient_transport",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
            Self::Closed => "closed",
            Self::Configuration(_) => "configuration",
            Self::Csv(_) => "csv",
            Self::Io(_) => "io",
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_transient())
    }

    /// HTTP status carried by an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Authentication(_) => Some(401),
            Self::RateLimited(_) => Some(429),
            Self::InsufficientFunds(_) => Some(400),
            _ => None,
        }
    }
}

fn status_name(status: &u16) -> &'static str {
    StatusCode::from_u16(*status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown")
}

pub type Result<T> = std::result::Result<T, ShwaryError>;
