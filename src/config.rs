use crate::application::retry::RetryPolicy;
use crate::domain::payment::CallbackPolicy;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.shwary.com/api/v1/merchants";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = concat!("shwary-rust/", env!("CARGO_PKG_VERSION"));

/// Merchant identifier and secret key sent with every request.
///
/// `Debug` output never contains the key.
#[derive(Clone, PartialEq, Eq)]
pub struct MerchantCredentials {
    merchant_id: String,
    merchant_key: String,
}

impl MerchantCredentials {
    pub fn new(merchant_id: impl Into<String>, merchant_key: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            merchant_key: merchant_key.into(),
        }
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn merchant_key(&self) -> &str {
        &self.merchant_key
    }
}

impl fmt::Debug for MerchantCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerchantCredentials")
            .field("merchant_id", &self.merchant_id)
            .field("merchant_key", &"<redacted>")
            .finish()
    }
}

/// Settings shared by the async and blocking clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: MerchantCredentials,
    pub sandbox: bool,
    pub base_url: String,
    /// Per-call timeout applied by the HTTP transport.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub callback_policy: CallbackPolicy,
}

impl ClientConfig {
    pub fn new(credentials: MerchantCredentials) -> Self {
        Self {
            credentials,
            sandbox: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            callback_policy: CallbackPolicy::default(),
        }
    }

    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_callback_policy(mut self, callback_policy: CallbackPolicy) -> Self {
        self.callback_policy = callback_policy;
        self
    }
}
