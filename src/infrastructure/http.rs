use crate::config::{ClientConfig, USER_AGENT};
use crate::domain::ports::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::error::{Result, ShwaryError, TransportError};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::sync::RwLock;
use url::Url;

type TransportResult<T> = std::result::Result<T, TransportError>;

/// Transport backed by a pooled `reqwest::Client`.
///
/// Credentials, content type and user agent are installed as default
/// headers, and the configured timeout applies to each call.
pub struct HttpTransport {
    base_url: Url,
    client: RwLock<Option<reqwest::Client>>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ShwaryError::Configuration(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ShwaryError::Configuration(format!(
                "base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-merchant-id",
            header_value(config.credentials.merchant_id(), "merchant id")?,
        );
        let mut key = header_value(config.credentials.merchant_key(), "merchant key")?;
        key.set_sensitive(true);
        headers.insert("x-merchant-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShwaryError::Configuration(format!("could not build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            client: RwLock::new(Some(client)),
        })
    }

    fn url_for(&self, request: &HttpRequest) -> TransportResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Other("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(request.endpoint.segments());
        Ok(url)
    }

    fn client(&self) -> TransportResult<reqwest::Client> {
        self.client
            .read()
            .map_err(|_| TransportError::Other("HTTP client lock poisoned".to_string()))?
            .clone()
            .ok_or_else(|| TransportError::Other("HTTP client has been closed".to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &HttpRequest) -> TransportResult<HttpResponse> {
        let client = self.client()?;
        let url = self.url_for(request)?;

        let builder = match request.method {
            HttpMethod::Get => client.get(url),
            HttpMethod::Post => client.post(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }

    async fn close(&self) {
        // Dropping the last handle shuts the pool down.
        if let Ok(mut client) = self.client.write() {
            client.take();
        }
    }
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ShwaryError::Configuration(format!("{what} contains invalid header characters")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MerchantCredentials;
    use crate::domain::country::CountryCode;
    use crate::domain::endpoint::Endpoint;

    fn transport(base_url: &str) -> Result<HttpTransport> {
        HttpTransport::new(
            &ClientConfig::new(MerchantCredentials::new("id", "key")).with_base_url(base_url),
        )
    }

    #[test]
    fn test_urls_extend_the_base_path() {
        let transport = transport("https://api.shwary.com/api/v1/merchants").unwrap();
        let url = transport
            .url_for(&HttpRequest::get(Endpoint::payment(CountryCode::Kenya, true)))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.shwary.com/api/v1/merchants/payment/sandbox/KE"
        );
    }

    #[test]
    fn test_trailing_slash_on_base_is_tolerated() {
        let transport = transport("http://localhost:8080/").unwrap();
        let url = transport
            .url_for(&HttpRequest::get(Endpoint::transaction("tx 1/2")))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/transactions/tx%201%2F2");
    }

    #[test]
    fn test_bad_configuration_is_rejected() {
        assert!(matches!(
            transport("not a url"),
            Err(ShwaryError::Configuration(_))
        ));
        assert!(matches!(
            transport("mailto:ops@example.com"),
            Err(ShwaryError::Configuration(_))
        ));
        assert!(matches!(
            HttpTransport::new(&ClientConfig::new(MerchantCredentials::new("id", "bad\nkey"))),
            Err(ShwaryError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_closed_transport_refuses_to_send() {
        let transport = transport("http://localhost:8080").unwrap();
        transport.close().await;
        let err = transport
            .send(&HttpRequest::get(Endpoint::transaction("tx-1")))
            .await
            .unwrap_err();
        assert!(!err.is_transient());
    }
}
