use super::country::CountryCode;
use std::fmt;

/// Path below the API base URL, kept as raw segments.
///
/// Transports percent-encode each segment when building the final URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
}

impl Endpoint {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn path(&self) -> String {
        self.to_string()
    }

    /// `/payment/[sandbox/]{DRC|KE|UG}`
    pub fn payment(country: CountryCode, sandbox: bool) -> Self {
        let mut segments = vec!["payment".to_string()];
        if sandbox {
            segments.push("sandbox".to_string());
        }
        segments.push(country.code().to_string());
        Self { segments }
    }

    /// `/transactions/{id}`
    pub fn transaction(id: &str) -> Self {
        Self {
            segments: vec!["transactions".to_string(), id.to_string()],
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Endpoint receiving payment initiations for `country`.
pub fn resolve(country: CountryCode, sandbox: bool) -> Endpoint {
    Endpoint::payment(country, sandbox)
}
