//! Typed errors for the research library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Provider and parse
//! errors are recovered inside the pipeline; only [`ResearchError`] can reach
//! a caller, and only while building clients.

use thiserror::Error;

/// Errors raised by external providers (search, scrape, language model).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider misconfigured (bad base URL, client build failure)
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection failed or timed out
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body did not match the expected transport shape
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider answered successfully but returned nothing usable
    #[error("empty response from {0}")]
    EmptyResponse(&'static str),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Parse(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// Errors from turning model output into structured data.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Response was blank after cleanup
    #[error("no JSON content in response")]
    NoJson,

    /// Response was not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Setup errors. The only errors visible to callers of the library.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// A required credential is not configured
    #[error("missing credential: {0} must be set")]
    MissingCredential(&'static str),

    /// A setting could not be parsed
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    /// Provider client could not be constructed
    #[error("provider setup failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Result type alias for provider calls.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message() {
        let err = ResearchError::MissingCredential("OPENAI_API_KEY");
        assert_eq!(err.to_string(), "missing credential: OPENAI_API_KEY must be set");
    }

    #[test]
    fn test_parse_error_from_serde() {
        let err: ParseError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
