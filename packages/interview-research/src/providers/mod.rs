//! HTTP clients for the external providers.
//!
//! Each client sits behind a Cargo feature (both on by default).

#[cfg(feature = "firecrawl")]
pub mod firecrawl;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(any(feature = "firecrawl", feature = "openai"))]
use crate::error::{ProviderError, ProviderResult};

/// Turn a non-2xx response into [`ProviderError::Api`], keeping the body.
#[cfg(any(feature = "firecrawl", feature = "openai"))]
async fn check_status(response: reqwest::Response) -> ProviderResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Api {
        status: status.as_u16(),
        body,
    })
}

/// Client with the shared request timeout.
#[cfg(any(feature = "firecrawl", feature = "openai"))]
fn http_client(timeout: std::time::Duration) -> ProviderResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Config(e.to_string()))
}
