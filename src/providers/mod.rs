//! External services - the metadata provider (OMDb) and the subtitle
//! provider (OpenSubtitles).
//!
//! # Architecture
//!
//! Each provider follows the same split:
//! - **DTOs** (`dto.rs`) - exact API response shapes
//! - **Adapter** - converts DTOs into our domain types (OMDb only; the
//!   subtitle flow needs just a couple of ids)
//! - **Client** - the HTTP calls
//!
//! [`traits`] puts a seam in front of each client so the subtitle fetcher and
//! the job runner can be tested without a network.

pub mod omdb;
pub mod opensubtitles;
pub mod traits;

pub use omdb::OmdbClient;
pub use opensubtitles::OpenSubtitlesClient;
pub use traits::{MetadataApi, SubtitleApi};

use std::time::Duration;

/// Errors that can occur when talking to a provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The provider answered but reported a failure itself
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication rejected")]
    Unauthorized,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("{0}")]
    NoMatches(String),

    #[error("Timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl ProviderError {
    /// Build an error from a non-success response, keeping a short body
    /// excerpt for the log line.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized,
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            _ => {
                let body = response.text().await.unwrap_or_default();
                Self::Http {
                    status: status.as_u16(),
                    body: body.chars().take(200).collect(),
                }
            }
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Build the shared HTTP client settings used by both providers.
pub(crate) fn http_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .gzip(true)
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {e}")))
}
