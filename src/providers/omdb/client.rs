//! OMDb HTTP client
//!
//! One GET per lookup: `?t=<title>&y=<year>&apikey=<key>`.
//!
//! ## API Quirks
//!
//! - A miss is still HTTP 200, with `"Response": "False"` and an `Error`
//!   message ("Movie not found!"). The adapter turns that into
//!   [`ProviderError::Api`].
//! - A bad key is HTTP 401 with the same body shape, so error bodies are
//!   parsed too before falling back to a bare status error.
//! - Titles go out percent-encoded; a raw `&` or `#` in a release title
//!   would otherwise cut the query short.

use super::{adapter, dto};
use crate::config::MetadataConfig;
use crate::model::MetadataRecord;
use crate::providers::{ProviderError, http_client};

/// OMDb API client
pub struct OmdbClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl OmdbClient {
    /// Create a client from the `[metadata]` config table.
    pub fn new(api_key: impl Into<String>, config: &MetadataConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key: api_key.into(),
            http_client: http_client(
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
                config.timeout(),
            )?,
            base_url: config.base_url.clone(),
        })
    }

    /// Look up a title by name and year.
    pub async fn lookup(&self, title: &str, year: &str) -> Result<MetadataRecord, ProviderError> {
        let response = self.send_title_request(title, year).await?;
        adapter::to_record(response)
    }

    fn request_url(&self, title: &str, year: &str) -> String {
        format!(
            "{}?t={}&y={}&apikey={}",
            self.base_url,
            urlencoding::encode(title),
            urlencoding::encode(year),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn send_title_request(
        &self,
        title: &str,
        year: &str,
    ) -> Result<dto::TitleResponse, ProviderError> {
        let url = self.request_url(title, year);
        tracing::debug!(title, year, "Querying OMDb");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Error bodies share the success shape
            if let Ok(parsed) = serde_json::from_str::<dto::TitleResponse>(&body)
                && parsed.response == "False"
            {
                return Err(ProviderError::Api(
                    parsed.error.unwrap_or_else(|| status.to_string()),
                ));
            }
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        response
            .json::<dto::TitleResponse>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}
