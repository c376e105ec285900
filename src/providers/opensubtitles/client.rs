//! OpenSubtitles HTTP client
//!
//! Every request carries the consumer `Api-Key` header and a `User-Agent`
//! (the API answers 403 without one). Search and download also need the
//! bearer token from `/login`.
//!
//! ## API Quirks
//!
//! - `imdb_id` must be numeric; the "tt" prefix is stripped before sending.
//! - `/download` does not return the subtitle itself, only a temporary link
//!   that has to be fetched separately. Each call consumes daily quota.
//! - 401 means bad credentials, 406 means the quota is used up.

use super::{AuthToken, DownloadHandle, SubtitleMatch, SubtitleQuery, dto};
use crate::config::SubtitleConfig;
use crate::providers::{ProviderError, http_client};

/// OpenSubtitles API client
pub struct OpenSubtitlesClient {
    api_key: String,
    username: String,
    password: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenSubtitlesClient {
    /// Create a client from credentials and the `[subtitles]` config table.
    pub fn new(
        api_key: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        config: &SubtitleConfig,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key: api_key.into(),
            username: username.into(),
            password: password.into(),
            http_client: http_client(&config.user_agent, config.timeout())?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Exchange username and password for a bearer token.
    pub async fn login(&self) -> Result<AuthToken, ProviderError> {
        let response = self
            .http_client
            .post(self.endpoint("login"))
            .header("Api-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&dto::LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let login: dto::LoginResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        if let Some(user) = &login.user {
            tracing::debug!(
                remaining = ?user.remaining_downloads,
                allowed = ?user.allowed_downloads,
                host = ?login.base_url,
                "OpenSubtitles login successful"
            );
        }

        Ok(AuthToken(login.token))
    }

    /// Search subtitles by IMDb id in one language.
    pub async fn search(
        &self,
        token: &AuthToken,
        query: &SubtitleQuery,
    ) -> Result<Vec<SubtitleMatch>, ProviderError> {
        let response = self
            .http_client
            .get(self.endpoint("subtitles"))
            .query(&[
                ("imdb_id", query.numeric_imdb_id()),
                ("languages", query.language.as_str()),
            ])
            .header("Api-Key", &self.api_key)
            .bearer_auth(&token.0)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let search: dto::SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        tracing::debug!(
            imdb_id = %query.imdb_id,
            total = ?search.total_count,
            "OpenSubtitles search returned"
        );

        Ok(search
            .data
            .into_iter()
            .map(|result| SubtitleMatch {
                subtitle_id: result.id,
                release: result.attributes.release,
                file_ids: result.attributes.files.iter().map(|f| f.file_id).collect(),
            })
            .collect())
    }

    /// Ask for a download link for one file.
    pub async fn request_download(
        &self,
        token: &AuthToken,
        file_id: i64,
    ) -> Result<DownloadHandle, ProviderError> {
        let response = self
            .http_client
            .post(self.endpoint("download"))
            .header("Api-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(&token.0)
            .json(&dto::DownloadRequest { file_id })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let download: dto::DownloadResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        if let Some(message) = &download.message {
            tracing::debug!(remaining = ?download.remaining, "{}", message);
        }

        Ok(DownloadHandle {
            link: download.link,
            file_name: download.file_name,
            remaining: download.remaining,
        })
    }

    /// Fetch the subtitle body behind a download link.
    pub async fn fetch(&self, handle: &DownloadHandle) -> Result<Vec<u8>, ProviderError> {
        tracing::debug!(file = ?handle.file_name, remaining = ?handle.remaining, "Fetching subtitle file");

        let response = self.http_client.get(&handle.link).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> OpenSubtitlesClient {
        let config = SubtitleConfig {
            base_url: server.url("/api/v1/"),
            ..Default::default()
        };
        OpenSubtitlesClient::new("os-key", "alice", "hunter2", &config).unwrap()
    }

    fn token() -> AuthToken {
        AuthToken("jwt-token".to_string())
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = SubtitleConfig {
            base_url: "https://api.opensubtitles.com/api/v1/".to_string(),
            ..Default::default()
        };
        let client = OpenSubtitlesClient::new("k", "u", "p", &config).unwrap();
        assert_eq!(
            client.endpoint("login"),
            "https://api.opensubtitles.com/api/v1/login"
        );
    }

    #[tokio::test]
    async fn test_login_sends_credentials_and_headers() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/login")
                .header("Api-Key", "os-key")
                .header("User-Agent", "AutoSubber v1.0.0")
                .json_body(json!({"username": "alice", "password": "hunter2"}));
            then.status(200).json_body(json!({
                "token": "jwt-token",
                "base_url": "api.opensubtitles.com",
                "user": {"allowed_downloads": 20, "remaining_downloads": 20}
            }));
        });

        let token = client_for(&server).login().await.unwrap();

        mock.assert();
        assert_eq!(token, AuthToken("jwt-token".to_string()));
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/login");
            then.status(401).json_body(json!({"message": "Error, invalid username/password"}));
        });

        let err = client_for(&server).login().await.unwrap_err();
        assert_eq!(err, ProviderError::Unauthorized);
    }

    #[tokio::test]
    async fn test_search_strips_tt_prefix() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/subtitles")
                .query_param("imdb_id", "1234567")
                .query_param("languages", "en")
                .header("Authorization", "Bearer jwt-token");
            then.status(200).json_body(json!({
                "total_count": 2,
                "data": [
                    {"id": "1", "attributes": {"release": "first", "files": [{"file_id": 10}, {"file_id": 11}]}},
                    {"id": "2", "attributes": {"files": [{"file_id": 20}]}}
                ]
            }));
        });

        let query = SubtitleQuery {
            imdb_id: "tt1234567".to_string(),
            language: "en".to_string(),
        };
        let matches = client_for(&server).search(&token(), &query).await.unwrap();

        mock.assert();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].subtitle_id, "1");
        assert_eq!(matches[0].release.as_deref(), Some("first"));
        assert_eq!(matches[0].file_ids, vec![10, 11]);
    }

    #[tokio::test]
    async fn test_search_drops_leading_zeros() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/subtitles")
                .query_param("imdb_id", "114709");
            then.status(200).json_body(json!({"total_count": 0, "data": []}));
        });

        let query = SubtitleQuery {
            imdb_id: "tt0114709".to_string(),
            language: "en".to_string(),
        };
        let matches = client_for(&server).search(&token(), &query).await.unwrap();

        mock.assert();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_search_rate_limited() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/subtitles");
            then.status(429);
        });

        let query = SubtitleQuery {
            imdb_id: "tt1".to_string(),
            language: "en".to_string(),
        };
        let err = client_for(&server).search(&token(), &query).await.unwrap_err();
        assert_eq!(err, ProviderError::RateLimited);
    }

    #[tokio::test]
    async fn test_download_then_fetch() {
        let server = MockServer::start_async().await;
        let link = server.url("/files/abc.srt");
        let download = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/download")
                .header("Authorization", "Bearer jwt-token")
                .json_body(json!({"file_id": 10}));
            then.status(200).json_body(json!({
                "link": link,
                "file_name": "abc.srt",
                "remaining": 19,
                "message": "quota ok"
            }));
        });
        let file = server.mock(|when, then| {
            when.method(GET).path("/files/abc.srt");
            then.status(200).body("1\n00:00:01,000 --> 00:00:02,000\nHello\n");
        });

        let client = client_for(&server);
        let handle = client.request_download(&token(), 10).await.unwrap();
        assert_eq!(handle.file_name.as_deref(), Some("abc.srt"));
        assert_eq!(handle.remaining, Some(19));

        let bytes = client.fetch(&handle).await.unwrap();
        download.assert();
        file.assert();
        assert!(String::from_utf8(bytes).unwrap().contains("Hello"));
    }

    #[tokio::test]
    async fn test_download_quota_exhausted() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/download");
            then.status(406).body("quota exceeded");
        });

        let err = client_for(&server)
            .request_download(&token(), 1)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProviderError::Http {
                status: 406,
                body: "quota exceeded".to_string()
            }
        );
    }
}
