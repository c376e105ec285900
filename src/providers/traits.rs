//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`OmdbClient`] and [`OpenSubtitlesClient`], while
//! tests substitute the implementations in [`mocks`].
//!
//! # Example
//!
//! ```ignore
//! use autosubber::providers::traits::MetadataApi;
//!
//! async fn classify<M: MetadataApi + ?Sized>(api: &M) -> Result<(), ProviderError> {
//!     let record = api.lookup("Some Movie", "2020").await?;
//!     println!("{} is rated {}", record.title, record.rated);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use super::opensubtitles::{AuthToken, DownloadHandle, SubtitleMatch, SubtitleQuery};
use super::{OmdbClient, OpenSubtitlesClient, ProviderError};
use crate::model::MetadataRecord;

/// Trait for the title-metadata lookup.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Resolve a title and year to a metadata record.
    async fn lookup(&self, title: &str, year: &str) -> Result<MetadataRecord, ProviderError>;
}

/// Trait for the subtitle provider's login/search/download sequence.
#[async_trait]
pub trait SubtitleApi: Send + Sync {
    async fn login(&self) -> Result<AuthToken, ProviderError>;

    async fn search(
        &self,
        token: &AuthToken,
        query: &SubtitleQuery,
    ) -> Result<Vec<SubtitleMatch>, ProviderError>;

    async fn request_download(
        &self,
        token: &AuthToken,
        file_id: i64,
    ) -> Result<DownloadHandle, ProviderError>;

    async fn fetch(&self, handle: &DownloadHandle) -> Result<Vec<u8>, ProviderError>;
}

// Implement traits for real clients

#[async_trait]
impl MetadataApi for OmdbClient {
    async fn lookup(&self, title: &str, year: &str) -> Result<MetadataRecord, ProviderError> {
        self.lookup(title, year).await
    }
}

#[async_trait]
impl SubtitleApi for OpenSubtitlesClient {
    async fn login(&self) -> Result<AuthToken, ProviderError> {
        self.login().await
    }

    async fn search(
        &self,
        token: &AuthToken,
        query: &SubtitleQuery,
    ) -> Result<Vec<SubtitleMatch>, ProviderError> {
        self.search(token, query).await
    }

    async fn request_download(
        &self,
        token: &AuthToken,
        file_id: i64,
    ) -> Result<DownloadHandle, ProviderError> {
        self.request_download(token, file_id).await
    }

    async fn fetch(&self, handle: &DownloadHandle) -> Result<Vec<u8>, ProviderError> {
        self.fetch(handle).await
    }
}

/// Mock provider clients for testing.
///
/// Return configurable responses and count calls, so tests can assert that a
/// code path stayed off the network.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::model::MediaKind;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock metadata provider returning one fixed result.
    pub struct MockMetadata {
        pub result: Result<MetadataRecord, ProviderError>,
        /// (title, year) of every lookup
        pub calls: Mutex<Vec<(String, String)>>,
    }

    impl MockMetadata {
        /// A provider that knows exactly one title.
        pub fn found(title: &str, rated: &str, kind: &str) -> Self {
            Self {
                result: Ok(MetadataRecord {
                    title: title.to_string(),
                    year: "2020".to_string(),
                    rated: rated.to_string(),
                    kind: MediaKind::from_provider(kind),
                    imdb_id: "tt1234567".to_string(),
                    ..Default::default()
                }),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_error(error: ProviderError) -> Self {
            Self {
                result: Err(error),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MetadataApi for MockMetadata {
        async fn lookup(&self, title: &str, year: &str) -> Result<MetadataRecord, ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push((title.to_string(), year.to_string()));
            self.result.clone()
        }
    }

    /// Mock subtitle provider.
    ///
    /// `login_error` takes precedence over everything; after login, `matches`
    /// is what search returns and `content` is what fetch returns.
    pub struct MockSubtitles {
        pub login_error: Option<ProviderError>,
        pub matches: Vec<SubtitleMatch>,
        pub content: Vec<u8>,
        /// Sleep before answering login, to exercise the deadline
        pub login_delay: Option<Duration>,
        pub network_calls: AtomicUsize,
        /// Query passed to search, if it was called
        pub last_query: Mutex<Option<SubtitleQuery>>,
        /// File id passed to request_download, if it was called
        pub requested_file: Mutex<Option<i64>>,
    }

    impl MockSubtitles {
        fn base() -> Self {
            Self {
                login_error: None,
                matches: vec![],
                content: vec![],
                login_delay: None,
                network_calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
                requested_file: Mutex::new(None),
            }
        }

        /// Provider with no subtitles for anything.
        pub fn no_matches() -> Self {
            Self::base()
        }

        /// Provider whose first match has `file_ids` and serves `content`.
        pub fn with_files(file_ids: Vec<i64>, content: &str) -> Self {
            Self {
                matches: vec![SubtitleMatch {
                    subtitle_id: "sub-1".to_string(),
                    release: Some("Some.Movie.2020.1080p".to_string()),
                    file_ids,
                }],
                content: content.as_bytes().to_vec(),
                ..Self::base()
            }
        }

        pub fn with_login_error(error: ProviderError) -> Self {
            Self {
                login_error: Some(error),
                ..Self::base()
            }
        }

        pub fn slow_login(delay: Duration) -> Self {
            Self {
                login_delay: Some(delay),
                ..Self::with_files(vec![1], "late")
            }
        }

        pub fn calls(&self) -> usize {
            self.network_calls.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.network_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SubtitleApi for MockSubtitles {
        async fn login(&self) -> Result<AuthToken, ProviderError> {
            self.hit();
            if let Some(delay) = self.login_delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(ref err) = self.login_error {
                return Err(err.clone());
            }
            Ok(AuthToken("mock-token".to_string()))
        }

        async fn search(
            &self,
            _token: &AuthToken,
            query: &SubtitleQuery,
        ) -> Result<Vec<SubtitleMatch>, ProviderError> {
            self.hit();
            *self.last_query.lock().unwrap() = Some(query.clone());
            Ok(self.matches.clone())
        }

        async fn request_download(
            &self,
            _token: &AuthToken,
            file_id: i64,
        ) -> Result<DownloadHandle, ProviderError> {
            self.hit();
            *self.requested_file.lock().unwrap() = Some(file_id);
            Ok(DownloadHandle {
                link: format!("https://dl.example.com/{}", file_id),
                file_name: None,
                remaining: Some(10),
            })
        }

        async fn fetch(&self, _handle: &DownloadHandle) -> Result<Vec<u8>, ProviderError> {
            self.hit();
            Ok(self.content.clone())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_metadata_records_calls() {
            let mock = MockMetadata::found("Some Movie", "PG", "movie");
            let record = mock.lookup("Some Movie", "2020").await.unwrap();
            assert_eq!(record.rated, "PG");
            assert_eq!(
                mock.calls(),
                vec![("Some Movie".to_string(), "2020".to_string())]
            );
        }

        #[tokio::test]
        async fn test_mock_subtitles_counts_calls() {
            let mock = MockSubtitles::with_files(vec![5], "body");
            let token = mock.login().await.unwrap();
            let handle = mock.request_download(&token, 5).await.unwrap();
            let body = mock.fetch(&handle).await.unwrap();
            assert_eq!(body, b"body");
            assert_eq!(mock.calls(), 3);
        }

        #[tokio::test]
        async fn test_mock_subtitles_login_error() {
            let mock = MockSubtitles::with_login_error(ProviderError::Unauthorized);
            assert_eq!(mock.login().await, Err(ProviderError::Unauthorized));
        }
    }
}
