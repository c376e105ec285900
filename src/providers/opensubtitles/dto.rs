//! OpenSubtitles API Data Transfer Objects
//!
//! Only the fields we read are declared; serde ignores the rest of the
//! (large) payloads.
//!
//! Search response excerpt:
//! ```json
//! {
//!   "total_count": 1,
//!   "data": [{
//!     "id": "9000",
//!     "type": "subtitle",
//!     "attributes": {
//!       "language": "en",
//!       "release": "Some.Movie.2020.1080p.BluRay",
//!       "files": [{"file_id": 1234, "file_name": "Some.Movie.2020.srt"}]
//!     }
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Host to use for subsequent calls (VIP users get a different one)
    pub base_url: Option<String>,
    pub user: Option<LoginUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub allowed_downloads: Option<i64>,
    pub remaining_downloads: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total_count: Option<i64>,
    #[serde(default)]
    pub data: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub attributes: SubtitleAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleAttributes {
    pub release: Option<String>,
    #[serde(default)]
    pub files: Vec<SubtitleFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleFile {
    pub file_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub file_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadResponse {
    pub link: String,
    pub file_name: Option<String>,
    pub remaining: Option<i64>,
    pub message: Option<String>,
}
