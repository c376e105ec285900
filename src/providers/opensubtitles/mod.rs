//! OpenSubtitles.com REST API integration
//!
//! Login, search by IMDb id, then trade a file id for a short-lived download
//! link. API docs: https://opensubtitles.stoplight.io/docs/opensubtitles-api

mod client;
pub mod dto;

pub use client::OpenSubtitlesClient;

/// Bearer token from `/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(pub String);

/// Search parameters for `/subtitles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleQuery {
    /// IMDb id, with or without the "tt" prefix
    pub imdb_id: String,
    /// Single language code, e.g. "en"
    pub language: String,
}

impl SubtitleQuery {
    /// The API wants the bare number without leading zeros; anything else
    /// gets a redirect.
    pub fn numeric_imdb_id(&self) -> &str {
        self.imdb_id.trim_start_matches("tt").trim_start_matches('0')
    }
}

/// One search hit, reduced to what the fetcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleMatch {
    pub subtitle_id: String,
    pub release: Option<String>,
    /// File ids in the order the provider lists them
    pub file_ids: Vec<i64>,
}

/// Result of `/download`: where to fetch the actual file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadHandle {
    pub link: String,
    pub file_name: Option<String>,
    /// Downloads left in the account's daily quota
    pub remaining: Option<i64>,
}
