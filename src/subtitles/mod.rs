//! Best-effort subtitle attachment.
//!
//! Flow for one download:
//! 1. Skip everything if `<media>.srt` already exists
//! 2. Log in, search by IMDb id in the configured language
//! 3. Take the first hit's first file - no ranking
//! 4. Trade the file id for a link, fetch it, write it next to the media
//!
//! Steps 2-4 share a single deadline. Failures never propagate: they come
//! back as [`SubtitleOutcome::Skipped`] so the move still happens.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::SubtitleConfig;
use crate::error::{Result, ResultExt};
use crate::model::{MetadataRecord, SubtitleOutcome};
use crate::providers::opensubtitles::SubtitleQuery;
use crate::providers::{ProviderError, SubtitleApi};

/// Subtitle path for a media path: the extension swapped for `.srt`, or
/// `.srt` appended when there is none.
///
/// Release folders rarely have a real extension, so
/// `Some.Movie.2020.1080p` becomes `Some.Movie.2020.srt`.
pub fn subtitle_path(media_path: &Path) -> PathBuf {
    media_path.with_extension("srt")
}

/// Make sure a subtitle sits next to `media_path`.
pub async fn fetch_subtitles<S>(
    api: &S,
    record: &MetadataRecord,
    media_path: &Path,
    config: &SubtitleConfig,
) -> SubtitleOutcome
where
    S: SubtitleApi + ?Sized,
{
    let target = subtitle_path(media_path);

    if target.exists() {
        info!(path = %target.display(), "Subtitle already exists for: {}, skipping", record.title);
        return SubtitleOutcome::AlreadyPresent(target);
    }

    match try_fetch(api, record, &target, config).await {
        Ok(()) => {
            info!(path = %target.display(), "Downloaded subtitles for {}", record.title);
            SubtitleOutcome::Attached(target)
        }
        Err(e) => {
            warn!(title = %record.title, "Subtitle download failed: {}", e);
            SubtitleOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}

async fn try_fetch<S>(
    api: &S,
    record: &MetadataRecord,
    target: &Path,
    config: &SubtitleConfig,
) -> Result<()>
where
    S: SubtitleApi + ?Sized,
{
    // OMDb uses "N/A" for missing values
    if record.imdb_id.is_empty() || record.imdb_id == "N/A" {
        return Err(ProviderError::NoMatches(format!(
            "no IMDb id for {}, cannot search subtitles",
            record.title
        ))
        .into());
    }

    let query = SubtitleQuery {
        imdb_id: record.imdb_id.clone(),
        language: config.language.clone(),
    };

    info!("Searching subtitles for: {}", record.title);

    let deadline = config.timeout();
    let content = tokio::time::timeout(deadline, download_first(api, record, &query))
        .await
        .map_err(|_| ProviderError::Timeout(deadline))
        .with_context("subtitle download")??;

    std::fs::write(target, content)
        .with_context(format!("error writing subtitle file {}", target.display()))
}

async fn download_first<S>(api: &S, record: &MetadataRecord, query: &SubtitleQuery) -> Result<Vec<u8>>
where
    S: SubtitleApi + ?Sized,
{
    let token = api
        .login()
        .await
        .with_context("failed to connect to OpenSubtitles")?;

    let matches = api
        .search(&token, query)
        .await
        .with_context("error searching for subtitles")?;

    let Some(first) = matches.first() else {
        return Err(ProviderError::NoMatches(format!(
            "no subtitles found for movie: {}",
            record.title
        ))
        .into());
    };

    let Some(&file_id) = first.file_ids.first() else {
        return Err(ProviderError::NoMatches(format!(
            "no files found for subtitle: {}",
            record.title
        ))
        .into());
    };

    debug!(subtitle_id = %first.subtitle_id, release = ?first.release, file_id, "Using first match");

    let handle = api
        .request_download(&token, file_id)
        .await
        .with_context("error downloading subtitle")?;

    api.fetch(&handle)
        .await
        .with_context("error downloading subtitle")
}
