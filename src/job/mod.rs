//! One end-to-end hook run.
//!
//! parse name -> look up metadata -> classify -> (dry run: stop) ->
//! subtitles (best effort) -> move folder.
//!
//! Every failure after startup is soft: it ends up in the returned
//! [`JobOutcome`] rather than as an error, and the process still exits 0.

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::model::{JobOutcome, RunMode, TorrentJob};
use crate::organizer::{execute_move, plan_move};
use crate::providers::{MetadataApi, SubtitleApi};
use crate::release::parse_release_name;
use crate::subtitles::fetch_subtitles;

/// Everything a job needs, built once at startup.
pub struct JobContext<'a> {
    pub config: &'a Config,
    pub metadata: &'a dyn MetadataApi,
    pub subtitles: &'a dyn SubtitleApi,
}

/// Run a single job to completion.
pub async fn run_job(ctx: &JobContext<'_>, job: &TorrentJob, mode: RunMode) -> JobOutcome {
    info!(
        torrent_id = %job.id,
        name = %job.name,
        path = %job.source_dir.display(),
        ?mode,
        "Processing torrent"
    );

    let parsed = parse_release_name(&job.name);
    if !parsed.is_complete() {
        warn!("{}", Error::parse(job.name.as_str()));
        return JobOutcome::Unparsed {
            name: job.name.clone(),
        };
    }

    let record = match ctx.metadata.lookup(&parsed.title, &parsed.year).await {
        Ok(record) => record,
        Err(e) => {
            warn!(title = %parsed.title, year = %parsed.year, "Metadata lookup failed: {}", e);
            return JobOutcome::MetadataFailed {
                title: parsed.title,
                year: parsed.year,
                error: e.to_string(),
            };
        }
    };

    let plan = plan_move(job, &record, &ctx.config.library);
    info!(
        category = %plan.category,
        destination = %plan.destination.display(),
        "Classified {} ({})",
        record.title,
        record.rated
    );

    if mode == RunMode::DryRun {
        return JobOutcome::DryRun { record, plan };
    }

    let subtitle = fetch_subtitles(ctx.subtitles, &record, &plan.source, &ctx.config.subtitles).await;

    info!(subtitle = ?subtitle.path(), "Moving {}", plan.source.display());

    // A subtitle written above stays put even if the move fails
    let moved = execute_move(&plan).map_err(|e| {
        warn!("Move failed: {}", e);
        e.to_string()
    });

    JobOutcome::Completed {
        record,
        plan,
        subtitle,
        moved,
    }
}
