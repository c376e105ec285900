//! Library classification and folder relocation.
//!
//! Routing is a pure function of two facts from the metadata provider:
//! whether the rating is child-appropriate (exactly "G" or "PG") and whether
//! the title is a movie. Anything that is not a movie goes to the TV tree.
//!
//! The move itself is a single rename of the release folder into the chosen
//! library directory, keeping its original name. Existing targets are not
//! merged or replaced; the rename simply fails.

use std::fs;

use crate::config::LibraryConfig;
use crate::error::{Error, Result, ResultExt};
use crate::model::{LibraryCategory, MetadataRecord, MovePlan, TorrentJob};

/// Pick the library bucket for a title.
pub fn classify(record: &MetadataRecord) -> LibraryCategory {
    match (record.is_child_appropriate(), record.kind.is_movie()) {
        (true, true) => LibraryCategory::ChildMovie,
        (true, false) => LibraryCategory::ChildSeries,
        (false, true) => LibraryCategory::AdultMovie,
        (false, false) => LibraryCategory::AdultSeries,
    }
}

/// Work out where a job's folder should go.
pub fn plan_move(job: &TorrentJob, record: &MetadataRecord, library: &LibraryConfig) -> MovePlan {
    let category = classify(record);
    MovePlan {
        source: job.media_path(),
        destination: library.dir_for(category).join(&job.name),
        category,
    }
}

/// Rename the release folder into the library.
///
/// Creates the library directory if needed. No fallback copy, no rollback.
pub fn execute_move(plan: &MovePlan) -> Result<()> {
    if let Some(parent) = plan.destination.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(format!("Failed to create directory: {:?}", parent))?;
    }

    if plan.destination.exists() {
        return Err(Error::organization(format!(
            "destination already exists: {}",
            plan.destination.display()
        )));
    }

    fs::rename(&plan.source, &plan.destination).with_context(format!(
        "Failed to move {} to {}",
        plan.source.display(),
        plan.destination.display()
    ))
}
