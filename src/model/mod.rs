//! Core data models for one hook invocation.
//!
//! A run starts from a [`TorrentJob`], resolves it to a [`MetadataRecord`],
//! derives a [`MovePlan`] and ends in a [`JobOutcome`]. None of these outlive
//! the process.

use std::fmt;
use std::path::{Path, PathBuf};

/// The unit of work handed over by the torrent client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentJob {
    /// Client-side torrent identifier (only logged)
    pub id: String,
    /// Raw release name, also the folder name on disk
    pub name: String,
    /// Directory the release was downloaded into
    pub source_dir: PathBuf,
}

impl TorrentJob {
    pub fn new(id: impl Into<String>, name: impl Into<String>, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source_dir: source_dir.into(),
        }
    }

    /// Full path of the downloaded folder.
    pub fn media_path(&self) -> PathBuf {
        self.source_dir.join(&self.name)
    }
}

/// What the metadata provider says the title is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
    /// Anything else the provider returns (e.g. "game"), kept verbatim
    Other(String),
    #[default]
    Unknown,
}

impl MediaKind {
    /// Map the provider's `Type` field. Matching is exact, like the rating.
    pub fn from_provider(value: &str) -> Self {
        match value {
            "movie" => Self::Movie,
            "series" => Self::Series,
            "episode" => Self::Episode,
            "" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_movie(&self) -> bool {
        matches!(self, Self::Movie)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => f.write_str("movie"),
            Self::Series => f.write_str("series"),
            Self::Episode => f.write_str("episode"),
            Self::Other(s) => f.write_str(s),
            Self::Unknown => Ok(()),
        }
    }
}

/// One third-party rating (IMDb, Rotten Tomatoes, Metacritic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRating {
    pub source: String,
    pub value: String,
}

/// Descriptive fields carried through from the provider but not used for
/// any decision.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TitleDetails {
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub poster: String,
    pub ratings: Vec<ExternalRating>,
    pub metascore: String,
    pub imdb_rating: String,
    pub imdb_votes: String,
    pub dvd: String,
    pub box_office: String,
    pub production: String,
    pub website: String,
}

/// Metadata for a single title, as resolved by the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataRecord {
    pub title: String,
    pub year: String,
    /// Content rating ("G", "PG", "R", ...), verbatim
    pub rated: String,
    pub kind: MediaKind,
    /// IMDb identifier ("tt1234567"), used to search for subtitles
    pub imdb_id: String,
    pub details: TitleDetails,
}

impl MetadataRecord {
    /// Only an exact "G" or "PG" counts.
    pub fn is_child_appropriate(&self) -> bool {
        matches!(self.rated.as_str(), "G" | "PG")
    }
}

/// The four library buckets a download can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryCategory {
    ChildMovie,
    ChildSeries,
    AdultMovie,
    AdultSeries,
}

impl fmt::Display for LibraryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ChildMovie => "child-movie",
            Self::ChildSeries => "child-series",
            Self::AdultMovie => "adult-movie",
            Self::AdultSeries => "adult-series",
        };
        f.write_str(label)
    }
}

/// Where a download is going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub category: LibraryCategory,
}

/// What happened with subtitles for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleOutcome {
    /// Downloaded and written to this path
    Attached(PathBuf),
    /// A subtitle was already there; nothing fetched
    AlreadyPresent(PathBuf),
    /// Not attached; the job carried on without one
    Skipped { reason: String },
}

impl SubtitleOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Attached(p) | Self::AlreadyPresent(p) => Some(p),
            Self::Skipped { .. } => None,
        }
    }
}

/// Whether a job actually touches the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Live,
    DryRun,
}

/// Final state of a job. Every variant is a normal (exit 0) ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// No title/year could be read from the release name
    Unparsed { name: String },
    /// The metadata provider failed or did not know the title
    MetadataFailed { title: String, year: String, error: String },
    /// Dry run: the move that would have happened
    DryRun { record: MetadataRecord, plan: MovePlan },
    /// Live run finished; `moved` holds the rename error, if any
    Completed {
        record: MetadataRecord,
        plan: MovePlan,
        subtitle: SubtitleOutcome,
        moved: Result<(), String>,
    },
}
