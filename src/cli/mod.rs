//! Command-line interface for autosubber.
//!
//! Meant to be called by a torrent client when a download completes:
//!
//! ```text
//! autosubber [--dry-run] <TorrentID> <TorrentName> <TorrentPath>
//! ```
//!
//! The report goes to stdout; logs go to stderr.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Builder;

use crate::config::{self, Config, ValidatedCredentials};
use crate::error::Error;
use crate::job::{JobContext, run_job};
use crate::model::{JobOutcome, MetadataRecord, RunMode, SubtitleOutcome, TorrentJob};
use crate::providers::{OmdbClient, OpenSubtitlesClient};

pub const USAGE: &str = "Usage: autosubber [--dry-run] <TorrentID> <Torrent Name> <Torrent Path>";

/// Classify a finished torrent, attach subtitles and move it into the library
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Simulate the operation without moving the folder
    #[arg(long)]
    pub dry_run: bool,

    /// Config file (default: <config dir>/autosubber/config.toml)
    #[arg(long, env = "AUTOSUBBER_CONFIG")]
    pub config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// <TorrentID> <TorrentName> <TorrentPath>
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Live
        }
    }
}

/// Build a job from positional arguments. Extra arguments are ignored.
pub fn job_from_args(args: &[String]) -> Option<TorrentJob> {
    match args {
        [id, name, path, ..] => Some(TorrentJob::new(id.as_str(), name.as_str(), path.as_str())),
        _ => None,
    }
}

/// Exit code for arguments clap refused.
///
/// Missing credentials still win and exit 1. Help and version output exit 0.
pub fn rejected_args(err: &clap::Error, config: &Config) -> ExitCode {
    if err.use_stderr()
        && let Err(e) = config.validate()
    {
        println!("{}", Error::from(e));
        return ExitCode::FAILURE;
    }

    let _ = err.print();
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2))
}

/// Run the hook. Job failures are reported and still exit 0.
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = config::load(cli.config.as_deref());
    run_with(&cli, &config)
}

/// Run the hook against an already loaded config.
pub fn run_with(cli: &Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let credentials = match config.validate().map_err(Error::from) {
        Ok(credentials) => credentials,
        Err(e) => {
            println!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let Some(job) = job_from_args(&cli.args) else {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    };

    println!("{}", header(&job));

    let ValidatedCredentials {
        omdb_api_key,
        opensubtitles_api_key,
        opensubtitles_username,
        opensubtitles_password,
    } = credentials;
    let metadata = OmdbClient::new(omdb_api_key, &config.metadata)?;
    let subtitles = OpenSubtitlesClient::new(
        opensubtitles_api_key,
        opensubtitles_username,
        opensubtitles_password,
        &config.subtitles,
    )?;

    let ctx = JobContext {
        config,
        metadata: &metadata,
        subtitles: &subtitles,
    };

    let rt = Builder::new_current_thread().enable_all().build()?;
    let outcome = rt.block_on(run_job(&ctx, &job, cli.mode()));

    for line in render(&outcome) {
        println!("{}", line);
    }

    Ok(ExitCode::SUCCESS)
}

pub fn header(job: &TorrentJob) -> String {
    format!(
        "TorrentID: {}, Torrent Name: {}, Torrent Path: {}",
        job.id,
        job.name,
        job.source_dir.display()
    )
}

fn describe(record: &MetadataRecord) -> [String; 2] {
    [
        "Parsed OMDb response:".to_string(),
        format!(
            "Title: {}, Year: {}, Rated: {}, Type: {}",
            record.title, record.year, record.rated, record.kind
        ),
    ]
}

/// Report lines for a finished job.
pub fn render(outcome: &JobOutcome) -> Vec<String> {
    let mut lines = Vec::new();

    match outcome {
        JobOutcome::Unparsed { name } => {
            lines.push(Error::parse(name.as_str()).to_string());
        }
        JobOutcome::MetadataFailed { error, .. } => {
            lines.push(format!("Error fetching data from OMDb: {}", error));
        }
        JobOutcome::DryRun { record, plan } => {
            lines.extend(describe(record));
            lines.push(format!(
                "Dry run: would move {} to {}",
                plan.source.display(),
                plan.destination.display()
            ));
        }
        JobOutcome::Completed {
            record,
            plan,
            subtitle,
            moved,
        } => {
            lines.extend(describe(record));
            lines.push(match subtitle {
                SubtitleOutcome::Attached(path) => {
                    format!("Downloaded subtitles and saved as {}", path.display())
                }
                SubtitleOutcome::AlreadyPresent(path) => {
                    format!("Subtitle already exists at {}, skipping", path.display())
                }
                SubtitleOutcome::Skipped { reason } => {
                    format!("Error downloading subtitles: {}", reason)
                }
            });
            lines.push(match moved {
                Ok(()) => format!(
                    "Moved {} to {}",
                    plan.source.display(),
                    plan.destination.display()
                ),
                Err(e) => format!("Error moving folder: {}", e),
            });
        }
    }

    lines
}
