//! AutoSubber - a post-download hook for torrent clients.
//!
//! Looks up a finished download on OMDb, fetches a subtitle from
//! OpenSubtitles and moves the folder into the matching media library.

pub mod cli;
pub mod config;
pub mod error;
pub mod job;
pub mod model;
pub mod organizer;
pub mod providers;
pub mod release;
pub mod subtitles;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            init_logging(0);
            let explicit = std::env::var_os("AUTOSUBBER_CONFIG").map(PathBuf::from);
            return cli::rejected_args(&e, &config::load(explicit.as_deref()));
        }
    };

    init_logging(args.verbose);

    match cli::run(args) {
        Ok(code) => code,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays a clean report for the torrent client.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let directive: Directive = format!("autosubber={}", level)
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(directive))
        .init();
}
