//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`ProviderError`], [`ConfigError`]), while the binary edge uses
//! `anyhow` for convenient propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors convert into it with `?`
//! - Every variant renders a human-readable message, which is what ends up on
//!   stdout when a job fails softly
//!
//! # Example
//!
//! ```ignore
//! use autosubber::error::{Result, ResultExt};
//!
//! fn write_subtitle(path: &Path, bytes: &[u8]) -> Result<()> {
//!     std::fs::write(path, bytes).with_context("writing subtitle file")?;
//!     Ok(())
//! }
//! ```

use crate::config::ConfigError;
use crate::providers::ProviderError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (missing credentials, unreadable file)
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Metadata or subtitle provider error
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Release name could not be parsed
    #[error("Could not parse movie title or year from torrent name: {0}")]
    Parse(String),

    /// Folder relocation error
    #[error("Organization error: {0}")]
    Organization(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a parse error for a release name.
    pub fn parse(name: impl Into<String>) -> Self {
        Self::Parse(name.into())
    }

    /// Create an organization error.
    pub fn organization(message: impl Into<String>) -> Self {
        Self::Organization(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ProviderError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Provider(e).context(ctx))
    }
}
