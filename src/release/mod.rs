//! Release-name parsing.
//!
//! Scene names look like `Some.Movie.2020.1080p.BluRay.x264-GRP` or
//! `Some Movie (2020) [1080p]`. All we need for a metadata lookup is the
//! leading title and the first four-digit group after it.

use regex::Regex;
use std::sync::LazyLock;

/// Shortest leading run, optional separators, optional `(`, four digits,
/// optional `)`.
static TITLE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)[\s._-]*\(?(\d{4})\)?").expect("title/year pattern is valid")
});

/// Title and year pulled from a release name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRelease {
    pub title: String,
    pub year: String,
}

impl ParsedRelease {
    /// Both halves present; anything less is not worth a lookup.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.year.is_empty()
    }
}

/// Parse `name` into a title and year.
///
/// Dots in the title become spaces and the result is trimmed. The year is
/// not range-checked. Returns an empty pair when there is no four-digit
/// group anywhere in the name.
pub fn parse_release_name(name: &str) -> ParsedRelease {
    let Some(caps) = TITLE_YEAR.captures(name) else {
        return ParsedRelease::default();
    };

    let title = caps.get(1).map_or("", |m| m.as_str()).replace('.', " ");
    let year = caps.get(2).map_or("", |m| m.as_str());

    ParsedRelease {
        title: title.trim().to_string(),
        year: year.to_string(),
    }
}
