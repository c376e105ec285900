//! OMDb API integration
//!
//! The Open Movie Database resolves a title and year to classification
//! data (rating, movie vs. series) plus an IMDb id.
//! API docs: https://www.omdbapi.com/

mod adapter;
mod client;
pub mod dto;

pub use adapter::to_record;
pub use client::OmdbClient;
