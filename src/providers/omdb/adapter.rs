//! Adapter layer: Convert OMDb DTOs to domain models
//!
//! This is the ONLY place where OMDb DTO types become [`MetadataRecord`]s.

use super::dto;
use crate::model::{ExternalRating, MediaKind, MetadataRecord, TitleDetails};
use crate::providers::ProviderError;

/// Convert a title response into a record, or the provider's own error.
pub fn to_record(response: dto::TitleResponse) -> Result<MetadataRecord, ProviderError> {
    if response.response == "False" {
        let message = response
            .error
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(ProviderError::Api(message));
    }

    let details = TitleDetails {
        released: response.released,
        runtime: response.runtime,
        genre: response.genre,
        director: response.director,
        writer: response.writer,
        actors: response.actors,
        plot: response.plot,
        language: response.language,
        country: response.country,
        awards: response.awards,
        poster: response.poster,
        ratings: response
            .ratings
            .into_iter()
            .map(|r| ExternalRating {
                source: r.source,
                value: r.value,
            })
            .collect(),
        metascore: response.metascore,
        imdb_rating: response.imdb_rating,
        imdb_votes: response.imdb_votes,
        dvd: response.dvd,
        box_office: response.box_office,
        production: response.production,
        website: response.website,
    };

    Ok(MetadataRecord {
        kind: MediaKind::from_provider(&response.media_type),
        title: response.title,
        year: response.year,
        rated: response.rated,
        imdb_id: response.imdb_id,
        details,
    })
}
