//! OMDb API Data Transfer Objects
//!
//! These types match what the OMDb "by title" endpoint returns.
//! DO NOT use these types outside the omdb module - convert to domain types.
//!
//! Every field is PascalCase except the `imdb*` ones. Missing values come
//! back as the string "N/A" rather than null; a failed lookup returns only
//! `Response` and `Error`.
//!
//! Example response:
//! ```json
//! {
//!   "Title": "Some Movie", "Year": "2020", "Rated": "PG",
//!   "Type": "movie", "imdbID": "tt1234567", "Response": "True"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Response of `GET /?t=<title>&y=<year>`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TitleResponse {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Rated")]
    pub rated: String,
    #[serde(rename = "Released")]
    pub released: String,
    #[serde(rename = "Runtime")]
    pub runtime: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Writer")]
    pub writer: String,
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(rename = "Plot")]
    pub plot: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Awards")]
    pub awards: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Ratings")]
    pub ratings: Vec<Rating>,
    #[serde(rename = "Metascore")]
    pub metascore: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub media_type: String,
    #[serde(rename = "DVD")]
    pub dvd: String,
    #[serde(rename = "BoxOffice")]
    pub box_office: String,
    #[serde(rename = "Production")]
    pub production: String,
    #[serde(rename = "Website")]
    pub website: String,
    /// "True" or "False"
    #[serde(rename = "Response")]
    pub response: String,
    /// Set when `Response` is "False"
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_full_movie_response() {
        let json = r#"{
            "Title": "Toy Story", "Year": "1995", "Rated": "G",
            "Released": "22 Nov 1995", "Runtime": "81 min",
            "Genre": "Animation, Adventure, Comedy", "Director": "John Lasseter",
            "Writer": "John Lasseter, Pete Docter", "Actors": "Tom Hanks, Tim Allen",
            "Plot": "A cowboy doll is profoundly threatened.", "Language": "English",
            "Country": "United States", "Awards": "Nominated for 3 Oscars",
            "Poster": "https://example.com/poster.jpg",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.3/10"},
                {"Source": "Rotten Tomatoes", "Value": "100%"}
            ],
            "Metascore": "96", "imdbRating": "8.3", "imdbVotes": "1,100,000",
            "imdbID": "tt0114709", "Type": "movie", "DVD": "N/A",
            "BoxOffice": "$223,225,679", "Production": "N/A", "Website": "N/A",
            "Response": "True"
        }"#;

        let response: TitleResponse = serde_json::from_str(json).expect("Should parse movie");

        assert_eq!(response.title, "Toy Story");
        assert_eq!(response.rated, "G");
        assert_eq!(response.media_type, "movie");
        assert_eq!(response.imdb_id, "tt0114709");
        assert_eq!(response.ratings.len(), 2);
        assert_eq!(response.ratings[1].value, "100%");
        assert_eq!(response.response, "True");
        assert!(response.error.is_none());
    }

    #[test]
    fn test_parse_not_found_response() {
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;

        let response: TitleResponse = serde_json::from_str(json).expect("Should parse error");

        assert_eq!(response.response, "False");
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
        assert!(response.title.is_empty());
        assert!(response.ratings.is_empty());
    }

    #[test]
    fn test_parse_series_with_extra_fields() {
        let json = r#"{
            "Title": "Some Show", "Year": "2019–2022", "Rated": "TV-14",
            "Type": "series", "totalSeasons": "3", "imdbID": "tt7654321",
            "Response": "True"
        }"#;

        let response: TitleResponse = serde_json::from_str(json).expect("Should parse series");
        assert_eq!(response.media_type, "series");
        assert_eq!(response.year, "2019–2022");
    }
}
