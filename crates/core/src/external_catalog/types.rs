//! Types for catalog API responses.

use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// One catalog entry, as returned by listing, search and detail endpoints.
///
/// `id` is the only identity key: two entries with the same `id` are the same
/// title regardless of the other fields. `PartialEq` and `Hash` follow that rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub adult: bool,
    /// Backdrop path (relative to the image base URL). `null` upstream becomes empty.
    #[serde(default, deserialize_with = "nullable_string")]
    pub backdrop_path: String,
    /// Catalog ID.
    #[serde(default)]
    pub id: u32,
    #[serde(default, deserialize_with = "nullable_string")]
    pub original_title: String,
    /// Release date. Upstream sends `""` for unreleased titles.
    #[serde(default, with = "release_date")]
    pub release_date: Option<NaiveDate>,
    /// Poster path (relative to the image base URL).
    #[serde(default, deserialize_with = "nullable_string")]
    pub poster_path: String,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    /// Average vote (0-10).
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs. Upstream sends integers; stored favorites may carry strings.
    #[serde(
        default,
        deserialize_with = "genre_ids",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl SearchResult {
    /// The placeholder stored when the catalog answers a detail lookup with an empty body.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// True for the placeholder record (no catalog ID).
    pub fn is_placeholder(&self) -> bool {
        self.id == 0
    }

    /// Release year, if the release date is known.
    pub fn year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }
}

impl PartialEq for SearchResult {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SearchResult {}

impl Hash for SearchResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    /// 1-based page number; 0 means nothing has been loaded yet.
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl SearchResults {
    /// The "nothing loaded yet" sentinel page.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this is a real page rather than the sentinel. A loaded page may
    /// still have no results.
    pub fn is_loaded(&self) -> bool {
        self.page >= 1
    }

    /// Whether `page` lies within `[1, total_pages]`.
    pub fn contains_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenreId {
    Number(u64),
    Text(String),
}

fn genre_ids<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<GenreId>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|ids| {
        ids.into_iter()
            .map(|id| match id {
                GenreId::Number(n) => n.to_string(),
                GenreId::Text(s) => s,
            })
            .collect()
    }))
}

/// `YYYY-MM-DD` dates where the empty string means "unknown".
mod release_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_listing_entry() {
        let value = json!({
            "adult": false,
            "backdrop_path": "/back.jpg",
            "genre_ids": [878, 12],
            "id": 438631,
            "original_language": "en",
            "original_title": "Dune",
            "overview": "Paul Atreides...",
            "popularity": 154.2,
            "poster_path": "/poster.jpg",
            "release_date": "2021-09-15",
            "title": "Dune",
            "video": false,
            "vote_average": 7.8,
            "vote_count": 11000
        });

        let movie: SearchResult = serde_json::from_value(value).unwrap();
        assert_eq!(movie.id, 438631);
        assert_eq!(movie.year(), Some(2021));
        assert_eq!(
            movie.genre_ids,
            Some(vec!["878".to_string(), "12".to_string()])
        );
        assert_eq!(movie.overview.as_deref(), Some("Paul Atreides..."));
    }

    #[test]
    fn test_tolerates_inconsistent_shape() {
        let value = json!({
            "id": 1,
            "title": "Untitled",
            "backdrop_path": null,
            "poster_path": null,
            "release_date": "",
            "genre_ids": ["18"]
        });

        let movie: SearchResult = serde_json::from_value(value).unwrap();
        assert_eq!(movie.backdrop_path, "");
        assert_eq!(movie.poster_path, "");
        assert!(movie.release_date.is_none());
        assert_eq!(movie.genre_ids, Some(vec!["18".to_string()]));
    }

    #[test]
    fn test_release_date_written_back_in_wire_format() {
        let movie = SearchResult {
            id: 27205,
            title: "Inception".to_string(),
            release_date: NaiveDate::from_ymd_opt(2010, 7, 15),
            ..Default::default()
        };

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["release_date"], "2010-07-15");
        assert!(value.get("genre_ids").is_none());

        let unknown = serde_json::to_value(SearchResult::placeholder()).unwrap();
        assert_eq!(unknown["release_date"], "");
    }

    #[test]
    fn test_placeholder_parses_from_empty_object() {
        let movie: SearchResult = serde_json::from_str("{}").unwrap();
        assert!(movie.is_placeholder());
        assert_eq!(movie.title, "");
        assert!(movie.release_date.is_none());
    }

    #[test]
    fn test_identity_is_id_only() {
        let listed = SearchResult {
            id: 438631,
            title: "Dune".to_string(),
            popularity: 1.0,
            ..Default::default()
        };
        let refreshed = SearchResult {
            popularity: 2.0,
            vote_count: 12000,
            ..listed.clone()
        };
        let other = SearchResult {
            id: 841,
            ..listed.clone()
        };

        assert_eq!(listed, refreshed);
        assert_ne!(listed, other);

        let unique: std::collections::HashSet<_> = [listed, refreshed, other].into_iter().collect();
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_sentinel_page() {
        let empty = SearchResults::empty();
        assert_eq!(empty.page, 0);
        assert!(!empty.is_loaded());
        assert!(!empty.contains_page(1));
    }

    #[test]
    fn test_contains_page_bounds() {
        let page: SearchResults = serde_json::from_value(json!({
            "page": 1,
            "results": [],
            "total_pages": 5,
            "total_results": 90
        }))
        .unwrap();

        assert!(page.is_loaded());
        assert!(!page.contains_page(0));
        assert!(page.contains_page(1));
        assert!(page.contains_page(5));
        assert!(!page.contains_page(6));
    }
}
