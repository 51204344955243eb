use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Number of cast entries kept on a built record
pub const CAST_LIMIT: usize = 20;

/// An IMDb title identifier, stored without its `tt` prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImdbId {
    numeric: String,
}

impl ImdbId {
    /// Parse `tt0133093` or `0133093`. Returns `None` when the remainder is not
    /// a run of ASCII digits, since no title can be looked up with it.
    pub fn parse(raw: &str) -> Option<Self> {
        let numeric = raw.strip_prefix("tt").unwrap_or(raw);
        if numeric.is_empty() || !numeric.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            numeric: numeric.to_string(),
        })
    }

    /// The provider-side id (no prefix)
    pub fn numeric(&self) -> &str {
        &self.numeric
    }

    /// The canonical `tt`-prefixed id
    pub fn canonical(&self) -> String {
        format!("tt{}", self.numeric)
    }

    /// Public IMDb page for this title
    pub fn title_url(&self) -> String {
        format!("https://www.imdb.com/title/{}/", self.canonical())
    }
}

impl fmt::Display for ImdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tt{}", self.numeric)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastMember {
    pub name: String,
    pub imdb_id: Option<String>,
}

/// Normalized movie metadata for a single request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieRecord {
    pub imdb_id: String,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<i64>,
    pub runtime_minutes: Option<i32>,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
    pub cast: Vec<CastMember>,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
    pub kind: Option<String>,
}

/// Short description of a title, shared by `/movie` and `/search`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MovieMeta {
    pub title: String,
    pub year: Option<i32>,
    /// `tt`-prefixed IMDb id
    pub imdb_id: String,
    /// Title type such as `movie` or `tvSeries`
    pub kind: Option<String>,
    /// Poster image URL
    pub poster: Option<String>,
}

impl From<&MovieRecord> for MovieMeta {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            year: record.year,
            imdb_id: record.imdb_id.clone(),
            kind: record.kind.clone(),
            poster: record.poster_url.clone(),
        }
    }
}

/// One entry of a title search
pub type SearchHit = MovieMeta;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imdb_id_prefix_is_optional() {
        let with_prefix = ImdbId::parse("tt0133093").unwrap();
        let without = ImdbId::parse("0133093").unwrap();
        assert_eq!(with_prefix, without);
        assert_eq!(with_prefix.numeric(), "0133093");
        assert_eq!(without.canonical(), "tt0133093");
        assert_eq!(without.to_string(), "tt0133093");
    }

    #[test]
    fn test_imdb_id_rejects_garbage() {
        assert!(ImdbId::parse("").is_none());
        assert!(ImdbId::parse("tt").is_none());
        assert!(ImdbId::parse("nm0000093").is_none());
        assert!(ImdbId::parse("tt01a").is_none());
    }

    #[test]
    fn test_title_url() {
        let id = ImdbId::parse("0137523").unwrap();
        assert_eq!(id.title_url(), "https://www.imdb.com/title/tt0137523/");
    }
}
