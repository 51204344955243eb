// Movie metadata provider abstraction
// The HTTP layer only talks to this trait; the IMDb client and test doubles implement it

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::models::{ImdbId, SearchHit};

/// Failure while talking to the metadata source
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Upstream(String),
}

/// Poster bytes as they arrive from upstream
pub type PosterStream = BoxStream<'static, Result<Bytes, ProviderError>>;

/// A person credited on a title
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPerson {
    pub name: String,
    pub person_id: Option<String>,
}

/// Provider payload for one title. Every key may be missing upstream;
/// list-valued keys keep the provider's ordering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMovie {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<i64>,
    /// Runtimes in minutes, primary cut first
    pub runtimes: Option<Vec<i32>>,
    pub genres: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub countries: Option<Vec<String>>,
    pub plot: Option<Vec<String>>,
    pub full_size_cover_url: Option<String>,
    pub cover_url: Option<String>,
    pub cover: Option<String>,
    pub cast: Option<Vec<RawPerson>>,
    pub directors: Option<Vec<RawPerson>>,
    pub writers: Option<Vec<RawPerson>>,
    pub kind: Option<String>,
}

#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Title search, at most `limit` hits in provider ranking order
    async fn search_titles(&self, query: &str, limit: usize)
        -> Result<Vec<SearchHit>, ProviderError>;

    /// Full metadata for a title, `None` when the provider has no such record
    async fn fetch_movie(&self, id: &ImdbId) -> Result<Option<RawMovie>, ProviderError>;

    /// Start downloading an image
    async fn fetch_poster(&self, url: &str) -> Result<PosterStream, ProviderError>;
}
