// IMDb metadata provider
// Search uses the public suggestion endpoint used by the IMDb apps,
// title details come from the public GraphQL endpoint

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::models::{ImdbId, SearchHit};

use super::provider::{MovieProvider, PosterStream, ProviderError, RawMovie, RawPerson};

/// Width used for the reduced cover rendition
const COVER_WIDTH: u32 = 300;

const TITLE_QUERY: &str = r#"
query TitleDetails($id: ID!) {
  title(id: $id) {
    titleText { text }
    titleType { id }
    releaseYear { year }
    ratingsSummary { aggregateRating voteCount }
    runtime { seconds }
    genres { genres { text } }
    spokenLanguages { spokenLanguages { text } }
    countriesOfOrigin { countries { text } }
    plot { plotText { plainText } }
    primaryImage { url }
    cast: credits(first: 50, filter: { categories: ["cast"] }) {
      edges { node { name { id nameText { text } } } }
    }
    directors: credits(first: 50, filter: { categories: ["director"] }) {
      edges { node { name { id nameText { text } } } }
    }
    writers: credits(first: 50, filter: { categories: ["writer"] }) {
      edges { node { name { id nameText { text } } } }
    }
  }
}
"#;

/// IMDb API client
pub struct ImdbClient {
    client: Client,
    suggestion_base_url: String,
    graphql_url: String,
}

// === Suggestion API types ===

#[derive(Debug, Deserialize)]
pub struct SuggestionResponse {
    #[serde(rename = "d", default)]
    pub results: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "l")]
    pub label: Option<String>,
    #[serde(rename = "y")]
    pub year: Option<i32>,
    pub id: Option<String>,
    pub qid: Option<String>,
    #[serde(rename = "q")]
    pub kind_label: Option<String>,
    #[serde(rename = "i")]
    pub image: Option<SuggestionImage>,
}

/// The suggestion image comes as `[url, width, height]`, as an object, or as a bare url
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SuggestionImage {
    List(Vec<serde_json::Value>),
    Object {
        #[serde(rename = "imageUrl")]
        image_url: Option<String>,
    },
    Other(serde_json::Value),
}

impl SuggestionImage {
    fn url(&self) -> Option<String> {
        match self {
            SuggestionImage::List(values) => values
                .first()
                .and_then(|v| v.as_str())
                .map(str::to_string),
            SuggestionImage::Object { image_url } => image_url.clone(),
            SuggestionImage::Other(value) => value.as_str().map(str::to_string),
        }
    }
}

impl From<Suggestion> for SearchHit {
    fn from(item: Suggestion) -> Self {
        let kind = [item.qid, item.kind_label]
            .into_iter()
            .flatten()
            .find(|k| !k.is_empty())
            .unwrap_or_else(|| "movie".to_string());

        SearchHit {
            title: item.label.unwrap_or_default(),
            year: item.year,
            imdb_id: item.id.unwrap_or_default(),
            kind: Some(kind),
            poster: item.image.as_ref().and_then(SuggestionImage::url),
        }
    }
}

// === GraphQL API types ===

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleData {
    pub title: Option<Title>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub title_text: Option<TextNode>,
    pub title_type: Option<TitleType>,
    pub release_year: Option<ReleaseYear>,
    pub ratings_summary: Option<RatingsSummary>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Genres>,
    pub spoken_languages: Option<SpokenLanguages>,
    pub countries_of_origin: Option<CountriesOfOrigin>,
    pub plot: Option<Plot>,
    pub primary_image: Option<PrimaryImage>,
    pub cast: Option<CreditConnection>,
    pub directors: Option<CreditConnection>,
    pub writers: Option<CreditConnection>,
}

#[derive(Debug, Deserialize)]
pub struct TextNode {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleType {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseYear {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingsSummary {
    pub aggregate_rating: Option<f64>,
    pub vote_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Runtime {
    pub seconds: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct Genres {
    pub genres: Vec<TextNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpokenLanguages {
    pub spoken_languages: Vec<TextNode>,
}

#[derive(Debug, Deserialize)]
pub struct CountriesOfOrigin {
    pub countries: Vec<TextNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plot {
    pub plot_text: Option<PlotText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotText {
    pub plain_text: String,
}

#[derive(Debug, Deserialize)]
pub struct PrimaryImage {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreditConnection {
    pub edges: Vec<CreditEdge>,
}

#[derive(Debug, Deserialize)]
pub struct CreditEdge {
    pub node: CreditNode,
}

#[derive(Debug, Deserialize)]
pub struct CreditNode {
    pub name: Option<CreditName>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditName {
    pub id: Option<String>,
    pub name_text: Option<TextNode>,
}

fn texts(nodes: Vec<TextNode>) -> Vec<String> {
    nodes.into_iter().map(|n| n.text).collect()
}

fn people(connection: CreditConnection) -> Vec<RawPerson> {
    connection
        .edges
        .into_iter()
        .filter_map(|edge| edge.node.name)
        .filter_map(|name| {
            let display = name.name_text?.text;
            Some(RawPerson {
                name: display,
                person_id: name.id,
            })
        })
        .collect()
}

/// Smaller rendition of an IMDb image, e.g. `..._V1_.jpg` -> `..._V1_SX300.jpg`
pub fn resized_cover_url(url: &str, width: u32) -> Option<String> {
    let (base, _) = url.rsplit_once("._V1_")?;
    Some(format!("{}._V1_SX{}.jpg", base, width))
}

impl From<Title> for RawMovie {
    fn from(title: Title) -> Self {
        let full_size_cover_url = title.primary_image.and_then(|i| i.url);
        let cover_url = full_size_cover_url
            .as_deref()
            .and_then(|url| resized_cover_url(url, COVER_WIDTH));

        RawMovie {
            title: title.title_text.map(|t| t.text),
            year: title.release_year.and_then(|y| y.year),
            rating: title
                .ratings_summary
                .as_ref()
                .and_then(|r| r.aggregate_rating),
            votes: title.ratings_summary.and_then(|r| r.vote_count),
            runtimes: title
                .runtime
                .and_then(|r| r.seconds)
                .map(|seconds| vec![seconds / 60]),
            genres: title.genres.map(|g| texts(g.genres)),
            languages: title.spoken_languages.map(|l| texts(l.spoken_languages)),
            countries: title.countries_of_origin.map(|c| texts(c.countries)),
            plot: title
                .plot
                .and_then(|p| p.plot_text)
                .map(|p| vec![p.plain_text]),
            full_size_cover_url,
            cover_url,
            cover: None,
            cast: title.cast.map(people),
            directors: title.directors.map(people),
            writers: title.writers.map(people),
            kind: title.title_type.map(|t| t.id),
        }
    }
}

impl ImdbClient {
    /// Create a new IMDb client from provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            suggestion_base_url: config.suggestion_base_url.trim_end_matches('/').to_string(),
            graphql_url: config.graphql_url.clone(),
        })
    }

    /// Suggestion URL: `{base}/{first letter}/{query}.json`
    fn suggestion_url(&self, query: &str) -> String {
        let first: String = query
            .chars()
            .next()
            .map(|c| c.to_lowercase().collect())
            .unwrap_or_default();

        format!(
            "{}/{}/{}.json",
            self.suggestion_base_url,
            urlencoding::encode(&first),
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl MovieProvider for ImdbClient {
    async fn search_titles(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        let url = self.suggestion_url(query);
        tracing::debug!("IMDb suggestion search: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            tracing::warn!(
                "IMDb suggestion API returned status {} for '{}'",
                response.status(),
                query
            );
            return Err(ProviderError::Upstream("IMDb API error".to_string()));
        }

        let body: SuggestionResponse = response.json().await?;

        Ok(body
            .results
            .into_iter()
            .take(limit)
            .map(SearchHit::from)
            .collect())
    }

    async fn fetch_movie(&self, id: &ImdbId) -> Result<Option<RawMovie>, ProviderError> {
        tracing::debug!("IMDb title lookup: {} (numeric {})", id, id.numeric());

        let payload = json!({
            "query": TITLE_QUERY,
            "variables": { "id": id.canonical() },
        });

        let response = self
            .client
            .post(&self.graphql_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Upstream(format!(
                "IMDb GraphQL request failed with status: {}",
                response.status()
            )));
        }

        let body: GraphQlResponse<TitleData> = response.json().await?;

        match body.data {
            Some(data) => Ok(data.title.map(RawMovie::from)),
            None => match body.errors.into_iter().next() {
                Some(error) => Err(ProviderError::Upstream(error.message)),
                None => Ok(None),
            },
        }
    }

    async fn fetch_poster(&self, url: &str) -> Result<PosterStream, ProviderError> {
        tracing::debug!("Downloading poster: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            tracing::warn!("Poster download failed with status: {}", response.status());
            return Err(ProviderError::Upstream("Poster fetch failed".to_string()));
        }

        Ok(response.bytes_stream().map_err(ProviderError::from).boxed())
    }
}
