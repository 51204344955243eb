// Movie record builder
// Maps raw provider payloads onto MovieRecord

use crate::error::ApiError;
use crate::models::{CastMember, ImdbId, MovieRecord, CAST_LIMIT};

use super::provider::{MovieProvider, RawMovie, RawPerson};

/// Fetch a title by id (with or without `tt`) and build its record
pub async fn load_record(
    provider: &dyn MovieProvider,
    imdb_id: &str,
) -> Result<MovieRecord, ApiError> {
    let not_found = || ApiError::NotFound("Movie not found".to_string());

    let id = ImdbId::parse(imdb_id).ok_or_else(not_found)?;
    let raw = provider.fetch_movie(&id).await?.ok_or_else(|| {
        tracing::debug!("Provider has no record for {}", id);
        not_found()
    })?;

    Ok(build_record(&id, raw))
}

/// First non-empty poster field: full-size cover url, cover url, cover
fn resolve_poster(raw: &RawMovie) -> Option<String> {
    [&raw.full_size_cover_url, &raw.cover_url, &raw.cover]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .cloned()
}

fn names(people: Option<Vec<RawPerson>>) -> Vec<String> {
    people
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.name)
        .collect()
}

pub fn build_record(id: &ImdbId, raw: RawMovie) -> MovieRecord {
    let poster_url = resolve_poster(&raw);

    let cast = raw
        .cast
        .unwrap_or_default()
        .into_iter()
        .take(CAST_LIMIT)
        .map(|p| CastMember {
            name: p.name,
            imdb_id: p.person_id,
        })
        .collect();

    MovieRecord {
        imdb_id: id.canonical(),
        title: raw.title.unwrap_or_default(),
        year: raw.year,
        rating: raw.rating,
        votes: raw.votes,
        runtime_minutes: raw.runtimes.and_then(|r| r.into_iter().next()),
        genres: raw.genres.unwrap_or_default(),
        languages: raw.languages.unwrap_or_default(),
        countries: raw.countries.unwrap_or_default(),
        plot: raw.plot.and_then(|p| p.into_iter().next()),
        poster_url,
        cast,
        directors: names(raw.directors),
        writers: names(raw.writers),
        kind: raw.kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str) -> RawPerson {
        RawPerson {
            name: name.to_string(),
            person_id: None,
        }
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let id = ImdbId::parse("tt0133093").unwrap();
        let record = build_record(&id, RawMovie::default());

        assert_eq!(record.imdb_id, "tt0133093");
        assert_eq!(record.title, "");
        assert!(record.genres.is_empty());
        assert!(record.languages.is_empty());
        assert!(record.countries.is_empty());
        assert!(record.cast.is_empty());
        assert!(record.directors.is_empty());
        assert!(record.writers.is_empty());
        assert_eq!(record.plot, None);
        assert_eq!(record.runtime_minutes, None);
        assert_eq!(record.poster_url, None);
    }

    #[test]
    fn test_first_element_of_plot_and_runtime() {
        let id = ImdbId::parse("0133093").unwrap();
        let raw = RawMovie {
            runtimes: Some(vec![136, 150]),
            plot: Some(vec!["Short plot.".to_string(), "Long plot.".to_string()]),
            ..RawMovie::default()
        };
        let record = build_record(&id, raw);
        assert_eq!(record.runtime_minutes, Some(136));
        assert_eq!(record.plot.as_deref(), Some("Short plot."));
    }

    #[test]
    fn test_cast_truncated_in_order() {
        let id = ImdbId::parse("0133093").unwrap();
        let cast: Vec<RawPerson> = (0..35).map(|i| person(&format!("Actor {}", i))).collect();
        let raw = RawMovie {
            cast: Some(cast),
            ..RawMovie::default()
        };
        let record = build_record(&id, raw);
        assert_eq!(record.cast.len(), CAST_LIMIT);
        assert_eq!(record.cast[0].name, "Actor 0");
        assert_eq!(record.cast[19].name, "Actor 19");
    }

    #[test]
    fn test_poster_priority() {
        let raw = RawMovie {
            full_size_cover_url: Some("full".to_string()),
            cover_url: Some("url".to_string()),
            cover: Some("cover".to_string()),
            ..RawMovie::default()
        };
        assert_eq!(resolve_poster(&raw).as_deref(), Some("full"));

        let raw = RawMovie {
            full_size_cover_url: Some(String::new()),
            cover_url: None,
            cover: Some("cover".to_string()),
            ..RawMovie::default()
        };
        assert_eq!(resolve_poster(&raw).as_deref(), Some("cover"));

        assert_eq!(resolve_poster(&RawMovie::default()), None);
    }

    #[test]
    fn test_crew_names() {
        let id = ImdbId::parse("0137523").unwrap();
        let raw = RawMovie {
            directors: Some(vec![person("David Fincher")]),
            writers: Some(vec![person("Chuck Palahniuk"), person("Jim Uhls")]),
            ..RawMovie::default()
        };
        let record = build_record(&id, raw);
        assert_eq!(record.directors, vec!["David Fincher"]);
        assert_eq!(record.writers, vec!["Chuck Palahniuk", "Jim Uhls"]);
    }
}
