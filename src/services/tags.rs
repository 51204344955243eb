// Canonical tag dictionary exposed to templates and the /movie response

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::{ImdbId, MovieRecord};

/// Every tag, in response order
pub const TAG_KEYS: [&str; 15] = [
    "TITLE",
    "YEAR",
    "RATING",
    "VOTES",
    "DURATION",
    "GENRE",
    "LANGUAGE",
    "COUNTRY_OF_ORIGIN",
    "STORY_LINE",
    "IMDb_TITLE_TYPE",
    "IMG_POSTER",
    "ACTORS",
    "DIRECTORS",
    "WRITERS",
    "IMDB_URL",
];

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Null,
    Text(String),
    Integer(i64),
    Decimal(f64),
    List(Vec<String>),
}

impl TagValue {
    fn text(value: &Option<String>) -> Self {
        value.clone().map(TagValue::Text).unwrap_or(TagValue::Null)
    }

    fn integer<T: Into<i64>>(value: Option<T>) -> Self {
        value
            .map(|v| TagValue::Integer(v.into()))
            .unwrap_or(TagValue::Null)
    }

    /// Text substituted into a template. Lists join with ", ", decimals keep
    /// their fractional part (`7.0`, `8.8`).
    pub fn render(&self) -> String {
        match self {
            TagValue::Null => String::new(),
            TagValue::Text(text) => text.clone(),
            TagValue::Integer(n) => n.to_string(),
            TagValue::Decimal(x) => format!("{:?}", x),
            TagValue::List(items) => items.join(", "),
        }
    }
}

/// Fixed-key map of a movie's renderable fields. All keys in [`TAG_KEYS`]
/// are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct TagMap {
    entries: Vec<(&'static str, TagValue)>,
}

impl TagMap {
    pub fn from_record(record: &MovieRecord) -> Self {
        let imdb_url = ImdbId::parse(&record.imdb_id)
            .map(|id| TagValue::Text(id.title_url()))
            .unwrap_or(TagValue::Null);

        let values = [
            TagValue::Text(record.title.clone()),
            TagValue::integer(record.year),
            record.rating.map(TagValue::Decimal).unwrap_or(TagValue::Null),
            TagValue::integer(record.votes),
            TagValue::integer(record.runtime_minutes),
            TagValue::List(record.genres.clone()),
            TagValue::List(record.languages.clone()),
            TagValue::List(record.countries.clone()),
            TagValue::text(&record.plot),
            TagValue::text(&record.kind),
            TagValue::text(&record.poster_url),
            TagValue::List(record.cast.iter().map(|c| c.name.clone()).collect()),
            TagValue::List(record.directors.clone()),
            TagValue::List(record.writers.clone()),
            imdb_url,
        ];

        Self {
            entries: TAG_KEYS.into_iter().zip(values).collect(),
        }
    }

    /// Look up a tag, ignoring ASCII case
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TagValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl Serialize for TagMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CastMember;

    fn fight_club() -> MovieRecord {
        MovieRecord {
            imdb_id: "tt0137523".to_string(),
            title: "Fight Club".to_string(),
            year: Some(1999),
            rating: Some(8.8),
            votes: Some(2_300_000),
            runtime_minutes: Some(139),
            genres: vec!["Drama".to_string(), "Thriller".to_string()],
            cast: vec![
                CastMember {
                    name: "Brad Pitt".to_string(),
                    imdb_id: Some("nm0000093".to_string()),
                },
                CastMember {
                    name: "Edward Norton".to_string(),
                    imdb_id: None,
                },
            ],
            kind: Some("movie".to_string()),
            ..MovieRecord::default()
        }
    }

    #[test]
    fn test_every_key_present() {
        let tags = TagMap::from_record(&MovieRecord::default());
        let keys: Vec<&str> = tags.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, TAG_KEYS.to_vec());
        assert_eq!(tags.get("YEAR"), Some(&TagValue::Null));
        assert_eq!(tags.get("GENRE"), Some(&TagValue::List(Vec::new())));
        assert_eq!(tags.get("IMDB_URL"), Some(&TagValue::Null));
    }

    #[test]
    fn test_values_from_record() {
        let tags = TagMap::from_record(&fight_club());
        assert_eq!(tags.get("YEAR"), Some(&TagValue::Integer(1999)));
        assert_eq!(tags.get("DURATION"), Some(&TagValue::Integer(139)));
        assert_eq!(
            tags.get("ACTORS"),
            Some(&TagValue::List(vec![
                "Brad Pitt".to_string(),
                "Edward Norton".to_string()
            ]))
        );
        assert_eq!(
            tags.get("IMDB_URL"),
            Some(&TagValue::Text(
                "https://www.imdb.com/title/tt0137523/".to_string()
            ))
        );
        assert_eq!(tags.get("imdb_title_type"), tags.get("IMDb_TITLE_TYPE"));
        assert!(tags.get("NOPE").is_none());
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(TagValue::Null.render(), "");
        assert_eq!(TagValue::Integer(1999).render(), "1999");
        assert_eq!(TagValue::Decimal(8.8).render(), "8.8");
        assert_eq!(TagValue::Decimal(7.0).render(), "7.0");
    }

    #[test]
    fn test_serializes_in_key_order() {
        let json = serde_json::to_string(&TagMap::from_record(&fight_club())).unwrap();
        assert!(json.starts_with(r#"{"TITLE":"Fight Club","YEAR":1999,"RATING":8.8,"#));
        assert!(json.contains(r#""STORY_LINE":null"#));
        assert!(json.contains(r#""GENRE":["Drama","Thriller"]"#));
    }
}
