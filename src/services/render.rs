// Template renderer for #TAG and {TAG} placeholders

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::tags::{TagMap, TagValue};

// `#NAME` takes the uppercase run after '#'; `{name}` stays on one line
static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Z0-9_]+)|\{([^}\n]+)\}").unwrap());

/// Replace every placeholder in one left-to-right pass. Unknown or empty tags
/// become "", substituted text is never scanned again.
pub fn render(template: &str, tags: &TagMap) -> String {
    RE_PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().trim().to_uppercase())
                .unwrap_or_default();

            tags.get(&key).map(TagValue::render).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieRecord;

    fn tags() -> TagMap {
        TagMap::from_record(&MovieRecord {
            imdb_id: "tt0137523".to_string(),
            title: "Fight Club".to_string(),
            year: Some(1999),
            rating: Some(8.8),
            genres: vec!["Drama".to_string(), "Thriller".to_string()],
            kind: Some("movie".to_string()),
            plot: Some("#TITLE {YEAR}".to_string()),
            ..MovieRecord::default()
        })
    }

    #[test]
    fn test_hash_placeholders() {
        assert_eq!(render("#TITLE (#YEAR)", &tags()), "Fight Club (1999)");
    }

    #[test]
    fn test_brace_placeholders_join_lists() {
        assert_eq!(render("{GENRE}", &tags()), "Drama, Thriller");
        assert_eq!(render("{ genre }", &tags()), "Drama, Thriller");
    }

    #[test]
    fn test_unknown_and_empty_tags_vanish() {
        assert_eq!(render("#NOPE", &tags()), "");
        assert_eq!(render("[{nope}]", &tags()), "[]");
        let empty = TagMap::from_record(&MovieRecord::default());
        assert_eq!(render("#VOTES|{STORY_LINE}|#ACTORS", &empty), "||");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "no tags here, #lowercase, { unterminated\n}, and a lone # sign";
        assert_eq!(render(text, &tags()), text);
    }

    #[test]
    fn test_hash_stops_at_first_non_tag_char() {
        assert_eq!(
            render("#TITLE's rating: #RATING/10", &tags()),
            "Fight Club's rating: 8.8/10"
        );
    }

    #[test]
    fn test_substitution_is_not_rescanned() {
        assert_eq!(render("#STORY_LINE", &tags()), "#TITLE {YEAR}");
    }

    #[test]
    fn test_mixed_case_title_type_key() {
        assert_eq!(render("{IMDb_TITLE_TYPE}", &tags()), "movie");
        assert_eq!(
            render("{imdb_url}", &tags()),
            "https://www.imdb.com/title/tt0137523/"
        );
    }
}
