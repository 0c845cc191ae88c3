use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MoviePilot's label for movies in subscribe bodies and media records.
pub const MOVIE_LABEL: &str = "电影";
/// MoviePilot's label for TV series.
pub const SERIES_LABEL: &str = "电视剧";

/// Minimal identity of a piece of media, usually taken from a search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaRef {
    pub title: String,
    pub tmdb_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Movie => MOVIE_LABEL,
            MediaType::Series => SERIES_LABEL,
        }
    }
}

impl MediaRef {
    pub fn new(title: impl Into<String>, tmdb_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tmdb_id: tmdb_id.into(),
        }
    }

    /// Build a reference from one search candidate.
    ///
    /// MoviePilot serializes `tmdb_id` as a number, older builds as a string;
    /// both are accepted. Returns `None` when the title or id is missing.
    pub fn from_search_item(item: &Value) -> Option<Self> {
        let title = item.get("title").and_then(|v| v.as_str())?;
        let tmdb_id = match item.get("tmdb_id")? {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(Self::new(title, tmdb_id))
    }
}

/// Flatten a search response into its candidate entries.
///
/// Accepts either a bare array or an object wrapping the array in `results`.
pub fn search_candidates(response: &Value) -> Vec<&Value> {
    match response {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map
            .get("results")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_search_item_string_id() {
        let item = json!({"title": "Inception", "tmdb_id": "27205"});
        let media = MediaRef::from_search_item(&item).unwrap();
        assert_eq!(media, MediaRef::new("Inception", "27205"));
    }

    #[test]
    fn test_from_search_item_numeric_id() {
        let item = json!({"title": "Dune", "tmdb_id": 438631, "year": "2021"});
        let media = MediaRef::from_search_item(&item).unwrap();
        assert_eq!(media.tmdb_id, "438631");
    }

    #[test]
    fn test_from_search_item_missing_fields() {
        assert!(MediaRef::from_search_item(&json!({"title": "No id"})).is_none());
        assert!(MediaRef::from_search_item(&json!({"tmdb_id": 1})).is_none());
        assert!(MediaRef::from_search_item(&json!({"title": "Empty", "tmdb_id": ""})).is_none());
    }

    #[test]
    fn test_search_candidates_shapes() {
        let wrapped = json!({"results": [{"title": "Inception", "tmdb_id": "27205"}]});
        assert_eq!(search_candidates(&wrapped).len(), 1);

        let bare = json!([{"title": "A"}, {"title": "B"}]);
        assert_eq!(search_candidates(&bare).len(), 2);

        assert!(search_candidates(&json!({"detail": "nothing"})).is_empty());
        assert!(search_candidates(&Value::Null).is_empty());
    }

    #[test]
    fn test_media_type_labels() {
        assert_eq!(MediaType::Movie.label(), "电影");
        assert_eq!(MediaType::Series.label(), "电视剧");
    }
}
