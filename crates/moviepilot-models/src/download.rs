use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `null` and absent both decode to the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings pass through; any other JSON value reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Numbers and numeric strings are accepted; anything else is 0.
fn lenient_progress<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().trim_end_matches('%').parse().unwrap_or_default(),
        _ => 0.0,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DownloadMedia {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `GET /api/v1/download/`.
///
/// Fields the client does not interpret are kept in `extra` (and in
/// `media.extra`) so callers still see the raw task. `null` values in the
/// interpreted fields fall back to defaults instead of failing the task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DownloadTask {
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: DownloadMedia,
    #[serde(default, deserialize_with = "lenient_progress")]
    pub progress: f64,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub state: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn lenient_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

impl DownloadTask {
    pub fn display_title(&self) -> &str {
        self.media
            .title
            .as_deref()
            .or_else(|| self.extra.get("title").and_then(|v| v.as_str()))
            .unwrap_or("<unknown>")
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress.clamp(0.0, 100.0)
    }
}
