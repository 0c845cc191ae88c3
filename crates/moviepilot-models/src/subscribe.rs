use crate::media::{MediaRef, MediaType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/v1/subscribe/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscribeRequest {
    pub name: String,
    pub tmdbid: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
}

impl SubscribeRequest {
    pub fn movie(media: &MediaRef) -> Self {
        Self {
            name: media.title.clone(),
            tmdbid: media.tmdb_id.clone(),
            media_type: Some(MediaType::Movie.label().to_string()),
            season: None,
        }
    }

    /// Series subscriptions carry a season instead of a type; the server infers the type.
    pub fn series(media: &MediaRef, season: u32) -> Self {
        Self {
            name: media.title.clone(),
            tmdbid: media.tmdb_id.clone(),
            media_type: None,
            season: Some(season),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubscribeResponse {
    /// Read `success` and `message` independently, so an odd `message`
    /// never changes the outcome. A non-bool `success` counts as false.
    pub fn from_body(body: &Value) -> Self {
        let message = match body.get("message") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        Self {
            success: body.get("success").and_then(Value::as_bool).unwrap_or(false),
            message,
        }
    }
}
