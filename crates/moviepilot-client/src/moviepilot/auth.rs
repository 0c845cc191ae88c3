use crate::dispatch::{Dispatcher, Headers, Request};
use crate::error::Result;
use crate::moviepilot::api;
use moviepilot_config::ServerConfig;
use serde::Deserialize;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Exchange the configured username and password for a bearer token.
///
/// Returns `Ok(None)` without touching the network when no password is
/// configured, and `Ok(None)` when the server answers without a token.
/// Transport faults are returned as errors.
pub async fn login(dispatcher: &Dispatcher, config: &ServerConfig) -> Result<Option<String>> {
    let Some(password) = config.password.as_deref().filter(|p| !p.is_empty()) else {
        error!(username = %config.username, "MoviePilot password is not configured, skipping login");
        return Ok(None);
    };

    let mut headers = dispatcher.default_headers();
    headers.insert("accept".to_string(), "application/json".to_string());

    let request = Request::post_form(
        api::login_url(config.base_url()),
        [("username", config.username.as_str()), ("password", password)],
    )
    .with_headers(headers);

    let token = dispatcher
        .dispatch(request)
        .await?
        .and_then(|body| serde_json::from_value::<TokenResponse>(body).ok())
        .and_then(|response| response.access_token)
        .filter(|token| !token.is_empty());

    if token.is_some() {
        debug!(username = %config.username, "Obtained MoviePilot access token");
    }
    Ok(token)
}

/// Headers for authenticated calls: `base` plus `Authorization: Bearer <token>`.
pub fn bearer_headers(mut base: Headers, token: &str) -> Headers {
    base.insert("authorization".to_string(), format!("Bearer {}", token));
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_headers() {
        let mut base = Headers::new();
        base.insert("user-agent".to_string(), "ua".to_string());
        let headers = bearer_headers(base, "tok");
        assert_eq!(headers["authorization"], "Bearer tok");
        assert_eq!(headers["user-agent"], "ua");
    }

    #[test]
    fn test_token_response_tolerates_missing_token() {
        let response: TokenResponse = serde_json::from_str(r#"{"detail": "Incorrect password"}"#).unwrap();
        assert!(response.access_token.is_none());
    }
}
