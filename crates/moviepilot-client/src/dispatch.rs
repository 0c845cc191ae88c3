use crate::error::{ClientError, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};

/// Header name → value, kept ordered so diagnostics are stable.
pub type Headers = BTreeMap<String, String>;

const REDACTED: &str = "***";
const SECRET_FIELDS: &[&str] = &["password"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    PostForm,
    PostJson,
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RequestMethod::Get => "GET",
            RequestMethod::PostForm => "POST-FORM",
            RequestMethod::PostJson => "POST-JSON",
        };
        write!(f, "{}", tag)
    }
}

#[derive(Debug, Clone)]
enum Payload {
    Empty,
    Form(Vec<(String, String)>),
    Json(Value),
}

/// One outbound call. The payload decides the method, so a GET never carries
/// a body and a form POST never carries JSON.
#[derive(Debug, Clone)]
pub struct Request {
    url: String,
    headers: Option<Headers>,
    payload: Payload,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: None,
            payload: Payload::Empty,
        }
    }

    pub fn post_form<K, V>(url: impl Into<String>, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            url: url.into(),
            headers: None,
            payload: Payload::Form(fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: None,
            payload: Payload::Json(body),
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> RequestMethod {
        match self.payload {
            Payload::Empty => RequestMethod::Get,
            Payload::Form(_) => RequestMethod::PostForm,
            Payload::Json(_) => RequestMethod::PostJson,
        }
    }

    /// Body as it may appear in logs.
    fn redacted_body(&self) -> String {
        match &self.payload {
            Payload::Empty => "-".to_string(),
            Payload::Form(fields) => fields
                .iter()
                .map(|(k, v)| {
                    let shown = if is_secret(k) { REDACTED } else { v.as_str() };
                    format!("{}={}", k, shown)
                })
                .collect::<Vec<_>>()
                .join("&"),
            Payload::Json(body) => redact_json(body).to_string(),
        }
    }
}

fn is_secret(key: &str) -> bool {
    SECRET_FIELDS.iter().any(|s| key.eq_ignore_ascii_case(s))
}

fn redact_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = if is_secret(k) { Value::String(REDACTED.to_string()) } else { redact_json(v) };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_json).collect()),
        other => other.clone(),
    }
}

/// Copy of `headers` safe to log: bearer tokens are masked.
pub fn redact_headers(headers: &Headers) -> Headers {
    headers
        .iter()
        .map(|(k, v)| {
            let shown = if k.eq_ignore_ascii_case("authorization") {
                match v.split_once(' ') {
                    Some((scheme, _)) => format!("{} {}", scheme, REDACTED),
                    None => REDACTED.to_string(),
                }
            } else {
                v.clone()
            };
            (k.clone(), shown)
        })
        .collect()
}

/// Sends single requests with a uniform timeout and classifies the response.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    timeout: Duration,
    user_agent: String,
}

impl Dispatcher {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            timeout,
            user_agent: user_agent.into(),
        }
    }

    pub fn default_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("user-agent".to_string(), self.user_agent.clone());
        headers
    }

    /// Send `request` and return the parsed JSON body on HTTP 200.
    ///
    /// Any other status is logged and yields `Ok(None)`. Transport faults
    /// (including the timeout) and undecodable 200 bodies are returned as
    /// errors for the caller to handle.
    pub async fn dispatch(&self, request: Request) -> Result<Option<Value>> {
        let method = request.method();
        let headers = request.headers.clone().unwrap_or_else(|| self.default_headers());

        debug!(
            method = %method,
            url = %request.url,
            headers = ?redact_headers(&headers),
            body = %request.redacted_body(),
            "Dispatching MoviePilot request"
        );

        // One client per call; dropped with this scope.
        let client = Client::builder()
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()?;

        let mut builder = match method {
            RequestMethod::Get => client.get(&request.url),
            RequestMethod::PostForm | RequestMethod::PostJson => client.post(&request.url),
        };
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.payload {
            Payload::Empty => builder,
            Payload::Form(fields) => builder.form(fields),
            Payload::Json(body) => builder.json(body),
        };

        let response = builder.send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                method = %method,
                url = %request.url,
                response = %body,
                "MoviePilot request failed"
            );
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        let value = serde_json::from_slice(&bytes).map_err(|source| ClientError::InvalidResponse {
            url: request.url.clone(),
            source,
        })?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Duration::from_secs(5), "test-agent/1.0")
    }

    #[test]
    fn test_method_follows_payload() {
        assert_eq!(Request::get("http://x").method(), RequestMethod::Get);
        assert_eq!(
            Request::post_form("http://x", [("a", "b")]).method(),
            RequestMethod::PostForm
        );
        assert_eq!(Request::post_json("http://x", json!({})).method(), RequestMethod::PostJson);
        assert_eq!(RequestMethod::PostForm.to_string(), "POST-FORM");
    }

    #[test]
    fn test_form_password_is_redacted() {
        let request = Request::post_form("http://x", [("username", "admin"), ("password", "hunter2")]);
        let shown = request.redacted_body();
        assert_eq!(shown, "username=admin&password=***");
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_json_password_is_redacted() {
        let request = Request::post_json("http://x", json!({"name": "x", "nested": {"Password": "p"}}));
        let shown = request.redacted_body();
        assert!(shown.contains("\"Password\":\"***\""));
        assert!(shown.contains("\"name\":\"x\""));
    }

    #[test]
    fn test_authorization_header_is_redacted() {
        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), "Bearer abc.def".to_string());
        headers.insert("User-Agent".to_string(), "ua".to_string());
        let shown = redact_headers(&headers);
        assert_eq!(shown["Authorization"], "Bearer ***");
        assert_eq!(shown["User-Agent"], "ua");
    }

    #[tokio::test]
    async fn test_get_uses_default_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .match_header("user-agent", "test-agent/1.0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"pong": true}"#)
            .create_async()
            .await;

        let value = dispatcher()
            .dispatch(Request::get(format!("{}/ping", server.url())))
            .await
            .unwrap();
        assert_eq!(value, Some(json!({"pong": true})));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_form_and_json_bodies() {
        let mut server = mockito::Server::new_async().await;
        let form = server
            .mock("POST", "/form")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::UrlEncoded("username".into(), "admin".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let json_mock = server
            .mock("POST", "/json")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"season": 1})))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let d = dispatcher();
        let form_result = d
            .dispatch(Request::post_form(format!("{}/form", server.url()), [("username", "admin")]))
            .await
            .unwrap();
        let json_result = d
            .dispatch(Request::post_json(format!("{}/json", server.url()), json!({"season": 1})))
            .await
            .unwrap();

        assert_eq!(form_result, Some(json!([])));
        assert_eq!(json_result, Some(json!({})));
        form.assert_async().await;
        json_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_200_yields_none() {
        let mut server = mockito::Server::new_async().await;
        for (path, status) in [("/missing", 404), ("/boom", 500), ("/created", 201)] {
            server
                .mock("GET", path)
                .with_status(status)
                .with_body(r#"{"detail": "nope"}"#)
                .create_async()
                .await;
            let value = dispatcher()
                .dispatch(Request::get(format!("{}{}", server.url(), path)))
                .await
                .unwrap();
            assert_eq!(value, None, "status {} should be treated as failure", status);
        }
    }

    #[tokio::test]
    async fn test_undecodable_200_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/html")
            .with_status(200)
            .with_body("<html>login</html>")
            .create_async()
            .await;

        let err = dispatcher()
            .dispatch(Request::get(format!("{}/html", server.url())))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse { .. }));
    }
}
