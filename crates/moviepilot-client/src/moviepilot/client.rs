use crate::dispatch::{Dispatcher, Headers, Request};
use crate::error::{ClientError, Result};
use crate::moviepilot::{api, auth};
use crate::traits::MediaServer;
use async_trait::async_trait;
use moviepilot_config::ServerConfig;
use moviepilot_models::{DownloadTask, MediaRef, SubscribeRequest, SubscribeResponse};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Client for one MoviePilot server.
///
/// Stateless between calls: every operation logs in again, so clones can be
/// used concurrently without coordination.
#[derive(Clone)]
pub struct MoviePilotClient {
    config: Arc<ServerConfig>,
    dispatcher: Dispatcher,
}

/// Await `call`, logging any error and returning `default` in its place.
async fn safe_call<T, F>(operation: &'static str, default: T, call: F) -> T
where
    F: Future<Output = Result<T>>,
{
    match call.await {
        Ok(value) => value,
        Err(e) => {
            error!(operation, error = %e, "MoviePilot {} failed", operation);
            default
        }
    }
}

impl MoviePilotClient {
    pub fn new(config: ServerConfig) -> Self {
        let dispatcher = Dispatcher::new(config.timeout(), config.user_agent.clone());
        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub async fn login(&self) -> Result<Option<String>> {
        auth::login(&self.dispatcher, &self.config).await
    }

    /// Log in and build the headers for an authenticated call.
    pub async fn get_auth_headers(&self) -> Result<Option<Headers>> {
        match self.login().await? {
            Some(token) => Ok(Some(auth::bearer_headers(self.dispatcher.default_headers(), &token))),
            None => {
                error!(
                    url = %self.base_url(),
                    username = %self.config.username,
                    "MoviePilot login failed: check the password, or whether two-factor authentication is enabled"
                );
                Ok(None)
            }
        }
    }

    async fn authorized(&self, request: Request) -> Result<Option<Value>> {
        let Some(headers) = self.get_auth_headers().await? else {
            debug!(url = %request.url(), "Not authenticated, request not sent");
            return Ok(None);
        };
        self.dispatcher.dispatch(request.with_headers(headers)).await
    }

    pub async fn search_media_info(&self, title: &str) -> Option<Value> {
        let request = Request::get(api::search_url(self.base_url(), title));
        safe_call("media search", None, self.authorized(request)).await
    }

    pub async fn list_all_seasons(&self, tmdb_id: &str) -> Option<Value> {
        let request = Request::get(api::seasons_url(self.base_url(), tmdb_id));
        safe_call("season listing", None, self.authorized(request)).await
    }

    pub async fn subscribe_movie(&self, media: &MediaRef) -> bool {
        safe_call("movie subscription", false, self.subscribe(SubscribeRequest::movie(media))).await
    }

    pub async fn subscribe_series(&self, media: &MediaRef, season: u32) -> bool {
        safe_call(
            "series subscription",
            false,
            self.subscribe(SubscribeRequest::series(media, season)),
        )
        .await
    }

    async fn subscribe(&self, body: SubscribeRequest) -> Result<bool> {
        let payload = serde_json::to_value(&body).map_err(ClientError::Encode)?;
        let request = Request::post_json(api::subscribe_url(self.base_url()), payload);

        let response = self
            .authorized(request)
            .await?
            .map(|value| SubscribeResponse::from_body(&value))
            .unwrap_or_default();

        info!(
            name = %body.name,
            tmdbid = %body.tmdbid,
            season = ?body.season,
            success = response.success,
            message = response.message.as_deref().unwrap_or(""),
            "MoviePilot subscribe response"
        );
        Ok(response.success)
    }

    /// Current download tasks.
    ///
    /// `Some(vec![])` means the server answered and has nothing downloading;
    /// `None` means the tasks could not be fetched at all.
    pub async fn get_download_progress(&self) -> Option<Vec<DownloadTask>> {
        safe_call("download progress", None, self.fetch_download_tasks()).await
    }

    async fn fetch_download_tasks(&self) -> Result<Option<Vec<DownloadTask>>> {
        let Some(headers) = self.get_auth_headers().await? else {
            error!("Failed to obtain MoviePilot auth headers, download progress unavailable");
            return Ok(None);
        };

        let url = api::download_url(self.base_url());
        let Some(body) = self
            .dispatcher
            .dispatch(Request::get(url.clone()).with_headers(headers))
            .await?
        else {
            return Ok(None);
        };

        let tasks = parse_download_tasks(&url, body)?;
        if tasks.is_empty() {
            info!("No downloads in progress");
        }
        Ok(Some(tasks))
    }
}

fn parse_download_tasks(url: &str, body: Value) -> Result<Vec<DownloadTask>> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        // Decoded per entry; undecodable entries are dropped
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<DownloadTask>(item) {
                Ok(task) => Some(task),
                Err(e) => {
                    warn!(url, error = %e, "Skipping undecodable download task");
                    None
                }
            })
            .collect()),
        other => Err(ClientError::UnexpectedShape {
            url: url.to_string(),
            detail: format!("expected a list of download tasks, got {}", other),
        }),
    }
}

#[async_trait]
impl MediaServer for MoviePilotClient {
    fn server_name(&self) -> &str {
        "moviepilot"
    }

    async fn search_media_info(&self, title: &str) -> Option<Value> {
        MoviePilotClient::search_media_info(self, title).await
    }

    async fn list_all_seasons(&self, tmdb_id: &str) -> Option<Value> {
        MoviePilotClient::list_all_seasons(self, tmdb_id).await
    }

    async fn subscribe_movie(&self, media: &MediaRef) -> bool {
        MoviePilotClient::subscribe_movie(self, media).await
    }

    async fn subscribe_series(&self, media: &MediaRef, season: u32) -> bool {
        MoviePilotClient::subscribe_series(self, media, season).await
    }

    async fn get_download_progress(&self) -> Option<Vec<DownloadTask>> {
        MoviePilotClient::get_download_progress(self).await
    }

    async fn check_login(&self) -> bool {
        safe_call("login check", false, async {
            Ok::<_, ClientError>(self.get_auth_headers().await?.is_some())
        })
        .await
    }
}
