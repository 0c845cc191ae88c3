use async_trait::async_trait;
use moviepilot_models::{DownloadTask, MediaRef};
use serde_json::Value;

/// Remote operations offered by a media server.
///
/// None of these fail loudly: errors are logged by the implementation and
/// surface as `None` or `false`.
#[async_trait]
pub trait MediaServer: Send + Sync {
    fn server_name(&self) -> &str;

    // Lookup
    async fn search_media_info(&self, title: &str) -> Option<Value>;
    async fn list_all_seasons(&self, tmdb_id: &str) -> Option<Value>;

    // Subscriptions
    async fn subscribe_movie(&self, media: &MediaRef) -> bool;
    async fn subscribe_series(&self, media: &MediaRef, season: u32) -> bool;

    /// `Some(empty)` when nothing is downloading, `None` when the tasks could not be fetched.
    async fn get_download_progress(&self) -> Option<Vec<DownloadTask>>;

    /// Whether the configured credentials currently yield a token.
    async fn check_login(&self) -> bool;
}
