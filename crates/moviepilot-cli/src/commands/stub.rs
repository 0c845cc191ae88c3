use async_trait::async_trait;
use moviepilot_client::MediaServer;
use moviepilot_models::{DownloadTask, MediaRef};
use serde_json::Value;
use std::sync::Mutex;

/// Canned `MediaServer` answers for command tests.
#[derive(Default)]
pub struct StubServer {
    pub search: Option<Value>,
    pub seasons: Option<Value>,
    pub subscribe_ok: bool,
    pub progress: Option<Vec<DownloadTask>>,
    pub logged_in: bool,
    pub subscriptions: Mutex<Vec<(MediaRef, Option<u32>)>>,
}

#[async_trait]
impl MediaServer for StubServer {
    fn server_name(&self) -> &str {
        "stub"
    }

    async fn search_media_info(&self, _title: &str) -> Option<Value> {
        self.search.clone()
    }

    async fn list_all_seasons(&self, _tmdb_id: &str) -> Option<Value> {
        self.seasons.clone()
    }

    async fn subscribe_movie(&self, media: &MediaRef) -> bool {
        self.subscriptions.lock().unwrap().push((media.clone(), None));
        self.subscribe_ok
    }

    async fn subscribe_series(&self, media: &MediaRef, season: u32) -> bool {
        self.subscriptions.lock().unwrap().push((media.clone(), Some(season)));
        self.subscribe_ok
    }

    async fn get_download_progress(&self) -> Option<Vec<DownloadTask>> {
        self.progress.clone()
    }

    async fn check_login(&self) -> bool {
        self.logged_in
    }
}
