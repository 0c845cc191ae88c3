pub mod download;
pub mod media;
pub mod subscribe;

pub use download::{DownloadMedia, DownloadTask};
pub use media::{search_candidates, MediaRef, MediaType, MOVIE_LABEL, SERIES_LABEL};
pub use subscribe::{SubscribeRequest, SubscribeResponse};
