pub mod dispatch;
pub mod error;
pub mod moviepilot;
pub mod traits;

pub use dispatch::{Dispatcher, Headers, Request, RequestMethod};
pub use error::ClientError;
pub use moviepilot::MoviePilotClient;
pub use traits::MediaServer;
