pub mod errors;
pub mod handler;
pub mod http;
pub mod traits;
pub mod types;

pub use errors::PollerError;
pub use handler::SessionPoller;
pub use http::HttpSessionCheck;
pub use traits::SessionCheck;
pub use types::{InvalidationReason, PollerConfig, PollerStatus, SessionVerdict};
