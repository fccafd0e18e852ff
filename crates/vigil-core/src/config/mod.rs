pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use loading::load_hierarchy;
pub use types::{MonitorSettings, PollerSettings, ServerSettings, VigilConfig};
