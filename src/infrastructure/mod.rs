//! Infrastructure layer for the backend bridge, configuration and logging
//!
//! Everything here touches the world outside the stores: the async command
//! boundary to the host, the settings file, and the log writers.

pub mod backend;
pub mod config;
pub mod logging;

// Re-export commonly used items
pub use backend::{BackendError, MangaBackend};
pub use config::{AppConfig, ConfigManager, LoggingConfig, UserConfig, defaults};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
