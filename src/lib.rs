//! manga-desk - Desktop manga browser state layer
//!
//! The webview-facing state of a desktop manga browser: reactive stores
//! for the search and title views, the chapter feed pagination behind the
//! navigation strip, and the async command bridge everything sits on.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;

// Re-export the pieces a host shell wires together
pub use application::{Route, Router, SearchStore, TitleStore};
pub use domain::{PageWindow, Pager};
pub use infrastructure::{AppConfig, BackendError, ConfigManager, MangaBackend};
