//! Application layer - Stores and command wrappers behind the views
//!
//! This module contains the observable stores each view binds to, the
//! command wrappers they call, and the route switch between views.

pub mod commands;
pub mod router;
pub mod search;
pub mod store;
pub mod title;

// Re-export commonly used items
pub use commands::CommandError;
pub use router::{Route, Router};
pub use search::SearchStore;
pub use store::{Derived, Store, Subscription};
pub use title::TitleStore;
