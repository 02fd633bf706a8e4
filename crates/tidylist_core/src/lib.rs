//! Core todo-list logic for Tidylist.
//! This crate owns the collection, its two persistence modes, and the view
//! projection; presentation toolkits stay outside.

pub mod db;
pub mod logging;
pub mod model;
pub mod order;
pub mod persist;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{now_epoch_ms, Priority, Todo, TodoId, TodoValidationError};
pub use order::{display_cmp, sorted_for_display};
pub use persist::local::LocalStore;
pub use persist::remote::{RemoteBackend, RemoteError, RemoteResult, TodoPatch};
pub use persist::{PersistAdapter, PersistError, PersistMode, PersistResult};
pub use store::list_store::ListStore;
pub use view::edit::{EditKey, EditOutcome, EditSession};
pub use view::render::{ListView, RenderEngine, TodoRow};
pub use view::{View, ViewEvent};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
