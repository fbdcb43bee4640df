//! Core domain logic for the research tracker.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use config::TrackerConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::conference::{Conference, ConferenceInput};
pub use model::date::{days_until, days_until_on, format_date};
pub use model::journal::{Journal, JournalInput};
pub use model::paper::{progress_from_status, Paper, PaperInput, PaperStatus};
pub use model::record::{RecordId, ValidationError};
pub use service::session::{Session, SessionError, SessionResult};
pub use store::collections::{load_collections, save_collections, Collections};
pub use store::keys::{StorageKeys, LAST_USER_KEY};
pub use store::kv::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use view::dashboard::{dashboard, Dashboard, UrgentPaper};
pub use view::{filter_papers, StatusFilter};

/// Minimal health-check API for wiring probes.
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
