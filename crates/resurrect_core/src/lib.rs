//! Core domain logic for the item resurrection app.
//! This crate owns the item store; UI layers only call into it.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{resolve_data_path, DATA_PATH_ENV, DEFAULT_DATA_FILE_NAME};
pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LogSettings, LoggingError,
};
pub use model::item::{Item, ItemValidationError};
pub use repo::item_repo::{
    ItemRepository, JsonFileItemRepository, LoadReport, LoadStatus, RepoError, RepoResult,
};
pub use search::substring::{search_items, SearchHit};
pub use service::item_store::{ItemStore, StoreError, StoreResult};

/// Store backed by the JSON snapshot file used by every front end.
pub type FileItemStore = ItemStore<JsonFileItemRepository>;

/// Opens the JSON-file store at `path`.
pub fn open_file_store(path: impl Into<std::path::PathBuf>) -> FileItemStore {
    ItemStore::open(JsonFileItemRepository::new(path))
}

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
