//! Studentdesk - student records desktop application
//!
//! This library re-exports the records table from `studentdesk-core` and
//! adds the application layers around it: persisted settings ([`config`])
//! and the egui front-end ([`ui`]).

pub mod config;
pub mod ui;

pub use studentdesk_core::records;
pub use studentdesk_core::store;

pub use studentdesk_core::{
    RecordId, Statistics, Student, StudentFields, StudentStore, StoreError, Subject,
};
pub use studentdesk_core::{DEFAULT_DATA_FILE, MAX_STUDENTS};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
