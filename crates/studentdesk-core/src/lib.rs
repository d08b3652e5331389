//! Studentdesk Core - student records table and its on-disk format
//!
//! This library holds everything below the user interface:
//! - The record model and field limits ([`records`])
//! - The fixed-layout binary file format ([`store::codec`])
//! - The bounded, persistent [`StudentStore`] ([`store`])
//!
//! The store is single-threaded and synchronous. Every mutating call
//! rewrites the whole data file before it returns.

pub mod records;
pub mod store;

pub use records::{RecordId, Student, StudentFields, Subject, SubjectNames, SUBJECT_COUNT};
pub use store::error::{Result, StoreError};
pub use store::{Search, Statistics, StudentStore};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of records the table can hold
pub const MAX_STUDENTS: usize = 100;

/// Data file name used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "students.dat";
