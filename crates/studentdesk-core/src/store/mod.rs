//! Student table storage
//!
//! Holds the in-memory table, its binary file format and the errors
//! reported to the user interface.

pub mod codec;
pub mod error;
pub mod search;
pub mod students;

pub use search::Search;
pub use students::{Statistics, StudentStore};
