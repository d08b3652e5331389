//! User interface module
//!
//! Contains:
//! - The main application window and its pages ([`app`])
//! - Form state for profiles and marksheets ([`forms`])
//! - Light and dark colour themes ([`theme`])

pub mod app;
pub mod forms;
pub mod theme;

pub use app::{Page, Status, StudentApp};
