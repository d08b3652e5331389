//! Student record model
//!
//! This module contains:
//! - The record types and their validation rules ([`student`])
//! - Fixed-capacity text fields shared with the file format ([`text`])

pub mod student;
pub mod text;

pub use student::{
    initial_subject_names, RecordId, Student, StudentFields, Subject, SubjectNames, SUBJECT_COUNT,
};
