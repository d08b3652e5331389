//! Student records and their editable profile
//!
//! A [`Student`] is one row of the table: a stable [`RecordId`], the
//! editable [`StudentFields`] profile and exactly [`SUBJECT_COUNT`] subject
//! entries with marks.

use super::text::{self, BRANCH_LEN, GENDER_LEN, NAME_LEN, PHONE_LEN, PROGRAM_LEN, REG_NUM_LEN};
use crate::store::error::{Result, StoreError};
use std::fmt;
use std::ops::RangeInclusive;

/// Number of subject entries on every record
pub const SUBJECT_COUNT: usize = 6;

/// Accepted student ages
pub const AGE_RANGE: RangeInclusive<i32> = 16..=60;

/// Accepted GPA values (10-point scale)
pub const GPA_RANGE: RangeInclusive<f32> = 0.0..=10.0;

/// Accepted marks for a single subject
pub const MARKS_RANGE: RangeInclusive<f32> = 0.0..=100.0;

/// Branches offered by the entry forms
pub const BRANCHES: &[&str] = &["CSE", "IT", "ECE", "EEE", "Mechanical", "Civil", "Other"];

/// Programs offered by the entry forms
pub const PROGRAMS: &[&str] = &["BTECH", "MBA", "DIPLOMA"];

/// Genders offered by the entry forms
pub const GENDERS: &[&str] = &["Male", "Female", "Other"];

/// Subject names applied to newly added students
pub type SubjectNames = [String; SUBJECT_COUNT];

/// The built-in subject names, "Subject 1" through "Subject 6"
pub fn initial_subject_names() -> SubjectNames {
    std::array::from_fn(|i| format!("Subject {}", i + 1))
}

/// Stable identifier of a record
///
/// Unlike a table position, an id never changes when other records are
/// deleted and is never handed out twice by the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u32);

impl RecordId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One subject entry: its name and the marks obtained
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subject {
    pub name: String,
    pub marks: f32,
}

impl Subject {
    pub fn new(name: impl Into<String>, marks: f32) -> Self {
        Self {
            name: name.into(),
            marks,
        }
    }

    /// Copy with the name cut to the subject name field capacity
    pub fn truncated(&self) -> Self {
        Self {
            name: text::truncate(&self.name, text::SUBJECT_NAME_LEN),
            marks: self.marks,
        }
    }

    pub(crate) fn validate(&self, slot: usize) -> Result<()> {
        if !MARKS_RANGE.contains(&self.marks) {
            return Err(StoreError::validation(
                "marks",
                format!(
                    "subject {} marks {} outside {}..={}",
                    slot + 1,
                    self.marks,
                    MARKS_RANGE.start(),
                    MARKS_RANGE.end()
                ),
            ));
        }
        Ok(())
    }
}

/// Editable profile of a student
#[derive(Debug, Clone, PartialEq)]
pub struct StudentFields {
    pub name: String,
    pub reg_num: String,
    pub branch: String,
    pub program: String,
    pub gender: String,
    pub phone: String,
    pub age: i32,
    /// GPA on a 10-point scale
    pub gpa: f32,
}

impl Default for StudentFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            reg_num: String::new(),
            branch: BRANCHES[0].to_string(),
            program: PROGRAMS[0].to_string(),
            gender: GENDERS[0].to_string(),
            phone: String::new(),
            age: 18,
            gpa: 0.0,
        }
    }
}

impl StudentFields {
    /// Profile with the two required fields set and everything else default
    pub fn new(name: impl Into<String>, reg_num: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reg_num: reg_num.into(),
            ..Default::default()
        }
    }

    /// Check required fields and numeric ranges
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(StoreError::validation("name", "must not be empty"));
        }
        if self.reg_num.is_empty() {
            return Err(StoreError::validation(
                "registration number",
                "must not be empty",
            ));
        }
        if !AGE_RANGE.contains(&self.age) {
            return Err(StoreError::validation(
                "age",
                format!(
                    "{} outside {}..={}",
                    self.age,
                    AGE_RANGE.start(),
                    AGE_RANGE.end()
                ),
            ));
        }
        if !GPA_RANGE.contains(&self.gpa) {
            return Err(StoreError::validation(
                "gpa",
                format!(
                    "{} outside {}..={}",
                    self.gpa,
                    GPA_RANGE.start(),
                    GPA_RANGE.end()
                ),
            ));
        }
        Ok(())
    }

    /// Copy with every text field cut to its field capacity
    pub fn truncated(&self) -> Self {
        Self {
            name: text::truncate(&self.name, NAME_LEN),
            reg_num: text::truncate(&self.reg_num, REG_NUM_LEN),
            branch: text::truncate(&self.branch, BRANCH_LEN),
            program: text::truncate(&self.program, PROGRAM_LEN),
            gender: text::truncate(&self.gender, GENDER_LEN),
            phone: text::truncate(&self.phone, PHONE_LEN),
            age: self.age,
            gpa: self.gpa,
        }
    }
}

/// A student record as held by the table
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: RecordId,
    pub profile: StudentFields,
    pub subjects: [Subject; SUBJECT_COUNT],
}

impl Student {
    /// New record whose subjects carry `subject_names` with zero marks
    pub fn new(id: RecordId, profile: StudentFields, subject_names: &SubjectNames) -> Self {
        Self {
            id,
            profile,
            subjects: std::array::from_fn(|i| Subject::new(subject_names[i].clone(), 0.0)),
        }
    }

    /// The six subject names of this record
    pub fn subject_names(&self) -> SubjectNames {
        std::array::from_fn(|i| self.subjects[i].name.clone())
    }

    /// Case-sensitive substring match on name or registration number
    ///
    /// An empty query matches every record.
    pub fn matches(&self, query: &str) -> bool {
        self.profile.name.contains(query) || self.profile.reg_num.contains(query)
    }
}
