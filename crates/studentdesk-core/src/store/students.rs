//! Bounded, ordered, persistent table of student records
//!
//! The table lives in memory and the whole data file is rewritten after
//! every mutation, so memory and file agree whenever a call returns.
//! Positions are dense (`0..len`) and shift when a record is deleted.
//! Anything that must survive a mutation (a selected row, an open editor)
//! should hold the record's [`RecordId`] and resolve it again with
//! [`StudentStore::position_of`].
//!
//! Callers learn about changes by polling [`StudentStore::revision`], which
//! moves forward after every successful load or mutation.

use super::codec;
use super::error::{Result, StoreError};
use super::search::Search;
use crate::records::{
    initial_subject_names, RecordId, Student, StudentFields, Subject, SubjectNames, SUBJECT_COUNT,
};
use crate::MAX_STUDENTS;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Aggregate figures over the whole table
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    /// Number of records
    pub count: usize,
    /// Mean GPA, 0.0 for an empty table
    pub average_gpa: f64,
}

/// State restored when a mutation cannot be persisted
struct Snapshot {
    students: Vec<Student>,
    default_subject_names: SubjectNames,
    next_id: u32,
}

/// Student table backed by a single binary data file
#[derive(Debug)]
pub struct StudentStore {
    /// Data file location
    path: PathBuf,
    /// Records in table order
    students: Vec<Student>,
    /// Subject names given to newly appended records
    default_subject_names: SubjectNames,
    /// Next id to hand out
    next_id: u32,
    /// Bumped after every successful load or mutation
    revision: u64,
}

impl StudentStore {
    /// Create an empty store for `path` without touching the file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            students: Vec::with_capacity(MAX_STUDENTS),
            default_subject_names: initial_subject_names(),
            next_id: 1,
            revision: 0,
        }
    }

    /// Create a store for `path` and load the file if it exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Replace the table with the contents of the data file
    ///
    /// A missing file yields an empty table. On any error the current table
    /// is left untouched. When the loaded table is not empty, each non-empty
    /// subject name of the first record becomes the default for that slot.
    pub fn load(&mut self) -> Result<()> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.path.display(),
                    "No data file found, starting with an empty table"
                );
                self.students.clear();
                self.next_id = 1;
                self.revision += 1;
                return Ok(());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let mut students =
            codec::decode_table(&bytes, MAX_STUDENTS).map_err(|e| StoreError::CorruptData {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let (next_id, reassigned) = assign_unique_ids(&mut students);
        if reassigned > 0 {
            tracing::warn!(
                path = %self.path.display(),
                reassigned,
                "Data file contained missing or duplicate ids, assigned fresh ones"
            );
        }

        if let Some(first) = students.first() {
            for (slot, subject) in self.default_subject_names.iter_mut().zip(&first.subjects) {
                if !subject.name.is_empty() {
                    *slot = subject.name.clone();
                }
            }
        }

        tracing::info!(
            path = %self.path.display(),
            count = students.len(),
            "Loaded student table"
        );

        self.students = students;
        self.next_id = next_id;
        self.revision += 1;
        Ok(())
    }

    /// Write the whole table to the data file
    ///
    /// The bytes go to a temporary file in the same directory which then
    /// replaces the data file, so an interrupted save leaves the previous
    /// file intact.
    pub fn save(&self) -> Result<()> {
        let bytes = codec::encode_table(&self.students);
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            count = self.students.len(),
            bytes = bytes.len(),
            "Saved student table"
        );
        Ok(())
    }

    /// Append a new record and persist the table
    ///
    /// The record gets a fresh id and the current default subject names with
    /// zero marks. Text fields longer than their capacity are cut.
    ///
    /// # Returns
    /// Position of the new record
    pub fn append(&mut self, fields: StudentFields) -> Result<usize> {
        fields.validate()?;
        if self.students.len() >= MAX_STUDENTS {
            return Err(StoreError::CapacityExceeded {
                capacity: MAX_STUDENTS,
            });
        }

        let before = self.snapshot();
        let id = RecordId::new(self.next_id);
        self.next_id += 1;
        self.students.push(Student::new(
            id,
            fields.truncated(),
            &self.default_subject_names,
        ));
        self.commit(before)?;

        let position = self.students.len() - 1;
        tracing::debug!(%id, position, "Appended student");
        Ok(position)
    }

    /// Replace the profile of the record at `position` and persist
    ///
    /// Subjects and marks are left as they are.
    pub fn update(&mut self, position: usize, fields: StudentFields) -> Result<()> {
        self.check_position(position)?;
        fields.validate()?;

        let before = self.snapshot();
        self.students[position].profile = fields.truncated();
        self.commit(before)?;

        tracing::debug!(position, "Updated student profile");
        Ok(())
    }

    /// Replace the six subjects of the record at `position` and persist
    ///
    /// The subject names also become the defaults for records appended
    /// afterwards. Existing records keep their own names.
    pub fn update_marks(
        &mut self,
        position: usize,
        subjects: [Subject; SUBJECT_COUNT],
    ) -> Result<()> {
        self.check_position(position)?;
        for (slot, subject) in subjects.iter().enumerate() {
            subject.validate(slot)?;
        }

        let before = self.snapshot();
        let subjects = subjects.map(|s| s.truncated());
        self.default_subject_names = std::array::from_fn(|i| subjects[i].name.clone());
        self.students[position].subjects = subjects;
        self.commit(before)?;

        tracing::debug!(position, "Updated marksheet");
        Ok(())
    }

    /// Remove the record at `position`, shifting later records down
    ///
    /// # Returns
    /// The removed record
    pub fn delete_at(&mut self, position: usize) -> Result<Student> {
        self.check_position(position)?;

        let before = self.snapshot();
        let removed = self.students.remove(position);
        self.commit(before)?;

        tracing::debug!(id = %removed.id, position, "Deleted student");
        Ok(removed)
    }

    /// Records whose name or registration number contains `query`
    ///
    /// Matching is case-sensitive; an empty query yields the whole table in
    /// order. Nothing is persisted.
    pub fn search<'a>(&'a self, query: &'a str) -> Search<'a> {
        Search::new(&self.students, query)
    }

    /// Record count and mean GPA
    pub fn statistics(&self) -> Statistics {
        let count = self.students.len();
        if count == 0 {
            return Statistics::default();
        }
        let total: f64 = self.students.iter().map(|s| f64::from(s.profile.gpa)).sum();
        Statistics {
            count,
            average_gpa: total / count as f64,
        }
    }

    /// All records in table order
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Record at `position`, if any
    pub fn get(&self, position: usize) -> Option<&Student> {
        self.students.get(position)
    }

    /// Current position of the record with `id`
    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.students.iter().position(|s| s.id == id)
    }

    /// Record with `id`, if it is still in the table
    pub fn get_by_id(&self, id: RecordId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Maximum number of records
    pub fn capacity(&self) -> usize {
        MAX_STUDENTS
    }

    /// Data file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Change counter, bumped after every successful load or mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Subject names that the next appended record will get
    pub fn default_subject_names(&self) -> &SubjectNames {
        &self.default_subject_names
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position >= self.students.len() {
            return Err(StoreError::IndexOutOfRange {
                position,
                len: self.students.len(),
            });
        }
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            students: self.students.clone(),
            default_subject_names: self.default_subject_names.clone(),
            next_id: self.next_id,
        }
    }

    /// Persist a mutation, or undo it if the file cannot be written
    fn commit(&mut self, before: Snapshot) -> Result<()> {
        match self.save() {
            Ok(()) => {
                self.revision += 1;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Save failed, rolling back in-memory change");
                self.students = before.students;
                self.default_subject_names = before.default_subject_names;
                self.next_id = before.next_id;
                Err(e)
            }
        }
    }
}

/// Give every record a unique non-zero id
///
/// Records keep their stored id unless it is zero or already taken by an
/// earlier record; those get ids above the largest one in the table.
///
/// # Returns
/// The next free id and how many records were renumbered
fn assign_unique_ids(students: &mut [Student]) -> (u32, usize) {
    let mut next = students
        .iter()
        .map(|s| s.id.get())
        .max()
        .unwrap_or(0)
        .saturating_add(1);
    let mut seen = HashSet::with_capacity(students.len());
    let mut reassigned = 0;

    for student in students.iter_mut() {
        let raw = student.id.get();
        if raw == 0 || !seen.insert(raw) {
            student.id = RecordId::new(next);
            seen.insert(next);
            next = next.saturating_add(1);
            reassigned += 1;
        }
    }
    (next, reassigned)
}
