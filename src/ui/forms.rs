//! Form state for the entry pages
//!
//! Forms hold what the user is typing and only touch the store when they
//! are submitted. They refer to records by [`RecordId`] so that a delete
//! elsewhere in the table cannot make them write to the wrong row.

use anyhow::{anyhow, Result};
use studentdesk_core::records::{RecordId, Student, StudentFields, Subject, SUBJECT_COUNT};
use studentdesk_core::StudentStore;

/// Resolve `id` to its current table position
fn position_of(store: &StudentStore, id: RecordId) -> Result<usize> {
    store
        .position_of(id)
        .ok_or_else(|| anyhow!("Student #{} no longer exists", id))
}

/// Profile form used by the add page and the edit window
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentForm {
    pub fields: StudentFields,
}

impl StudentForm {
    /// Form pre-filled with the profile of `student`
    pub fn for_student(student: &Student) -> Self {
        Self {
            fields: student.profile.clone(),
        }
    }

    /// Reset every input to its default
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Append the form as a new student
    ///
    /// The form is cleared on success and kept as typed on failure.
    ///
    /// # Returns
    /// Id of the new record
    pub fn submit_new(&mut self, store: &mut StudentStore) -> Result<RecordId> {
        let position = store.append(self.fields.clone())?;
        let id = store
            .get(position)
            .map(|s| s.id)
            .ok_or_else(|| anyhow!("Appended student missing at position {}", position))?;
        self.clear();
        Ok(id)
    }

    /// Overwrite the profile of record `id` with the form
    pub fn submit_edit(&self, store: &mut StudentStore, id: RecordId) -> Result<()> {
        let position = position_of(store, id)?;
        store.update(position, self.fields.clone())?;
        Ok(())
    }
}

/// Marksheet of one student: six subject names and their marks
#[derive(Debug, Clone, PartialEq)]
pub struct MarksheetForm {
    pub id: RecordId,
    pub name: String,
    pub reg_num: String,
    pub subjects: [Subject; SUBJECT_COUNT],
}

impl MarksheetForm {
    pub fn for_student(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.profile.name.clone(),
            reg_num: student.profile.reg_num.clone(),
            subjects: student.subjects.clone(),
        }
    }

    /// Store the subjects; their names become the defaults for new students
    pub fn submit(&self, store: &mut StudentStore) -> Result<()> {
        let position = position_of(store, self.id)?;
        store.update_marks(position, self.subjects.clone())?;
        Ok(())
    }

    /// Sum of all marks on the sheet
    pub fn total(&self) -> f32 {
        self.subjects.iter().map(|s| s.marks).sum()
    }
}
