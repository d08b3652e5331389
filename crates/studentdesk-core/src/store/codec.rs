//! Binary data file format
//!
//! ## File Format
//!
//! ```text
//! [i32_le count][count x 496-byte record]
//! ```
//!
//! Each record is a fixed-layout block, all integers and floats little-endian:
//!
//! | field       | offset | size                                   |
//! |-------------|--------|----------------------------------------|
//! | id (i32)    | 0      | 4                                      |
//! | name        | 4      | 50                                     |
//! | reg_num     | 54     | 20                                     |
//! | branch      | 74     | 30                                     |
//! | program     | 104    | 20                                     |
//! | gender      | 124    | 10                                     |
//! | phone       | 134    | 15                                     |
//! | (padding)   | 149    | 3                                      |
//! | age (i32)   | 152    | 4                                      |
//! | gpa (f32)   | 156    | 4                                      |
//! | subjects    | 160    | 6 x 56: name 50, padding 2, marks f32  |
//!
//! Text fields are NUL-padded byte buffers, not length-prefixed. Padding is
//! written as zero and ignored on read. There is no version tag: a file is
//! accepted only when its length is exactly `4 + count * 496`.

use crate::records::text::{
    self, BRANCH_LEN, GENDER_LEN, NAME_LEN, PHONE_LEN, PROGRAM_LEN, REG_NUM_LEN,
    SUBJECT_NAME_LEN,
};
use crate::records::{RecordId, Student, StudentFields, Subject, SUBJECT_COUNT};
use thiserror::Error;

/// Size of the record count header in bytes
pub const HEADER_SIZE: usize = 4;

/// Size of one encoded record in bytes
pub const RECORD_SIZE: usize = 496;

const ID_AT: usize = 0;
const NAME_AT: usize = 4;
const REG_NUM_AT: usize = 54;
const BRANCH_AT: usize = 74;
const PROGRAM_AT: usize = 104;
const GENDER_AT: usize = 124;
const PHONE_AT: usize = 134;
const AGE_AT: usize = 152;
const GPA_AT: usize = 156;
const SUBJECTS_AT: usize = 160;
const SUBJECT_STRIDE: usize = 56;
const SUBJECT_MARKS_AT: usize = 52;

/// Reasons a data file is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("file is {len} bytes, too short for the record count")]
    MissingHeader { len: usize },

    #[error("record count {count} outside 0..={max}")]
    BadCount { count: i32, max: usize },

    #[error("expected {expected} bytes for {count} records, found {actual}")]
    LengthMismatch {
        count: usize,
        expected: usize,
        actual: usize,
    },
}

/// Exact file length for a table of `count` records
pub fn file_len(count: usize) -> usize {
    HEADER_SIZE + count * RECORD_SIZE
}

/// Encode the full table: count header followed by every record
pub fn encode_table(students: &[Student]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(file_len(students.len()));
    buf.extend_from_slice(&(students.len() as i32).to_le_bytes());

    let mut record = [0u8; RECORD_SIZE];
    for student in students {
        encode_record(student, &mut record);
        buf.extend_from_slice(&record);
    }
    buf
}

/// Decode a full table, refusing counts above `max_records`
pub fn decode_table(bytes: &[u8], max_records: usize) -> Result<Vec<Student>, CodecError> {
    if bytes.len() < HEADER_SIZE {
        return Err(CodecError::MissingHeader { len: bytes.len() });
    }

    let count = read_i32(bytes, 0);
    if count < 0 || count as usize > max_records {
        return Err(CodecError::BadCount {
            count,
            max: max_records,
        });
    }

    let count = count as usize;
    let expected = file_len(count);
    if bytes.len() != expected {
        return Err(CodecError::LengthMismatch {
            count,
            expected,
            actual: bytes.len(),
        });
    }

    Ok(bytes[HEADER_SIZE..]
        .chunks_exact(RECORD_SIZE)
        .map(decode_record)
        .collect())
}

/// Encode one record into a zeroed fixed-size block
pub fn encode_record(student: &Student, out: &mut [u8; RECORD_SIZE]) {
    out.fill(0);
    let profile = &student.profile;

    write_i32(out, ID_AT, student.id.get() as i32);
    text::write_fixed(&profile.name, &mut out[NAME_AT..NAME_AT + NAME_LEN]);
    text::write_fixed(&profile.reg_num, &mut out[REG_NUM_AT..REG_NUM_AT + REG_NUM_LEN]);
    text::write_fixed(&profile.branch, &mut out[BRANCH_AT..BRANCH_AT + BRANCH_LEN]);
    text::write_fixed(&profile.program, &mut out[PROGRAM_AT..PROGRAM_AT + PROGRAM_LEN]);
    text::write_fixed(&profile.gender, &mut out[GENDER_AT..GENDER_AT + GENDER_LEN]);
    text::write_fixed(&profile.phone, &mut out[PHONE_AT..PHONE_AT + PHONE_LEN]);
    write_i32(out, AGE_AT, profile.age);
    write_f32(out, GPA_AT, profile.gpa);

    for (slot, subject) in student.subjects.iter().enumerate() {
        let at = SUBJECTS_AT + slot * SUBJECT_STRIDE;
        text::write_fixed(&subject.name, &mut out[at..at + SUBJECT_NAME_LEN]);
        write_f32(out, at + SUBJECT_MARKS_AT, subject.marks);
    }
}

/// Decode one record from a block of exactly [`RECORD_SIZE`] bytes
///
/// Negative ids decode as 0, which the store treats as unassigned.
pub fn decode_record(block: &[u8]) -> Student {
    let profile = StudentFields {
        name: text::read_fixed(&block[NAME_AT..NAME_AT + NAME_LEN]),
        reg_num: text::read_fixed(&block[REG_NUM_AT..REG_NUM_AT + REG_NUM_LEN]),
        branch: text::read_fixed(&block[BRANCH_AT..BRANCH_AT + BRANCH_LEN]),
        program: text::read_fixed(&block[PROGRAM_AT..PROGRAM_AT + PROGRAM_LEN]),
        gender: text::read_fixed(&block[GENDER_AT..GENDER_AT + GENDER_LEN]),
        phone: text::read_fixed(&block[PHONE_AT..PHONE_AT + PHONE_LEN]),
        age: read_i32(block, AGE_AT),
        gpa: read_f32(block, GPA_AT),
    };

    let subjects: [Subject; SUBJECT_COUNT] = std::array::from_fn(|slot| {
        let at = SUBJECTS_AT + slot * SUBJECT_STRIDE;
        Subject {
            name: text::read_fixed(&block[at..at + SUBJECT_NAME_LEN]),
            marks: read_f32(block, at + SUBJECT_MARKS_AT),
        }
    });

    Student {
        id: RecordId::new(read_i32(block, ID_AT).max(0) as u32),
        profile,
        subjects,
    }
}

fn read_i32(buf: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn read_f32(buf: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn write_i32(buf: &mut [u8], at: usize, value: i32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

fn write_f32(buf: &mut [u8], at: usize, value: f32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::initial_subject_names;

    fn sample(id: u32, name: &str, reg: &str) -> Student {
        let mut profile = StudentFields::new(name, reg);
        profile.branch = "ECE".to_string();
        profile.program = "MBA".to_string();
        profile.gender = "Female".to_string();
        profile.phone = "5550100".to_string();
        profile.age = 21;
        profile.gpa = 8.25;
        let mut student = Student::new(RecordId::new(id), profile, &initial_subject_names());
        student.subjects[2] = Subject::new("Physics", 91.5);
        student
    }

    #[test]
    fn test_layout_matches_offsets() {
        let mut block = [0u8; RECORD_SIZE];
        encode_record(&sample(7, "Anna", "ANN001"), &mut block);

        assert_eq!(&block[0..4], &7i32.to_le_bytes());
        assert_eq!(&block[4..9], b"Anna\0");
        assert_eq!(&block[54..61], b"ANN001\0");
        assert_eq!(&block[74..77], b"ECE");
        assert_eq!(&block[104..107], b"MBA");
        assert_eq!(&block[124..130], b"Female");
        assert_eq!(&block[134..141], b"5550100");
        assert_eq!(&block[149..152], &[0, 0, 0]);
        assert_eq!(&block[152..156], &21i32.to_le_bytes());
        assert_eq!(&block[156..160], &8.25f32.to_le_bytes());

        let physics = SUBJECTS_AT + 2 * SUBJECT_STRIDE;
        assert_eq!(&block[physics..physics + 7], b"Physics");
        assert_eq!(
            &block[physics + 52..physics + 56],
            &91.5f32.to_le_bytes()
        );
        assert_eq!(SUBJECTS_AT + SUBJECT_COUNT * SUBJECT_STRIDE, RECORD_SIZE);
    }

    #[test]
    fn test_table_header_and_length() {
        let table = vec![sample(1, "Anna", "R1"), sample(2, "Bob", "R2")];
        let bytes = encode_table(&table);
        assert_eq!(bytes.len(), file_len(2));
        assert_eq!(&bytes[0..4], &2i32.to_le_bytes());

        let decoded = decode_table(&bytes, 100).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn test_empty_table() {
        let bytes = encode_table(&[]);
        assert_eq!(bytes, 0i32.to_le_bytes().to_vec());
        assert!(decode_table(&bytes, 100).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_missing_header() {
        assert_eq!(
            decode_table(&[1, 0], 100),
            Err(CodecError::MissingHeader { len: 2 })
        );
    }

    #[test]
    fn test_rejects_count_above_capacity() {
        let mut bytes = 101i32.to_le_bytes().to_vec();
        bytes.resize(file_len(101), 0);
        assert_eq!(
            decode_table(&bytes, 100),
            Err(CodecError::BadCount {
                count: 101,
                max: 100
            })
        );
    }

    #[test]
    fn test_rejects_negative_count() {
        let bytes = (-1i32).to_le_bytes();
        assert!(matches!(
            decode_table(&bytes, 100),
            Err(CodecError::BadCount { count: -1, .. })
        ));
    }

    #[test]
    fn test_rejects_truncated_and_trailing_bytes() {
        let bytes = encode_table(&[sample(1, "Anna", "R1")]);

        let truncated = &bytes[..bytes.len() - 10];
        assert!(matches!(
            decode_table(truncated, 100),
            Err(CodecError::LengthMismatch { count: 1, .. })
        ));

        let mut trailing = bytes.clone();
        trailing.push(0);
        assert!(matches!(
            decode_table(&trailing, 100),
            Err(CodecError::LengthMismatch { count: 1, .. })
        ));
    }

    #[test]
    fn test_negative_id_decodes_as_unassigned() {
        let mut block = [0u8; RECORD_SIZE];
        encode_record(&sample(1, "Anna", "R1"), &mut block);
        block[0..4].copy_from_slice(&(-5i32).to_le_bytes());
        assert_eq!(decode_record(&block).id, RecordId::new(0));
    }

    #[test]
    fn test_unterminated_buffer_reads_full_width() {
        let mut block = [0u8; RECORD_SIZE];
        block[GENDER_AT..GENDER_AT + GENDER_LEN].copy_from_slice(b"ABCDEFGHIJ");
        assert_eq!(decode_record(&block).profile.gender, "ABCDEFGHIJ");
    }
}
