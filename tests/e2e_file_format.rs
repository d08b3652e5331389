//! E2E tests for the on-disk data file
//!
//! Files are built byte by byte in the legacy layout (i32 count header
//! followed by 496-byte little-endian records) and fed to the store, then
//! the bytes the store writes are checked field by field.

use studentdesk::store::codec::{file_len, HEADER_SIZE, RECORD_SIZE};
use studentdesk::{RecordId, StoreError, StudentFields, StudentStore, Subject};

fn put_text(block: &mut [u8], at: usize, text: &str) {
    block[at..at + text.len()].copy_from_slice(text.as_bytes());
}

/// One record as the legacy program laid it out in memory
fn legacy_record(id: i32, name: &str, reg: &str, age: i32, gpa: f32) -> Vec<u8> {
    let mut block = vec![0u8; RECORD_SIZE];
    block[0..4].copy_from_slice(&id.to_le_bytes());
    put_text(&mut block, 4, name);
    put_text(&mut block, 54, reg);
    put_text(&mut block, 74, "CSE");
    put_text(&mut block, 104, "BTECH");
    put_text(&mut block, 124, "Female");
    put_text(&mut block, 134, "9876543210");
    // Struct padding before age holds garbage in files written by the old program
    block[149..152].copy_from_slice(&[0xAA, 0xBB, 0xCC]);
    block[152..156].copy_from_slice(&age.to_le_bytes());
    block[156..160].copy_from_slice(&gpa.to_le_bytes());
    for slot in 0..6 {
        let at = 160 + slot * 56;
        put_text(&mut block, at, &format!("Paper {}", slot + 1));
        block[at + 52..at + 56].copy_from_slice(&(60.0f32 + slot as f32).to_le_bytes());
    }
    block
}

fn legacy_file(records: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = (records.len() as i32).to_le_bytes().to_vec();
    for record in records {
        bytes.extend_from_slice(record);
    }
    bytes
}

#[test]
fn test_load_legacy_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.dat");
    std::fs::write(
        &path,
        legacy_file(&[
            legacy_record(1, "Anna", "R001", 19, 8.25),
            legacy_record(2, "Bob", "R002", 21, 6.5),
        ]),
    )
    .unwrap();

    let store = StudentStore::open(&path).unwrap();
    assert_eq!(store.len(), 2);

    let anna = &store.students()[0];
    assert_eq!(anna.id, RecordId::new(1));
    assert_eq!(anna.profile.name, "Anna");
    assert_eq!(anna.profile.reg_num, "R001");
    assert_eq!(anna.profile.branch, "CSE");
    assert_eq!(anna.profile.program, "BTECH");
    assert_eq!(anna.profile.gender, "Female");
    assert_eq!(anna.profile.phone, "9876543210");
    assert_eq!(anna.profile.age, 19);
    assert_eq!(anna.profile.gpa, 8.25);
    assert_eq!(anna.subjects[2].name, "Paper 3");
    assert_eq!(anna.subjects[2].marks, 62.0);

    assert_eq!(store.default_subject_names()[0], "Paper 1");
    assert_eq!(store.statistics().count, 2);
}

#[test]
fn test_saved_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.dat");
    let mut store = StudentStore::open(&path).unwrap();

    let mut fields = StudentFields::new("Anna", "R001");
    fields.branch = "IT".to_string();
    fields.program = "MBA".to_string();
    fields.gender = "Female".to_string();
    fields.phone = "5550100".to_string();
    fields.age = 22;
    fields.gpa = 9.5;
    store.append(fields).unwrap();
    let subjects = std::array::from_fn(|i| Subject::new(format!("S{}", i + 1), 10.0 * i as f32));
    store.update_marks(0, subjects).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), file_len(1));
    assert_eq!(bytes.len(), HEADER_SIZE + RECORD_SIZE);
    assert_eq!(&bytes[0..4], &1i32.to_le_bytes());

    let block = &bytes[HEADER_SIZE..];
    assert_eq!(&block[0..4], &1i32.to_le_bytes());
    assert_eq!(&block[4..9], b"Anna\0");
    assert_eq!(&block[54..59], b"R001\0");
    assert_eq!(&block[74..77], b"IT\0");
    assert_eq!(&block[104..108], b"MBA\0");
    assert_eq!(&block[124..131], b"Female\0");
    assert_eq!(&block[134..142], b"5550100\0");
    assert_eq!(&block[149..152], &[0, 0, 0]);
    assert_eq!(&block[152..156], &22i32.to_le_bytes());
    assert_eq!(&block[156..160], &9.5f32.to_le_bytes());

    let last = 160 + 5 * 56;
    assert_eq!(&block[last..last + 3], b"S6\0");
    assert_eq!(&block[last + 50..last + 52], &[0, 0]);
    assert_eq!(&block[last + 52..last + 56], &50.0f32.to_le_bytes());
}

#[test]
fn test_rejects_wrong_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.dat");

    let mut truncated = legacy_file(&[legacy_record(1, "Anna", "R001", 19, 8.0)]);
    truncated.pop();
    std::fs::write(&path, &truncated).unwrap();
    assert!(matches!(
        StudentStore::open(&path).unwrap_err(),
        StoreError::CorruptData { .. }
    ));

    let mut trailing = legacy_file(&[legacy_record(1, "Anna", "R001", 19, 8.0)]);
    trailing.push(0);
    std::fs::write(&path, &trailing).unwrap();
    assert!(matches!(
        StudentStore::open(&path).unwrap_err(),
        StoreError::CorruptData { .. }
    ));
}

#[test]
fn test_rejects_bad_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.dat");

    for count in [-1i32, 101] {
        std::fs::write(&path, count.to_le_bytes()).unwrap();
        let err = StudentStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }), "count {count}");
    }

    std::fs::write(&path, b"").unwrap();
    assert!(matches!(
        StudentStore::open(&path).unwrap_err(),
        StoreError::CorruptData { .. }
    ));
}

#[test]
fn test_empty_table_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.dat");
    std::fs::write(&path, 0i32.to_le_bytes()).unwrap();

    let mut store = StudentStore::open(&path).unwrap();
    assert!(store.is_empty());

    store.append(StudentFields::new("Anna", "R1")).unwrap();
    store.delete_at(0).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), 0i32.to_le_bytes());
}

#[test]
fn test_unassigned_and_duplicate_ids_are_renumbered() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.dat");
    std::fs::write(
        &path,
        legacy_file(&[
            legacy_record(5, "Anna", "R1", 19, 8.0),
            legacy_record(5, "Bob", "R2", 20, 7.0),
            legacy_record(0, "Carl", "R3", 21, 6.0),
            legacy_record(-3, "Dana", "R4", 22, 5.0),
        ]),
    )
    .unwrap();

    let mut store = StudentStore::open(&path).unwrap();
    let ids: Vec<u32> = store.students().iter().map(|s| s.id.get()).collect();
    assert_eq!(ids, vec![5, 6, 7, 8]);

    let pos = store.append(StudentFields::new("Eve", "R5")).unwrap();
    assert_eq!(store.students()[pos].id, RecordId::new(9));
}

#[test]
fn test_unterminated_text_is_read_to_buffer_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.dat");
    let full_name = "N".repeat(50);
    std::fs::write(
        &path,
        legacy_file(&[legacy_record(1, &full_name, "R1", 19, 8.0)]),
    )
    .unwrap();

    let store = StudentStore::open(&path).unwrap();
    assert_eq!(store.students()[0].profile.name, full_name);
    // The registration number that follows is not swallowed
    assert_eq!(store.students()[0].profile.reg_num, "R1");
}
