//! Fixed-capacity text fields
//!
//! Each text field of a record occupies a fixed-size byte buffer in the data
//! file. One byte is always kept for the NUL terminator, so a field with a
//! buffer of `N` bytes holds at most `N - 1` bytes of UTF-8. Longer input is
//! cut silently at the last character boundary that fits.

/// Buffer size of the student name field
pub const NAME_LEN: usize = 50;
/// Buffer size of the registration number field
pub const REG_NUM_LEN: usize = 20;
/// Buffer size of the branch field
pub const BRANCH_LEN: usize = 30;
/// Buffer size of the program field
pub const PROGRAM_LEN: usize = 20;
/// Buffer size of the gender field
pub const GENDER_LEN: usize = 10;
/// Buffer size of the phone field
pub const PHONE_LEN: usize = 15;
/// Buffer size of a subject name
pub const SUBJECT_NAME_LEN: usize = 50;

/// Number of leading bytes of `text` that fit a `buf_len`-byte field
fn fitting_len(text: &str, buf_len: usize) -> usize {
    let max = buf_len.saturating_sub(1);
    if text.len() <= max {
        return text.len();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Cut `text` so that it fits a field buffer of `buf_len` bytes
pub fn truncate(text: &str, buf_len: usize) -> String {
    text[..fitting_len(text, buf_len)].to_string()
}

/// Write `text` into a field buffer, zero-filling whatever is left
pub fn write_fixed(text: &str, buf: &mut [u8]) {
    buf.fill(0);
    let len = fitting_len(text, buf.len());
    buf[..len].copy_from_slice(&text.as_bytes()[..len]);
}

/// Read a field buffer up to its first NUL (or its full length)
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, since
/// data files may have been written by tools that did not enforce an encoding.
pub fn read_fixed(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_kept() {
        assert_eq!(truncate("Anna", NAME_LEN), "Anna");
    }

    #[test]
    fn test_long_ascii_keeps_first_49() {
        let long = "x".repeat(60);
        let cut = truncate(&long, NAME_LEN);
        assert_eq!(cut.len(), 49);
        assert_eq!(cut, "x".repeat(49));
    }

    #[test]
    fn test_cut_respects_char_boundary() {
        // 48 ASCII bytes + a 2-byte character = 50 bytes, one too many
        let text = format!("{}é", "a".repeat(48));
        assert_eq!(truncate(&text, NAME_LEN), "a".repeat(48));
    }

    #[test]
    fn test_write_then_read() {
        let mut buf = [0xAAu8; 10];
        write_fixed("Male", &mut buf);
        assert_eq!(&buf[..5], b"Male\0");
        assert!(buf[4..].iter().all(|&b| b == 0));
        assert_eq!(read_fixed(&buf), "Male");
    }

    #[test]
    fn test_read_without_terminator() {
        assert_eq!(read_fixed(b"ABCDE"), "ABCDE");
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy() {
        let text = read_fixed(&[b'A', 0xFF, b'B', 0]);
        assert_eq!(text, "A\u{FFFD}B");
    }
}
