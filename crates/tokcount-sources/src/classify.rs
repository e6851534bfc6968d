//! Text/binary classification
//!
//! Reads a bounded probe window from the start of a file and applies a fixed
//! byte rule:
//! - any NUL byte => binary
//! - more than 30% control bytes (0x00-0x1F except tab/LF/CR, plus 0x7F) => binary
//! - probe is not valid UTF-8 => binary
//!
//! Bytes >= 0x80 are left to the UTF-8 check so non-ASCII text is kept.
//! A multi-byte sequence cut off by the end of the window is not an error.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes read from the start of a file for classification
pub const PROBE_SIZE: usize = 8 * 1024;

/// Share of control bytes above which a probe is binary
pub const CONTROL_THRESHOLD: f64 = 0.30;

#[derive(Debug)]
pub enum Classification {
    Text,
    Binary,
    Unreadable(io::Error),
}

/// Classify a file by its probe window
pub fn classify(path: &Path) -> Classification {
    match read_probe(path) {
        Ok(probe) => classify_bytes(&probe),
        Err(e) => Classification::Unreadable(e),
    }
}

/// Apply the probe rule to an in-memory prefix
pub fn classify_bytes(probe: &[u8]) -> Classification {
    if probe.is_empty() {
        return Classification::Text;
    }

    if probe.contains(&0) {
        return Classification::Binary;
    }

    let control = probe.iter().filter(|&&b| is_control(b)).count();
    if control as f64 / probe.len() as f64 > CONTROL_THRESHOLD {
        return Classification::Binary;
    }

    match std::str::from_utf8(probe) {
        Ok(_) => Classification::Text,
        // error_len() == None: the input ended mid-sequence, which only the
        // window boundary can cause.
        Err(e) if e.error_len().is_none() && probe.len() == PROBE_SIZE => Classification::Text,
        Err(_) => Classification::Binary,
    }
}

fn is_control(b: u8) -> bool {
    (b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r')) || b == 0x7f
}

fn read_probe(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut probe = Vec::with_capacity(PROBE_SIZE);
    file.take(PROBE_SIZE as u64).read_to_end(&mut probe)?;
    Ok(probe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert!(matches!(classify_bytes(b"fn main() {\n\tprintln!(\"hi\");\r\n}\n"), Classification::Text));
        assert!(matches!(classify_bytes("héllo wörld, 日本語".as_bytes()), Classification::Text));
    }

    #[test]
    fn test_empty_is_text() {
        assert!(matches!(classify_bytes(b""), Classification::Text));
    }

    #[test]
    fn test_nul_byte_is_binary() {
        assert!(matches!(
            classify_bytes(b"hello\0world"),
            Classification::Binary
        ));
    }

    #[test]
    fn test_control_threshold() {
        // 3 of 10 bytes are control bytes: exactly 30%, not above it
        let at_threshold = b"\x01\x02\x03abcdefg";
        assert!(matches!(classify_bytes(at_threshold), Classification::Text));

        // 4 of 10
        let above = b"\x01\x02\x03\x7fabcdef";
        assert!(matches!(classify_bytes(above), Classification::Binary));
    }

    #[test]
    fn test_invalid_utf8_is_binary() {
        assert!(matches!(
            classify_bytes(b"caf\xe9 au lait"),
            Classification::Binary
        ));
    }

    #[test]
    fn test_truncated_sequence_at_window_end() {
        let mut probe = vec![b'a'; PROBE_SIZE - 1];
        // first byte of a two-byte sequence, cut off by the window
        probe.push(0xc3);
        assert!(matches!(classify_bytes(&probe), Classification::Text));

        // same truncation in a short file is a real decoding error
        assert!(matches!(
            classify_bytes(b"abc\xc3"),
            Classification::Binary
        ));
    }

    #[test]
    fn test_classify_files() {
        let dir = tempfile::tempdir().unwrap();

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "some notes\n").unwrap();
        assert!(matches!(classify(&text), Classification::Text));

        let binary = dir.path().join("blob.bin");
        std::fs::write(&binary, [0x89, b'P', b'N', b'G', 0x00, 0x01]).unwrap();
        assert!(matches!(classify(&binary), Classification::Binary));

        let missing = dir.path().join("missing.txt");
        assert!(matches!(classify(&missing), Classification::Unreadable(_)));
    }

    #[test]
    fn test_only_probe_window_is_inspected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late_nul.txt");

        let mut content = vec![b'x'; PROBE_SIZE];
        content.push(0);
        std::fs::write(&path, &content).unwrap();

        assert!(matches!(classify(&path), Classification::Text));
    }
}
