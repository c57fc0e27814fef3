//! Text decoding for instrument output.
//!
//! Beamline software writes plain ASCII, but headers and logs regularly
//! carry 8-bit characters (`Å`, `°`) from the legacy Windows-1252 code page.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::error::{IngestError, Result};

/// Decodes `bytes` as UTF-8 when valid, otherwise as Windows-1252.
///
/// A UTF-8 byte order mark is dropped.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes),
    ) {
        return text;
    }
    tracing::debug!("source is not UTF-8, decoding as Windows-1252");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text
}

/// Reads and decodes a whole file.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| read_error(path, e))?;
    Ok(decode_text(&bytes).into_owned())
}

/// Reads and decodes the lines before the first one containing `marker`.
///
/// Nothing past the marker line is read, so binary payloads after a text
/// header stay on disk. Without the marker this reads the whole file.
pub fn read_text_until(path: &Path, marker: &str) -> Result<String> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| read_error(path, e))?;
        if read == 0 || contains(&line, marker.as_bytes()) {
            break;
        }
        bytes.extend_from_slice(&line);
    }
    Ok(decode_text(&bytes).into_owned())
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

fn read_error(path: &Path, error: io::Error) -> IngestError {
    if error.kind() == io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Reads a file as decoded lines, line terminators removed.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    Ok(read_text(path)?.lines().map(str::to_string).collect())
}
