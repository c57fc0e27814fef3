//! Source ingestion for crystallography metadata.
//!
//! Turns raw instrument and archive files into [`Document`]s: ordered
//! categories of row-aligned columns.
//!
//! # Features
//!
//! - **mmCIF reading**: first data block of a CIF 1.1 / mmCIF file, with
//!   `?` and `.` kept as distinct absent states
//! - **Text decoding**: UTF-8 when valid, legacy Windows-1252 otherwise
//! - **Line scanning**: marker-based recognition of XDS `CORRECT.LP` logs and
//!   miniCBF image headers, including selection of the high-resolution shell
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mxmeta_ingest::{LineScanner, ScanProfile, read_cif};
//!
//! let entry = read_cif(Path::new("1abc.cif"))?;
//! let log = LineScanner::new(ScanProfile::XdsCorrect).scan_file(Path::new("CORRECT.LP"))?;
//! ```
//!
//! [`Document`]: mxmeta_model::Document

mod cif;
mod encoding;
mod error;
mod scanner;

// === Error Types ===
pub use error::{IngestError, Result};

// === Text Decoding ===
pub use encoding::{decode_text, read_lines, read_text, read_text_until};

// === mmCIF Reading ===
pub use cif::{parse_cif, read_cif};

// === Line Scanning ===
pub use scanner::{
    BINARY_SECTION, Capture, Conversion, LineScanner, MarkerRule, Policy, ScanProfile,
    SelectedShell, TABLE_ROW_TOKENS, TableRow, normalize_line,
};
