//! Heuristic line scanner.
//!
//! Instrument logs and image headers have no declared schema. A profile
//! recognizes fields by a literal marker token plus a token offset and
//! produces the same [`Document`] shape as the mmCIF reader, keyed by the
//! mmCIF `category.item` names the mapping catalog expects.

mod cbf;
mod line;
mod rules;
mod shell;
mod xds;

use std::fmt;
use std::path::Path;

use mxmeta_model::Document;

use crate::encoding::read_lines;
use crate::error::Result;

pub use cbf::BINARY_SECTION;
pub use line::normalize_line;
pub use rules::{Capture, Conversion, MarkerRule, Policy};
pub use shell::{SelectedShell, TABLE_ROW_TOKENS, TableRow};

/// The text layouts the scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanProfile {
    /// XDS `CORRECT.LP` processing log.
    XdsCorrect,
    /// Free-text header of a miniCBF image.
    CbfHeader,
}

impl ScanProfile {
    pub const ALL: [ScanProfile; 2] = [ScanProfile::XdsCorrect, ScanProfile::CbfHeader];

    pub fn name(self) -> &'static str {
        match self {
            ScanProfile::XdsCorrect => "XDS CORRECT.LP",
            ScanProfile::CbfHeader => "miniCBF header",
        }
    }

    /// Guesses the profile from file contents.
    pub fn sniff(text: &str) -> Option<Self> {
        if text.starts_with("###CBF") || text.contains("_array_data.header_contents") {
            return Some(ScanProfile::CbfHeader);
        }
        let xds = text.lines().any(|line| {
            let line = line.trim_start();
            line.starts_with("UNIT_CELL_CONSTANTS=")
                || line.starts_with("SPACE_GROUP_NUMBER=")
                || line.contains("CORRECT *****")
        });
        xds.then_some(ScanProfile::XdsCorrect)
    }
}

impl fmt::Display for ScanProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs one profile over a line sequence.
///
/// All scan state lives inside a single call, so a scanner can be reused
/// and shared between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScanner {
    profile: ScanProfile,
}

impl LineScanner {
    pub fn new(profile: ScanProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> ScanProfile {
        self.profile
    }

    /// Scans decoded lines. Unrecognized lines are ignored, so this never
    /// fails; a source with nothing recognizable yields a near-empty document.
    pub fn scan<I, S>(&self, lines: I) -> Document
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.profile {
            ScanProfile::XdsCorrect => xds::scan(lines),
            ScanProfile::CbfHeader => cbf::scan(lines),
        }
    }

    pub fn scan_text(&self, text: &str) -> Document {
        self.scan(text.lines())
    }

    /// Reads, decodes and scans a file.
    pub fn scan_file(&self, path: &Path) -> Result<Document> {
        let lines = read_lines(path)?;
        tracing::debug!(
            path = %path.display(),
            profile = %self.profile,
            lines = lines.len(),
            "scanning text source"
        );
        Ok(self.scan(&lines))
    }
}
