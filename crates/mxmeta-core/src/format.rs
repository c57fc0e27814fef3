//! Source formats and format detection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use mxmeta_ingest::ScanProfile;
use serde::{Deserialize, Serialize};

/// Kind of file an import reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// mmCIF / PDBx archive entry.
    Cif,
    /// XDS `CORRECT.LP` processing log.
    Xds,
    /// miniCBF image header.
    Cbf,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 3] = [SourceFormat::Cif, SourceFormat::Xds, SourceFormat::Cbf];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Cif => "cif",
            SourceFormat::Xds => "xds",
            SourceFormat::Cbf => "cbf",
        }
    }

    /// Scanner profile for the line-oriented formats.
    pub fn scan_profile(self) -> Option<ScanProfile> {
        match self {
            SourceFormat::Cif => None,
            SourceFormat::Xds => Some(ScanProfile::XdsCorrect),
            SourceFormat::Cbf => Some(ScanProfile::CbfHeader),
        }
    }

    /// Guesses the format from the file name alone.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        if file_name.eq_ignore_ascii_case("CORRECT.LP") {
            return Some(SourceFormat::Xds);
        }
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "cif" | "mmcif" => Some(SourceFormat::Cif),
            "cbf" => Some(SourceFormat::Cbf),
            "lp" => Some(SourceFormat::Xds),
            _ => None,
        }
    }

    /// Guesses the format from file contents.
    pub fn sniff(text: &str) -> Option<Self> {
        if let Some(profile) = ScanProfile::sniff(text) {
            return Some(match profile {
                ScanProfile::XdsCorrect => SourceFormat::Xds,
                ScanProfile::CbfHeader => SourceFormat::Cbf,
            });
        }
        let first = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))?;
        first
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data_"))
            .then_some(SourceFormat::Cif)
    }

    /// File name first, contents second.
    pub fn detect(path: &Path, text: &str) -> Option<Self> {
        Self::from_path(path).or_else(|| Self::sniff(text))
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cif" | "mmcif" => Ok(SourceFormat::Cif),
            "xds" | "correct.lp" => Ok(SourceFormat::Xds),
            "cbf" | "minicbf" => Ok(SourceFormat::Cbf),
            other => Err(format!("unknown source format: {other}")),
        }
    }
}
