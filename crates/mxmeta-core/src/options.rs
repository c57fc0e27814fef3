//! Import options.

use std::path::Path;

use mxmeta_model::IndexValue;
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};
use crate::format::SourceFormat;

/// Citation id selected when none is configured.
pub const PRIMARY_CITATION: &str = "primary";

/// Selection configuration for one import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Diffraction set whose statistics are reported; the default set when
    /// unset.
    pub diffraction_set: Option<String>,
    /// `citation.id` of the reference to report.
    pub citation_selector: String,
    /// Forces the source format instead of detecting it.
    pub format: Option<SourceFormat>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            diffraction_set: None,
            citation_selector: PRIMARY_CITATION.to_string(),
            format: None,
        }
    }
}

impl ImportOptions {
    /// Loads options from a JSON file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ImportError::OptionsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let options = serde_json::from_str(&content).map_err(|source| {
            ImportError::OptionsParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), "loaded import options");
        Ok(options)
    }

    pub fn with_diffraction_set(mut self, set: impl Into<String>) -> Self {
        self.diffraction_set = Some(set.into());
        self
    }

    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation_selector = citation.into();
        self
    }

    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The active diffraction set as an index value.
    pub fn active_set(&self) -> IndexValue {
        IndexValue::from_option(self.diffraction_set.as_deref())
    }
}
