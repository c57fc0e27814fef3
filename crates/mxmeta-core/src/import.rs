//! Import facade: file in, metadata tree out.

use std::path::Path;

use anyhow::Context;
use mxmeta_ingest::{BINARY_SECTION, LineScanner, parse_cif, read_text_until};
use mxmeta_model::Document;

use crate::assemble::{MetadataTree, assemble};
use crate::catalog::mmcif_catalog;
use crate::error::{ImportError, Result};
use crate::format::SourceFormat;
use crate::options::ImportOptions;
use crate::sink::MetadataSink;

/// A source read into the category model.
#[derive(Debug)]
pub struct LoadedSource {
    pub format: SourceFormat,
    pub document: Document,
}

/// Reads `path` into a [`Document`], detecting the format unless `format`
/// is given.
///
/// Reading stops at a CBF binary section; only the text header is decoded.
pub fn load_document(path: &Path, format: Option<SourceFormat>) -> Result<LoadedSource> {
    let source_name = path.display().to_string();
    let text = read_text_until(path, BINARY_SECTION)
        .map_err(|e| ImportError::from_ingest(&source_name, e))?;
    let format = match format.or_else(|| SourceFormat::detect(path, &text)) {
        Some(format) => format,
        None => return Err(ImportError::UnknownFormat { source_name }),
    };
    let document = match format.scan_profile() {
        Some(profile) => LineScanner::new(profile).scan_text(&text),
        None => parse_cif(&text).map_err(|e| ImportError::from_ingest(&source_name, e))?,
    };
    tracing::debug!(
        source = %source_name,
        format = %format,
        categories = document.categories().len(),
        "loaded source"
    );
    Ok(LoadedSource { format, document })
}

/// Maps a loaded document through the catalog.
pub fn extract(document: &Document, options: &ImportOptions) -> MetadataTree {
    assemble(document, &mmcif_catalog(document, options))
}

/// Reads and maps one file.
pub fn import_file(path: &Path, options: &ImportOptions) -> Result<MetadataTree> {
    let loaded = load_document(path, options.format)?;
    Ok(extract(&loaded.document, options))
}

/// Reads and maps one file, then hands the tree to `sink`.
pub fn import_into(
    path: &Path,
    options: &ImportOptions,
    sink: &mut dyn MetadataSink,
) -> anyhow::Result<MetadataTree> {
    let tree = import_file(path, options)?;
    sink.publish(&tree)
        .with_context(|| format!("failed to publish metadata for {}", path.display()))?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "nothing here\n").unwrap();
        assert!(matches!(
            load_document(&path, None),
            Err(ImportError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn forced_format_skips_detection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "# Wavelength 0.9795 A\n").unwrap();
        let loaded = load_document(&path, Some(SourceFormat::Cbf)).unwrap();
        assert_eq!(loaded.format, SourceFormat::Cbf);
        assert_eq!(
            loaded
                .document
                .column("diffrn_radiation_wavelength.wavelength")
                .value_at(0),
            Some("0.9795")
        );
    }

    #[test]
    fn cbf_binary_payload_is_not_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyso_1_0001.cbf");
        let mut bytes = "###CBF: VERSION 1.5\n\
                         _array_data.header_contents\n\
                         # Detector: PILATUS 6M 2θ, S/N 60-0100\n\
                         --CIF-BINARY-FORMAT-SECTION--\n"
            .as_bytes()
            .to_vec();
        bytes.extend_from_slice(&[0x0C, 0x1A, 0x04, 0xD5, 0xFF, 0xFE, 0x80, 0x0A]);
        std::fs::write(&path, bytes).unwrap();

        let loaded = load_document(&path, None).unwrap();
        assert_eq!(loaded.format, SourceFormat::Cbf);
        // The header is valid UTF-8; decoding the payload too would force Windows-1252.
        assert_eq!(
            loaded.document.column("diffrn_detector.type").value_at(0),
            Some("PILATUS 6M 2θ")
        );
    }
}
