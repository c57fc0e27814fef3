//! miniCBF header profile.
//!
//! PILATUS and EIGER images carry a free-text header inside
//! `_array_data.header_contents`, one `# Key value unit` line per setting.

use mxmeta_model::Document;

use super::line::{normalize_line, tokens};
use super::rules::{Fields, MarkerRule, RuleEngine};

/// Start of the binary image payload; nothing after it is text.
pub const BINARY_SECTION: &str = "--CIF-BINARY-FORMAT-SECTION--";

static RULES: [MarkerRule; 5] = [
    MarkerRule::first("Detector:", &["diffrn_detector.type"]).rest_until(','),
    MarkerRule::first("Wavelength", &["diffrn_radiation_wavelength.wavelength"]),
    MarkerRule::first(
        "Detector_distance",
        &["diffrn_measurement.sample_detector_distance"],
    )
    .meters(),
    MarkerRule::first("Exposure_time", &["diffrn_scan.integration_time"]),
    MarkerRule::first("Angle_increment", &["diffrn_scan_axis.angle_increment"]),
];

pub(crate) fn scan<I, S>(lines: I) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fields = Fields::default();
    let mut engine = RuleEngine::new(&RULES);
    let mut scanned = 0usize;

    for raw in lines {
        let raw = raw.as_ref();
        if raw.contains(BINARY_SECTION) {
            break;
        }
        scanned += 1;
        let line = normalize_line(raw);
        if !line.is_empty() {
            engine.observe(&tokens(&line), &mut fields);
        }
    }
    engine.finish(&mut fields);
    // The model name doubles as the detector class for vocabulary lookup.
    fields.copy("diffrn_detector.type", "diffrn_detector.detector");

    tracing::debug!(
        lines = scanned,
        detector = fields.get("diffrn_detector.type").unwrap_or("none"),
        "scanned miniCBF header"
    );
    fields.into_document("miniCBF")
}
