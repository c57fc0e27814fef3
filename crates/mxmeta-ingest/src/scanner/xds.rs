//! XDS `CORRECT.LP` profile.

use mxmeta_model::{Document, parse_number};
use mxmeta_standards::symbol_for_number_text;

use super::line::{normalize_line, tokens};
use super::rules::{Fields, MarkerRule, PrecedingLine, RuleEngine};
use super::shell::{SelectedShell, ShellTracker, TABLE_ROW_TOKENS, TableRow};

static RULES: [MarkerRule; 6] = [
    MarkerRule::first("SPACE_GROUP_NUMBER=", &["symmetry.Int_Tables_number"]),
    MarkerRule::first(
        "UNIT_CELL_CONSTANTS=",
        &[
            "cell.length_a",
            "cell.length_b",
            "cell.length_c",
            "cell.angle_alpha",
            "cell.angle_beta",
            "cell.angle_gamma",
        ],
    )
    .last(),
    MarkerRule::first("X-RAY_WAVELENGTH=", &["diffrn_radiation_wavelength.wavelength"]),
    MarkerRule::first(
        "DETECTOR_DISTANCE=",
        &["diffrn_measurement.sample_detector_distance"],
    ),
    MarkerRule::first("OSCILLATION_RANGE=", &["diffrn_scan_axis.angle_increment"]),
    MarkerRule::first("DETECTOR=", &["diffrn_detector.type"]),
];

/// Header of each resolution-dependent statistics table.
fn is_table_header(line: &str) -> bool {
    line.starts_with("SUBSET ") && line.ends_with("AS FUNCTION OF RESOLUTION")
}

pub(crate) fn scan<I, S>(lines: I) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fields = Fields::default();
    let mut engine = RuleEngine::new(&RULES);
    let mut shells = ShellTracker::default();
    let mut preceding = PrecedingLine::default();
    let mut low_resolution: Option<String> = None;

    for raw in lines {
        let line = normalize_line(raw.as_ref());
        if line.is_empty() {
            continue;
        }
        if is_table_header(&line) {
            shells.start_table();
            let held = preceding.take();
            if low_resolution.is_none() {
                low_resolution = held.as_deref().and_then(first_number);
            }
            continue;
        }
        let tokens = tokens(&line);
        if shells.observe(&tokens) {
            continue;
        }
        engine.observe(&tokens, &mut fields);
        // Rejected shell rows are table content too.
        if tokens.len() != TABLE_ROW_TOKENS {
            preceding.hold(&line);
        }
    }

    engine.finish(&mut fields);
    let (selected, totals) = shells.finish();
    if let Some(totals) = totals {
        write_totals(&totals, &mut fields);
    }
    if let Some(selected) = selected {
        write_shell(&selected, &mut fields);
    }
    if let Some(low) = low_resolution {
        fields.set("reflns.d_resolution_low", low);
    }
    if let Some(symbol) = fields
        .get("symmetry.Int_Tables_number")
        .and_then(symbol_for_number_text)
    {
        fields.set("symmetry.space_group_name_H-M", symbol);
    }
    fields.copy("diffrn_detector.type", "diffrn_detector.detector");
    fields.set("software.name", "XDS");
    fields.set("software.classification", "data reduction");

    tracing::debug!(
        shell = fields.get("reflns_shell.d_res_high").unwrap_or("none"),
        "scanned XDS CORRECT.LP"
    );
    fields.into_document("XDS_CORRECT")
}

fn first_number(line: &str) -> Option<String> {
    tokens(line)
        .into_iter()
        .find(|token| parse_number(token).is_some())
        .map(str::to_string)
}

fn write_totals(row: &TableRow, fields: &mut Fields) {
    fields.set("reflns.number_obs", row.unique());
    fields.set("reflns.percent_possible_obs", row.completeness());
    fields.set("reflns.pdbx_netI_over_sigmaI", row.i_over_sigma());
    if let Some(value) = row.r_merge() {
        fields.set("reflns.pdbx_Rmerge_I_obs", value);
    }
    if let Some(value) = row.r_meas() {
        fields.set("reflns.pdbx_Rrim_I_all", value);
    }
    if let Some(value) = row.cc_half() {
        fields.set("reflns.pdbx_CC_half", value);
    }
    if let Some(value) = row.redundancy() {
        fields.set("reflns.pdbx_redundancy", value);
    }
}

fn write_shell(shell: &SelectedShell, fields: &mut Fields) {
    let row = &shell.row;
    fields.set("reflns.d_resolution_high", row.resolution());
    fields.set("reflns_shell.d_res_high", row.resolution());
    if let Some(low) = &shell.low_resolution {
        fields.set("reflns_shell.d_res_low", low.as_str());
    }
    fields.set("reflns_shell.number_measured_obs", row.observed());
    fields.set("reflns_shell.number_unique_obs", row.unique());
    fields.set("reflns_shell.number_possible", row.possible());
    fields.set("reflns_shell.percent_possible_all", row.completeness());
    fields.set("reflns_shell.meanI_over_sigI_obs", row.i_over_sigma());
    if let Some(value) = row.r_merge() {
        fields.set("reflns_shell.Rmerge_I_obs", value);
    }
    if let Some(value) = row.r_meas() {
        fields.set("reflns_shell.pdbx_Rrim_I_all", value);
    }
    if let Some(value) = row.cc_half() {
        fields.set("reflns_shell.pdbx_CC_half", value);
    }
    if let Some(value) = row.redundancy() {
        fields.set("reflns_shell.pdbx_redundancy", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mxmeta_model::CategoryView;

    const LOG: &str = "
 ***** CORRECT *****
 SPACE_GROUP_NUMBER=   19
 UNIT_CELL_CONSTANTS=    50.10    60.20    70.30  90.000  90.000  90.000
 DETECTOR=PILATUS         MINIMUM_VALID_PIXEL_VALUE=0  OVERLOAD= 1048500
 X-RAY_WAVELENGTH=  0.979500
 DETECTOR_DISTANCE= 265.91
 OSCILLATION_RANGE=  0.100
 SPACE_GROUP_NUMBER=   1
 UNIT_CELL_CONSTANTS=    50.12    60.25    70.31  90.000  90.000  90.000

 INCLUDE_RESOLUTION_RANGE=  48.36  1.90
 SUBSET OF INTENSITY DATA WITH SIGNAL/NOISE >= -3.0 AS FUNCTION OF RESOLUTION
 RESOLUTION     NUMBER OF REFLECTIONS    COMPLETENESS R-FACTOR  R-FACTOR COMPARED I/SIGMA   R-meas  CC(1/2)  Anomal  SigAno   Nano
   LIMIT     OBSERVED  UNIQUE  POSSIBLE     OF DATA   observed  expected                                      Corr

     4.95        6912    1107      1130       98.0%       3.0%      3.2%     6905   45.10      3.3%    99.9*    12    1.020     900
     2.50       20000    4000      4100       97.6%      45.0%     48.0%    19900    3.01     49.0%    80.1*     2    0.800    1800
     1.90       15000    4000      4300       93.0%     150.0%    160.0%    14000    0.80    165.0%    30.2      0    0.700    1200
    total      150000   30000     30500       98.4%       5.1%      5.3%   149000   20.10      5.5%    99.9*     5    0.810   12000
";

    #[test]
    fn extracts_headline_parameters() {
        let document = scan(LOG.lines());
        assert_eq!(
            document.column("symmetry.Int_Tables_number").value_at(0),
            Some("19")
        );
        assert_eq!(
            document.column("symmetry.space_group_name_H-M").value_at(0),
            Some("P 21 21 21")
        );
        assert_eq!(document.column("cell.length_b").value_at(0), Some("60.25"));
        assert_eq!(
            document.column("diffrn_detector.type").value_at(0),
            Some("PILATUS")
        );
        assert_eq!(
            document
                .column("diffrn_measurement.sample_detector_distance")
                .value_at(0),
            Some("265.91")
        );
    }

    #[test]
    fn selects_last_plausible_shell() {
        let document = scan(LOG.lines());
        let shell = document.category("reflns_shell");
        assert_eq!(shell.row_count(), 1);
        assert_eq!(shell.value_at("d_res_high", 0), Some("2.50"));
        assert_eq!(shell.value_at("d_res_low", 0), Some("4.95"));
        assert_eq!(shell.value_at("pdbx_CC_half", 0), Some("0.801"));
        assert_eq!(
            document.column("reflns.d_resolution_high").value_at(0),
            Some("2.50")
        );
    }

    #[test]
    fn reads_totals_and_low_resolution() {
        let document = scan(LOG.lines());
        let reflns = document.category("reflns");
        assert_eq!(reflns.value_at("d_resolution_low", 0), Some("48.36"));
        assert_eq!(reflns.value_at("number_obs", 0), Some("30000"));
        assert_eq!(reflns.value_at("pdbx_Rmerge_I_obs", 0), Some("0.051"));
        assert_eq!(reflns.value_at("pdbx_netI_over_sigmaI", 0), Some("20.10"));
        assert_eq!(reflns.value_at("percent_possible_obs", 0), Some("98.4"));
    }

    const SECOND_CUTOFF: &str = "

 SUBSET OF INTENSITY DATA WITH SIGNAL/NOISE >=  0.0 AS FUNCTION OF RESOLUTION
 RESOLUTION     NUMBER OF REFLECTIONS    COMPLETENESS R-FACTOR  R-FACTOR COMPARED I/SIGMA   R-meas  CC(1/2)  Anomal  SigAno   Nano
   LIMIT     OBSERVED  UNIQUE  POSSIBLE     OF DATA   observed  expected                                      Corr

     4.95        6900    1100      1130       97.3%       3.0%      3.2%     6890   46.00      3.3%    99.9*    12    1.020     900
     2.20       19000    3900      4100       95.1%      40.0%     43.0%    18900    3.50     44.0%    85.0*     2    0.800    1800
     1.90       14000    3800      4300       88.4%     140.0%    150.0%    13000    0.90    155.0%    35.0      0    0.700    1200
    total      140000   29000     30500       95.1%       4.9%      5.1%   139000   21.00      5.3%    99.9*     5    0.810   12000
";

    #[test]
    fn repeated_tables_keep_the_range_limit() {
        let log = format!("{LOG}{SECOND_CUTOFF}");
        let document = scan(log.lines());
        let reflns = document.category("reflns");
        assert_eq!(reflns.value_at("d_resolution_low", 0), Some("48.36"));
        assert_eq!(reflns.value_at("number_obs", 0), Some("29000"));
        assert_eq!(reflns.value_at("pdbx_netI_over_sigmaI", 0), Some("21.00"));
        assert_eq!(reflns.value_at("d_resolution_high", 0), Some("2.20"));

        let shell = document.category("reflns_shell");
        assert_eq!(shell.row_count(), 1);
        assert_eq!(shell.value_at("d_res_high", 0), Some("2.20"));
        assert_eq!(shell.value_at("d_res_low", 0), Some("4.95"));
        assert_eq!(shell.value_at("pdbx_CC_half", 0), Some("0.850"));
    }

    #[test]
    fn unrelated_text_yields_only_software() {
        let document = scan(["nothing to see", "", "  = = ="]);
        assert_eq!(document.categories().len(), 1);
        assert_eq!(document.column("software.name").value_at(0), Some("XDS"));
    }
}
