//! Resolution-shell rows of the XDS statistics table.
//!
//! ```text
//!  RESOLUTION  NUMBER OF REFLECTIONS  COMPLETENESS R-FACTOR R-FACTOR COMPARED I/SIGMA R-meas CC(1/2) Anomal SigAno Nano
//!    LIMIT   OBSERVED UNIQUE POSSIBLE   OF DATA  observed expected
//!      2.10   21000   4000    4100       97.6%    75.0%    80.0%   20900     2.01   82.0%   60.1*    -2  0.750  1800
//!     total  150000  30000   30500       98.4%     5.1%     5.3%  149000    20.10    5.5%   99.9*     5  0.810 12000
//! ```
//!
//! The same layout is printed for several signal/noise cut-offs and again
//! for subsets of the data, so rows are recognized by shape and numeric
//! ranges, and the last qualifying row of the file is kept.

use mxmeta_model::{parse_number, shift_decimal};

use super::line::strip_flag;

/// Number of tokens in a statistics table row.
pub const TABLE_ROW_TOKENS: usize = 14;

const RESOLUTION: usize = 0;
const OBSERVED: usize = 1;
const UNIQUE: usize = 2;
const POSSIBLE: usize = 3;
const COMPLETENESS: usize = 4;
const R_OBSERVED: usize = 5;
const R_EXPECTED: usize = 6;
const I_OVER_SIGMA: usize = 8;
const R_MEAS: usize = 9;
const CC_HALF: usize = 10;

/// Plausible high-resolution limits in Å, exclusive.
const RESOLUTION_RANGE: (f64, f64) = (0.3, 5.0);
/// Plausible mean I/σ, lower bound exclusive.
const I_OVER_SIGMA_RANGE: (f64, f64) = (1.19, 100.0);
/// Minimum CC(1/2) in percent, exclusive.
const MIN_CC_HALF: f64 = 50.0;

/// A table row with flags stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    tokens: Vec<String>,
}

impl TableRow {
    fn new(tokens: &[&str]) -> Option<Self> {
        (tokens.len() == TABLE_ROW_TOKENS).then(|| Self {
            tokens: tokens
                .iter()
                .map(|token| strip_flag(token).to_string())
                .collect(),
        })
    }

    /// Parses a resolution-shell row, applying the plausibility checks.
    pub fn shell(tokens: &[&str]) -> Option<Self> {
        let row = Self::new(tokens)?;
        row.is_plausible_shell().then_some(row)
    }

    /// Parses the `total` summary row.
    pub fn totals(tokens: &[&str]) -> Option<Self> {
        let row = Self::new(tokens)?;
        let numeric = [UNIQUE, COMPLETENESS, R_OBSERVED, I_OVER_SIGMA, R_MEAS, CC_HALF]
            .iter()
            .all(|&index| parse_number(row.token(index)).is_some());
        (row.token(RESOLUTION).eq_ignore_ascii_case("total") && numeric).then_some(row)
    }

    fn token(&self, index: usize) -> &str {
        self.tokens.get(index).map_or("", String::as_str)
    }

    fn number(&self, index: usize) -> Option<f64> {
        parse_number(self.token(index))
    }

    fn is_plausible_shell(&self) -> bool {
        let percent_columns = [COMPLETENESS, R_OBSERVED, R_EXPECTED]
            .iter()
            .all(|&index| self.token(index).ends_with('%'));
        let (Some(resolution), Some(i_over_sigma), Some(cc_half)) = (
            self.number(RESOLUTION),
            self.number(I_OVER_SIGMA),
            self.number(CC_HALF),
        ) else {
            tracing::trace!(row = %self.tokens.join(" "), "unparsable statistics row");
            return false;
        };
        percent_columns
            && resolution > RESOLUTION_RANGE.0
            && resolution < RESOLUTION_RANGE.1
            && i_over_sigma > I_OVER_SIGMA_RANGE.0
            && i_over_sigma <= I_OVER_SIGMA_RANGE.1
            && cc_half > MIN_CC_HALF
    }

    pub fn resolution(&self) -> &str {
        self.token(RESOLUTION)
    }

    pub fn observed(&self) -> &str {
        self.token(OBSERVED)
    }

    pub fn unique(&self) -> &str {
        self.token(UNIQUE)
    }

    pub fn possible(&self) -> &str {
        self.token(POSSIBLE)
    }

    /// Completeness in percent, without the `%` sign.
    pub fn completeness(&self) -> String {
        self.token(COMPLETENESS).trim_end_matches('%').to_string()
    }

    pub fn i_over_sigma(&self) -> &str {
        self.token(I_OVER_SIGMA)
    }

    /// R-merge as a fraction.
    pub fn r_merge(&self) -> Option<String> {
        shift_decimal(self.token(R_OBSERVED), -2)
    }

    /// R-meas as a fraction.
    pub fn r_meas(&self) -> Option<String> {
        shift_decimal(self.token(R_MEAS), -2)
    }

    /// CC(1/2) as a fraction.
    pub fn cc_half(&self) -> Option<String> {
        shift_decimal(self.token(CC_HALF), -2)
    }

    /// Observed over unique reflections, one decimal.
    pub fn redundancy(&self) -> Option<String> {
        let observed = self.number(OBSERVED)?;
        let unique = self.number(UNIQUE)?;
        (unique > 0.0).then(|| format!("{:.1}", observed / unique))
    }
}

/// The selected shell and its lower resolution bound.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedShell {
    pub row: TableRow,
    /// Resolution of the qualifying row printed before it in the same table.
    pub low_resolution: Option<String>,
}

/// Follows statistics tables through one scan, keeping the last qualifying
/// shell row and the last totals row.
#[derive(Debug, Default)]
pub(crate) struct ShellTracker {
    previous_in_table: Option<String>,
    selected: Option<SelectedShell>,
    totals: Option<TableRow>,
}

impl ShellTracker {
    /// Marks the start of a new table.
    pub fn start_table(&mut self) {
        self.previous_in_table = None;
    }

    /// Offers one tokenized line; returns true if it was a table row.
    pub fn observe(&mut self, tokens: &[&str]) -> bool {
        if let Some(row) = TableRow::shell(tokens) {
            let low_resolution = self.previous_in_table.replace(row.resolution().to_string());
            self.selected = Some(SelectedShell {
                row,
                low_resolution,
            });
            return true;
        }
        if let Some(row) = TableRow::totals(tokens) {
            self.totals = Some(row);
            self.previous_in_table = None;
            return true;
        }
        false
    }

    pub fn finish(self) -> (Option<SelectedShell>, Option<TableRow>) {
        (self.selected, self.totals)
    }
}
