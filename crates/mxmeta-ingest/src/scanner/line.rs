//! Line normalization and tokenizing.

/// Puts a space after every `=` and collapses runs of whitespace.
///
/// XDS prints both `DETECTOR=PILATUS` and `X-RAY_WAVELENGTH=  0.9795`; after
/// normalization the marker is always its own token.
pub fn normalize_line(line: &str) -> String {
    line.replace('=', "= ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokens of a normalized line.
pub fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Strips the trailing significance flags XDS appends to table cells.
pub fn strip_flag(token: &str) -> &str {
    token.trim_end_matches('*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_markers_from_values() {
        assert_eq!(
            normalize_line("  DETECTOR=PILATUS   OVERLOAD=  1048500 "),
            "DETECTOR= PILATUS OVERLOAD= 1048500"
        );
        assert_eq!(normalize_line("\t"), "");
    }

    #[test]
    fn flags_are_stripped() {
        assert_eq!(strip_flag("99.9*"), "99.9");
        assert_eq!(strip_flag("12"), "12");
    }
}
