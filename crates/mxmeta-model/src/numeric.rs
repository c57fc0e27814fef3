//! Numeric string policies.
//!
//! Values stay strings throughout the model; these helpers compare and
//! rescale them without losing the digits that were written.

/// Parses a trimmed decimal, ignoring a trailing `%` or `*`.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim().trim_end_matches(['%', '*']);
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Canonical spelling of a number, so that `"2.500"` and `"2.5"` compare equal.
pub fn normalize_number(value: &str) -> Option<String> {
    parse_number(value).map(|number| {
        // Avoid "-0".
        if number == 0.0 {
            "0".to_string()
        } else {
            format!("{number}")
        }
    })
}

/// True when both values parse and normalize to the same number.
pub fn numbers_equal(left: &str, right: &str) -> bool {
    match (normalize_number(left), normalize_number(right)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// Moves the decimal point of `value` by `places` (positive multiplies by
/// powers of ten), keeping every written digit.
///
/// Returns `None` when `value` is not a plain decimal number. Exponent
/// notation falls back to floating-point arithmetic.
pub fn shift_decimal(value: &str, places: i32) -> Option<String> {
    let trimmed = value.trim().trim_end_matches(['%', '*']);
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let plain = !(integer.is_empty() && fraction.is_empty())
        && integer.chars().chain(fraction.chars()).all(|ch| ch.is_ascii_digit());
    if !plain {
        let number = parse_number(trimmed)?;
        return normalize_number(&(number * 10f64.powi(places)).to_string());
    }

    let mut digits: String = format!("{integer}{fraction}");
    let mut point = i64::try_from(integer.len()).ok()? + i64::from(places);
    if point < 0 {
        let pad = usize::try_from(-point).ok()?;
        digits.insert_str(0, &"0".repeat(pad));
        point = 0;
    }
    let point = usize::try_from(point).ok()?;
    if point > digits.len() {
        let pad = point - digits.len();
        digits.push_str(&"0".repeat(pad));
    }
    let (head, tail) = digits.split_at(point);
    let head = head.trim_start_matches('0');
    let head = if head.is_empty() { "0" } else { head };

    let mut shifted = String::new();
    if negative && (head != "0" || tail.chars().any(|ch| ch != '0')) {
        shifted.push('-');
    }
    shifted.push_str(head);
    if !tail.is_empty() {
        shifted.push('.');
        shifted.push_str(tail);
    }
    Some(shifted)
}

/// Converts a length in meters to millimeters.
///
/// Blank input stays blank; input that is not a number yields an empty
/// string and is dropped downstream.
pub fn meters_to_millimeters(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    shift_decimal(value, 3).unwrap_or_default()
}
