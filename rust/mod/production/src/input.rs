//! Text-to-number conversion for form input and free-text DTO fields.

use std::sync::LazyLock;

use regex::Regex;

// ASCII digits only: `f64::from_str` can't parse other scripts' digits.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(\.[0-9]+)?)").expect("leading number pattern"));

/// Coerce raw form text into a number.
///
/// This is the only coercion point: blank, non-numeric and non-finite
/// input all become `0.0` here, never later.
pub fn parse_numeric_input(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// First decimal number in `text`, e.g. `3.5` from `"3.5mm stitch"`.
pub fn extract_leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_input() {
        assert_eq!(parse_numeric_input("2400"), 2400.0);
        assert_eq!(parse_numeric_input(" 0.00001 "), 0.00001);
        assert_eq!(parse_numeric_input(""), 0.0);
        assert_eq!(parse_numeric_input("abc"), 0.0);
        assert_eq!(parse_numeric_input("NaN"), 0.0);
        assert_eq!(parse_numeric_input("inf"), 0.0);
        assert_eq!(parse_numeric_input("-3"), -3.0);
    }

    #[test]
    fn test_extract_leading_number() {
        assert_eq!(extract_leading_number("3.5mm stitch"), Some(3.5));
        assert_eq!(extract_leading_number("SL 2.75 / 3.1"), Some(2.75));
        assert_eq!(extract_leading_number("approx 3 mm"), Some(3.0));
        assert_eq!(extract_leading_number("no numbers"), None);
        assert_eq!(extract_leading_number(""), None);
    }

    #[test]
    fn test_extract_skips_non_ascii_digits() {
        assert_eq!(extract_leading_number("SL \u{663} / 3.5 mm"), Some(3.5));
        assert_eq!(extract_leading_number("\u{966}\u{967}"), None);
    }

    #[test]
    fn test_extract_trailing_dot_is_not_decimal() {
        assert_eq!(extract_leading_number("4. mm"), Some(4.0));
    }
}
