/// Result parser: raw competitor input → comparable numeric value.
///
/// Inputs arrive as free text typed by a judge: `"12,5"`, `"1:30"`, `"050"`,
/// `"150kg"`. Parsing is pure and never fails; anything that cannot be read is
/// flagged invalid and given the worst value for the event's direction.
use crate::constants::{DISTANCE_TARGET_OFFSET, SECONDS_PER_MINUTE};
use crate::types::EventType;

/// Numeric value of one raw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedValue {
    pub value: f64,
    pub is_invalid: bool,
}

impl ParsedValue {
    fn valid(value: f64) -> Self {
        ParsedValue { value, is_invalid: false }
    }

    fn invalid(event_type: EventType) -> Self {
        ParsedValue { value: worst_value(event_type), is_invalid: true }
    }
}

/// Placeholder value for invalid entries: sorts after every real result.
pub fn worst_value(event_type: EventType) -> f64 {
    match event_type {
        EventType::HighIsBetter => f64::NEG_INFINITY,
        EventType::LowIsBetter => f64::INFINITY,
    }
}

/// Trim, accept a comma as decimal separator, lower-case.
pub fn normalize(raw: &str) -> String {
    raw.trim().replacen(',', ".", 1).to_lowercase()
}

/// True when the input means "did not attempt": empty, or an explicit `0`.
///
/// An explicit zero is never a legitimate score, even for high-is-better events.
pub fn is_absent(raw: &str) -> bool {
    let normalized = normalize(raw);
    normalized.is_empty() || normalized == "0"
}

/// Parse one raw result for an event of the given direction.
pub fn parse_result(raw: &str, event_type: EventType) -> ParsedValue {
    let normalized = normalize(raw);
    if normalized.is_empty() || normalized == "0" {
        return ParsedValue::invalid(event_type);
    }

    let value = match event_type {
        EventType::LowIsBetter => parse_low(&normalized),
        EventType::HighIsBetter => leading_float(&normalized),
    };

    match value {
        Some(value) => ParsedValue::valid(value),
        None => ParsedValue::invalid(event_type),
    }
}

fn parse_low(normalized: &str) -> Option<f64> {
    // Leading zero (but not "0.x"): distance short of the target.
    if normalized.starts_with('0') && normalized.len() > 1 && !normalized.starts_with("0.") {
        let distance = leading_float(normalized)?;
        return Some(DISTANCE_TARGET_OFFSET - distance);
    }

    if let Some((minutes, rest)) = normalized.split_once(':') {
        let seconds = rest.split(':').next().unwrap_or_default();
        let minutes = leading_float(minutes)?;
        let seconds = leading_float(seconds)?;
        return Some(minutes * SECONDS_PER_MINUTE + seconds);
    }

    leading_float(normalized)
}

/// Parse the longest decimal number at the start of `s`, ignoring whatever
/// follows it (units such as `s` or `kg`).
///
/// Accepts an optional sign, digits with an optional fraction, and an optional
/// exponent. Returns `None` when there is no leading number or the number is
/// not finite.
fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(raw: &str, event_type: EventType) -> f64 {
        let parsed = parse_result(raw, event_type);
        assert!(!parsed.is_invalid, "{raw:?} should parse");
        parsed.value
    }

    #[test]
    fn test_empty_and_zero_are_invalid() {
        for raw in ["", "0", "  ", " 0 "] {
            let high = parse_result(raw, EventType::HighIsBetter);
            assert!(high.is_invalid);
            assert_eq!(high.value, f64::NEG_INFINITY);

            let low = parse_result(raw, EventType::LowIsBetter);
            assert!(low.is_invalid);
            assert_eq!(low.value, f64::INFINITY);
        }
    }

    #[test]
    fn test_minutes_seconds() {
        assert_eq!(value("1:30", EventType::LowIsBetter), 90.0);
        assert_eq!(value("2:05,5", EventType::LowIsBetter), 125.5);
        assert_eq!(value("1:30:45", EventType::LowIsBetter), 90.0);
    }

    #[test]
    fn test_minutes_seconds_malformed() {
        assert!(parse_result("1:xx", EventType::LowIsBetter).is_invalid);
        assert!(parse_result(":30", EventType::LowIsBetter).is_invalid);
        assert!(parse_result("a:30", EventType::LowIsBetter).is_invalid);
    }

    #[test]
    fn test_distance_from_target() {
        assert_eq!(value("050", EventType::LowIsBetter), 9950.0);
        assert_eq!(value("0120,5", EventType::LowIsBetter), 10000.0 - 120.5);
        // A leading zero takes precedence over the colon form.
        assert_eq!(value("0:45", EventType::LowIsBetter), 10000.0);
    }

    #[test]
    fn test_decimal_below_one_is_plain_time() {
        assert_eq!(value("0.5", EventType::LowIsBetter), 0.5);
        assert_eq!(value("0,75", EventType::LowIsBetter), 0.75);
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(value("12.5", EventType::LowIsBetter), 12.5);
        assert_eq!(value(" 12,5 ", EventType::HighIsBetter), 12.5);
        assert_eq!(value("150kg", EventType::HighIsBetter), 150.0);
        assert_eq!(value("45.2s", EventType::LowIsBetter), 45.2);
        assert_eq!(value("-3", EventType::HighIsBetter), -3.0);
    }

    #[test]
    fn test_unparseable_is_invalid() {
        for raw in ["abc", "x12", ".", "-", "inf", "nan", "1e999"] {
            assert!(parse_result(raw, EventType::HighIsBetter).is_invalid, "{raw:?}");
            assert!(parse_result(raw, EventType::LowIsBetter).is_invalid, "{raw:?}");
        }
    }

    #[test]
    fn test_is_absent() {
        assert!(is_absent(""));
        assert!(is_absent(" 0 "));
        assert!(!is_absent("0.0"));
        assert!(!is_absent("abc"));
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("12"), Some(12.0));
        assert_eq!(leading_float("12."), Some(12.0));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("+2.5e1x"), Some(25.0));
        assert_eq!(leading_float("3e"), Some(3.0));
        assert_eq!(leading_float("e3"), None);
        assert_eq!(leading_float(""), None);
    }
}
