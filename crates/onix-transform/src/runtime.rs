//! Audio runtime formatting from ONIX extent values.

/// Extent unit for fixed-width `HHHMMSS` digit strings.
pub const UNIT_HHHMMSS: &str = "16";
/// Extent unit for a (possibly fractional) number of minutes.
pub const UNIT_MINUTES: &str = "05";

/// Format an extent value as a runtime string.
///
/// - unit `16`: the value is sliced as-is into `HHH:MM:SS`; the first three
///   characters are hours, the next two minutes, the remainder seconds.
/// - unit `05`: the value is read as minutes and printed as `H:M` with no
///   zero padding, so `125.5` becomes `2:5`.
///
/// Returns `None` when either input is missing or empty, when the unit is
/// any other code, or when a minutes value does not start with a number.
pub fn decode_runtime(unit: Option<&str>, value: Option<&str>) -> Option<String> {
    let unit = unit.map(str::trim).filter(|unit| !unit.is_empty())?;
    let value = value.filter(|value| !value.is_empty())?;
    match unit {
        UNIT_HHHMMSS => Some(slice_fixed_width(value)),
        UNIT_MINUTES => format_minutes(value),
        _ => None,
    }
}

fn slice_fixed_width(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let hours: String = chars.iter().take(3).collect();
    let minutes: String = chars.iter().skip(3).take(2).collect();
    let seconds: String = chars.iter().skip(5).collect();
    format!("{hours}:{minutes}:{seconds}")
}

fn format_minutes(value: &str) -> Option<String> {
    let total = leading_number(value)?;
    let hours = (total / 60.0).floor() as i64;
    let minutes = (total % 60.0).floor() as i64;
    Some(format!("{hours}:{minutes}"))
}

/// The longest decimal number at the start of `value`, so `"125.5 min"`
/// reads as `125.5`. Trailing text is ignored.
fn leading_number(value: &str) -> Option<f64> {
    let text = value.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(end);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
