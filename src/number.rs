use crate::metrics::MetricValue;

/// Parses a captured numeric token, ignoring thousands separators.
///
/// Only plain decimals are accepted (`digits` or `digits.digits` once commas
/// are removed), so tokens with glued residue such as `"12,34a"` or
/// exponent-looking text like `"12e5"` yield `None`.
pub fn parse_number(token: &str) -> Option<f64> {
    let cleaned: String = token.chars().filter(|c| *c != ',').collect();

    let (integer, fraction) = match cleaned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (cleaned.as_str(), None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if !all_digits(integer) || !fraction.map_or(true, all_digits) {
        return None;
    }

    cleaned.parse::<f64>().ok()
}

/// Turns a captured token into a metric value, keeping the token verbatim
/// when it is not a number.
pub fn normalize_number(token: &str) -> MetricValue {
    match parse_number(token) {
        Some(value) => MetricValue::Number(value),
        None => MetricValue::Raw(token.to_string()),
    }
}
