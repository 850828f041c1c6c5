use serde::{Deserialize, Deserializer};

/// Coerce raw form input into a finite number.
///
/// Cleared or non-numeric fields become `0.0` so the calculators never see
/// `NaN` or infinities.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Replace non-finite values with `0.0`.
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Serde helper for monetary fields in persisted or imported profiles.
///
/// Accepts numbers, numeric strings and `null`; anything else reads as `0.0`.
pub fn lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Number(n) => finite_or_zero(n),
        LenientNumber::Text(s) => parse_amount(&s),
        LenientNumber::Other(_) => 0.0,
    };
    Ok(value)
}
