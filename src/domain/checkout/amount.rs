//! Lenient minor-unit amounts.
//!
//! Widget payloads are loosely typed: an amount may arrive as an integer, a
//! float, a numeric string, `null` or garbage. Anything that is not a finite,
//! non-negative number becomes `0`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Clamps an integer amount to be non-negative.
pub fn clamp_amount(amount: i64) -> i64 {
    amount.max(0)
}

/// Converts a float amount to minor units, rounding to the nearest unit.
pub fn coerce_float_amount(amount: f64) -> i64 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    // `as` saturates at i64::MAX
    amount.round() as i64
}

/// Coerces an arbitrary JSON value into a non-negative minor-unit amount.
pub fn coerce_amount(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(clamp_amount)
            .or_else(|| n.as_f64().map(coerce_float_amount))
            .unwrap_or(0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(coerce_float_amount)
            .unwrap_or(0),
        _ => 0,
    }
}

/// Serde adapter for amount fields that must never fail to deserialize.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_amount).unwrap_or(0))
}

/// Serde adapter for optional text fields; non-string values read as absent.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_pass_through() {
        assert_eq!(coerce_amount(&json!(499)), 499);
        assert_eq!(coerce_amount(&json!(0)), 0);
    }

    #[test]
    fn negative_amounts_become_zero() {
        assert_eq!(coerce_amount(&json!(-1)), 0);
        assert_eq!(coerce_amount(&json!(-12.5)), 0);
        assert_eq!(clamp_amount(-300), 0);
    }

    #[test]
    fn floats_round_to_nearest_unit() {
        assert_eq!(coerce_amount(&json!(499.4)), 499);
        assert_eq!(coerce_amount(&json!(499.6)), 500);
    }

    #[test]
    fn numeric_strings_are_parsed() {
        assert_eq!(coerce_amount(&json!("1299")), 1299);
        assert_eq!(coerce_amount(&json!(" 42 ")), 42);
    }

    #[test]
    fn non_numeric_values_become_zero() {
        assert_eq!(coerce_amount(&json!("abc")), 0);
        assert_eq!(coerce_amount(&json!("NaN")), 0);
        assert_eq!(coerce_amount(&json!("inf")), 0);
        assert_eq!(coerce_amount(&json!(null)), 0);
        assert_eq!(coerce_amount(&json!({"amount": 5})), 0);
        assert_eq!(coerce_amount(&json!([1])), 0);
        assert_eq!(coerce_amount(&json!(true)), 0);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(coerce_amount(&json!(u64::MAX)), i64::MAX);
        assert_eq!(coerce_float_amount(f64::INFINITY), 0);
        assert_eq!(coerce_float_amount(f64::NAN), 0);
    }
}
