use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Quantity — a numeric attribute as the service sends it
// ---------------------------------------------------------------------------

/// Value of a numeric product attribute (calories, fat, pages, ...).
///
/// The service usually sends a JSON number but sometimes free text such as
/// `"about 8"` or `"120 kcal"`. Text is kept verbatim; use
/// [`as_f64`](Quantity::as_f64) when only a plain number is useful.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl Quantity {
    /// The numeric value, parsing text that is a plain number (`" 2.5 "`).
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Quantity::Number(n) => Some(*n),
            Quantity::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }

    /// The supplied text, if the service sent a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Quantity::Number(_) => None,
            Quantity::Text(s) => Some(s),
        }
    }

    /// Zero, blank text, and non-finite numbers count as "not set".
    pub fn is_blank(&self) -> bool {
        match self {
            Quantity::Number(n) => *n == 0.0 || !n.is_finite(),
            Quantity::Text(s) => s.trim().is_empty(),
        }
    }
}

/// Whole numbers render without a fractional part (`200`, not `200.0`).
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Quantity::Number(n) => write!(f, "{}", n),
            Quantity::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Quantity {
    fn from(n: f64) -> Self {
        Quantity::Number(n)
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Quantity::Number(n as f64)
    }
}

impl From<i32> for Quantity {
    fn from(n: i32) -> Self {
        Quantity::Number(f64::from(n))
    }
}

impl From<&str> for Quantity {
    fn from(s: &str) -> Self {
        Quantity::Text(s.to_string())
    }
}

impl From<String> for Quantity {
    fn from(s: String) -> Self {
        Quantity::Text(s)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_f64()
                .map(Quantity::Number)
                .ok_or_else(|| serde::de::Error::custom("number out of range")),
            Value::String(s) => Ok(Quantity::Text(s)),
            other => Err(serde::de::Error::custom(format!(
                "expected a number or string, got {}",
                other
            ))),
        }
    }
}

/// Field deserializer for product payloads: null and wrong-typed values
/// (booleans, arrays, objects) read as absent instead of failing.
pub(crate) fn lenient_quantity<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Quantity>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(Quantity::Number),
        Value::String(s) => Some(Quantity::Text(s)),
        _ => None,
    })
}
