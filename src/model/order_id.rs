//! Order identifiers.
//!
//! The order sheet keys rows by an "Order ID" column that holds either a
//! whole number or free text, depending on how the sheet was filled in.
//! Both forms are kept as received so edits go back in the same JSON shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest float magnitude that converts to `i64` without losing digits.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Identifier of one order row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(i64),
    /// Whole numbers above `i64::MAX`.
    Unsigned(u64),
    Text(String),
}

impl OrderId {
    /// Read an id out of a sheet cell.
    ///
    /// Returns `None` when the cell cannot address a row: null, blank text,
    /// booleans, nested values, or numbers with a fractional part.
    pub fn from_cell(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(Self::Number(i));
                }
                if let Some(u) = n.as_u64() {
                    return Some(Self::Unsigned(u));
                }
                // Sheets export whole numbers as 101.0
                let f = n.as_f64()?;
                if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT {
                    Some(Self::Number(f as i64))
                } else {
                    None
                }
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self::Text(trimmed.to_string()))
                }
            }
            _ => None,
        }
    }

    /// Compare ids by their printed form, so `101` and `"101"` correlate.
    pub fn matches(&self, other: &OrderId) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Unsigned(a), Self::Unsigned(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Unsigned(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OrderId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Error parsing an order id from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order id must not be blank")]
pub struct BlankOrderId;

impl FromStr for OrderId {
    type Err = BlankOrderId;

    /// Digits parse as a numeric id, anything else is kept as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BlankOrderId);
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Self::Number(n));
        }
        if let Ok(n) = trimmed.parse::<u64>() {
            return Ok(Self::Unsigned(n));
        }
        Ok(Self::Text(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_cell() {
        assert_eq!(OrderId::from_cell(&json!(101)), Some(OrderId::Number(101)));
    }

    #[test]
    fn test_whole_float_cell_becomes_integer() {
        assert_eq!(
            OrderId::from_cell(&json!(101.0)),
            Some(OrderId::Number(101))
        );
    }

    #[test]
    fn test_fractional_cell_is_rejected() {
        assert_eq!(OrderId::from_cell(&json!(101.5)), None);
    }

    #[test]
    fn test_text_cell_is_trimmed() {
        assert_eq!(
            OrderId::from_cell(&json!("  A-17 ")),
            Some(OrderId::Text("A-17".to_string()))
        );
    }

    #[test]
    fn test_unusable_cells() {
        for cell in [json!(null), json!(""), json!("   "), json!(true), json!([1])] {
            assert_eq!(OrderId::from_cell(&cell), None, "cell {}", cell);
        }
    }

    #[test]
    fn test_matches_across_forms() {
        let number = OrderId::Number(101);
        let text = OrderId::Text("101".to_string());
        assert!(number.matches(&text));
        assert!(text.matches(&number));
        assert!(!number.matches(&OrderId::Number(102)));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("101".parse::<OrderId>(), Ok(OrderId::Number(101)));
        assert_eq!(
            "A-17".parse::<OrderId>(),
            Ok(OrderId::Text("A-17".to_string()))
        );
        assert_eq!(" ".parse::<OrderId>(), Err(BlankOrderId));
    }

    #[test]
    fn test_serializes_in_received_shape() {
        assert_eq!(serde_json::to_value(OrderId::Number(7)).unwrap(), json!(7));
        assert_eq!(
            serde_json::to_value(OrderId::Text("7b".to_string())).unwrap(),
            json!("7b")
        );
    }

    #[test]
    fn test_large_unsigned_id_stays_numeric() {
        let big = u64::MAX;
        let id = OrderId::from_cell(&json!(big)).unwrap();
        assert_eq!(id, OrderId::Unsigned(big));
        assert_eq!(serde_json::to_value(&id).unwrap(), json!(big));
        assert_eq!(id.to_string(), "18446744073709551615");
        assert_eq!("18446744073709551615".parse::<OrderId>(), Ok(id.clone()));

        let back: OrderId = serde_json::from_value(json!(big)).unwrap();
        assert_eq!(back, id);
        assert!(id.matches(&OrderId::Text("18446744073709551615".to_string())));
    }
}
