//! # Field Values
//!
//! The value model shared by field sets and filters.
//!
//! ## Absent vs NULL
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Absent vs NULL (load-bearing!)                      │
//! │                                                                         │
//! │  FieldSet::new().set("amount", 500)                                    │
//! │       │                                                                 │
//! │       ├── "amount"  → Integer(500)   included, bound as $n             │
//! │       ├── "purpose" → (absent)       no column, no placeholder         │
//! │       └── set("purpose", None::<&str>)                                 │
//! │                     → Null           included, bound as SQL NULL       │
//! │                                                                         │
//! │  An omitted attribute never reaches the statement at all.              │
//! │  An explicit Null sets the column to NULL (or, in a filter,            │
//! │  compiles to IS NULL).                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

/// A single bindable value in a field or filter set.
///
/// Covers the value vocabulary of the route layer: NULL, booleans,
/// integers, reals, text, and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// SQL NULL. In a filter this compiles to `IS NULL`.
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Returns true for the `Null` variant.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

// =============================================================================
// Conversions
// =============================================================================
// These keep call sites terse: `set("amount", 500)` instead of
// `set("amount", FieldValue::Integer(500))`.

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(v as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Real(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(v)
    }
}

/// `None` maps to SQL NULL. To omit an attribute entirely, do not set it.
impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => FieldValue::Null,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(FieldValue::from(true), FieldValue::Boolean(true));
        assert_eq!(FieldValue::from(42i64), FieldValue::Integer(42));
        assert_eq!(FieldValue::from(42i32), FieldValue::Integer(42));
        assert_eq!(FieldValue::from(1.5), FieldValue::Real(1.5));
        assert_eq!(
            FieldValue::from("Test"),
            FieldValue::Text("Test".to_string())
        );
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(7i64)), FieldValue::Integer(7));
        assert!(FieldValue::from(None::<&str>).is_null());
    }
}
