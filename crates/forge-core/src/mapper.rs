//! # Attribute Mapper
//!
//! Maps the domain's camelCase attribute vocabulary onto storage column
//! names, and declares the static per-entity column tables.
//!
//! ## Mapping Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Attribute → Column Mapping                           │
//! │                                                                         │
//! │  Route handler vocabulary        Storage vocabulary                    │
//! │  ──────────────────────────      ─────────────────────                 │
//! │  "firstName"              ──►    "first_name"                          │
//! │  "priceCents"             ──►    "price_cents"                         │
//! │  "id"                     ──►    "id"                                  │
//! │                                                                         │
//! │  The transform is a pure convention (to_column). Each entity ALSO      │
//! │  carries a static ColumnDef table, validated once at startup, so a     │
//! │  non-standard name can never silently produce a colliding or           │
//! │  malformed column. Unknown attributes are rejected up front instead    │
//! │  of being best-effort transformed.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Convention Transform
// =============================================================================

/// Converts a lower-camelCase attribute name to its snake_case column name.
///
/// Pure and total: an underscore is inserted at every uppercase boundary,
/// digits and lowercase characters pass through unchanged.
///
/// ## Example
/// ```rust
/// use forge_core::mapper::to_column;
///
/// assert_eq!(to_column("firstName"), "first_name");
/// assert_eq!(to_column("id"), "id");
/// assert_eq!(to_column("priceCents"), "price_cents");
/// ```
pub fn to_column(attribute: &str) -> String {
    let mut column = String::with_capacity(attribute.len() + 4);
    for ch in attribute.chars() {
        if ch.is_ascii_uppercase() {
            column.push('_');
            column.push(ch.to_ascii_lowercase());
        } else {
            column.push(ch);
        }
    }
    column
}

// =============================================================================
// Column Tables
// =============================================================================

/// One entry of an entity's static attribute→column table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Domain attribute name (camelCase), as route handlers supply it.
    pub attribute: &'static str,
    /// Storage column name (snake_case).
    pub column: &'static str,
}

impl ColumnDef {
    /// Shorthand used by the entity tables.
    pub const fn new(attribute: &'static str, column: &'static str) -> Self {
        ColumnDef { attribute, column }
    }
}

/// Validates an entity's column table once at startup.
///
/// ## Invariants Checked
/// - attributes are unique
/// - columns are unique (the mapping is injective — two attributes may
///   never collide on one column)
/// - every column is a well-formed snake_case identifier
///
/// The table is static, so a failure here is a programming error surfaced
/// at `Database::new` rather than per query.
pub fn validate_columns(entity: &'static str, defs: &[ColumnDef]) -> CoreResult<()> {
    for (i, def) in defs.iter().enumerate() {
        if !is_snake_identifier(def.column) {
            return Err(CoreError::MalformedColumn {
                entity,
                column: def.column,
            });
        }

        for earlier in &defs[..i] {
            if earlier.attribute == def.attribute {
                return Err(CoreError::DuplicateAttribute {
                    entity,
                    attribute: def.attribute,
                });
            }
            if earlier.column == def.column {
                return Err(CoreError::ColumnCollision {
                    entity,
                    column: def.column,
                });
            }
        }
    }
    Ok(())
}

/// Lowercase alphanumerics and underscores, not starting with a digit.
fn is_snake_identifier(column: &str) -> bool {
    let mut chars = column.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    column
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_column_camel_case() {
        assert_eq!(to_column("firstName"), "first_name");
        assert_eq!(to_column("lastName"), "last_name");
        assert_eq!(to_column("returnedAt"), "returned_at");
        assert_eq!(to_column("priceCents"), "price_cents");
    }

    #[test]
    fn test_to_column_passthrough() {
        assert_eq!(to_column("id"), "id");
        assert_eq!(to_column("email"), "email");
        assert_eq!(to_column("amount"), "amount");
    }

    #[test]
    fn test_to_column_digits() {
        assert_eq!(to_column("line2"), "line2");
        assert_eq!(to_column("address2Line"), "address2_line");
    }

    #[test]
    fn test_validate_accepts_well_formed_table() {
        const DEFS: &[ColumnDef] = &[
            ColumnDef::new("id", "id"),
            ColumnDef::new("firstName", "first_name"),
            ColumnDef::new("createdAt", "created_at"),
        ];
        assert!(validate_columns("user", DEFS).is_ok());
    }

    #[test]
    fn test_validate_rejects_column_collision() {
        const DEFS: &[ColumnDef] = &[
            ColumnDef::new("firstName", "first_name"),
            ColumnDef::new("first_Name", "first_name"),
        ];
        let err = validate_columns("user", DEFS).unwrap_err();
        assert!(matches!(err, CoreError::ColumnCollision { .. }));
    }

    #[test]
    fn test_validate_rejects_duplicate_attribute() {
        const DEFS: &[ColumnDef] = &[
            ColumnDef::new("email", "email"),
            ColumnDef::new("email", "email_address"),
        ];
        let err = validate_columns("user", DEFS).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateAttribute { .. }));
    }

    #[test]
    fn test_validate_rejects_malformed_column() {
        const DEFS: &[ColumnDef] = &[ColumnDef::new("name", "Name")];
        assert!(matches!(
            validate_columns("tool", DEFS).unwrap_err(),
            CoreError::MalformedColumn { .. }
        ));

        const DIGIT_FIRST: &[ColumnDef] = &[ColumnDef::new("x", "2fast")];
        assert!(validate_columns("tool", DIGIT_FIRST).is_err());
    }
}
