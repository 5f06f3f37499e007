//! # Error Types
//!
//! Mapping-layer errors for forge-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity, attribute, column)
//! 3. Errors are enum variants, never String
//!
//! Database operation failures live in the forge-db crate (`DbError`);
//! this crate only reports problems in the static column tables, which are
//! programming errors caught once at startup.

use thiserror::Error;

/// Column table validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Two attributes of one entity map to the same storage column,
    /// breaking the injectivity invariant of the mapping.
    #[error("{entity}: two attributes map to column '{column}'")]
    ColumnCollision {
        entity: &'static str,
        column: &'static str,
    },

    /// The same attribute appears twice in one entity's column table.
    #[error("{entity}: attribute '{attribute}' declared twice")]
    DuplicateAttribute {
        entity: &'static str,
        attribute: &'static str,
    },

    /// A declared column is not a well-formed snake_case identifier.
    #[error("{entity}: column '{column}' is not a snake_case identifier")]
    MalformedColumn {
        entity: &'static str,
        column: &'static str,
    },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ColumnCollision {
            entity: "user",
            column: "first_name",
        };
        assert_eq!(
            err.to_string(),
            "user: two attributes map to column 'first_name'"
        );
    }
}
