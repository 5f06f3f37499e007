//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Route handler ← Translates into a user-facing response                │
//! │                                                                         │
//! │  The repositories never catch or retry: every failure from the         │
//! │  execution layer propagates to the immediate caller.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use forge_core::CoreError;
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and add the misuse cases the builder and
/// repository detect themselves before any round trip.
#[derive(Debug, Error)]
pub enum DbError {
    /// An attribute is not in the entity's static column table.
    ///
    /// ## When This Occurs
    /// - A field set or filter names an attribute the entity does not have
    /// - A typo in a route handler's vocabulary
    #[error("{entity} has no attribute '{attribute}'")]
    UnknownAttribute {
        entity: &'static str,
        attribute: String,
    },

    /// An INSERT or UPDATE was built with zero columns.
    ///
    /// Every supplied attribute was absent, which would produce an empty
    /// column list / SET clause. Deterministic fail-fast, never a silent
    /// no-op statement.
    #[error("{operation} on {table} has no columns")]
    EmptyFields {
        operation: &'static str,
        table: &'static str,
    },

    /// An UPDATE was built with an empty filter and no match-all sentinel.
    ///
    /// An unfiltered UPDATE targets every row of the table; callers must
    /// opt in explicitly with `Filter::match_all()`.
    #[error("refusing unfiltered UPDATE on {table}; use Filter::match_all() to target every row")]
    UnfilteredUpdate { table: &'static str },

    /// Column table validation failed at startup.
    #[error("column mapping error: {0}")]
    Mapping(#[from] CoreError),

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a duplicate email
    /// - Any UNIQUE index violation
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - A usage referencing a non-existent tool or mechanic
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// NOT NULL constraint violation.
    #[error("Not-null constraint violated: {0}")]
    NotNullViolation(String),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed.
    ///
    /// ## When This Occurs
    /// - Binding/shape errors (unsupported value for a column)
    /// - Runtime SQL errors, surfaced unchanged from the store
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
///
/// Constraint violations keep the store's original message; the core does
/// no translation into a taxonomy of its own beyond categorizing the kind.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();

                // SQLite constraint messages:
                //   "UNIQUE constraint failed: <table>.<column>"
                //   "FOREIGN KEY constraint failed"
                //   "NOT NULL constraint failed: <table>.<column>"
                if msg.contains("UNIQUE constraint failed") {
                    DbError::UniqueViolation(msg)
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation(msg)
                } else if msg.contains("NOT NULL constraint failed") {
                    DbError::NotNullViolation(msg)
                } else {
                    DbError::QueryFailed(msg)
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DbError::UnknownAttribute {
            entity: "cash",
            attribute: "colour".to_string(),
        };
        assert_eq!(err.to_string(), "cash has no attribute 'colour'");

        let err = DbError::UnfilteredUpdate { table: "cash" };
        assert!(err.to_string().contains("match_all"));
    }

    #[test]
    fn test_mapping_error_converts() {
        let core = CoreError::ColumnCollision {
            entity: "user",
            column: "first_name",
        };
        let err: DbError = core.into();
        assert!(matches!(err, DbError::Mapping(_)));
    }
}
