//! # Repository Module
//!
//! The generic repository and the per-entity descriptions it runs on.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 One Generic Repository, Many Entities                   │
//! │                                                                         │
//! │  Route handler                                                         │
//! │       │                                                                 │
//! │       │  db.cash().insert(&FieldSet::new().set("amount", 1000))        │
//! │       ▼                                                                 │
//! │  Repository<Cash>                                                      │
//! │  ├── maps "amount" → "amount" via Cash::COLUMNS                        │
//! │  ├── StatementBuilder emits (sql, params)                              │
//! │  ├── one round trip through the pool                                   │
//! │  └── Cash::from_row maps RETURNING * back to the record                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Every entity repository is the SAME four operations with a fixed      │
//! │  table and column table; entity modules only add thin helpers.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - User accounts
//! - [`product::ProductRepository`] - Inventory products
//! - [`cash::CashRepository`] - Cash-book entries (plus `total`)
//! - [`tool::ToolRepository`] - Workshop tools
//! - [`mechanic::MechanicRepository`] - Mechanics
//! - [`usage::UsageRepository`] - Tool checkouts (plus open-usage lookup)

pub mod cash;
pub mod mechanic;
pub mod product;
pub mod tool;
pub mod usage;
pub mod user;

use std::marker::PhantomData;

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use forge_core::{ColumnDef, FieldSet, FieldValue, Filter};

use crate::builder::{Order, StatementBuilder};
use crate::error::{DbError, DbResult};

// =============================================================================
// Entity Description
// =============================================================================

/// Static description of one entity: table name, column table, searchable
/// columns, and the row→record mapping.
///
/// The column table is validated once at startup (`Database::new`); the
/// searchable columns are the fixed list a free-text term is ORed across.
pub trait Entity: Sized + Send + Unpin {
    /// Display name used in error messages.
    const ENTITY: &'static str;

    /// Storage table name.
    const TABLE: &'static str;

    /// Static attribute→column table.
    const COLUMNS: &'static [ColumnDef];

    /// Storage columns a search term is matched against. May be empty.
    const SEARCH_COLUMNS: &'static [&'static str];

    /// Maps a raw result row to the domain record.
    ///
    /// Known columns map to their attribute; unknown extra columns are
    /// ignored; a missing optional column decodes as `None` (see
    /// [`optional_column`]). No error for unknown columns — forward
    /// compatibility over strictness.
    fn from_row(row: &SqliteRow) -> DbResult<Self>;
}

// =============================================================================
// Find Options
// =============================================================================

/// Search, pagination and ordering options for `find`/`find_count`.
///
/// `limit`/`skip` are absent by default: the query does not implicitly
/// paginate. `limit(0)` means zero rows. `find_count` uses only the search
/// term and ignores pagination and ordering.
///
/// ## Example
/// ```rust
/// use forge_db::repository::FindOptions;
///
/// let options = FindOptions::new().search("4").limit(10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    limit: Option<i64>,
    skip: Option<i64>,
    search: Option<String>,
    order_by: Option<(String, Order)>,
}

impl FindOptions {
    /// No search, no pagination, no ordering.
    pub fn new() -> Self {
        FindOptions::default()
    }

    /// Caps the result rows. Zero means zero rows, not "unlimited".
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips leading rows in storage order.
    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Case-insensitive substring term, matched against the entity's
    /// searchable columns and ANDed with the filter.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Explicit ordering by a domain attribute. Without this, rows come
    /// back in storage order.
    pub fn order_by(mut self, attribute: impl Into<String>, order: Order) -> Self {
        self.order_by = Some((attribute.into(), order));
        self
    }
}

// =============================================================================
// Generic Repository
// =============================================================================

/// The four canonical data operations plus the sum aggregate, generic over
/// an [`Entity`] description.
///
/// ## Usage
/// ```rust,ignore
/// let repo: Repository<Cash> = Repository::new(pool);
///
/// let row = repo
///     .insert(&FieldSet::new().set("amount", 1209))
///     .await?;
/// ```
#[derive(Debug)]
pub struct Repository<E: Entity> {
    pool: SqlitePool,
    _entity: PhantomData<E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Repository {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    /// Creates a repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository {
            pool,
            _entity: PhantomData,
        }
    }

    /// Inserts a single row from the supplied fields and returns the
    /// stored record (`RETURNING *`, so store-side defaults like `id` and
    /// `created_at` come back filled in).
    ///
    /// Returns `None` only if the store returns zero rows, which normal
    /// insert semantics never do.
    pub async fn insert(&self, fields: &FieldSet) -> DbResult<Option<E>> {
        let mut builder = StatementBuilder::new(E::TABLE);
        for (attribute, value) in fields.iter() {
            builder.assign(Self::column_for(attribute)?, value.clone());
        }
        let stmt = builder.into_insert()?;

        debug!(table = E::TABLE, columns = stmt.params.len(), "insert");

        let row = bind_params(&stmt.sql, &stmt.params)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(E::from_row).transpose()
    }

    /// Updates every row matching the filter with the supplied fields and
    /// returns the updated records.
    ///
    /// Attributes absent from the field set keep their stored value; an
    /// explicit `Null` sets the column to NULL. A filter matching nothing
    /// yields an empty list, not an error. Empty field sets and empty
    /// non-sentinel filters fail fast (see [`DbError`]).
    pub async fn update(&self, fields: &FieldSet, filter: &Filter) -> DbResult<Vec<E>> {
        let mut builder = StatementBuilder::new(E::TABLE);
        for (attribute, value) in fields.iter() {
            builder.assign(Self::column_for(attribute)?, value.clone());
        }
        Self::apply_filter(&mut builder, filter)?;
        let stmt = builder.into_update()?;

        debug!(
            table = E::TABLE,
            columns = fields.len(),
            predicates = filter.fields().len(),
            "update"
        );

        let rows = bind_params(&stmt.sql, &stmt.params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(E::from_row).collect()
    }

    /// Finds rows by equality filter, optional search term and pagination.
    /// Rows come back in storage order unless `order_by` was supplied.
    pub async fn find(&self, filter: &Filter, options: &FindOptions) -> DbResult<Vec<E>> {
        let mut builder = StatementBuilder::new(E::TABLE);
        Self::apply_filter(&mut builder, filter)?;
        if let Some(term) = &options.search {
            builder.search(term.clone(), E::SEARCH_COLUMNS);
        }
        if let Some((attribute, order)) = &options.order_by {
            builder.order_by(Self::column_for(attribute)?, *order);
        }
        if let Some(limit) = options.limit {
            builder.limit(limit);
        }
        if let Some(skip) = options.skip {
            builder.skip(skip);
        }
        let stmt = builder.into_select();

        debug!(table = E::TABLE, predicates = filter.fields().len(), "find");

        let rows = bind_params(&stmt.sql, &stmt.params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(E::from_row).collect()
    }

    /// Counts rows with the same filter/search semantics as [`find`],
    /// ignoring pagination and ordering.
    ///
    /// [`find`]: Repository::find
    pub async fn find_count(&self, filter: &Filter, options: &FindOptions) -> DbResult<i64> {
        let mut builder = StatementBuilder::new(E::TABLE);
        Self::apply_filter(&mut builder, filter)?;
        if let Some(term) = &options.search {
            builder.search(term.clone(), E::SEARCH_COLUMNS);
        }
        let stmt = builder.into_count();

        let row = bind_params(&stmt.sql, &stmt.params)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }

    /// Sums a numeric attribute over the rows matching the filter.
    /// An empty selection sums to 0.
    pub async fn sum(&self, attribute: &str, filter: &Filter) -> DbResult<i64> {
        let column = Self::column_for(attribute)?;
        let mut builder = StatementBuilder::new(E::TABLE);
        Self::apply_filter(&mut builder, filter)?;
        let stmt = builder.into_sum(column);

        let row = bind_params(&stmt.sql, &stmt.params)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }

    /// Looks an attribute up in the entity's static column table.
    fn column_for(attribute: &str) -> DbResult<&'static str> {
        E::COLUMNS
            .iter()
            .find(|def| def.attribute == attribute)
            .map(|def| def.column)
            .ok_or_else(|| DbError::UnknownAttribute {
                entity: E::ENTITY,
                attribute: attribute.to_string(),
            })
    }

    /// Translates a filter into builder predicates.
    fn apply_filter(builder: &mut StatementBuilder, filter: &Filter) -> DbResult<()> {
        if filter.is_match_all() {
            builder.match_all();
            return Ok(());
        }
        for (attribute, value) in filter.fields().iter() {
            builder.predicate(Self::column_for(attribute)?, value.clone());
        }
        Ok(())
    }
}

// =============================================================================
// Row Helpers
// =============================================================================

/// Binds a statement's values to its `$N` placeholders, in order.
fn bind_params<'q>(
    sql: &'q str,
    params: &'q [FieldValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    let mut query = sqlx::query(sql);
    for value in params {
        query = match value {
            FieldValue::Null => query.bind(Option::<i64>::None),
            FieldValue::Boolean(b) => query.bind(*b),
            FieldValue::Integer(i) => query.bind(*i),
            FieldValue::Real(r) => query.bind(*r),
            FieldValue::Text(s) => query.bind(s.as_str()),
            FieldValue::Timestamp(t) => query.bind(*t),
        };
    }
    query
}

/// Reads an optional column, treating a missing column as `None`.
///
/// This is the lenient half of the mapping rule: rows may carry more or
/// fewer columns than the record knows about without failing the mapping.
pub(crate) fn optional_column<'r, T>(row: &'r SqliteRow, column: &str) -> DbResult<Option<T>>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    match row.try_get::<Option<T>, _>(column) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use crate::pool::{Database, DbConfig};

    /// Fresh in-memory database with the reference schema applied.
    pub(crate) async fn test_db() -> Database {
        Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database")
    }
}
