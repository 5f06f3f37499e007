//! # Parameterized Statement Builder
//!
//! Turns clause-role column/value sequences into SQL text plus a parallel
//! ordered value list. User-supplied values are NEVER concatenated into the
//! SQL text; they ride in [`Statement::params`] and bind to `$1..$N`
//! positional placeholders.
//!
//! ## Placeholder Bookkeeping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  One Counter, Assigned at Finalization                  │
//! │                                                                         │
//! │  builder.assign("amount", 500)      ┐                                  │
//! │  builder.assign("purpose", "Test")  │ collected in insertion order     │
//! │  builder.predicate("id", 3)         ┘                                  │
//! │       │                                                                 │
//! │       ▼  into_update()                                                  │
//! │  UPDATE cash SET amount = $1, purpose = $2 WHERE id = $3 RETURNING *   │
//! │  params: [Integer(500), Text("Test"), Integer(3)]                      │
//! │                                                                         │
//! │  Numbering happens in ONE pass while the text is assembled:            │
//! │  assignment values first, then predicate values, then the search       │
//! │  term last. Text position and params position always line up.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dialect Notes
//! - SQLite accepts `$N` placeholders and assigns indexes in first-occurrence
//!   order, which matches the monotonic counter here.
//! - The search predicate uses `LIKE`; SQLite evaluates it
//!   case-insensitively for ASCII.
//! - `OFFSET` requires a `LIMIT` clause, so a skip without a limit emits
//!   `LIMIT -1` (unlimited).

use forge_core::FieldValue;

use crate::error::{DbError, DbResult};

// =============================================================================
// Statement
// =============================================================================

/// A finalized SQL template plus its bound values.
///
/// `params[i]` binds to placeholder `$i+1` in `sql`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

/// Explicit ordering direction for the optional ORDER BY extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

// =============================================================================
// Statement Builder
// =============================================================================

/// Collects `(column, value)` pairs per clause role, then finalizes into a
/// [`Statement`].
///
/// Columns come from an entity's validated static table; they are never
/// user input. `limit`/`skip` are typed integers and are formatted into
/// the text directly, keeping the parameter order (columns first, search
/// term last) exact.
///
/// ## Example
/// ```rust
/// use forge_db::builder::StatementBuilder;
///
/// let mut builder = StatementBuilder::new("cash");
/// builder.assign("amount", 1000);
/// builder.assign("purpose", "Test");
///
/// let stmt = builder.into_insert().unwrap();
/// assert_eq!(
///     stmt.sql,
///     "INSERT INTO cash (amount, purpose) VALUES ($1, $2) RETURNING *"
/// );
/// ```
#[derive(Debug)]
pub struct StatementBuilder {
    table: &'static str,
    assignments: Vec<(&'static str, FieldValue)>,
    predicates: Vec<(&'static str, FieldValue)>,
    search: Option<(String, &'static [&'static str])>,
    match_all: bool,
    limit: Option<i64>,
    skip: Option<i64>,
    order: Option<(&'static str, Order)>,
}

impl StatementBuilder {
    /// Starts a builder for the given table.
    pub fn new(table: &'static str) -> Self {
        StatementBuilder {
            table,
            assignments: Vec::new(),
            predicates: Vec::new(),
            search: None,
            match_all: false,
            limit: None,
            skip: None,
            order: None,
        }
    }

    /// Adds an INSERT column / UPDATE SET pair.
    pub fn assign(&mut self, column: &'static str, value: impl Into<FieldValue>) {
        self.assignments.push((column, value.into()));
    }

    /// Adds a WHERE equality predicate. A `Null` value compiles to
    /// `column IS NULL` (no placeholder).
    pub fn predicate(&mut self, column: &'static str, value: impl Into<FieldValue>) {
        self.predicates.push((column, value.into()));
    }

    /// Adds the free-text search term, ORed across the given columns and
    /// ANDed with the rest of the filter. With an empty column list the
    /// term is a no-op.
    pub fn search(&mut self, term: impl Into<String>, columns: &'static [&'static str]) {
        self.search = Some((term.into(), columns));
    }

    /// Marks the statement as intentionally unfiltered.
    pub fn match_all(&mut self) {
        self.match_all = true;
    }

    /// Caps the row count. `0` means zero rows, not "no limit".
    pub fn limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    /// Skips leading rows in storage order.
    pub fn skip(&mut self, skip: i64) {
        self.skip = Some(skip);
    }

    /// Explicit ordering; without this the statement never orders.
    pub fn order_by(&mut self, column: &'static str, order: Order) {
        self.order = Some((column, order));
    }

    // =========================================================================
    // Finalizers
    // =========================================================================

    /// `INSERT INTO t (c1, …) VALUES ($1, …) RETURNING *`
    pub fn into_insert(self) -> DbResult<Statement> {
        if self.assignments.is_empty() {
            return Err(DbError::EmptyFields {
                operation: "INSERT",
                table: self.table,
            });
        }

        let mut params = Vec::with_capacity(self.assignments.len());
        let mut columns = String::new();
        let mut placeholders = String::new();

        for (n, (column, value)) in self.assignments.into_iter().enumerate() {
            if n > 0 {
                columns.push_str(", ");
                placeholders.push_str(", ");
            }
            columns.push_str(column);
            placeholders.push_str(&format!("${}", n + 1));
            params.push(value);
        }

        Ok(Statement {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
                self.table, columns, placeholders
            ),
            params,
        })
    }

    /// `UPDATE t SET c1 = $1, … WHERE … RETURNING *`
    ///
    /// Fails fast on an empty SET clause and on an empty filter without the
    /// match-all sentinel.
    pub fn into_update(self) -> DbResult<Statement> {
        if self.assignments.is_empty() {
            return Err(DbError::EmptyFields {
                operation: "UPDATE",
                table: self.table,
            });
        }
        if self.predicates.is_empty() && self.search.is_none() && !self.match_all {
            return Err(DbError::UnfilteredUpdate { table: self.table });
        }

        let mut params = Vec::new();
        let mut next = 1usize;

        let mut set_clause = String::new();
        for (i, (column, value)) in self.assignments.into_iter().enumerate() {
            if i > 0 {
                set_clause.push_str(", ");
            }
            set_clause.push_str(&format!("{} = ${}", column, next));
            next += 1;
            params.push(value);
        }

        let where_clause = where_clause(self.predicates, self.search, &mut next, &mut params);

        Ok(Statement {
            sql: format!(
                "UPDATE {} SET {}{} RETURNING *",
                self.table, set_clause, where_clause
            ),
            params,
        })
    }

    /// `SELECT * FROM t WHERE … [ORDER BY …] [LIMIT …] [OFFSET …]`
    pub fn into_select(self) -> Statement {
        let mut params = Vec::new();
        let mut next = 1usize;

        let mut sql = format!("SELECT * FROM {}", self.table);
        sql.push_str(&where_clause(
            self.predicates,
            self.search,
            &mut next,
            &mut params,
        ));

        if let Some((column, order)) = self.order {
            sql.push_str(&format!(" ORDER BY {} {}", column, order.keyword()));
        }

        match (self.limit, self.skip) {
            (Some(limit), Some(skip)) => sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, skip)),
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {}", limit)),
            // SQLite has no bare OFFSET; -1 means unlimited
            (None, Some(skip)) => sql.push_str(&format!(" LIMIT -1 OFFSET {}", skip)),
            (None, None) => {}
        }

        Statement { sql, params }
    }

    /// `SELECT COUNT(*) FROM t WHERE …` — pagination and ordering ignored.
    pub fn into_count(self) -> Statement {
        let mut params = Vec::new();
        let mut next = 1usize;

        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);
        sql.push_str(&where_clause(
            self.predicates,
            self.search,
            &mut next,
            &mut params,
        ));

        Statement { sql, params }
    }

    /// `SELECT COALESCE(SUM(col), 0) FROM t WHERE …`
    ///
    /// COALESCE keeps the empty-table aggregate at 0 instead of NULL.
    pub fn into_sum(self, column: &'static str) -> Statement {
        let mut params = Vec::new();
        let mut next = 1usize;

        let mut sql = format!("SELECT COALESCE(SUM({}), 0) FROM {}", column, self.table);
        sql.push_str(&where_clause(
            self.predicates,
            self.search,
            &mut next,
            &mut params,
        ));

        Statement { sql, params }
    }
}

// =============================================================================
// WHERE Assembly
// =============================================================================

/// Assembles the WHERE clause, consuming placeholder numbers from `next`
/// and appending bound values to `params` in the same order.
///
/// Shape: `pred AND pred AND (c1 LIKE $k OR c2 LIKE $k)` — the search term
/// binds one placeholder referenced from every OR arm, appended last.
fn where_clause(
    predicates: Vec<(&'static str, FieldValue)>,
    search: Option<(String, &'static [&'static str])>,
    next: &mut usize,
    params: &mut Vec<FieldValue>,
) -> String {
    let mut conditions: Vec<String> = Vec::new();

    for (column, value) in predicates {
        if value.is_null() {
            // `column = NULL` never matches; the NULL predicate the caller
            // means is IS NULL
            conditions.push(format!("{} IS NULL", column));
        } else {
            conditions.push(format!("{} = ${}", column, *next));
            *next += 1;
            params.push(value);
        }
    }

    if let Some((term, columns)) = search {
        if !columns.is_empty() {
            let arms: Vec<String> = columns
                .iter()
                .map(|column| format!("{} LIKE ${}", column, *next))
                .collect();
            conditions.push(format!("({})", arms.join(" OR ")));
            *next += 1;
            params.push(FieldValue::Text(format!("%{}%", term)));
        }
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
