//! # Usage Repository
//!
//! Database operations for tool lending records.
//!
//! ## Lending Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tool Lending Lifecycle                            │
//! │                                                                         │
//! │  Mechanic takes a tool                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert { toolId, mechanicId, takenAt }   ← returned_at stays NULL     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  open_for_tool(tool_id)                   ← returned_at IS NULL        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mark_returned(id, now)                   ← closes the record          │
//! │                                                                         │
//! │  At most one open record per tool is the caller's invariant; the       │
//! │  lookup returns the newest open record if that is ever violated.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use forge_core::{ColumnDef, FieldSet, FieldValue, Filter, Usage};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::builder::Order;
use crate::error::DbResult;
use crate::repository::{optional_column, Entity, FindOptions, Repository};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "id"),
    ColumnDef::new("toolId", "tool_id"),
    ColumnDef::new("mechanicId", "mechanic_id"),
    ColumnDef::new("takenAt", "taken_at"),
    ColumnDef::new("returnedAt", "returned_at"),
    ColumnDef::new("createdAt", "created_at"),
];

impl Entity for Usage {
    const ENTITY: &'static str = "Usage";
    const TABLE: &'static str = "usages";
    const COLUMNS: &'static [ColumnDef] = COLUMNS;
    // Foreign keys and timestamps only; nothing sensible to substring-match.
    const SEARCH_COLUMNS: &'static [&'static str] = &[];

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Usage {
            id: row.try_get("id")?,
            tool_id: row.try_get("tool_id")?,
            mechanic_id: row.try_get("mechanic_id")?,
            taken_at: row.try_get("taken_at")?,
            returned_at: optional_column(row, "returned_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Repository for tool usage records.
pub type UsageRepository = Repository<Usage>;

impl UsageRepository {
    /// Finds the open (not yet returned) lending record for a tool.
    pub async fn open_for_tool(&self, tool_id: i64) -> DbResult<Option<Usage>> {
        let open = self
            .find(
                &Filter::new()
                    .eq("toolId", tool_id)
                    .eq("returnedAt", FieldValue::Null),
                &FindOptions::new().order_by("takenAt", Order::Desc).limit(1),
            )
            .await?;
        Ok(open.into_iter().next())
    }

    /// Closes a lending record. Returns the updated row, `None` if the
    /// id does not exist.
    pub async fn mark_returned(
        &self,
        id: i64,
        returned_at: DateTime<Utc>,
    ) -> DbResult<Option<Usage>> {
        let updated = self
            .update(
                &FieldSet::new().set("returnedAt", returned_at),
                &Filter::new().eq("id", id),
            )
            .await?;
        Ok(updated.into_iter().next())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::Database;
    use crate::repository::testing::test_db;

    async fn lend(db: &Database) -> Usage {
        let tool = db
            .tools()
            .insert(&FieldSet::new().set("name", "Air compressor"))
            .await
            .unwrap()
            .unwrap();
        let mechanic = db
            .mechanics()
            .insert(
                &FieldSet::new()
                    .set("firstName", "Bilal")
                    .set("lastName", "Ahmed"),
            )
            .await
            .unwrap()
            .unwrap();

        db.usages()
            .insert(
                &FieldSet::new()
                    .set("toolId", tool.id)
                    .set("mechanicId", mechanic.id)
                    .set("takenAt", Utc::now()),
            )
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_lend_and_return_flow() {
        let db = test_db().await;
        let usage = lend(&db).await;

        assert!(usage.is_open());

        let open = db.usages().open_for_tool(usage.tool_id).await.unwrap();
        assert_eq!(open.as_ref().map(|u| u.id), Some(usage.id));

        let closed = db
            .usages()
            .mark_returned(usage.id, Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert!(!closed.is_open());

        let open = db.usages().open_for_tool(usage.tool_id).await.unwrap();
        assert_eq!(open, None);
    }

    #[tokio::test]
    async fn test_null_filter_only_matches_open_records() {
        let db = test_db().await;
        let first = lend(&db).await;
        let second = lend(&db).await;

        db.usages()
            .mark_returned(first.id, Utc::now())
            .await
            .unwrap();

        let open = db
            .usages()
            .find(
                &Filter::new().eq("returnedAt", FieldValue::Null),
                &FindOptions::new(),
            )
            .await
            .unwrap();

        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.id);
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let db = test_db().await;

        let err = db
            .usages()
            .insert(
                &FieldSet::new()
                    .set("toolId", 123)
                    .set("mechanicId", 456)
                    .set("takenAt", Utc::now()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn test_search_with_no_search_columns_is_a_no_op() {
        let db = test_db().await;
        let usage = lend(&db).await;

        let found = db
            .usages()
            .find(&Filter::match_all(), &FindOptions::new().search("anything"))
            .await
            .unwrap();

        assert_eq!(found, vec![usage]);
    }
}
