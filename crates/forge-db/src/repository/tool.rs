//! # Tool Repository
//!
//! Database operations for the workshop tool inventory. Tools are never
//! deleted once lent out at least once; retired tools are archived so
//! the usage history keeps resolving.

use forge_core::{ColumnDef, FieldSet, Filter, Tool};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::DbResult;
use crate::repository::{optional_column, Entity, Repository};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "id"),
    ColumnDef::new("name", "name"),
    ColumnDef::new("code", "code"),
    ColumnDef::new("archived", "archived"),
    ColumnDef::new("createdAt", "created_at"),
];

impl Entity for Tool {
    const ENTITY: &'static str = "Tool";
    const TABLE: &'static str = "tools";
    const COLUMNS: &'static [ColumnDef] = COLUMNS;
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "code"];

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Tool {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            code: optional_column(row, "code")?,
            archived: row.try_get("archived")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Repository for tool database operations.
pub type ToolRepository = Repository<Tool>;

impl ToolRepository {
    /// Marks a tool as archived. Returns the updated row, `None` if the
    /// id does not exist.
    pub async fn archive(&self, id: i64) -> DbResult<Option<Tool>> {
        let updated = self
            .update(
                &FieldSet::new().set("archived", true),
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
    use crate::repository::testing::test_db;
    use crate::repository::FindOptions;

    #[tokio::test]
    async fn test_archive_flow() {
        let db = test_db().await;
        let repo = db.tools();

        let tool = repo
            .insert(&FieldSet::new().set("name", "Torque wrench").set("code", "TW-01"))
            .await
            .unwrap()
            .unwrap();
        assert!(!tool.archived);

        let archived = repo.archive(tool.id).await.unwrap().unwrap();
        assert!(archived.archived);

        assert_eq!(repo.archive(9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_active_tools_filter() {
        let db = test_db().await;
        let repo = db.tools();

        let kept = repo
            .insert(&FieldSet::new().set("name", "Spanner set"))
            .await
            .unwrap()
            .unwrap();
        let retired = repo
            .insert(&FieldSet::new().set("name", "Broken jack"))
            .await
            .unwrap()
            .unwrap();
        repo.archive(retired.id).await.unwrap();

        let active = repo
            .find(&Filter::new().eq("archived", false), &FindOptions::new())
            .await
            .unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.id);
    }
}
