//! # Mechanic Repository
//!
//! Database operations for workshop mechanics.

use forge_core::{ColumnDef, Mechanic};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::DbResult;
use crate::repository::{optional_column, Entity, Repository};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "id"),
    ColumnDef::new("firstName", "first_name"),
    ColumnDef::new("lastName", "last_name"),
    ColumnDef::new("mobile", "mobile"),
    ColumnDef::new("createdAt", "created_at"),
];

impl Entity for Mechanic {
    const ENTITY: &'static str = "Mechanic";
    const TABLE: &'static str = "mechanics";
    const COLUMNS: &'static [ColumnDef] = COLUMNS;
    const SEARCH_COLUMNS: &'static [&'static str] = &["first_name", "last_name", "mobile"];

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Mechanic {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            mobile: optional_column(row, "mobile")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Repository for mechanic database operations.
pub type MechanicRepository = Repository<Mechanic>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::test_db;
    use crate::repository::FindOptions;
    use forge_core::{FieldSet, Filter};

    #[tokio::test]
    async fn test_search_across_name_parts() {
        let db = test_db().await;
        let repo = db.mechanics();

        repo.insert(
            &FieldSet::new()
                .set("firstName", "Imran")
                .set("lastName", "Khan")
                .set("mobile", "0345-6789012"),
        )
        .await
        .unwrap();
        repo.insert(
            &FieldSet::new()
                .set("firstName", "Asif")
                .set("lastName", "Imrani"),
        )
        .await
        .unwrap();

        // Matches "Imran" in first_name and "Imrani" in last_name.
        let found = repo
            .find(&Filter::match_all(), &FindOptions::new().search("imran"))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);

        let by_mobile = repo
            .find(&Filter::match_all(), &FindOptions::new().search("6789"))
            .await
            .unwrap();
        assert_eq!(by_mobile.len(), 1);
        assert_eq!(by_mobile[0].first_name, "Imran");
    }
}
