//! # Cash Repository
//!
//! Database operations for the cash ledger. Every entry is an amount in
//! the smallest currency unit; withdrawals are negative amounts, so the
//! drawer balance is a plain `SUM` over the table.

use forge_core::{Cash, ColumnDef, Filter};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::DbResult;
use crate::repository::{optional_column, Entity, Repository};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "id"),
    ColumnDef::new("amount", "amount"),
    ColumnDef::new("purpose", "purpose"),
    ColumnDef::new("createdAt", "created_at"),
];

impl Entity for Cash {
    const ENTITY: &'static str = "Cash";
    const TABLE: &'static str = "cash";
    const COLUMNS: &'static [ColumnDef] = COLUMNS;
    const SEARCH_COLUMNS: &'static [&'static str] = &["purpose"];

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Cash {
            id: row.try_get("id")?,
            amount: row.try_get("amount")?,
            purpose: optional_column(row, "purpose")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Repository for cash ledger operations.
pub type CashRepository = Repository<Cash>;

impl CashRepository {
    /// Current drawer balance: the sum of every ledger entry.
    /// Zero for an empty ledger.
    pub async fn total(&self) -> DbResult<i64> {
        self.sum("amount", &Filter::match_all()).await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::testing::test_db;
    use forge_core::FieldSet;

    fn entry(amount: i64, purpose: &str) -> FieldSet {
        FieldSet::new().set("amount", amount).set("purpose", purpose)
    }

    #[tokio::test]
    async fn test_total_sums_all_entries() {
        let db = test_db().await;
        let repo = db.cash();

        repo.insert(&entry(1209, "opening float")).await.unwrap();
        repo.insert(&entry(900, "tyre sale")).await.unwrap();
        repo.insert(&entry(2000, "repair job")).await.unwrap();

        assert_eq!(repo.total().await.unwrap(), 4109);
    }

    #[tokio::test]
    async fn test_total_of_empty_ledger_is_zero() {
        let db = test_db().await;
        assert_eq!(db.cash().total().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_withdrawals_reduce_the_total() {
        let db = test_db().await;
        let repo = db.cash();

        repo.insert(&entry(5000, "opening float")).await.unwrap();
        repo.insert(&entry(-1500, "parts supplier")).await.unwrap();

        assert_eq!(repo.total().await.unwrap(), 3500);
    }

    #[tokio::test]
    async fn test_sum_respects_filter() {
        let db = test_db().await;
        let repo = db.cash();

        repo.insert(&entry(100, "sale")).await.unwrap();
        repo.insert(&entry(250, "sale")).await.unwrap();
        repo.insert(&entry(999, "loan")).await.unwrap();

        let sales = repo
            .sum("amount", &Filter::new().eq("purpose", "sale"))
            .await
            .unwrap();

        assert_eq!(sales, 350);
    }

    #[tokio::test]
    async fn test_sum_of_unknown_attribute_fails() {
        let db = test_db().await;

        let err = db
            .cash()
            .sum("balance", &Filter::match_all())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UnknownAttribute { .. }));
    }

    #[tokio::test]
    async fn test_insert_without_purpose() {
        let db = test_db().await;

        let created = db
            .cash()
            .insert(&FieldSet::new().set("amount", 42))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.amount, 42);
        assert_eq!(created.purpose, None);
    }
}
