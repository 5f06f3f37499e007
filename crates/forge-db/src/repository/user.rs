//! # User Repository
//!
//! Database operations for staff accounts.
//!
//! ## Key Operations
//! - Account creation with unique email enforcement
//! - Lookup by email for login flows
//! - Search across email, mobile and both name parts

use forge_core::{ColumnDef, FieldSet, Filter, User};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::DbResult;
use crate::repository::{optional_column, Entity, FindOptions, Repository};

/// Attribute→column table. Extend here when `User` grows a field.
const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "id"),
    ColumnDef::new("firstName", "first_name"),
    ColumnDef::new("lastName", "last_name"),
    ColumnDef::new("email", "email"),
    ColumnDef::new("mobile", "mobile"),
    ColumnDef::new("isAdmin", "is_admin"),
    ColumnDef::new("createdAt", "created_at"),
];

impl Entity for User {
    const ENTITY: &'static str = "User";
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [ColumnDef] = COLUMNS;
    const SEARCH_COLUMNS: &'static [&'static str] =
        &["email", "mobile", "first_name", "last_name"];

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(User {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            mobile: optional_column(row, "mobile")?,
            is_admin: row.try_get("is_admin")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Repository for user database operations.
pub type UserRepository = Repository<User>;

impl UserRepository {
    /// Looks a user up by email. At most one row thanks to the unique
    /// index on `email`.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let users = self
            .find(&Filter::new().eq("email", email), &FindOptions::new().limit(1))
            .await?;
        Ok(users.into_iter().next())
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
    use forge_core::FieldValue;

    fn sample_user(email: &str) -> FieldSet {
        FieldSet::new()
            .set("firstName", "Ada")
            .set("lastName", "Lovelace")
            .set("email", email)
            .set("isAdmin", false)
    }

    #[tokio::test]
    async fn test_insert_returns_created_row() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo
            .insert(&sample_user("ada@example.com"))
            .await
            .unwrap()
            .expect("inserted row returned");

        assert!(user.id > 0);
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.mobile, None);
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn test_unique_email_violation() {
        let db = test_db().await;
        let repo = db.users();

        repo.insert(&sample_user("dup@example.com")).await.unwrap();
        let err = repo
            .insert(&sample_user("dup@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_partial_update_leaves_other_columns() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo
            .insert(&sample_user("grace@example.com"))
            .await
            .unwrap()
            .unwrap();

        let updated = repo
            .update(
                &FieldSet::new().set("mobile", "0301-1234567"),
                &Filter::new().eq("id", user.id),
            )
            .await
            .unwrap();

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].mobile.as_deref(), Some("0301-1234567"));
        assert_eq!(updated[0].email, "grace@example.com");
        assert_eq!(updated[0].first_name, "Ada");
    }

    #[tokio::test]
    async fn test_update_nonexistent_is_empty() {
        let db = test_db().await;
        let repo = db.users();

        let updated = repo
            .update(
                &FieldSet::new().set("firstName", "Nobody"),
                &Filter::new().eq("id", 9999),
            )
            .await
            .unwrap();

        assert!(updated.is_empty());
    }

    #[tokio::test]
    async fn test_update_can_null_a_column() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo
            .insert(&sample_user("null@example.com").set("mobile", "0300-0000000"))
            .await
            .unwrap()
            .unwrap();

        let updated = repo
            .update(
                &FieldSet::new().set("mobile", FieldValue::Null),
                &Filter::new().eq("id", user.id),
            )
            .await
            .unwrap();

        assert_eq!(updated[0].mobile, None);
    }

    #[tokio::test]
    async fn test_unfiltered_update_rejected() {
        let db = test_db().await;
        let repo = db.users();

        let err = repo
            .update(&FieldSet::new().set("isAdmin", true), &Filter::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UnfilteredUpdate { .. }));
    }

    #[tokio::test]
    async fn test_match_all_update_touches_every_row() {
        let db = test_db().await;
        let repo = db.users();

        repo.insert(&sample_user("a@example.com")).await.unwrap();
        repo.insert(&sample_user("b@example.com")).await.unwrap();

        let updated = repo
            .update(&FieldSet::new().set("isAdmin", true), &Filter::match_all())
            .await
            .unwrap();

        assert_eq!(updated.len(), 2);
        assert!(updated.iter().all(|u| u.is_admin));
    }

    #[tokio::test]
    async fn test_unknown_attribute_rejected() {
        let db = test_db().await;
        let repo = db.users();

        let err = repo
            .insert(&sample_user("x@example.com").set("passwordHash", "nope"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UnknownAttribute { .. }));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let db = test_db().await;
        let repo = db.users();

        repo.insert(&sample_user("lookup@example.com")).await.unwrap();

        let found = repo.find_by_email("lookup@example.com").await.unwrap();
        assert!(found.is_some());

        let missing = repo.find_by_email("absent@example.com").await.unwrap();
        assert!(missing.is_none());
    }
}
