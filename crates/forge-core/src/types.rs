//! # Domain Records
//!
//! The typed, camelCase-serializing records returned to callers after a
//! row is mapped. Records are constructed per query result, never mutated
//! afterwards, and discarded when the caller is done.
//!
//! ## Record Vocabulary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Records                                  │
//! │                                                                         │
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────────────┐               │
//! │  │     User      │  │    Product    │  │     Cash      │               │
//! │  │  ───────────  │  │  ───────────  │  │  ───────────  │               │
//! │  │  id           │  │  id           │  │  id           │               │
//! │  │  first_name   │  │  name         │  │  amount       │               │
//! │  │  email        │  │  price_cents  │  │  purpose      │               │
//! │  └───────────────┘  └───────────────┘  └───────────────┘               │
//! │                                                                         │
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────────────┐               │
//! │  │     Tool      │  │   Mechanic    │  │     Usage     │               │
//! │  │  ───────────  │  │  ───────────  │  │  ───────────  │               │
//! │  │  id           │  │  id           │  │  tool_id      │               │
//! │  │  name         │  │  first_name   │  │  mechanic_id  │               │
//! │  │  archived     │  │  mobile       │  │  returned_at  │               │
//! │  └───────────────┘  └───────────────┘  └───────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identity is the store's integer rowid; `created_at` is a store-side
//! default. Serialization renames every field to camelCase so route
//! handlers can forward records as JSON unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// User
// =============================================================================

/// A backoffice user account.
///
/// Password hashing and token issuance live in the auth collaborator;
/// this record carries only the administrative profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: Option<String>,
    /// Grants access to the admin-only routes.
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product tracked in the shop inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Manufacturer or supplier, when known.
    pub company: Option<String>,
    /// Price in cents (smallest currency unit, never floats).
    pub price_cents: i64,
    /// Units currently on hand.
    pub stock: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Cash
// =============================================================================

/// A cash-book entry. Positive amounts are income, negative are expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cash {
    pub id: i64,
    /// Amount in cents.
    pub amount: i64,
    pub purpose: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Tool
// =============================================================================

/// A workshop tool that mechanics can take out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: i64,
    pub name: String,
    /// Inventory code stamped on the tool, when present.
    pub code: Option<String>,
    /// Soft-retired tools stay referenced by historical usages.
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Mechanic
// =============================================================================

/// A mechanic registered with the workshop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mechanic {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub mobile: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Usage
// =============================================================================

/// One checkout of a tool by a mechanic.
///
/// `returned_at` stays NULL while the tool is out; the return flow updates
/// the row with a filter on `returned_at IS NULL` so two concurrent
/// returns cannot both succeed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub id: i64,
    pub tool_id: i64,
    pub mechanic_id: i64,
    pub taken_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Usage {
    /// True while the tool has not been returned.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_records_serialize_camel_case() {
        let user = User {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            mobile: None,
            is_admin: true,
            created_at: timestamp(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["isAdmin"], true);
        // Storage names never leak to consumers
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_usage_is_open() {
        let mut usage = Usage {
            id: 1,
            tool_id: 2,
            mechanic_id: 3,
            taken_at: timestamp(),
            returned_at: None,
            created_at: timestamp(),
        };
        assert!(usage.is_open());

        usage.returned_at = Some(timestamp());
        assert!(!usage.is_open());
    }
}
