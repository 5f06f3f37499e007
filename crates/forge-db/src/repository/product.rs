//! # Product Repository
//!
//! Database operations for the sales inventory.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Product Search Works                             │
//! │                                                                         │
//! │  User types: "tyre"                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Term is matched against: name, company                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ products                                │                           │
//! │  │                                         │                           │
//! │  │ Tyre 26"        | Panther    │ ← MATCH! │                           │
//! │  │ Tyre tube 26"   | Panther    │ ← MATCH! │                           │
//! │  │ Chain cover     | Sohrab     │          │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [Tyre 26", Tyre tube 26"]                                    │
//! │                                                                         │
//! │  Matching is a case-insensitive substring scan. The catalogue is a     │
//! │  few hundred rows in practice, so no search index is kept.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use forge_core::{ColumnDef, Product};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::DbResult;
use crate::repository::{optional_column, Entity, Repository};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "id"),
    ColumnDef::new("name", "name"),
    ColumnDef::new("company", "company"),
    ColumnDef::new("priceCents", "price_cents"),
    ColumnDef::new("stock", "stock"),
    ColumnDef::new("createdAt", "created_at"),
];

impl Entity for Product {
    const ENTITY: &'static str = "Product";
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [ColumnDef] = COLUMNS;
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "company"];

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Product {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            company: optional_column(row, "company")?,
            price_cents: row.try_get("price_cents")?,
            stock: row.try_get("stock")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Repository for product database operations.
pub type ProductRepository = Repository<Product>;

// =============================================================================
// Tests
// =============================================================================
