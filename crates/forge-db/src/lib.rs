//! # forge-db: Database Layer for Forge
//!
//! This crate provides database access for the Forge workshop backend.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Forge Data Flow                                 │
//! │                                                                         │
//! │  API handler (list_products, record_cash, …)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     forge-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │   Builder    │  │   │
//! │  │   │   (pool.rs)   │    │ (user, cash,  │    │ (builder.rs) │  │   │
//! │  │   │               │    │  product, …)  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Repository<E> │◄───│ SQL + $N     │  │   │
//! │  │   │ Validation    │    │ per entity    │    │ params       │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL mode, foreign keys on)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`builder`] - Parameterized statement construction
//! - [`schema`] - Reference DDL for dev databases and tests
//! - [`error`] - Database error types
//! - [`repository`] - Generic repository and the per-entity tables
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forge_core::{FieldSet, Filter};
//! use forge_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/forge.db")).await?;
//!
//! let entry = db
//!     .cash()
//!     .insert(&FieldSet::new().set("amount", 1209).set("purpose", "opening float"))
//!     .await?;
//!
//! let balance = db.cash().total().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod builder;
pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use builder::Order;
pub use repository::cash::CashRepository;
pub use repository::mechanic::MechanicRepository;
pub use repository::product::ProductRepository;
pub use repository::tool::ToolRepository;
pub use repository::usage::UsageRepository;
pub use repository::user::UserRepository;
pub use repository::{FindOptions, Repository};
