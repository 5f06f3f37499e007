//! # forge-core: Pure Data Model for Forge
//!
//! This crate is the **heart** of the Forge data-access layer. It contains
//! the value model, field/filter sets, the attribute mapper and the domain
//! records — all with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Forge Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Route Handlers (external collaborator)             │   │
//! │  │     pass camelCase field sets, receive camelCase records        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ forge-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   value   │  │  fields   │  │  mapper   │  │   types   │  │   │
//! │  │   │FieldValue │  │ FieldSet  │  │ to_column │  │   User    │  │   │
//! │  │   │           │  │  Filter   │  │ ColumnDef │  │   Cash …  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  forge-db (Database Layer)                      │   │
//! │  │       statement builder, generic repositories, pool             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`value`] - The `FieldValue` value model (absence vs NULL)
//! - [`fields`] - Ordered `FieldSet` and `Filter` with the match-all sentinel
//! - [`mapper`] - camelCase→snake_case transform and static column tables
//! - [`types`] - Domain records (User, Product, Cash, Tool, Mechanic, Usage)
//! - [`error`] - Mapping validation errors
//!
//! ## Example
//!
//! ```rust
//! use forge_core::{FieldSet, Filter};
//!
//! // Partial update payload: only `amount` reaches the statement
//! let fields = FieldSet::new().set("amount", 500);
//! let filter = Filter::new().eq("id", 3);
//!
//! assert_eq!(fields.len(), 1);
//! assert!(!filter.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fields;
pub mod mapper;
pub mod types;
pub mod value;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use forge_core::FieldSet` instead of
// `use forge_core::fields::FieldSet`

pub use error::{CoreError, CoreResult};
pub use fields::{FieldSet, Filter};
pub use mapper::{to_column, ColumnDef};
pub use types::{Cash, Mechanic, Product, Tool, Usage, User};
pub use value::FieldValue;
