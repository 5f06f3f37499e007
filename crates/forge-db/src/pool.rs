//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Process startup                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       ├── validate every entity's column table (fail fast)             │
//! │       ├── create SqlitePool (WAL mode, foreign keys on)                │
//! │       └── optionally apply the reference schema (dev/tests)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.cash(), db.users(), … ← repository accessors share the pool        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await ← explicit shutdown                                  │
//! │                                                                         │
//! │  The pool is an injected handle, never a process-global import:        │
//! │  tests and multi-tenant setups can hold several at once.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers, writers don't block readers
//! - Better crash recovery

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use forge_core::mapper::validate_columns;
use forge_core::{Cash, Mechanic, Product, Tool, Usage, User};

use crate::error::{DbError, DbResult};
use crate::repository::cash::CashRepository;
use crate::repository::mechanic::MechanicRepository;
use crate::repository::product::ProductRepository;
use crate::repository::tool::ToolRepository;
use crate::repository::usage::UsageRepository;
use crate::repository::user::UserRepository;
use crate::repository::{Entity, Repository};
use crate::schema;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/forge.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a small-business backend)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to apply the reference schema on connect.
    /// Default: false — production schema is owned by the deployment's
    /// migration tooling.
    pub apply_reference_schema: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            apply_reference_schema: false,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to apply the reference schema on connect.
    pub fn apply_reference_schema(mut self, apply: bool) -> Self {
        self.apply_reference_schema = apply;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = DbConfig::in_memory();
    /// let db = Database::new(config).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            apply_reference_schema: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./forge.db")).await?;
///
/// let entry = db
///     .cash()
///     .insert(&FieldSet::new().set("amount", 1209))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Validates every entity's static column table (fail fast on a
    ///    colliding or malformed mapping)
    /// 2. Configures SQLite: WAL mode, NORMAL synchronous, foreign keys on
    /// 3. Creates the connection pool
    /// 4. Applies the reference schema (if enabled)
    ///
    /// ## Arguments
    /// * `config` - Database configuration
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError)` - Mapping validation, connection or schema failure
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        verify_mappings()?;

        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path creates file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            // WAL mode: readers don't block writers and vice versa
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: may lose the last transaction on crash,
            // never corrupts
            .synchronous(SqliteSynchronous::Normal)
            // SQLite ships with foreign keys off for backwards compatibility
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.apply_reference_schema {
            schema::apply(&db.pool).await?;
        }

        Ok(db)
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by the repositories. Prefer the
    /// repository operations when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        Repository::new(self.pool.clone())
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        Repository::new(self.pool.clone())
    }

    /// Returns the cash repository.
    pub fn cash(&self) -> CashRepository {
        Repository::new(self.pool.clone())
    }

    /// Returns the tool repository.
    pub fn tools(&self) -> ToolRepository {
        Repository::new(self.pool.clone())
    }

    /// Returns the mechanic repository.
    pub fn mechanics(&self) -> MechanicRepository {
        Repository::new(self.pool.clone())
    }

    /// Returns the usage repository.
    pub fn usages(&self) -> UsageRepository {
        Repository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// ## When To Call
    /// - On application shutdown
    /// - When switching databases (rare)
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Startup Validation
// =============================================================================

/// Validates the static column table of every entity.
///
/// Run once per `Database::new`; the tables are constants, so a failure
/// here is a programming error that should never reach production.
fn verify_mappings() -> DbResult<()> {
    verify_entity::<User>()?;
    verify_entity::<Product>()?;
    verify_entity::<Cash>()?;
    verify_entity::<Tool>()?;
    verify_entity::<Mechanic>()?;
    verify_entity::<Usage>()?;
    Ok(())
}

fn verify_entity<E: Entity>() -> DbResult<()> {
    validate_columns(E::ENTITY, E::COLUMNS)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let config = DbConfig::in_memory();
        let db = Database::new(config).await.unwrap();

        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_schema_apply_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        schema::apply(db.pool()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.apply_reference_schema);
    }

    #[test]
    fn test_mappings_are_valid() {
        verify_mappings().unwrap();
    }
}
