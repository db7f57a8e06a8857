//! SQLite persistence adapter built on Diesel.

pub mod diesel_expense_repository;
pub mod models;
pub mod pool;
pub mod schema;

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub use diesel_expense_repository::DieselExpenseRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

/// Migrations compiled into the binary from `backend/migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply any pending migrations, creating the ledger table on first start.
///
/// # Errors
///
/// Returns `PoolError` when no connection can be checked out or a migration
/// statement fails.
pub fn run_migrations(pool: &DbPool) -> Result<(), PoolError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| PoolError::build(format!("migration failed: {err}")))?;
    Ok(())
}
