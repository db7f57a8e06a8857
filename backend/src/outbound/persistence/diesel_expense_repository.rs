//! SQLite-backed `ExpenseRepository` implementation using Diesel ORM.
//!
//! Every operation is a single statement, executed on the blocking thread
//! pool so SQLite I/O never stalls the async runtime. No retries: transient
//! storage faults propagate to the caller as typed errors.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tracing::debug;

use crate::domain::ports::{ExpenseRepository, ExpenseRepositoryError};
use crate::domain::{ExpenseRecord, NewExpense};

use super::models::{ExpenseRow, NewExpenseRow};
use super::pool::{DbPool, PoolError};
use super::schema::expenses;

/// Diesel-backed implementation of the `ExpenseRepository` port.
#[derive(Clone)]
pub struct DieselExpenseRepository {
    pool: DbPool,
}

impl DieselExpenseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> ExpenseRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ExpenseRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ExpenseRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ExpenseRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => ExpenseRepositoryError::query("database error"),
        _ => ExpenseRepositoryError::query("database query error"),
    }
}

/// Run a blocking closure on the tokio blocking pool.
async fn run_blocking<T, F>(operation: F) -> Result<T, ExpenseRepositoryError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ExpenseRepositoryError> + Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|err| {
            ExpenseRepositoryError::connection(format!("blocking task join failed: {err}"))
        })?
}

#[async_trait]
impl ExpenseRepository for DieselExpenseRepository {
    async fn insert(&self, expense: NewExpense) -> Result<ExpenseRecord, ExpenseRepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            let row = NewExpenseRow {
                amount: expense.amount(),
                category: expense.category(),
                note: expense.note(),
                date: expense.date(),
                created_at: Utc::now().naive_utc(),
            };
            diesel::insert_into(expenses::table)
                .values(&row)
                .returning(ExpenseRow::as_returning())
                .get_result::<ExpenseRow>(&mut conn)
                .map(ExpenseRecord::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<ExpenseRecord>, ExpenseRepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            expenses::table
                .select(ExpenseRow::as_select())
                .order((
                    expenses::date.desc(),
                    expenses::created_at.desc(),
                    expenses::id.desc(),
                ))
                .load::<ExpenseRow>(&mut conn)
                .map(|rows| rows.into_iter().map(ExpenseRecord::from).collect())
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ExpenseRecord>, ExpenseRepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            expenses::table
                .filter(expenses::id.eq(id))
                .select(ExpenseRow::as_select())
                .first::<ExpenseRow>(&mut conn)
                .optional()
                .map(|row| row.map(ExpenseRecord::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ExpenseRepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            diesel::delete(expenses::table.filter(expenses::id.eq(id)))
                .execute(&mut conn)
                .map(|rows| rows > 0)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::{run_migrations, PoolConfig};
    use chrono::NaiveDate;

    fn repository() -> DieselExpenseRepository {
        let pool = DbPool::new(PoolConfig::new(":memory:").with_max_size(1)).expect("pool");
        run_migrations(&pool).expect("migrations");
        DieselExpenseRepository::new(pool)
    }

    fn expense(amount: f64, category: &str, date: &str) -> NewExpense {
        let date = date.parse::<NaiveDate>().expect("valid date");
        NewExpense::new(amount, category, "", Some(date)).expect("valid expense")
    }

    #[tokio::test]
    async fn insert_then_find_round_trips_all_fields() {
        let repo = repository();
        let stored = repo
            .insert(expense(25.5, "Food", "2024-01-15"))
            .await
            .expect("insert");

        let found = repo
            .find_by_id(stored.id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found, stored);
        assert_eq!(found.amount, 25.5);
        assert_eq!(found.date.to_string(), "2024-01-15");
    }

    #[tokio::test]
    async fn list_orders_by_date_then_insertion_recency() {
        let repo = repository();
        let old = repo
            .insert(expense(1.0, "Food", "2024-01-10"))
            .await
            .expect("insert");
        let first_recent = repo
            .insert(expense(2.0, "Food", "2024-01-15"))
            .await
            .expect("insert");
        let second_recent = repo
            .insert(expense(3.0, "Travel", "2024-01-15"))
            .await
            .expect("insert");

        let ids: Vec<i32> = repo
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec![second_recent.id, first_recent.id, old.id]);
    }

    #[tokio::test]
    async fn empty_ledger_lists_nothing() {
        let repo = repository();
        assert!(repo.list_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_row_and_reports_misses() {
        let repo = repository();
        let stored = repo
            .insert(expense(9.99, "Misc", "2024-02-01"))
            .await
            .expect("insert");

        assert!(repo.delete_by_id(stored.id).await.expect("delete"));
        assert!(repo.find_by_id(stored.id).await.expect("find").is_none());
        assert!(!repo.delete_by_id(stored.id).await.expect("delete"));
    }

    #[tokio::test]
    async fn deleted_ids_are_never_reassigned() {
        let repo = repository();
        let first = repo
            .insert(expense(5.0, "Food", "2024-03-01"))
            .await
            .expect("insert");
        assert!(repo.delete_by_id(first.id).await.expect("delete"));

        let second = repo
            .insert(expense(6.0, "Food", "2024-03-02"))
            .await
            .expect("insert");
        assert!(second.id > first.id);
    }
}
