//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the expense database and the remote text-generation model). Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::expense::{ExpenseRecord, NewExpense};

/// Errors surfaced by the expense persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseRepositoryError {
    /// Connectivity or pool checkout failures.
    #[error("expense store connection failed: {message}")]
    Connection { message: String },
    /// Statement execution failures.
    #[error("expense store query failed: {message}")]
    Query { message: String },
}

impl ExpenseRepositoryError {
    /// Helper for connection-level adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for statement-level adapter errors.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Durable CRUD over expense records.
///
/// Each operation is a single atomic statement against the ledger table;
/// transient storage faults propagate immediately, without retries.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Insert a validated expense, returning the stored record with its
    /// generated id and creation timestamp.
    async fn insert(&self, expense: NewExpense) -> Result<ExpenseRecord, ExpenseRepositoryError>;

    /// All records ordered by calendar date descending, then most recently
    /// inserted first. An empty ledger yields an empty vec.
    async fn list_all(&self) -> Result<Vec<ExpenseRecord>, ExpenseRepositoryError>;

    /// Exact-match lookup on the primary key.
    async fn find_by_id(&self, id: i32) -> Result<Option<ExpenseRecord>, ExpenseRepositoryError>;

    /// Delete by primary key, reporting whether a row was removed.
    async fn delete_by_id(&self, id: i32) -> Result<bool, ExpenseRepositoryError>;
}

/// Instruction payload for one remote text-generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System instruction framing the task.
    pub system: String,
    /// User instruction naming the topic.
    pub user: String,
}

/// Errors surfaced by the remote text-generation adapter.
///
/// None of these reach the HTTP caller; the interview service absorbs them
/// all into the fallback path. The variants exist so logs distinguish a
/// timeout from a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionModelError {
    /// The call exceeded its deadline.
    #[error("model call timed out: {message}")]
    Timeout { message: String },
    /// Network-level failure or an undecodable reply envelope.
    #[error("model transport failure: {message}")]
    Transport { message: String },
    /// The provider answered with a non-success status.
    #[error("model returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// No credentials were configured at startup.
    #[error("no model credentials configured")]
    NotConfigured,
}

impl QuestionModelError {
    /// Helper for deadline failures.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for transport failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for non-success provider statuses.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Remote text-generation call: opaque text in, text out.
#[async_trait]
pub trait QuestionModel: Send + Sync {
    /// Run one completion, returning the raw reply text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, QuestionModelError>;
}

/// Model port used when no credentials are configured: every call fails,
/// which resolves each generation to the fallback set.
pub struct DisabledQuestionModel;

#[async_trait]
impl QuestionModel for DisabledQuestionModel {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, QuestionModelError> {
        Err(QuestionModelError::NotConfigured)
    }
}

/// Scripted model returning a fixed reply; used by tests.
pub struct FixtureQuestionModel {
    reply: String,
}

impl FixtureQuestionModel {
    /// Create a model that always replies with `reply`.
    pub fn new(reply: String) -> Self {
        Self { reply }
    }
}

#[async_trait]
impl QuestionModel for FixtureQuestionModel {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, QuestionModelError> {
        Ok(self.reply.clone())
    }
}

/// In-memory expense store for handler tests and doctests.
///
/// Mirrors the persistence contract: monotonically increasing ids that are
/// never reused, and the date-descending listing order.
#[derive(Default)]
pub struct FixtureExpenseRepository {
    rows: std::sync::Mutex<Vec<ExpenseRecord>>,
    next_id: std::sync::atomic::AtomicI32,
}

impl FixtureExpenseRepository {
    /// Empty fixture ledger starting at id 1.
    pub fn new() -> Self {
        Self {
            rows: std::sync::Mutex::new(Vec::new()),
            next_id: std::sync::atomic::AtomicI32::new(1),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ExpenseRecord>> {
        match self.rows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl ExpenseRepository for FixtureExpenseRepository {
    async fn insert(&self, expense: NewExpense) -> Result<ExpenseRecord, ExpenseRepositoryError> {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let record = ExpenseRecord {
            id,
            amount: expense.amount(),
            category: expense.category().to_owned(),
            note: expense.note().to_owned(),
            date: expense.date(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.lock().push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ExpenseRecord>, ExpenseRepositoryError> {
        let mut rows = self.lock().clone();
        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ExpenseRecord>, ExpenseRepositoryError> {
        Ok(self.lock().iter().find(|row| row.id == id).cloned())
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ExpenseRepositoryError> {
        let mut rows = self.lock();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_repository_never_reuses_ids() {
        let repo = FixtureExpenseRepository::new();
        let first = repo
            .insert(NewExpense::new(10.0, "Food", "", None).expect("valid"))
            .await
            .expect("insert");
        assert!(repo.delete_by_id(first.id).await.expect("delete"));
        let second = repo
            .insert(NewExpense::new(20.0, "Travel", "", None).expect("valid"))
            .await
            .expect("insert");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn fixture_repository_deleting_twice_reports_false() {
        let repo = FixtureExpenseRepository::new();
        let record = repo
            .insert(NewExpense::new(10.0, "Food", "", None).expect("valid"))
            .await
            .expect("insert");
        assert!(repo.delete_by_id(record.id).await.expect("delete"));
        assert!(!repo.delete_by_id(record.id).await.expect("delete"));
        assert!(repo.find_by_id(record.id).await.expect("find").is_none());
    }
}
