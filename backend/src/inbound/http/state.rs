//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O. Both components
//! are constructed once at process start and shared across requests; there
//! is no other process-wide mutable state.

use std::sync::Arc;

use crate::domain::ports::ExpenseRepository;
use crate::domain::InterviewService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Durable expense ledger.
    pub expenses: Arc<dyn ExpenseRepository>,
    /// Interview question generator.
    pub interview: Arc<InterviewService>,
}

impl HttpState {
    /// Bundle explicitly constructed components for injection.
    pub fn new(expenses: Arc<dyn ExpenseRepository>, interview: Arc<InterviewService>) -> Self {
        Self {
            expenses,
            interview,
        }
    }
}
