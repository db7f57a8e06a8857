//! OpenAPI schema wrappers.
//!
//! Wire-shape mirrors of the domain types, kept separate so the domain
//! stays decoupled from the utoipa framework.

use utoipa::ToSchema;

/// A stored expense record as serialised on the wire.
#[derive(ToSchema)]
#[schema(as = Expense)]
pub struct ExpenseSchema {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 25.5)]
    pub amount: f64,
    #[schema(example = "Food")]
    pub category: String,
    #[schema(example = "Lunch")]
    pub note: String,
    #[schema(example = "2024-01-15")]
    pub date: String,
    #[schema(example = "2024-01-15T10:30:00")]
    pub created_at: String,
}

/// One generated interview question.
#[derive(ToSchema)]
#[schema(as = InterviewQuestion)]
pub struct QuestionSchema {
    pub question: String,
    pub answer: String,
    #[schema(example = "Advanced")]
    pub difficulty: String,
}

/// Uniform error envelope.
#[derive(ToSchema)]
#[schema(as = Error)]
pub struct ErrorSchema {
    #[schema(example = "error")]
    pub status: String,
    #[schema(example = "Amount must be greater than 0")]
    pub message: String,
}
