//! Transport-agnostic domain layer: types, ports and services.

pub mod error;
pub mod expense;
pub mod interview;
pub mod ports;

pub use error::{DomainError, ErrorCode};
pub use expense::{ExpenseRecord, ExpenseValidationError, NewExpense};
pub use interview::{
    Difficulty, DifficultyFilter, GenerationOutcome, InterviewQuestion, InterviewService,
    QuestionSet, Topic, TopicValidationError, QUESTION_COUNT,
};
