//! Expense ledger records and their validation rules.
//!
//! An [`ExpenseRecord`] is immutable once stored: the ledger supports create,
//! read and delete but no update. Validation happens when a [`NewExpense`] is
//! constructed so the repository only ever sees well-formed inputs.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored expense row, as returned by the ledger.
///
/// `id` is assigned by the store and never reused after deletion.
/// `created_at` is stamped at insert time and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i32,
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Validation failures raised when constructing a [`NewExpense`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseValidationError {
    /// Amount is zero, negative, or not a finite number.
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,
    /// Category is empty after trimming whitespace.
    #[error("Category cannot be empty")]
    EmptyCategory,
}

/// A validated expense ready for insertion.
///
/// Construction enforces the ledger invariants: the amount is strictly
/// positive and finite, the category is non-empty after trimming. When no
/// date is supplied the record is stamped with the process-local current
/// date.
///
/// # Examples
/// ```
/// use backend::domain::NewExpense;
///
/// let expense = NewExpense::new(25.5, "Food", "Lunch", None).expect("valid expense");
/// assert_eq!(expense.category(), "Food");
/// assert!(NewExpense::new(0.0, "Food", "", None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    amount: f64,
    category: String,
    note: String,
    date: NaiveDate,
}

impl NewExpense {
    /// Validate and build a new expense. A missing `date` defaults to today.
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        note: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<Self, ExpenseValidationError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        let category = category.into().trim().to_owned();
        if category.is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        let note = note.into().trim().to_owned();
        Ok(Self {
            amount,
            category,
            note,
            date: date.unwrap_or_else(|| Local::now().date_naive()),
        })
    }

    /// Expense amount, strictly positive.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Trimmed, non-empty category.
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Trimmed note, possibly empty.
    pub fn note(&self) -> &str {
        self.note.as_str()
    }

    /// Calendar date the expense applies to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-5.0)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn rejects_non_positive_amounts(#[case] amount: f64) {
        assert_eq!(
            NewExpense::new(amount, "Food", "", None),
            Err(ExpenseValidationError::NonPositiveAmount)
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn rejects_blank_categories(#[case] category: &str) {
        assert_eq!(
            NewExpense::new(10.0, category, "", None),
            Err(ExpenseValidationError::EmptyCategory)
        );
    }

    #[test]
    fn trims_category_and_note() {
        let expense = NewExpense::new(10.0, "  Food ", " Lunch  ", None).expect("valid");
        assert_eq!(expense.category(), "Food");
        assert_eq!(expense.note(), "Lunch");
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let expense = NewExpense::new(10.0, "Food", "", None).expect("valid");
        assert_eq!(expense.date(), Local::now().date_naive());
    }

    #[test]
    fn explicit_date_is_kept_verbatim() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        let expense = NewExpense::new(10.0, "Food", "", Some(date)).expect("valid");
        assert_eq!(expense.date(), date);
    }
}
