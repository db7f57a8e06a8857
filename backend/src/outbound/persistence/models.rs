//! Row models mapping between the `expenses` table and domain records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::ExpenseRecord;

use super::schema::expenses;

/// A full row read back from the ledger.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseRow {
    pub id: i32,
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl From<ExpenseRow> for ExpenseRecord {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: row.id,
            amount: row.amount,
            category: row.category,
            note: row.note,
            date: row.date,
            created_at: row.created_at,
        }
    }
}

/// Insertable row; `id` is assigned by SQLite.
#[derive(Debug, Insertable)]
#[diesel(table_name = expenses)]
pub struct NewExpenseRow<'a> {
    pub amount: f64,
    pub category: &'a str,
    pub note: &'a str,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}
