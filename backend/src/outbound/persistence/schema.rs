//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Expense ledger table.
    ///
    /// `id` is an `INTEGER PRIMARY KEY AUTOINCREMENT`, so ids increase
    /// monotonically and are never reused after deletion.
    expenses (id) {
        /// Primary key assigned by the store.
        id -> Integer,
        /// Strictly positive expense amount.
        amount -> Double,
        /// Non-empty category label.
        category -> Text,
        /// Free-form note, empty string when absent.
        note -> Text,
        /// Calendar date the expense applies to.
        date -> Date,
        /// Insertion timestamp, immutable after creation.
        created_at -> Timestamp,
    }
}
