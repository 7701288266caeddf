//! Outlay is a personal expense tracker backed by a local SQLite database.
//!
//! This library provides the core the `outlay` CLI is built on: a record
//! store for dated, categorized expenses, a typed filter that translates to
//! parameterized queries, per-month and per-category summaries, and CSV
//! export of filtered listings. Any front end that can make synchronous
//! calls can use it the same way the bundled CLI does.

#![warn(missing_docs)]

mod amount;
mod category;
mod config;
mod database_id;
mod db;
mod expense;
mod export;
mod filter;
mod summary;

pub use amount::Amount;
pub use category::{CategoryName, DEFAULT_CATEGORIES};
pub use config::Config;
pub use database_id::DatabaseID;
pub use db::initialize;
pub use expense::{
    Expense, ExpenseDraft, count_expenses, create_expense, delete_expense, get_expense,
    query_expenses, update_expense,
};
pub use export::{export_csv, write_csv};
pub use filter::{CategoryFilter, ExpenseFilter};
pub use summary::{
    CategoryTotal, MonthCategoryTotal, MonthTotal, fill_missing_months, month_summary,
    yearly_summary,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A string could not be parsed as a calendar date.
    #[error("could not parse \"{0}\" as a date, expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// A string could not be parsed as a monetary amount.
    #[error("could not parse \"{0}\" as an amount")]
    InvalidAmount(String),

    /// An amount of zero or less was used to create an expense.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    /// An amount with sub-cent precision was used to create an expense.
    #[error("amount cannot have more than two decimal places")]
    AmountPrecision,

    /// An amount beyond the storable range was used to create an expense.
    #[error("amount cannot exceed 99999999.99")]
    AmountTooLarge,

    /// An empty string was used to create a category name.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// A string longer than 64 characters was used to create a category name.
    #[error("category cannot be longer than 64 characters")]
    CategoryTooLong,

    /// A note longer than 255 characters was used to create an expense.
    #[error("note cannot be longer than 255 characters")]
    NoteTooLong,

    /// The requested expense was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested expense could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist.
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist.
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// Writing a CSV export failed.
    #[error("could not write CSV export: {0}")]
    ExportError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
