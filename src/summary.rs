//! Aggregate summaries over expenses.
//!
//! Summaries are computed in SQL with GROUP BY so raw rows never reach the
//! caller. Amounts are stored as integer cents, which keeps the sums exact;
//! binary floating point is never involved.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::Error;

/// One row of a yearly summary: the total spent in a category during one
/// calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCategoryTotal {
    /// The calendar month, 1-12.
    pub month: u8,
    /// The expense category.
    pub category: String,
    /// The sum of the amounts, in dollars with two decimal places.
    pub total: Decimal,
}

/// One row of a single-month summary: the total spent in a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The expense category.
    pub category: String,
    /// The sum of the amounts, in dollars with two decimal places.
    pub total: Decimal,
}

/// The total spent in one calendar month across all categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    /// The calendar month, 1-12.
    pub month: u8,
    /// The sum of the amounts, zero for months with no expenses.
    pub total: Decimal,
}

/// Sum expense amounts grouped by calendar month and category for `year`.
///
/// Rows are ordered by month and then by category. Months with no expenses
/// produce no rows; use [fill_missing_months] when a full twelve-month
/// series is needed for display.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn yearly_summary(year: i32, connection: &Connection) -> Result<Vec<MonthCategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT CAST(strftime('%m', date) AS INTEGER) AS month, category, SUM(amount)
             FROM expense
             WHERE strftime('%Y', date) = ?1
             GROUP BY month, category
             ORDER BY month ASC, category ASC",
        )?
        .query_map([format!("{year:04}")], |row| {
            let month = row.get(0)?;
            let category = row.get(1)?;
            let total_cents: i64 = row.get(2)?;

            Ok(MonthCategoryTotal {
                month,
                category,
                total: Decimal::new(total_cents, 2),
            })
        })?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// Sum expense amounts grouped by category for exactly one year and month.
///
/// Rows are ordered by total descending, so the largest spend category comes
/// first. Ties may appear in any order. A month with no expenses yields an
/// empty vector, not an error.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn month_summary(
    year: i32,
    month: u8,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT category, SUM(amount) AS total
             FROM expense
             WHERE strftime('%Y', date) = ?1 AND strftime('%m', date) = ?2
             GROUP BY category
             ORDER BY total DESC",
        )?
        .query_map([format!("{year:04}"), format!("{month:02}")], |row| {
            let category = row.get(0)?;
            let total_cents: i64 = row.get(1)?;

            Ok(CategoryTotal {
                category,
                total: Decimal::new(total_cents, 2),
            })
        })?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// Collapse a yearly summary into totals for each of the twelve months,
/// filling months that have no expenses with zero.
///
/// Front ends charting monthly totals need the full 1-12 range even when
/// some months are empty.
pub fn fill_missing_months(rows: &[MonthCategoryTotal]) -> Vec<MonthTotal> {
    (1..=12)
        .map(|month| {
            let total = rows
                .iter()
                .filter(|row| row.month == month)
                .map(|row| row.total)
                .sum();

            MonthTotal { month, total }
        })
        .collect()
}
