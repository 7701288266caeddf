//! Typed filters for listing expenses.
//!
//! A filter translates to a parameterized `WHERE` clause. User-supplied
//! values are always bound parameters, never spliced into the query string.

use rusqlite::types::Value;
use time::Date;

/// Whether to restrict a listing to a single category.
///
/// A dedicated variant for "no constraint" keeps the sentinel distinct from
/// a real category name, so a category literally called "All" still filters
/// correctly.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CategoryFilter {
    /// Include expenses from every category.
    #[default]
    Any,
    /// Include only expenses whose category matches the name exactly.
    Matching(String),
}

/// Defines which expenses [crate::query_expenses] should return.
///
/// Each field is optional and the specified fields are combined with logical
/// AND. The default filter matches every expense.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Include expenses dated on or after this date.
    pub date_from: Option<Date>,
    /// Include expenses dated on or before this date.
    pub date_to: Option<Date>,
    /// Restrict the listing to a single category.
    pub category: CategoryFilter,
    /// Include expenses whose category or note contains this text,
    /// case-insensitively.
    pub text: Option<String>,
}

impl ExpenseFilter {
    /// Build the `WHERE` clause and bound parameters for this filter.
    ///
    /// Returns an empty clause when no field is set. Dates are compared as
    /// ISO-8601 text, which the expense table stores, so lexicographic order
    /// matches date order.
    pub(crate) fn to_sql(&self) -> (String, Vec<Value>) {
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(date_from) = self.date_from {
            where_clause_parts.push(format!("date >= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(date_from.to_string()));
        }

        if let Some(date_to) = self.date_to {
            where_clause_parts.push(format!("date <= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(date_to.to_string()));
        }

        if let CategoryFilter::Matching(category) = &self.category {
            where_clause_parts.push(format!("category = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(category.clone()));
        }

        if let Some(text) = &self.text {
            // SQLite LIKE is case-insensitive for ASCII.
            where_clause_parts.push(format!(
                "(category LIKE ?{} OR note LIKE ?{})",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            let pattern = format!("%{text}%");
            query_parameters.push(Value::Text(pattern.clone()));
            query_parameters.push(Value::Text(pattern));
        }

        if where_clause_parts.is_empty() {
            (String::new(), query_parameters)
        } else {
            (
                String::from("WHERE ") + &where_clause_parts.join(" AND "),
                query_parameters,
            )
        }
    }
}
