//! Expense management for the tracker.
//!
//! This module contains everything related to expense records:
//! - The `Expense` model and `ExpenseDraft` for creating and updating them
//! - Database functions for storing, querying, and managing expenses

use rusqlite::{Connection, Row, params_from_iter};
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{Amount, CategoryName, Error, database_id::DatabaseID, filter::ExpenseFilter};

// ============================================================================
// MODELS
// ============================================================================

/// The maximum length of an expense note in characters.
const MAX_NOTE_LENGTH: usize = 255;

/// A single expense record, i.e. an event where money was spent.
///
/// To create a new `Expense`, build an [ExpenseDraft] and pass it to
/// [create_expense].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: DatabaseID,
    /// When the expense occurred.
    pub date: Date,
    /// The category the expense belongs to.
    pub category: CategoryName,
    /// The amount of money spent.
    pub amount: Amount,
    /// Free-text detail about the expense, possibly empty.
    pub note: String,
    /// When the record was inserted. Set once by the store, never updated.
    pub created_at: OffsetDateTime,
}

/// An expense record without an ID, used for creating and updating expenses.
///
/// # Examples
///
/// ```rust
/// use time::macros::date;
///
/// use outlay::ExpenseDraft;
///
/// let draft = ExpenseDraft::new(
///     date!(2025 - 01 - 15),
///     "Food".parse().unwrap(),
///     "12.50".parse().unwrap(),
///     "lunch",
/// )
/// .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    /// When the expense occurred.
    pub date: Date,
    /// The category the expense belongs to.
    pub category: CategoryName,
    /// The amount of money spent.
    pub amount: Amount,
    /// Free-text detail about the expense, possibly empty.
    pub note: String,
}

impl ExpenseDraft {
    /// Create a draft expense.
    ///
    /// `date`, `category`, and `amount` carry their own validation;
    /// the note is trimmed and checked here.
    ///
    /// # Errors
    /// This function will return an [Error::NoteTooLong] if `note` is longer
    /// than 255 characters.
    pub fn new(
        date: Date,
        category: CategoryName,
        amount: Amount,
        note: &str,
    ) -> Result<Self, Error> {
        let note = note.trim();

        if note.chars().count() > MAX_NOTE_LENGTH {
            return Err(Error::NoteTooLong);
        }

        Ok(Self {
            date,
            category,
            amount,
            note: note.to_string(),
        })
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database from a draft.
///
/// The database assigns the ID and the store sets `created_at` to the current
/// time; the returned [Expense] is the row as stored.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_expense(draft: ExpenseDraft, connection: &Connection) -> Result<Expense, Error> {
    let created_at = OffsetDateTime::now_utc();

    let expense = connection
        .prepare(
            "INSERT INTO expense (date, category, amount, note, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, date, category, amount, note, created_at",
        )?
        .query_row(
            (
                draft.date,
                draft.category.as_ref(),
                draft.amount.as_cents(),
                &draft.note,
                created_at,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: DatabaseID, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, date, category, amount, note, created_at FROM expense WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Overwrite the mutable fields of the expense matching `id` with `draft`.
///
/// `created_at` is left untouched.
///
/// # Errors
/// This function will return an [Error::UpdateMissingExpense] if `id` does
/// not refer to an expense in the database, or an [Error::SqlError] if there
/// is some other SQL error.
pub fn update_expense(
    id: DatabaseID,
    draft: ExpenseDraft,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE expense SET date = ?1, category = ?2, amount = ?3, note = ?4 WHERE id = ?5",
        (
            draft.date,
            draft.category.as_ref(),
            draft.amount.as_cents(),
            &draft.note,
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    Ok(())
}

/// Delete the expense matching `id` from the database.
///
/// # Errors
/// This function will return an [Error::DeleteMissingExpense] if `id` does
/// not refer to an expense in the database, or an [Error::SqlError] if there
/// is some other SQL error.
pub fn delete_expense(id: DatabaseID, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Query for expenses in the database.
///
/// Results are ordered by date descending and then by ID descending, so the
/// newest entries come first and ties on date break towards the most
/// recently inserted.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn query_expenses(
    filter: &ExpenseFilter,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let (where_clause, query_parameters) = filter.to_sql();

    let query_string = [
        "SELECT id, date, category, amount, note, created_at FROM expense",
        where_clause.as_str(),
        "ORDER BY date DESC, id DESC",
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ");

    connection
        .prepare(&query_string)?
        .query_map(params_from_iter(query_parameters.iter()), map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                amount INTEGER NOT NULL,
                note TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let category: String = row.get(2)?;
    let amount_cents: i64 = row.get(3)?;
    let note = row.get(4)?;
    let created_at = row.get(5)?;

    Ok(Expense {
        id,
        date,
        category: CategoryName::new_unchecked(&category),
        amount: Amount::from_cents(amount_cents),
        note,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod expense_tests {
    use rusqlite::Connection;
    use time::{Date, macros::date};

    use super::{
        Expense, ExpenseDraft, count_expenses, create_expense, delete_expense, get_expense,
        query_expenses, update_expense,
    };
    use crate::{Error, db::initialize, filter::ExpenseFilter};

    fn init_db() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn draft(date: Date, category: &str, amount: &str, note: &str) -> ExpenseDraft {
        ExpenseDraft::new(date, category.parse().unwrap(), amount.parse().unwrap(), note).unwrap()
    }

    #[test]
    fn draft_rejects_note_longer_than_255_characters() {
        let note = "x".repeat(256);

        let result = ExpenseDraft::new(
            date!(2025 - 01 - 15),
            "Food".parse().unwrap(),
            "12.50".parse().unwrap(),
            &note,
        );

        assert_eq!(result, Err(Error::NoteTooLong));
    }

    #[test]
    fn create_expense_assigns_id_and_round_trips_fields() {
        let connection = init_db();
        let draft = draft(date!(2025 - 01 - 15), "Food", "12.50", "lunch");

        let expense = create_expense(draft.clone(), &connection).unwrap();

        assert!(expense.id > 0);
        assert_eq!(expense.date, draft.date);
        assert_eq!(expense.category, draft.category);
        assert_eq!(expense.amount, draft.amount);
        assert_eq!(expense.note, draft.note);

        let listed = query_expenses(&ExpenseFilter::default(), &connection).unwrap();
        assert_eq!(listed, vec![expense]);
    }

    #[test]
    fn get_expense_returns_stored_row() {
        let connection = init_db();
        let inserted = create_expense(
            draft(date!(2025 - 01 - 15), "Food", "12.50", "lunch"),
            &connection,
        )
        .unwrap();

        let selected = get_expense(inserted.id, &connection).unwrap();

        assert_eq!(inserted, selected);
    }

    #[test]
    fn get_expense_fails_with_invalid_id() {
        let connection = init_db();

        let result = get_expense(1337, &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn update_expense_overwrites_all_mutable_fields() {
        let connection = init_db();
        let inserted = create_expense(
            draft(date!(2025 - 01 - 15), "Food", "12.50", "lunch"),
            &connection,
        )
        .unwrap();

        let replacement = draft(date!(2025 - 02 - 01), "Travel", "40.00", "bus fare");
        update_expense(inserted.id, replacement.clone(), &connection).unwrap();

        let updated = get_expense(inserted.id, &connection).unwrap();
        assert_eq!(updated.date, replacement.date);
        assert_eq!(updated.category, replacement.category);
        assert_eq!(updated.amount, replacement.amount);
        assert_eq!(updated.note, replacement.note);
    }

    #[test]
    fn update_expense_leaves_created_at_untouched() {
        let connection = init_db();
        let inserted = create_expense(
            draft(date!(2025 - 01 - 15), "Food", "12.50", "lunch"),
            &connection,
        )
        .unwrap();

        update_expense(
            inserted.id,
            draft(date!(2025 - 02 - 01), "Travel", "40.00", ""),
            &connection,
        )
        .unwrap();

        let updated = get_expense(inserted.id, &connection).unwrap();
        assert_eq!(updated.created_at, inserted.created_at);
    }

    #[test]
    fn update_expense_with_invalid_id_does_not_create_or_alter_rows() {
        let connection = init_db();
        let inserted = create_expense(
            draft(date!(2025 - 01 - 15), "Food", "12.50", "lunch"),
            &connection,
        )
        .unwrap();

        let result = update_expense(
            inserted.id + 1,
            draft(date!(2025 - 02 - 01), "Travel", "40.00", ""),
            &connection,
        );

        assert_eq!(result, Err(Error::UpdateMissingExpense));
        assert_eq!(count_expenses(&connection).unwrap(), 1);
        assert_eq!(get_expense(inserted.id, &connection).unwrap(), inserted);
    }

    #[test]
    fn delete_expense_removes_row() {
        let connection = init_db();
        let inserted = create_expense(
            draft(date!(2025 - 01 - 15), "Food", "12.50", "lunch"),
            &connection,
        )
        .unwrap();

        delete_expense(inserted.id, &connection).unwrap();

        assert_eq!(get_expense(inserted.id, &connection), Err(Error::NotFound));
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }

    #[test]
    fn delete_expense_with_invalid_id_returns_not_found() {
        let connection = init_db();

        let result = delete_expense(1337, &connection);

        assert_eq!(result, Err(Error::DeleteMissingExpense));
    }

    #[test]
    fn query_expenses_orders_by_date_then_id_descending() {
        let connection = init_db();
        let oldest = create_expense(
            draft(date!(2025 - 01 - 10), "Food", "5.00", ""),
            &connection,
        )
        .unwrap();
        let same_day_first = create_expense(
            draft(date!(2025 - 01 - 20), "Food", "6.00", ""),
            &connection,
        )
        .unwrap();
        let same_day_second = create_expense(
            draft(date!(2025 - 01 - 20), "Travel", "7.00", ""),
            &connection,
        )
        .unwrap();

        let expenses: Vec<Expense> =
            query_expenses(&ExpenseFilter::default(), &connection).unwrap();

        assert_eq!(expenses, vec![same_day_second, same_day_first, oldest]);
    }

    #[test]
    fn query_expenses_with_filter_returns_subset_of_unfiltered_listing() {
        let connection = init_db();
        create_expense(
            draft(date!(2025 - 01 - 15), "Food", "12.50", "lunch"),
            &connection,
        )
        .unwrap();
        create_expense(
            draft(date!(2025 - 01 - 20), "Travel", "40.00", ""),
            &connection,
        )
        .unwrap();
        create_expense(
            draft(date!(2025 - 02 - 01), "Food", "5.00", "snack"),
            &connection,
        )
        .unwrap();

        let everything = query_expenses(&ExpenseFilter::default(), &connection).unwrap();
        let filter = ExpenseFilter {
            date_from: Some(date!(2025 - 01 - 16)),
            ..Default::default()
        };
        let filtered = query_expenses(&filter, &connection).unwrap();

        assert!(filtered.len() < everything.len());
        for expense in &filtered {
            assert!(expense.date >= date!(2025 - 01 - 16));
            assert!(everything.contains(expense));
        }
    }

    #[test]
    fn query_expenses_category_filter_returns_matching_records_newest_first() {
        let connection = init_db();
        let food_lunch = create_expense(
            draft(date!(2025 - 01 - 15), "Food", "12.50", "lunch"),
            &connection,
        )
        .unwrap();
        create_expense(
            draft(date!(2025 - 01 - 20), "Travel", "40.00", ""),
            &connection,
        )
        .unwrap();
        let food_snack = create_expense(
            draft(date!(2025 - 02 - 01), "Food", "5.00", "snack"),
            &connection,
        )
        .unwrap();

        let filter = ExpenseFilter {
            category: crate::CategoryFilter::Matching("Food".to_string()),
            ..Default::default()
        };
        let expenses = query_expenses(&filter, &connection).unwrap();

        assert_eq!(expenses, vec![food_snack, food_lunch]);
    }

    #[test]
    fn query_expenses_text_search_is_case_insensitive_over_category_and_note() {
        let connection = init_db();
        let matches_note = create_expense(
            draft(date!(2025 - 01 - 15), "Food", "12.50", "LUNCH with friends"),
            &connection,
        )
        .unwrap();
        let matches_category = create_expense(
            draft(date!(2025 - 01 - 16), "Lunches", "8.00", ""),
            &connection,
        )
        .unwrap();
        create_expense(
            draft(date!(2025 - 01 - 17), "Travel", "40.00", "airport taxi"),
            &connection,
        )
        .unwrap();

        let filter = ExpenseFilter {
            text: Some("lunch".to_string()),
            ..Default::default()
        };
        let expenses = query_expenses(&filter, &connection).unwrap();

        assert_eq!(expenses, vec![matches_category, matches_note]);
    }

    #[test]
    fn query_expenses_with_hostile_category_value_matches_literally() {
        let connection = init_db();
        create_expense(
            draft(date!(2025 - 01 - 15), "Food", "12.50", ""),
            &connection,
        )
        .unwrap();
        let hostile = create_expense(
            draft(date!(2025 - 01 - 16), "Food' OR '1'='1", "1.00", ""),
            &connection,
        )
        .unwrap();

        let filter = ExpenseFilter {
            category: crate::CategoryFilter::Matching("Food' OR '1'='1".to_string()),
            ..Default::default()
        };
        let expenses = query_expenses(&filter, &connection).unwrap();

        assert_eq!(expenses, vec![hostile]);
    }
}
