//! Database schema setup.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, expense::create_expense_table};

/// Set up the application schema on `connection`.
///
/// Safe to call on every startup: table creation is idempotent. The schema
/// is created inside an exclusive transaction so a half-initialized database
/// is never left behind.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
