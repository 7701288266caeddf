//! CSV export of expense listings.
//!
//! The export writes the rows it is given in the order it is given them, so
//! an exported filtered listing matches what the caller saw on screen.

use std::{fs::File, io::Write, path::Path};

use crate::{Error, expense::Expense};

/// Write `expenses` to `writer` as comma-separated values.
///
/// The header row is `ID,Date,Category,Amount,Note`. Dates are ISO-8601 and
/// amounts always carry two decimal places.
///
/// # Errors
/// This function will return an [Error::ExportError] if writing fails.
pub fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer
        .write_record(["ID", "Date", "Category", "Amount", "Note"])
        .map_err(|error| Error::ExportError(error.to_string()))?;

    for expense in expenses {
        writer
            .write_record([
                expense.id.to_string(),
                expense.date.to_string(),
                expense.category.to_string(),
                expense.amount.to_string(),
                expense.note.clone(),
            ])
            .map_err(|error| Error::ExportError(error.to_string()))?;
    }

    writer
        .flush()
        .map_err(|error| Error::ExportError(error.to_string()))
}

/// Write `expenses` as CSV to the file at `path`, creating or truncating it.
///
/// # Errors
/// This function will return an [Error::ExportError] if the file cannot be
/// created or writing fails.
pub fn export_csv(expenses: &[Expense], path: &Path) -> Result<(), Error> {
    let file = File::create(path).map_err(|error| Error::ExportError(error.to_string()))?;

    write_csv(expenses, file)
}
