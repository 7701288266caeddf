//! The `outlay` CLI, a thin front end over the expense-tracking core.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use rusqlite::Connection;
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};
use tracing_subscriber::{
    Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use outlay::{
    CategoryFilter, CategoryName, Config, Error, Expense, ExpenseDraft, ExpenseFilter,
    create_expense, delete_expense, export_csv, fill_missing_months, initialize, month_summary,
    query_expenses, update_expense, yearly_summary,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Track personal expenses in a local SQLite database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// File path to the expense SQLite database. Created on first use.
    #[arg(long, default_value = "expenses.db")]
    db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense.
    Add {
        /// The date of the expense as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// The expense category, e.g. Food or Travel.
        #[arg(long)]
        category: String,

        /// The amount spent, e.g. 12.50.
        #[arg(long)]
        amount: String,

        /// Free-text detail about the expense.
        #[arg(long, default_value = "")]
        note: String,
    },

    /// List expenses, optionally filtered.
    List {
        /// Include expenses dated on or after this date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<String>,

        /// Include expenses dated on or before this date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<String>,

        /// Include only expenses with exactly this category.
        #[arg(long)]
        category: Option<String>,

        /// Include only expenses whose category or note contains this text.
        #[arg(long)]
        search: Option<String>,

        /// Export the listing as CSV to the given path instead of printing it.
        #[arg(
            long,
            value_name = "PATH",
            num_args = 0..=1,
            default_missing_value = "expenses.csv"
        )]
        csv: Option<PathBuf>,

        /// Print the listing as JSON instead of a table.
        #[arg(long, conflicts_with = "csv")]
        json: bool,
    },

    /// Overwrite an existing expense with new field values.
    Update {
        /// The ID of the expense to update.
        id: i64,

        /// The new date as YYYY-MM-DD.
        #[arg(long)]
        date: String,

        /// The new category.
        #[arg(long)]
        category: String,

        /// The new amount.
        #[arg(long)]
        amount: String,

        /// The new note.
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Delete an expense. This is permanent.
    Delete {
        /// The ID of the expense to delete.
        id: i64,
    },

    /// Show per-month, per-category totals for a year.
    Report {
        /// The calendar year to report on, e.g. 2025.
        year: i32,
    },

    /// Show per-category totals for one month, largest spend first.
    Summary {
        /// The calendar year, e.g. 2025.
        year: i32,

        /// The calendar month, 1-12.
        #[arg(value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,
    },

    /// List the suggested expense categories.
    Categories,
}

fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();
    let config = Config::new(cli.db_path);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> Result<(), Error> {
    let connection = Connection::open(&config.db_path)?;
    initialize(&connection)?;

    match command {
        Command::Add {
            date,
            category,
            amount,
            note,
        } => {
            let date = match date {
                Some(text) => parse_date(&text)?,
                None => OffsetDateTime::now_utc().date(),
            };
            let category: CategoryName = category.parse()?;

            if !config
                .categories
                .iter()
                .any(|suggested| suggested == category.as_ref())
            {
                tracing::debug!("category \"{category}\" is not in the suggested list");
            }

            let draft = ExpenseDraft::new(date, category, amount.parse()?, &note)?;
            let expense = create_expense(draft, &connection)?;

            println!(
                "Saved expense #{}: {} {} on {}",
                expense.id, expense.category, expense.amount, expense.date
            );
        }
        Command::List {
            from,
            to,
            category,
            search,
            csv,
            json,
        } => {
            let filter = ExpenseFilter {
                date_from: from.as_deref().map(parse_date).transpose()?,
                date_to: to.as_deref().map(parse_date).transpose()?,
                category: match category {
                    Some(name) => CategoryFilter::Matching(name),
                    None => CategoryFilter::Any,
                },
                text: search,
            };

            let expenses = query_expenses(&filter, &connection)?;

            if let Some(path) = csv {
                export_csv(&expenses, &path)?;
                println!("Exported {} expenses to {}", expenses.len(), path.display());
            } else if json {
                let text = serde_json::to_string_pretty(&expenses)
                    .map_err(|error| Error::ExportError(error.to_string()))?;
                println!("{text}");
            } else {
                print_table(&expenses);
            }
        }
        Command::Update {
            id,
            date,
            category,
            amount,
            note,
        } => {
            let draft =
                ExpenseDraft::new(parse_date(&date)?, category.parse()?, amount.parse()?, &note)?;
            update_expense(id, draft, &connection)?;

            println!("Updated expense #{id}");
        }
        Command::Delete { id } => {
            delete_expense(id, &connection)?;

            println!("Deleted expense #{id}");
        }
        Command::Report { year } => {
            let rows = yearly_summary(year, &connection)?;

            if rows.is_empty() {
                println!("No expenses found for {year}.");
                return Ok(());
            }

            println!("{:<6} {:<20} {:>12}", "Month", "Category", "Total");
            for row in &rows {
                println!(
                    "{:<6} {:<20} {:>12}",
                    row.month,
                    row.category,
                    row.total.to_string()
                );
            }

            println!();
            println!("Monthly totals for {year}:");
            for month_total in fill_missing_months(&rows) {
                println!(
                    "{:>5} {:>12}",
                    month_total.month,
                    month_total.total.to_string()
                );
            }
        }
        Command::Summary { year, month } => {
            let rows = month_summary(year, month, &connection)?;

            if rows.is_empty() {
                println!("No expenses found for {year}-{month:02}.");
                return Ok(());
            }

            println!("{:<20} {:>12}", "Category", "Total");
            for row in &rows {
                println!("{:<20} {:>12}", row.category, row.total.to_string());
            }
        }
        Command::Categories => {
            for category in &config.categories {
                println!("{category}");
            }
        }
    }

    Ok(())
}

fn setup_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_filter(env_filter),
        )
        .init();
}

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_string()))
}

fn print_table(expenses: &[Expense]) {
    println!(
        "{:<6} {:<12} {:<20} {:>12}  {}",
        "ID", "Date", "Category", "Amount", "Note"
    );

    for expense in expenses {
        println!(
            "{:<6} {:<12} {:<20} {:>12}  {}",
            expense.id,
            expense.date.to_string(),
            expense.category.to_string(),
            expense.amount.to_string(),
            expense.note
        );
    }
}
