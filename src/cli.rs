//! Command-line interface - argument parsing and dispatch onto the core modules.
//!
//! Every subcommand maps onto one function in [`crate::core`]; [`execute`] runs it and
//! returns the text to print.

use crate::{
    config::settings::DEFAULT_CONFIG_PATH,
    core::{
        aggregate,
        expense::{self, ExpenseInput},
        report,
    },
    entities::{PaymentMethod, expense::Model},
    errors::Result,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::path::PathBuf;

/// Top-level arguments
#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Record personal expenses and report totals and averages")]
pub struct Cli {
    /// Settings file (missing file means defaults)
    #[arg(
        long,
        global = true,
        env = "EXPENSE_TRACKER_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,

    /// Database connection string, overrides the settings file
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new expense
    Add(ExpenseArgs),
    /// Show one expense
    Get {
        /// Expense id
        id: i64,
    },
    /// Replace every field of an existing expense
    Update {
        /// Expense id
        id: i64,
        /// New field values
        #[command(flatten)]
        fields: ExpenseArgs,
    },
    /// Permanently delete an expense
    Delete {
        /// Expense id
        id: i64,
    },
    /// List every expense
    List {
        /// Newest expense date first
        #[arg(long)]
        sorted: bool,
    },
    /// List expenses matching a filter
    #[command(subcommand)]
    Search(SearchCommand),
    /// Count, total and average of expenses matching a filter
    #[command(subcommand)]
    Summary(SearchCommand),
    /// Total amount for a slice of expenses
    #[command(subcommand)]
    Total(AggregateCommand),
    /// Average amount for a slice of expenses
    #[command(subcommand)]
    Average(AggregateCommand),
}

/// Field values for `add` and `update`
#[derive(Args, Debug, Clone)]
pub struct ExpenseArgs {
    /// Amount spent, greater than zero
    #[arg(long)]
    pub amount: Decimal,
    /// CASH, DEBIT_CARD, CREDIT_CARD, BANK_TRANSFER, MOBILE_PAYMENT or PAYPAL
    #[arg(long)]
    pub payment_method: PaymentMethod,
    /// Date of the expense (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
    /// Category, e.g. Food
    #[arg(long)]
    pub category: String,
    /// Where the money was spent
    #[arg(long)]
    pub location: String,
    /// What it was for (max 280 characters)
    #[arg(long)]
    pub description: String,
}

impl From<ExpenseArgs> for ExpenseInput {
    fn from(args: ExpenseArgs) -> Self {
        Self {
            amount: args.amount,
            payment_method: args.payment_method,
            expense_date: args.date,
            category: args.category,
            location: args.location,
            description: args.description,
        }
    }
}

/// Expense filters
#[derive(Subcommand, Debug, Clone)]
pub enum SearchCommand {
    /// Exact category match
    Category {
        /// Category name
        category: String,
    },
    /// Expense date within an inclusive range
    Range {
        /// First day (YYYY-MM-DD)
        start: NaiveDate,
        /// Last day (YYYY-MM-DD)
        end: NaiveDate,
    },
    /// Payment method match
    Payment {
        /// Payment method
        method: PaymentMethod,
    },
    /// Location contains the fragment, ignoring case
    Location {
        /// Location fragment
        fragment: String,
    },
    /// Category match within an inclusive date range
    CategoryRange {
        /// Category name
        category: String,
        /// First day (YYYY-MM-DD)
        start: NaiveDate,
        /// Last day (YYYY-MM-DD)
        end: NaiveDate,
    },
}

impl SearchCommand {
    fn label(&self) -> String {
        match self {
            Self::Category { category } => format!("category {category}"),
            Self::Range { start, end } => format!("{start} to {end}"),
            Self::Payment { method } => format!("payment method {method}"),
            Self::Location { fragment } => format!("location containing {fragment}"),
            Self::CategoryRange {
                category,
                start,
                end,
            } => format!("category {category}, {start} to {end}"),
        }
    }
}

/// Aggregate slices
#[derive(Subcommand, Debug, Clone)]
pub enum AggregateCommand {
    /// By exact category
    Category {
        /// Category name
        category: String,
    },
    /// By calendar month
    Month {
        /// Year, e.g. 2024
        year: i32,
        /// Month, 1-12
        month: u32,
    },
    /// By payment method
    Payment {
        /// Payment method
        method: PaymentMethod,
    },
    /// By location fragment, ignoring case
    Location {
        /// Location fragment
        fragment: String,
    },
}

impl AggregateCommand {
    fn label(&self) -> String {
        match self {
            Self::Category { category } => format!("category {category}"),
            Self::Month { year, month } => format!("{year}-{month:02}"),
            Self::Payment { method } => format!("payment method {method}"),
            Self::Location { fragment } => format!("location containing {fragment}"),
        }
    }
}

async fn search(db: &DatabaseConnection, filter: SearchCommand) -> Result<Vec<Model>> {
    match filter {
        SearchCommand::Category { category } => {
            expense::get_expenses_by_category(db, &category).await
        }
        SearchCommand::Range { start, end } => {
            expense::get_expenses_in_date_range(db, start, end).await
        }
        SearchCommand::Payment { method } => {
            expense::get_expenses_by_payment_method(db, method).await
        }
        SearchCommand::Location { fragment } => {
            expense::get_expenses_by_location(db, &fragment).await
        }
        SearchCommand::CategoryRange {
            category,
            start,
            end,
        } => expense::get_expenses_by_category_in_date_range(db, &category, start, end).await,
    }
}

async fn total(db: &DatabaseConnection, slice: AggregateCommand) -> Result<Decimal> {
    match slice {
        AggregateCommand::Category { category } => {
            aggregate::get_total_by_category(db, &category).await
        }
        AggregateCommand::Month { year, month } => {
            aggregate::get_total_in_month(db, year, month).await
        }
        AggregateCommand::Payment { method } => {
            aggregate::get_total_by_payment_method(db, method).await
        }
        AggregateCommand::Location { fragment } => {
            aggregate::get_total_by_location(db, &fragment).await
        }
    }
}

async fn average(db: &DatabaseConnection, slice: AggregateCommand) -> Result<Decimal> {
    match slice {
        AggregateCommand::Category { category } => {
            aggregate::get_average_by_category(db, &category).await
        }
        AggregateCommand::Month { year, month } => {
            aggregate::get_average_in_month(db, year, month).await
        }
        AggregateCommand::Payment { method } => {
            aggregate::get_average_by_payment_method(db, method).await
        }
        AggregateCommand::Location { fragment } => {
            aggregate::get_average_by_location(db, &fragment).await
        }
    }
}

/// Runs `command` against `db` and returns the text to print.
pub async fn execute(db: &DatabaseConnection, command: Command) -> Result<String> {
    match command {
        Command::Add(fields) => {
            let created = expense::create_expense(db, fields.into()).await?;
            Ok(format!("Recorded {}", report::format_expense_line(&created)))
        }
        Command::Get { id } => {
            let found = expense::get_expense_by_id(db, id).await?;
            Ok(report::format_expense_line(&found))
        }
        Command::Update { id, fields } => {
            let updated = expense::update_expense(db, id, fields.into()).await?;
            Ok(format!("Updated {}", report::format_expense_line(&updated)))
        }
        Command::Delete { id } => {
            expense::delete_expense(db, id).await?;
            Ok(format!("Deleted expense #{id}"))
        }
        Command::List { sorted } => {
            let expenses = if sorted {
                expense::get_all_expenses_sorted_by_date(db).await?
            } else {
                expense::get_all_expenses(db).await?
            };
            Ok(report::format_expense_list(&expenses))
        }
        Command::Search(filter) => {
            let expenses = search(db, filter).await?;
            Ok(report::format_expense_list(&expenses))
        }
        Command::Summary(filter) => {
            let label = filter.label();
            let expenses = search(db, filter).await?;
            Ok(report::format_summary(
                &label,
                &aggregate::summarize(&expenses),
            ))
        }
        Command::Total(slice) => {
            let label = slice.label();
            let amount = total(db, slice).await?;
            Ok(format!("Total for {label}: {}", report::format_amount(amount)))
        }
        Command::Average(slice) => {
            let label = slice.label();
            let amount = average(db, slice).await?;
            Ok(format!(
                "Average for {label}: {}",
                report::format_amount(amount)
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["expense-tracker"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_parse_add() {
        let command = parse(&[
            "add",
            "--amount",
            "12.50",
            "--payment-method",
            "debit-card",
            "--date",
            "2024-03-05",
            "--category",
            "Food",
            "--location",
            "Downtown Cafe",
            "--description",
            "Lunch",
        ]);

        let Command::Add(fields) = command else {
            panic!("expected add command");
        };
        assert_eq!(fields.amount, dec!(12.50));
        assert_eq!(fields.payment_method, PaymentMethod::DebitCard);
        assert_eq!(fields.date, date(2024, 3, 5));
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let bad_date = Cli::try_parse_from([
            "expense-tracker",
            "search",
            "range",
            "2024-02-30",
            "2024-03-01",
        ]);
        assert!(bad_date.is_err());

        let bad_method = Cli::try_parse_from(["expense-tracker", "total", "payment", "cheque"]);
        assert!(bad_method.is_err());
    }

    #[test]
    fn test_parse_aggregates() {
        assert!(matches!(
            parse(&["total", "month", "2024", "2"]),
            Command::Total(AggregateCommand::Month {
                year: 2024,
                month: 2
            })
        ));
        assert!(matches!(
            parse(&["average", "payment", "PAYPAL"]),
            Command::Average(AggregateCommand::Payment {
                method: PaymentMethod::Paypal
            })
        ));
    }

    #[tokio::test]
    async fn test_execute_add_then_aggregate() -> Result<()> {
        let db = setup_test_db().await?;

        let rows = [
            ("10.00", "2024-03-01"),
            ("15.00", "2024-03-10"),
            ("20.00", "2024-03-20"),
        ];
        for (amount, day) in rows {
            let output = execute(
                &db,
                parse(&[
                    "add",
                    "--amount",
                    amount,
                    "--payment-method",
                    "CASH",
                    "--date",
                    day,
                    "--category",
                    "Food",
                    "--location",
                    "Downtown Cafe",
                    "--description",
                    "Meal",
                ]),
            )
            .await?;
            assert!(output.starts_with("Recorded #"));
        }

        let output = execute(&db, parse(&["total", "month", "2024", "3"])).await?;
        assert_eq!(output, "Total for 2024-03: 45.00");

        let output = execute(&db, parse(&["average", "category", "Food"])).await?;
        assert_eq!(output, "Average for category Food: 15.00");

        let output = execute(&db, parse(&["summary", "location", "cafe"])).await?;
        assert_eq!(
            output,
            "location containing cafe: 3 expense(s), total 45.00, average 15.00"
        );

        let output = execute(&db, parse(&["list", "--sorted"])).await?;
        let first = output.lines().next().unwrap();
        assert!(first.contains("2024-03-20"));

        Ok(())
    }

    #[tokio::test]
    async fn test_execute_delete_missing_expense() -> Result<()> {
        let db = setup_test_db().await?;

        let result = execute(&db, parse(&["delete", "99"])).await;
        assert!(matches!(result, Err(Error::ExpenseNotFound { id: 99 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_execute_search_empty() -> Result<()> {
        let db = setup_test_db().await?;

        let output = execute(&db, parse(&["search", "category", "Food"])).await?;
        assert_eq!(output, "No expenses found.");

        Ok(())
    }
}
