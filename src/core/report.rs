//! Report formatting.
//!
//! Turns expenses and aggregates into plain-text lines for the command-line front end.
//! Nothing here touches the database.

use crate::{core::aggregate::ExpenseSummary, entities::expense};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with exactly two decimal places, e.g. `"45.00"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Formats a single expense as one line.
///
/// `#<id> | <date> | <amount> | <method> | <category> | <location> | <description>`
#[must_use]
pub fn format_expense_line(expense: &expense::Model) -> String {
    format!(
        "#{} | {} | {} | {} | {} | {} | {}",
        expense.id,
        expense.expense_date,
        format_amount(expense.amount),
        expense.payment_method,
        expense.category,
        expense.location,
        expense.description
    )
}

/// Formats a list of expenses, one per line, with a placeholder for an empty list.
#[must_use]
pub fn format_expense_list(expenses: &[expense::Model]) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    expenses
        .iter()
        .map(format_expense_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a summary under `label`.
#[must_use]
pub fn format_summary(label: &str, summary: &ExpenseSummary) -> String {
    format!(
        "{label}: {} expense(s), total {}, average {}",
        summary.count,
        format_amount(summary.total),
        format_amount(summary.average)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::summarize;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(45)), "45.00");
        assert_eq!(format_amount(dec!(15.5)), "15.50");
        assert_eq!(format_amount(dec!(0.125)), "0.13");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_format_expense_line() {
        let expense = sample_model(7, dec!(12.3));
        let line = format_expense_line(&expense);
        assert_eq!(
            line,
            "#7 | 2024-03-01 | 12.30 | CASH | Food | Downtown Cafe | Test expense"
        );
    }

    #[test]
    fn test_format_expense_list_empty() {
        assert_eq!(format_expense_list(&[]), "No expenses found.");
    }

    #[test]
    fn test_format_expense_list_one_line_each() {
        let expenses = vec![sample_model(1, dec!(1)), sample_model(2, dec!(2))];
        let output = format_expense_list(&expenses);
        assert_eq!(output.lines().count(), 2);
        assert!(output.starts_with("#1 | "));
    }

    #[test]
    fn test_format_summary() {
        let expenses = vec![sample_model(1, dec!(10)), sample_model(2, dec!(15))];
        let summary = summarize(&expenses);
        assert_eq!(
            format_summary("Food", &summary),
            "Food: 2 expense(s), total 25.00, average 12.50"
        );
    }
}
