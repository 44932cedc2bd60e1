//! Aggregate reporting - Totals and averages over filtered expenses.
//!
//! [`total`] and [`average`] are pure reductions over a slice of expenses; both return zero
//! for an empty slice instead of failing. The `get_total_*` and `get_average_*` functions
//! pair one store query from [`crate::core::expense`] with one of the two reductions.

use crate::{
    core::expense,
    entities::{PaymentMethod, expense::Model},
    errors::{Error, Result},
};
use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::DatabaseConnection;

/// Decimal places kept by [`average`]
pub const AVERAGE_DECIMAL_PLACES: u32 = 2;

/// Count, total and average of a set of expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseSummary {
    /// Number of expenses
    pub count: usize,
    /// Sum of all amounts
    pub total: Decimal,
    /// Average amount, rounded half-up to two decimal places
    pub average: Decimal,
}

/// Exact sum of the amounts. Zero for an empty slice.
#[must_use]
pub fn total(expenses: &[Model]) -> Decimal {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Mean amount rounded half-up to two decimal places. Zero for an empty slice.
#[must_use]
pub fn average(expenses: &[Model]) -> Decimal {
    if expenses.is_empty() {
        return Decimal::ZERO;
    }

    let count = Decimal::from(expenses.len());
    (total(expenses) / count)
        .round_dp_with_strategy(AVERAGE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Bundles [`total`] and [`average`] for reporting.
#[must_use]
pub fn summarize(expenses: &[Model]) -> ExpenseSummary {
    ExpenseSummary {
        count: expenses.len(),
        total: total(expenses),
        average: average(expenses),
    }
}

/// First and last calendar day of `month` in `year`, leap years included.
///
/// # Errors
/// [`Error::InvalidMonth`] if `month` is outside 1..=12 or the year cannot be represented.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || Error::InvalidMonth { year, month };

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .ok_or_else(invalid)?;

    Ok((start, end))
}

fn total_for(expenses: &[Model], context: &str) -> Decimal {
    if expenses.is_empty() {
        tracing::warn!("No expenses found to calculate total, for {context}");
    }
    total(expenses)
}

fn average_for(expenses: &[Model], context: &str) -> Decimal {
    if expenses.is_empty() {
        tracing::warn!("No expenses found to calculate average, for {context}");
    }
    average(expenses)
}

/// Total of all expenses in `category`.
pub async fn get_total_by_category(db: &DatabaseConnection, category: &str) -> Result<Decimal> {
    tracing::info!("Calculating total expenses for category: {category}");
    let expenses = expense::get_expenses_by_category(db, category).await?;
    Ok(total_for(&expenses, &format!("category: {category}")))
}

/// Total of all expenses dated within `month` of `year`.
pub async fn get_total_in_month(db: &DatabaseConnection, year: i32, month: u32) -> Result<Decimal> {
    tracing::info!("Calculating total expenses for {month}/{year}");
    let (start, end) = month_bounds(year, month)?;
    let expenses = expense::get_expenses_in_date_range(db, start, end).await?;
    Ok(total_for(&expenses, &format!("month: {month}/{year}")))
}

/// Total of all expenses paid with `payment_method`.
pub async fn get_total_by_payment_method(
    db: &DatabaseConnection,
    payment_method: PaymentMethod,
) -> Result<Decimal> {
    tracing::info!("Calculating total expenses for payment method: {payment_method}");
    let expenses = expense::get_expenses_by_payment_method(db, payment_method).await?;
    Ok(total_for(
        &expenses,
        &format!("payment method: {payment_method}"),
    ))
}

/// Total of all expenses whose location contains `location`.
pub async fn get_total_by_location(db: &DatabaseConnection, location: &str) -> Result<Decimal> {
    tracing::info!("Calculating total expenses for location: {location}");
    let expenses = expense::get_expenses_by_location(db, location).await?;
    Ok(total_for(&expenses, &format!("location: {location}")))
}

/// Average of all expenses in `category`.
pub async fn get_average_by_category(db: &DatabaseConnection, category: &str) -> Result<Decimal> {
    tracing::info!("Calculating average expense for category: {category}");
    let expenses = expense::get_expenses_by_category(db, category).await?;
    Ok(average_for(&expenses, &format!("category: {category}")))
}

/// Average of all expenses dated within `month` of `year`.
pub async fn get_average_in_month(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
) -> Result<Decimal> {
    tracing::info!("Calculating average expenses for {month}/{year}");
    let (start, end) = month_bounds(year, month)?;
    let expenses = expense::get_expenses_in_date_range(db, start, end).await?;
    Ok(average_for(&expenses, &format!("month: {month}/{year}")))
}

/// Average of all expenses paid with `payment_method`.
pub async fn get_average_by_payment_method(
    db: &DatabaseConnection,
    payment_method: PaymentMethod,
) -> Result<Decimal> {
    tracing::info!("Calculating average expense for payment method: {payment_method}");
    let expenses = expense::get_expenses_by_payment_method(db, payment_method).await?;
    Ok(average_for(
        &expenses,
        &format!("payment method: {payment_method}"),
    ))
}

/// Average of all expenses whose location contains `location`.
pub async fn get_average_by_location(db: &DatabaseConnection, location: &str) -> Result<Decimal> {
    tracing::info!("Calculating average expense for location: {location}");
    let expenses = expense::get_expenses_by_location(db, location).await?;
    Ok(average_for(&expenses, &format!("location: {location}")))
}
