//! Shared test utilities for the expense tracker.
//!
//! This module provides helpers for setting up test databases and building expenses
//! with sensible defaults.
#![allow(clippy::unwrap_used)]

use crate::{
    core::expense::{self, ExpenseInput},
    entities::{PaymentMethod, expense::Model},
    errors::Result,
};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    crate::config::database::init_db("sqlite::memory:").await
}

/// Shorthand for a valid calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Builds a valid expense input.
///
/// # Defaults
/// * `payment_method`: Cash
/// * `location`: "Downtown Cafe"
/// * `description`: "Test expense"
pub fn sample_input(amount: Decimal, category: &str, expense_date: NaiveDate) -> ExpenseInput {
    ExpenseInput {
        amount,
        payment_method: PaymentMethod::Cash,
        expense_date,
        category: category.to_string(),
        location: "Downtown Cafe".to_string(),
        description: "Test expense".to_string(),
    }
}

/// Builds an unsaved expense model dated 2024-03-01, for tests that never hit the database.
pub fn sample_model(id: i64, amount: Decimal) -> Model {
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    Model {
        id,
        amount,
        payment_method: PaymentMethod::Cash,
        expense_date: date(2024, 3, 1),
        category: "Food".to_string(),
        location: "Downtown Cafe".to_string(),
        description: "Test expense".to_string(),
        created_at: timestamp,
        updated_at: timestamp,
    }
}

/// Records an expense built by [`sample_input`].
pub async fn create_test_expense(
    db: &DatabaseConnection,
    amount: Decimal,
    category: &str,
    expense_date: NaiveDate,
) -> Result<Model> {
    expense::create_expense(db, sample_input(amount, category, expense_date)).await
}

/// Records an expense with every field chosen by the caller.
pub async fn create_custom_expense(
    db: &DatabaseConnection,
    amount: Decimal,
    payment_method: PaymentMethod,
    expense_date: NaiveDate,
    category: &str,
    location: &str,
    description: &str,
) -> Result<Model> {
    expense::create_expense(
        db,
        ExpenseInput {
            amount,
            payment_method,
            expense_date,
            category: category.to_string(),
            location: location.to_string(),
            description: description.to_string(),
        },
    )
    .await
}
