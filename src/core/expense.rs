//! Expense business logic - The store behind every expense operation.
//!
//! This module provides functions for creating, retrieving, updating, and deleting expenses,
//! plus the filtered queries the aggregate reports are built on. Every write is validated
//! against the expense invariants before it reaches the database: the amount must be positive
//! and the description must be non-blank and at most [`MAX_DESCRIPTION_LENGTH`] characters.
//! Timestamps are stamped here explicitly; `created_at` is written once on insert and
//! `updated_at` is refreshed on every update.

use crate::{
    entities::{Expense, PaymentMethod, expense},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    QueryOrder, Set, TransactionTrait,
    prelude::*,
    sea_query::{Expr, Func, LikeExpr},
};

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 280;

/// Maximum significant digits of an amount. `SQLite` keeps decimals as REAL, which holds
/// 15 significant decimal digits exactly.
pub const MAX_AMOUNT_SIGNIFICANT_DIGITS: u32 = 15;

const LIKE_ESCAPE: char = '\\';

/// Caller-supplied fields of an expense, used for both insert and full update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseInput {
    /// Amount spent, must be greater than zero
    pub amount: Decimal,
    /// How the expense was paid
    pub payment_method: PaymentMethod,
    /// Calendar day of the expense
    pub expense_date: NaiveDate,
    /// Free-form category
    pub category: String,
    /// Free-form location
    pub location: String,
    /// Non-blank description
    pub description: String,
}

impl From<&expense::Model> for ExpenseInput {
    fn from(model: &expense::Model) -> Self {
        Self {
            amount: model.amount,
            payment_method: model.payment_method,
            expense_date: model.expense_date,
            category: model.category.clone(),
            location: model.location.clone(),
            description: model.description.clone(),
        }
    }
}

/// Checks the write invariants of an expense without touching the database.
///
/// # Errors
/// * [`Error::InvalidAmount`] if the amount is zero or negative, or has more than
///   [`MAX_AMOUNT_SIGNIFICANT_DIGITS`] significant digits
/// * [`Error::InvalidDescription`] if the description is blank or longer than
///   [`MAX_DESCRIPTION_LENGTH`] characters
pub fn validate_expense(input: &ExpenseInput) -> Result<()> {
    if input.amount <= Decimal::ZERO
        || significant_digits(input.amount) > MAX_AMOUNT_SIGNIFICANT_DIGITS
    {
        return Err(Error::InvalidAmount {
            amount: input.amount,
        });
    }

    if input.description.trim().is_empty() {
        return Err(Error::InvalidDescription {
            reason: "Description is required".to_string(),
        });
    }

    let length = input.description.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(Error::InvalidDescription {
            reason: format!(
                "Description must be at most {MAX_DESCRIPTION_LENGTH} characters (got {length})"
            ),
        });
    }

    Ok(())
}

/// Records a new expense and returns it with its generated id and timestamps.
///
/// Both `created_at` and `updated_at` are set to the same instant.
pub async fn create_expense(
    db: &DatabaseConnection,
    input: ExpenseInput,
) -> Result<expense::Model> {
    tracing::info!("Saving expense {}", input.description);
    validate_expense(&input)?;

    let now = Utc::now();
    let expense_model = expense::ActiveModel {
        amount: Set(input.amount),
        payment_method: Set(input.payment_method),
        expense_date: Set(input.expense_date),
        category: Set(input.category),
        location: Set(input.location),
        description: Set(input.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    expense_model.insert(db).await.map_err(Into::into)
}

/// Retrieves an expense by its id.
///
/// # Errors
/// [`Error::ExpenseNotFound`] if no expense has this id.
pub async fn get_expense_by_id(db: &DatabaseConnection, id: i64) -> Result<expense::Model> {
    tracing::debug!("Getting expense by id {id}");
    find_expense(db, id).await
}

async fn find_expense<C>(db: &C, id: i64) -> Result<expense::Model>
where
    C: ConnectionTrait,
{
    Expense::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::ExpenseNotFound { id })
}

/// Overwrites every caller-supplied field of an existing expense.
///
/// The id and `created_at` are preserved. `updated_at` is refreshed and never moves
/// backwards, even if the clock does.
///
/// # Errors
/// * [`Error::ExpenseNotFound`] if no expense has this id
/// * a validation error if the new values break an invariant
pub async fn update_expense(
    db: &DatabaseConnection,
    id: i64,
    input: ExpenseInput,
) -> Result<expense::Model> {
    tracing::info!("Updating expense with id: {id}");

    let txn = db.begin().await?;

    let existing = find_expense(&txn, id).await?;
    validate_expense(&input)?;

    let updated_at = Utc::now().max(existing.updated_at);
    let mut expense_model: expense::ActiveModel = existing.into();
    expense_model.amount = Set(input.amount);
    expense_model.payment_method = Set(input.payment_method);
    expense_model.expense_date = Set(input.expense_date);
    expense_model.category = Set(input.category);
    expense_model.location = Set(input.location);
    expense_model.description = Set(input.description);
    expense_model.updated_at = Set(updated_at);

    let updated = expense_model.update(&txn).await?;
    txn.commit().await?;

    Ok(updated)
}

/// Permanently removes an expense.
///
/// # Errors
/// [`Error::ExpenseNotFound`] if no expense has this id.
pub async fn delete_expense(db: &DatabaseConnection, id: i64) -> Result<()> {
    tracing::info!("Deleting expense {id}");

    let txn = db.begin().await?;
    let existing = find_expense(&txn, id).await?;
    existing.delete(&txn).await?;
    txn.commit().await?;

    Ok(())
}

/// Retrieves every expense, in no particular order.
pub async fn get_all_expenses(db: &DatabaseConnection) -> Result<Vec<expense::Model>> {
    tracing::debug!("Getting all expenses");
    Expense::find().all(db).await.map_err(Into::into)
}

/// Retrieves every expense, newest `expense_date` first.
///
/// Expenses on the same day are ordered by id, most recently recorded first.
pub async fn get_all_expenses_sorted_by_date(
    db: &DatabaseConnection,
) -> Result<Vec<expense::Model>> {
    tracing::debug!("Fetching all expenses ordered by date (newest first)");
    Expense::find()
        .order_by_desc(expense::Column::ExpenseDate)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves expenses whose category equals `category` exactly.
pub async fn get_expenses_by_category(
    db: &DatabaseConnection,
    category: &str,
) -> Result<Vec<expense::Model>> {
    tracing::debug!("Fetching expenses for category: {category}");
    Expense::find()
        .filter(expense::Column::Category.eq(category))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves expenses dated between `start` and `end`, both inclusive.
///
/// A range with `start` after `end` matches nothing.
pub async fn get_expenses_in_date_range(
    db: &DatabaseConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<expense::Model>> {
    tracing::debug!("Fetching expenses between {start} and {end}");
    Expense::find()
        .filter(expense::Column::ExpenseDate.between(start, end))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves expenses paid with `payment_method`.
pub async fn get_expenses_by_payment_method(
    db: &DatabaseConnection,
    payment_method: PaymentMethod,
) -> Result<Vec<expense::Model>> {
    tracing::debug!("Fetching expenses for payment method: {payment_method}");
    Expense::find()
        .filter(expense::Column::PaymentMethod.eq(payment_method))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves expenses whose location contains `fragment`, ignoring ASCII case.
///
/// `%` and `_` in the fragment are matched literally.
pub async fn get_expenses_by_location(
    db: &DatabaseConnection,
    fragment: &str,
) -> Result<Vec<expense::Model>> {
    tracing::debug!("Fetching expenses for location containing: {fragment}");
    Expense::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(expense::Column::Location)))
                .like(LikeExpr::new(location_pattern(fragment)).escape(LIKE_ESCAPE)),
        )
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves expenses in `category` dated between `start` and `end`, both inclusive.
pub async fn get_expenses_by_category_in_date_range(
    db: &DatabaseConnection,
    category: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<expense::Model>> {
    tracing::debug!("Fetching expenses for category {category} between {start} and {end}");
    Expense::find()
        .filter(expense::Column::Category.eq(category))
        .filter(expense::Column::ExpenseDate.between(start, end))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of significant decimal digits, ignoring trailing zeros after the point.
fn significant_digits(amount: Decimal) -> u32 {
    amount
        .normalize()
        .mantissa()
        .unsigned_abs()
        .checked_ilog10()
        .map_or(0, |log| log + 1)
}

/// Builds a lower-case `LIKE` pattern matching `fragment` anywhere in the value.
fn location_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.to_ascii_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
