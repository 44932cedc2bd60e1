//! Expense entity - A single recorded outflow of money.
//!
//! Each expense has an amount, `payment_method`, `expense_date`, free-form category and
//! location, a short description, and `created_at`/`updated_at` timestamps. The timestamps
//! are written by `core::expense`, never by the database.

use super::payment_method::PaymentMethod;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier, assigned on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Amount spent, always greater than zero
    pub amount: Decimal,
    /// How the expense was paid
    pub payment_method: PaymentMethod,
    /// Calendar day the money was spent
    #[sea_orm(column_name = "date")]
    pub expense_date: Date,
    /// Free-form category (e.g., "Food", "Transport")
    pub category: String,
    /// Free-form location (e.g., "Downtown Cafe")
    pub location: String,
    /// What the expense was for, at most 280 characters
    #[sea_orm(column_type = "String(StringLen::N(280))")]
    pub description: String,
    /// When the expense was first recorded
    pub created_at: DateTimeUtc,
    /// When the expense was last modified
    pub updated_at: DateTimeUtc,
}

/// Expenses stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
