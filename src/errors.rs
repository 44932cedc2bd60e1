//! Unified error type for the expense tracker.
//!
//! Two failure kinds originate in this crate: a missing expense ([`Error::ExpenseNotFound`])
//! and a write that would break an expense invariant (the `Invalid*` variants). Storage
//! errors from `SeaORM` are carried through unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

/// All errors produced by the expense tracker.
#[derive(Debug, Error)]
pub enum Error {
    /// No expense exists with the requested id
    #[error("Expense not found with id: {id}")]
    ExpenseNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// The amount is not positive or has too many significant digits
    #[error("Invalid amount: {amount} (amount must be positive, at most 15 significant digits)")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// The description is blank or too long
    #[error("Invalid description: {reason}")]
    InvalidDescription {
        /// Why the description was rejected
        reason: String,
    },

    /// The (year, month) pair does not name a calendar month
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// Requested year
        year: i32,
        /// Requested month (1-12 expected)
        month: u32,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Details of the failure
        message: String,
    },

    /// Storage-layer failure, passed through untranslated
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if the error reports a missing expense.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ExpenseNotFound { .. })
    }

    /// Returns true if the error reports rejected input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount { .. } | Self::InvalidDescription { .. } | Self::InvalidMonth { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
