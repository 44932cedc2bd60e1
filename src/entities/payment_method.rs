//! Payment method enum - How an expense was paid.
//!
//! Stored in the `payment_method` column as its upper-case name (`"CASH"`, `"DEBIT_CARD"`, ...)
//! and serialized the same way.

use sea_orm::{Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Closed set of payment methods an expense can be recorded with
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Paid in cash
    #[sea_orm(string_value = "CASH")]
    Cash,
    /// Paid with a debit card
    #[sea_orm(string_value = "DEBIT_CARD")]
    DebitCard,
    /// Paid with a credit card
    #[sea_orm(string_value = "CREDIT_CARD")]
    CreditCard,
    /// Paid by bank transfer
    #[sea_orm(string_value = "BANK_TRANSFER")]
    BankTransfer,
    /// Paid through a mobile wallet
    #[sea_orm(string_value = "MOBILE_PAYMENT")]
    MobilePayment,
    /// Paid through `PayPal`
    #[sea_orm(string_value = "PAYPAL")]
    Paypal,
}

impl PaymentMethod {
    /// The canonical upper-case name, identical to the stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::DebitCard => "DEBIT_CARD",
            Self::CreditCard => "CREDIT_CARD",
            Self::BankTransfer => "BANK_TRANSFER",
            Self::MobilePayment => "MOBILE_PAYMENT",
            Self::Paypal => "PAYPAL",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    /// Accepts the canonical names in any case, with `-` in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::iter()
            .find(|method| method.as_str() == normalized)
            .ok_or_else(|| format!("unknown payment method: {s}"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_payment_method() {
        assert_eq!("CASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!(
            "credit-card".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CreditCard
        );
        assert_eq!(
            " mobile_payment ".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::MobilePayment
        );
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_display_matches_stored_value() {
        for method in PaymentMethod::iter() {
            assert_eq!(method.to_string(), method.to_value());
        }
    }
}
