//! Defines the core data models shared by the entry workflow and the API client.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The identifier the remote API assigns to a transaction.
pub type TransactionId = i64;

/// The kind of money movement a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. salary or a refund.
    Income,
    /// Money going out, e.g. groceries or rent.
    Expense,
    /// Money owed or lent, e.g. a loan instalment.
    Debt,
}

impl TransactionType {
    /// Every transaction type, in display order.
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Debt,
    ];

    /// The wire form of the type, e.g. "expense".
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Debt => "debt",
        }
    }

    /// The human-readable label, e.g. "Expense".
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
            TransactionType::Debt => "Debt",
        }
    }

    /// Parse the wire form of the type.
    pub fn parse(text: &str) -> Option<TransactionType> {
        TransactionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == text)
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a transaction was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash.
    #[default]
    Cash,
    /// Debit or credit card.
    Card,
    /// A direct bank transfer.
    BankTransfer,
    /// A UPI payment.
    Upi,
    /// Anything else.
    Other,
}

impl PaymentMethod {
    /// Every payment method, in display order.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::BankTransfer,
        PaymentMethod::Upi,
        PaymentMethod::Other,
    ];

    /// The wire form of the method, e.g. "bank_transfer".
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Other => "other",
        }
    }

    /// The human-readable label, e.g. "Bank transfer".
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::BankTransfer => "Bank transfer",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Other => "Other",
        }
    }

    /// Parse the wire form of the method.
    pub fn parse(text: &str) -> Option<PaymentMethod> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == text)
    }
}

/// A transaction owned by the remote API.
///
/// Read-only from this app's perspective; changes go through the update and
/// delete endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedTransaction {
    /// The server-assigned ID of the transaction.
    pub id: TransactionId,
    /// The kind of money movement.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The category the transaction belongs to.
    pub category: String,
    /// The amount of money moved.
    pub amount: f64,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: String,
    /// When the transaction happened. May carry a time component; use
    /// [PersistedTransaction::date_only] before editing.
    pub date: String,
    /// How the transaction was paid. Older records omit this field.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// The canonical timestamp the API assigned when the record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl PersistedTransaction {
    /// The date-only portion of the transaction's date string.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if the date string does not start with a
    /// valid ISO calendar date.
    pub fn date_only(&self) -> Result<Date, Error> {
        let date_part = self.date.split('T').next().unwrap_or(&self.date);
        parse_iso_date(date_part)
    }
}

/// The payload sent to the remote API when creating or updating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The kind of money movement.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The category the transaction belongs to.
    pub category: String,
    /// The amount of money moved, parsed from the sanitized draft string.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened, as a date-only ISO string.
    pub date: String,
    /// How the transaction was paid.
    pub payment_method: PaymentMethod,
}

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a date-only ISO string (YYYY-MM-DD).
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid calendar date.
pub fn parse_iso_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, ISO_DATE).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// Format an amount the way a user would type it into the amount field,
/// without trailing zeros, e.g. `12.5` becomes "12.5" and `10.0` becomes "10".
pub fn format_amount(amount: f64) -> String {
    let text = format!("{amount:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');

    if trimmed.is_empty() {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
