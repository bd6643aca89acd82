//! The transaction form model.
//!
//! A [Draft] holds the in-progress, unsaved form state for one transaction.
//! Field setters enforce input constraints synchronously on each edit;
//! [Draft::validate] is the single gate before any submission.

use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

use super::{
    categories::match_category,
    models::{
        NewTransaction, PaymentMethod, PersistedTransaction, TransactionType, format_amount,
        parse_iso_date,
    },
};

/// The error message shown when the category is missing.
pub const CATEGORY_REQUIRED: &str = "Category is required.";

/// The error message shown when the amount is empty, non-numeric, or not positive.
pub const AMOUNT_INVALID: &str = "Enter a valid amount.";

/// The maximum length of a description, in grapheme clusters.
pub const DESCRIPTION_LIMIT: usize = 100;

/// Per-field validation errors for a [Draft].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// The error for the category field, if any.
    pub category: Option<&'static str>,
    /// The error for the amount field, if any.
    pub amount: Option<&'static str>,
}

impl FieldErrors {
    /// Whether the draft passed validation.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.amount.is_none()
    }
}

/// In-progress, unsaved transaction form state.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// The kind of money movement being recorded.
    pub kind: TransactionType,
    /// The chosen category. Empty until the user picks one or the description
    /// auto-match fills it in.
    pub category: String,
    /// The amount as a decimal string: digits plus at most one `.` with at
    /// most two fractional digits.
    pub amount: String,
    /// Free-text description, capped at [DESCRIPTION_LIMIT] characters.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// How the transaction was paid.
    pub payment_method: PaymentMethod,
}

impl Draft {
    /// Create an empty draft for `kind`, dated `today`.
    pub fn new(kind: TransactionType, today: Date) -> Self {
        Self {
            kind,
            category: String::new(),
            amount: String::new(),
            description: String::new(),
            date: today,
            payment_method: PaymentMethod::Cash,
        }
    }

    /// Populate a draft from a transaction fetched from the remote API.
    ///
    /// The amount is coerced to its string form and the date is truncated to
    /// its date-only portion.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if the transaction's date string does not
    /// start with a valid ISO calendar date.
    pub fn from_persisted(transaction: &PersistedTransaction) -> Result<Self, Error> {
        Ok(Self {
            kind: transaction.kind,
            category: transaction.category.clone(),
            amount: format_amount(transaction.amount),
            description: transaction.description.clone(),
            date: transaction.date_only()?,
            payment_method: transaction.payment_method,
        })
    }

    /// Restore all fields to their defaults: today's date, empty
    /// category/amount/description, cash payment. Keeps the current type when
    /// `keep_type` is set, otherwise falls back to expense.
    pub fn reset(&mut self, keep_type: bool, today: Date) {
        let kind = if keep_type {
            self.kind
        } else {
            TransactionType::Expense
        };

        *self = Draft::new(kind, today);
    }

    /// Replace the transaction type and clear the category.
    ///
    /// The category vocabulary is type-specific, so a stale category from a
    /// different type is never retained.
    pub fn set_type(&mut self, kind: TransactionType) {
        self.kind = kind;
        self.category.clear();
    }

    /// Set the category directly.
    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_owned();
    }

    /// Update the amount from raw input.
    ///
    /// All characters except digits and `.` are stripped. The update is
    /// rejected (the prior value is retained) if the result contains more than
    /// one `.` or more than two digits after the decimal point.
    pub fn set_amount(&mut self, raw: &str) {
        let stripped: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        if stripped.matches('.').count() > 1 {
            return;
        }

        if let Some(position) = stripped.find('.') {
            if stripped.len() - position - 1 > 2 {
                return;
            }
        }

        self.amount = stripped;
    }

    /// Update the description from raw input, truncated to
    /// [DESCRIPTION_LIMIT] characters.
    ///
    /// As a side effect, scans the category vocabulary for the current type
    /// and auto-fills the category with the first entry whose text appears
    /// (case-insensitive) in the description. A category the user has already
    /// chosen is never overwritten.
    pub fn set_description(&mut self, raw: &str) {
        self.description = raw.graphemes(true).take(DESCRIPTION_LIMIT).collect();

        if self.category.is_empty() {
            if let Some(category) = match_category(self.kind, &self.description) {
                self.category = category.to_owned();
            }
        }
    }

    /// Set the transaction date.
    pub fn set_date(&mut self, date: Date) {
        self.date = date;
    }

    /// Set the payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Update one field from its form name and raw posted value.
    ///
    /// # Errors
    /// Returns [Error::UnknownField] for an unrecognised field name,
    /// [Error::InvalidDate] for an unparseable date, and silently keeps the
    /// prior value for unknown type or payment-method values.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), Error> {
        match name {
            "type" => {
                if let Some(kind) = TransactionType::parse(raw) {
                    self.set_type(kind);
                }
            }
            "category" => self.set_category(raw),
            "amount" => self.set_amount(raw),
            "description" => self.set_description(raw),
            "date" => self.set_date(parse_iso_date(raw)?),
            "payment_method" => {
                if let Some(method) = PaymentMethod::parse(raw) {
                    self.set_payment_method(method);
                }
            }
            unknown => return Err(Error::UnknownField(unknown.to_owned())),
        }

        Ok(())
    }

    /// Check the draft against the submission invariants.
    ///
    /// A draft is valid iff the category is non-empty after trimming and the
    /// amount parses to a finite number greater than zero. Returns an empty
    /// [FieldErrors] when valid.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.category.trim().is_empty() {
            errors.category = Some(CATEGORY_REQUIRED);
        }

        let amount_is_valid = matches!(
            self.amount.trim().parse::<f64>(),
            Ok(amount) if amount.is_finite() && amount > 0.0
        );

        if !amount_is_valid {
            errors.amount = Some(AMOUNT_INVALID);
        }

        errors
    }

    /// Convert a valid draft into the payload sent to the remote API.
    ///
    /// # Errors
    /// Returns [Error::InvalidDraft] if the draft does not pass
    /// [Draft::validate].
    pub fn to_payload(&self) -> Result<NewTransaction, Error> {
        if !self.validate().is_empty() {
            return Err(Error::InvalidDraft);
        }

        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidDraft)?;

        Ok(NewTransaction {
            kind: self.kind,
            category: self.category.clone(),
            amount,
            description: self.description.clone(),
            date: self.date.to_string(),
            payment_method: self.payment_method,
        })
    }
}
