//! Static per-type configuration: category vocabularies and display themes.
//!
//! Each transaction type has a fixed category vocabulary and a colour theme.
//! The tables are resolved once per render or action through [profile], never
//! mutated at runtime.

use super::models::TransactionType;

/// The fixed configuration for one transaction type.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeProfile {
    /// The categories a transaction of this type may belong to, in the order
    /// they are offered (and matched) in.
    pub categories: &'static [&'static str],
    /// Tailwind classes for the type's accent colour on buttons and headings.
    pub accent_class: &'static str,
    /// Tailwind classes for the type's badge in the transactions table.
    pub badge_class: &'static str,
}

const INCOME_PROFILE: TypeProfile = TypeProfile {
    categories: &[
        "Salary",
        "Freelance",
        "Business",
        "Investment",
        "Rental",
        "Gift",
        "Refund",
        "Other",
    ],
    accent_class: "text-green-700 dark:text-green-400",
    badge_class: "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
        text-green-800 bg-green-100 rounded-full dark:bg-green-900 dark:text-green-300",
};

const EXPENSE_PROFILE: TypeProfile = TypeProfile {
    categories: &[
        "Food",
        "Groceries",
        "Transport",
        "Rent",
        "Utilities",
        "Shopping",
        "Entertainment",
        "Health",
        "Travel",
        "Other",
    ],
    accent_class: "text-red-700 dark:text-red-400",
    badge_class: "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
        text-red-800 bg-red-100 rounded-full dark:bg-red-900 dark:text-red-300",
};

const DEBT_PROFILE: TypeProfile = TypeProfile {
    categories: &["Loan", "Credit Card", "EMI", "Borrowed", "Lent", "Other"],
    accent_class: "text-amber-700 dark:text-amber-400",
    badge_class: "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
        text-amber-800 bg-amber-100 rounded-full dark:bg-amber-900 dark:text-amber-300",
};

/// Get the fixed configuration for a transaction type.
pub fn profile(kind: TransactionType) -> &'static TypeProfile {
    match kind {
        TransactionType::Income => &INCOME_PROFILE,
        TransactionType::Expense => &EXPENSE_PROFILE,
        TransactionType::Debt => &DEBT_PROFILE,
    }
}

/// Find the category a free-text description suggests for a transaction type.
///
/// Returns the first vocabulary entry whose text appears (case-insensitive) as
/// a substring of the description. Matching is first-match-wins over the
/// vocabulary order; no attempt is made to pick the "best" of several matches.
pub fn match_category(kind: TransactionType, description: &str) -> Option<&'static str> {
    let description = description.to_lowercase();

    profile(kind)
        .categories
        .iter()
        .copied()
        .find(|category| description.contains(&category.to_lowercase()))
}
