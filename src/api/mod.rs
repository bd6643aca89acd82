//! The remote transactions API consumed by this app.
//!
//! The API is an external collaborator: this module only defines the trait
//! seam the rest of the app talks through, the query/response wire shapes,
//! and a thin HTTP client implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::{NewTransaction, PersistedTransaction, TransactionId, TransactionType},
};

mod http;

pub use http::HttpTransactionApi;

#[cfg(test)]
pub(crate) mod test_utils;

/// The server-side time window a transaction list is filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The last seven days.
    Week,
    /// The last month.
    #[default]
    Month,
    /// The last year.
    Year,
    /// No time filter.
    All,
}

impl Period {
    /// Every period, in display order.
    pub const ALL_PERIODS: [Period; 4] = [Period::Week, Period::Month, Period::Year, Period::All];

    /// The query-string form of the period, e.g. "month".
    pub fn as_query_value(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }

    /// The human-readable label, e.g. "This month".
    pub fn label(self) -> &'static str {
        match self {
            Period::Week => "This week",
            Period::Month => "This month",
            Period::Year => "This year",
            Period::All => "All time",
        }
    }
}

/// Filters passed through verbatim to the remote list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ListQuery {
    /// The time window to list.
    pub period: Period,
    /// Restrict the list to one transaction type. `None` lists every type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
}

/// The wire shape of the remote list endpoint's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// The transactions matching the query.
    pub transactions: Vec<PersistedTransaction>,
}

/// The remote operations the entry workflow and list view depend on.
///
/// Implementations must be safe to share across handlers; all methods take
/// `&self`.
#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// List transactions matching `query`.
    async fn list_transactions(&self, query: &ListQuery)
    -> Result<Vec<PersistedTransaction>, Error>;

    /// Fetch a single transaction by its id.
    async fn get_transaction(&self, id: TransactionId) -> Result<PersistedTransaction, Error>;

    /// Create a new transaction.
    async fn create_transaction(
        &self,
        payload: &NewTransaction,
    ) -> Result<PersistedTransaction, Error>;

    /// Replace an existing transaction's fields.
    async fn update_transaction(
        &self,
        id: TransactionId,
        payload: &NewTransaction,
    ) -> Result<PersistedTransaction, Error>;

    /// Delete a transaction.
    async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error>;
}
