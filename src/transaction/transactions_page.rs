//! The page displaying the filtered transactions list.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{
    AppState,
    api::{ListQuery, Period, TransactionApi},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

use super::{
    models::TransactionType,
    view::{filter_controls, transactions_table},
};

/// The state needed to render the transactions page.
#[derive(Clone)]
pub struct TransactionsPageState {
    /// The remote transactions API.
    pub api: Arc<dyn TransactionApi>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The type filter as it appears in the page's query string.
///
/// "all" is a real selection in the UI but is expressed to the remote API by
/// omitting the type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Every transaction type.
    #[default]
    All,
    /// Income transactions only.
    Income,
    /// Expense transactions only.
    Expense,
    /// Debt transactions only.
    Debt,
}

impl TypeFilter {
    fn as_list_kind(self) -> Option<TransactionType> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Income => Some(TransactionType::Income),
            TypeFilter::Expense => Some(TransactionType::Expense),
            TypeFilter::Debt => Some(TransactionType::Debt),
        }
    }
}

/// The query parameters for the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsPageParams {
    /// The period filter. Defaults to the current month.
    pub period: Option<Period>,
    /// The type filter. Defaults to all types.
    #[serde(rename = "type")]
    pub kind: Option<TypeFilter>,
}

/// A route handler for the transactions page.
///
/// Filtering is delegated entirely to the remote API: the page holds only
/// the current selection and passes it through as query parameters, so
/// changing a filter re-issues the fetch.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(params): Query<TransactionsPageParams>,
) -> Response {
    let query = ListQuery {
        period: params.period.unwrap_or_default(),
        kind: params.kind.unwrap_or_default().as_list_kind(),
    };

    let transactions = match state.api.list_transactions(&query).await {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("Could not list transactions: {error}");
            return error.into_response();
        }
    };

    let content = html! {
        (NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-row items-center justify-between w-full max-w-4xl mb-4"
            {
                h1 class="text-2xl font-bold" { "Transactions" }

                a
                    href=(endpoints::NEW_TRANSACTION_VIEW)
                    class=(format!("{BUTTON_PRIMARY_STYLE} w-auto text-center"))
                {
                    "Add Transaction"
                }
            }

            (filter_controls(&query))

            (transactions_table(&transactions))
        }
    };

    (StatusCode::OK, base("Transactions", &content)).into_response()
}
