//! Defines the endpoint for deleting a transaction.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, Error, api::TransactionApi, endpoints};

use super::models::TransactionId;

/// The state needed to delete a transaction.
#[derive(Clone)]
pub struct DeleteTransactionState {
    /// The remote transactions API.
    pub api: Arc<dyn TransactionApi>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// The delete is proxied to the remote API; on success the client is
/// redirected to the transactions view so the list is refetched.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.api.delete_transaction(transaction_id).await {
        Ok(()) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::NotFound) | Err(error @ Error::ApiStatus { status: 404, .. }) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            Error::NotFound.into_alert_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_htmx::HX_REDIRECT;

    use crate::{
        api::test_utils::FakeTransactionApi,
        transaction::models::{PaymentMethod, PersistedTransaction, TransactionType},
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn persisted(id: i64) -> PersistedTransaction {
        PersistedTransaction {
            id,
            kind: TransactionType::Expense,
            category: "Food".to_owned(),
            amount: 10.0,
            description: String::new(),
            date: "2025-06-01".to_owned(),
            payment_method: PaymentMethod::Cash,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn delete_redirects_to_the_transactions_view() {
        let api = Arc::new(FakeTransactionApi::new().with_transactions(vec![persisted(3)]));
        let state = DeleteTransactionState { api: api.clone() };

        let response = delete_transaction_endpoint(State(state), Path(3)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(HX_REDIRECT)
                .expect("expected response to have the header hx-redirect"),
            "/transactions"
        );
        assert_eq!(api.deleted(), vec![3]);
    }

    #[tokio::test]
    async fn deleting_a_missing_transaction_returns_an_alert() {
        let api = Arc::new(FakeTransactionApi::new());
        let state = DeleteTransactionState { api };

        let response = delete_transaction_endpoint(State(state), Path(404)).await;

        assert_ne!(response.status(), StatusCode::SEE_OTHER);
    }
}
