//! The pages that open the entry workflow in create and edit mode.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    AppState,
    api::TransactionApi,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::today_in,
};

use super::{
    draft::FieldErrors,
    form::entry_form,
    models::{TransactionId, TransactionType},
    workflow::EntryWorkflow,
};

/// The state needed to open and render the entry workflow.
#[derive(Clone)]
pub struct EntryPageState {
    /// The remote transactions API.
    pub api: Arc<dyn TransactionApi>,
    /// The entry workflow for the current session.
    pub workflow: Arc<Mutex<EntryWorkflow>>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for EntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            workflow: state.workflow.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the new transaction page.
#[derive(Debug, Deserialize)]
pub struct NewTransactionParams {
    /// The transaction type to open the workflow with. Defaults to expense.
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
}

/// Render a full entry page around the entry form region.
pub(super) fn entry_page(title: &str, workflow: &EntryWorkflow) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { (title) }

            (entry_form(workflow, &FieldErrors::default()))
        }
    };

    base(title, &content)
}

/// Renders the page for entering new transactions.
///
/// Opening the page starts a create session: the draft is reset to its
/// defaults with the requested type and the staging list is emptied.
pub async fn get_new_transaction_page(
    State(state): State<EntryPageState>,
    Query(params): Query<NewTransactionParams>,
) -> Response {
    let today = match today_in(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let mut workflow = state.workflow.lock().await;
    workflow.open_create(params.kind.unwrap_or(TransactionType::Expense), today);

    (
        StatusCode::OK,
        entry_page("New Transaction", &workflow),
    )
        .into_response()
}

/// Renders the page for editing an existing transaction.
///
/// The transaction is fetched from the remote API and loaded into an edit
/// session: amount coerced to its string form, date truncated to the
/// date-only portion, missing payment method defaulting to cash.
pub async fn get_edit_transaction_page(
    State(state): State<EntryPageState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let transaction = match state.api.get_transaction(transaction_id).await {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::error!("Could not fetch transaction {transaction_id} for editing: {error}");
            return error.into_response();
        }
    };

    let mut workflow = state.workflow.lock().await;

    if let Err(error) = workflow.open_edit(&transaction) {
        tracing::error!("Could not open edit session for transaction {transaction_id}: {error}");
        return error.into_response();
    }

    (
        StatusCode::OK,
        entry_page("Edit Transaction", &workflow),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        extract::{Path, Query, State},
        http::StatusCode,
        response::Response,
    };
    use scraper::{Html, Selector};
    use time::macros::date;
    use tokio::sync::Mutex;

    use crate::{
        api::test_utils::FakeTransactionApi,
        transaction::{
            models::{PaymentMethod, PersistedTransaction, TransactionType},
            workflow::{EntryWorkflow, WorkflowState},
        },
    };

    use super::{
        EntryPageState, NewTransactionParams, get_edit_transaction_page, get_new_transaction_page,
    };

    fn test_state(api: FakeTransactionApi) -> EntryPageState {
        EntryPageState {
            api: Arc::new(api),
            workflow: Arc::new(Mutex::new(EntryWorkflow::new(date!(2025 - 06 - 01)))),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[tokio::test]
    async fn new_transaction_page_opens_create_session_with_requested_type() {
        let state = test_state(FakeTransactionApi::new());

        let response = get_new_transaction_page(
            State(state.clone()),
            Query(NewTransactionParams {
                kind: Some(TransactionType::Debt),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let workflow = state.workflow.lock().await;
        assert_eq!(workflow.state(), WorkflowState::OpenCreate);
        assert_eq!(workflow.draft().kind, TransactionType::Debt);
    }

    #[tokio::test]
    async fn new_transaction_page_renders_the_entry_form() {
        let state = test_state(FakeTransactionApi::new());

        let response = get_new_transaction_page(
            State(state),
            Query(NewTransactionParams { kind: None }),
        )
        .await;

        let document = parse_html(response).await;

        let form_selector = Selector::parse("form#entry-form").unwrap();
        assert_eq!(
            document.select(&form_selector).count(),
            1,
            "want exactly one entry form"
        );

        for name in ["category", "amount", "description", "date", "payment_method"] {
            let selector_string = format!("[name={name}]");
            let selector = Selector::parse(&selector_string).unwrap();
            assert_eq!(
                document.select(&selector).count(),
                1,
                "want exactly one {name} field"
            );
        }

        let radio_selector = Selector::parse("input[type=radio][name=type]").unwrap();
        let radios = document.select(&radio_selector).count();
        assert_eq!(radios, 3, "want 3 transaction type radios, got {radios}");
    }

    #[tokio::test]
    async fn edit_page_loads_the_transaction_into_the_draft() {
        let transaction = PersistedTransaction {
            id: 9,
            kind: TransactionType::Income,
            category: "Salary".to_owned(),
            amount: 1250.5,
            description: "March pay".to_owned(),
            date: "2025-03-31T09:00:00.000Z".to_owned(),
            payment_method: PaymentMethod::BankTransfer,
            created_at: None,
        };
        let state = test_state(FakeTransactionApi::new().with_transactions(vec![transaction]));

        let response =
            get_edit_transaction_page(State(state.clone()), Path(9)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let workflow = state.workflow.lock().await;
        assert_eq!(workflow.state(), WorkflowState::OpenEdit { id: 9 });
        assert_eq!(workflow.draft().amount, "1250.5");
        assert_eq!(workflow.draft().date, date!(2025 - 03 - 31));
    }

    #[tokio::test]
    async fn edit_page_for_missing_transaction_is_not_found() {
        let state = test_state(FakeTransactionApi::new());

        let response = get_edit_transaction_page(State(state.clone()), Path(404)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let workflow = state.workflow.lock().await;
        assert_eq!(workflow.state(), WorkflowState::Closed);
    }
}
