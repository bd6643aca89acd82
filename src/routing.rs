//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    transaction::{
        cancel_workflow_endpoint, close_calendar_endpoint, delete_transaction_endpoint,
        get_calendar_partial, get_edit_transaction_page, get_new_transaction_page,
        get_transactions_page, open_calendar_endpoint, remove_staged_endpoint, save_all_endpoint,
        stage_draft_endpoint, update_draft_field_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(
            endpoints::WORKFLOW_FIELD,
            post(update_draft_field_endpoint),
        )
        .route(endpoints::WORKFLOW_STAGED, post(stage_draft_endpoint))
        .route(
            endpoints::WORKFLOW_STAGED_ENTRY,
            delete(remove_staged_endpoint),
        )
        .route(endpoints::WORKFLOW_SAVE_ALL, post(save_all_endpoint))
        .route(
            endpoints::WORKFLOW_TRANSACTION,
            put(update_transaction_endpoint),
        )
        .route(endpoints::WORKFLOW_CANCEL, post(cancel_workflow_endpoint))
        .route(endpoints::CALENDAR_OPEN, post(open_calendar_endpoint))
        .route(endpoints::CALENDAR_CLOSE, post(close_calendar_endpoint))
        .route(endpoints::CALENDAR_PARTIAL, get(get_calendar_partial))
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}
