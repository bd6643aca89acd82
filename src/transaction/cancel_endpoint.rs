//! Defines the endpoint for closing the entry workflow.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use tokio::sync::Mutex;

use crate::{AppState, endpoints};

use super::{
    draft::FieldErrors,
    form::entry_form,
    workflow::{CloseOutcome, EntryWorkflow},
};

/// The state needed to cancel the entry workflow.
#[derive(Clone)]
pub struct CancelWorkflowState {
    /// The entry workflow for the current session.
    pub workflow: Arc<Mutex<EntryWorkflow>>,
}

impl FromRef<AppState> for CancelWorkflowState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            workflow: state.workflow.clone(),
        }
    }
}

/// A route handler for an explicit close request.
///
/// Closing is synchronous: an open picker is dismissed first, and only a
/// request with no pickers open closes the workflow and redirects to the
/// transactions view. An in-flight submission is never aborted; its result is
/// simply discarded once the session is closed.
pub async fn cancel_workflow_endpoint(State(state): State<CancelWorkflowState>) -> Response {
    let mut workflow = state.workflow.lock().await;

    match workflow.request_close() {
        CloseOutcome::DismissedOverlay => {
            (StatusCode::OK, entry_form(&workflow, &FieldErrors::default())).into_response()
        }
        CloseOutcome::Closed => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
    }
}
