//! The HTMX endpoints that drive the entry workflow.
//!
//! Every endpoint locks the workflow for the duration of the event, applies
//! the posted form fields so the server-held draft tracks the client, and
//! responds with the re-rendered entry form region (or a redirect once the
//! workflow closes).

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::html;
use serde::Deserialize;
use time::Month;
use tokio::sync::Mutex;

use crate::{
    AppState, Error,
    alert::Alert,
    api::TransactionApi,
    date_picker::{CalendarMonth, date_picker},
    endpoints,
    timezone::today_in,
};

use super::{
    draft::FieldErrors,
    form::{apply_posted_fields, entry_form},
    models::TransactionId,
    staging::StagedEntryId,
    workflow::{EntryWorkflow, Overlay, SubmitOutcome},
};

/// Unified state for all entry workflow actions.
#[derive(Clone)]
pub struct WorkflowActionState {
    /// The remote transactions API.
    pub api: Arc<dyn TransactionApi>,
    /// The entry workflow for the current session.
    pub workflow: Arc<Mutex<EntryWorkflow>>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for WorkflowActionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            workflow: state.workflow.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

fn render_form(workflow: &EntryWorkflow, errors: &FieldErrors) -> Response {
    (StatusCode::OK, entry_form(workflow, errors)).into_response()
}

/// A route handler for updating draft fields from the entry form.
///
/// Amount values are sanitized, description values run the category
/// auto-match, and a type change clears the category; the response is the
/// re-rendered form region reflecting the result.
pub async fn update_draft_field_endpoint(
    State(state): State<WorkflowActionState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut workflow = state.workflow.lock().await;

    if let Err(error) = apply_posted_fields(&mut workflow, &form) {
        tracing::error!("Could not update draft field: {error}");
        return error.into_alert_response();
    }

    // Picking a date from the calendar dismisses it.
    if form.contains_key("date") && workflow.overlay() == Some(Overlay::Calendar) {
        workflow.pop_overlay();
    }

    render_form(&workflow, &FieldErrors::default())
}

/// A route handler for the create-mode submit: validate the draft, stage it,
/// and reset the form for the next entry.
pub async fn stage_draft_endpoint(
    State(state): State<WorkflowActionState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let today = match today_in(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let mut workflow = state.workflow.lock().await;

    if let Err(error) = apply_posted_fields(&mut workflow, &form) {
        tracing::error!("Could not apply entry form fields: {error}");
        return error.into_alert_response();
    }

    match workflow.stage_current(today) {
        Ok(SubmitOutcome::Accepted) => {
            let staged_count = workflow.staged().len();
            let body = html! {
                (entry_form(&workflow, &FieldErrors::default()))
                (Alert::success(
                    "Added to batch",
                    &format!("{staged_count} staged. Save all to submit them."),
                ).into_html())
            };

            (StatusCode::OK, body).into_response()
        }
        Ok(SubmitOutcome::Rejected(errors)) => render_form(&workflow, &errors),
        Err(error) => {
            tracing::error!("Could not stage the current draft: {error}");
            error.into_alert_response()
        }
    }
}

/// A route handler for removing one staged entry. Removing an entry that is
/// already gone is not an error.
pub async fn remove_staged_endpoint(
    State(state): State<WorkflowActionState>,
    Path(entry_id): Path<StagedEntryId>,
) -> Response {
    let mut workflow = state.workflow.lock().await;

    if let Err(error) = workflow.remove_staged(entry_id) {
        tracing::error!("Could not remove staged entry {entry_id}: {error}");
        return error.into_alert_response();
    }

    render_form(&workflow, &FieldErrors::default())
}

/// A route handler for submitting every staged entry, in insertion order.
///
/// On full success the workflow closes and the client is redirected to the
/// transactions view, which refetches the list. On failure the workflow stays
/// open: the submitted prefix has left the staging list, the remainder is
/// retried with the next save-all.
pub async fn save_all_endpoint(State(state): State<WorkflowActionState>) -> Response {
    let mut workflow = state.workflow.lock().await;

    match workflow.save_all(state.api.as_ref()).await {
        Ok(submitted) => {
            tracing::info!("Saved {submitted} staged transactions");

            (
                HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error @ (Error::WorkflowClosed | Error::NothingStaged | Error::SubmitInProgress)) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!("Could not save staged transactions: {error}");
            render_form(&workflow, &FieldErrors::default())
        }
    }
}

/// A route handler for the edit-mode submit: validate the draft and update
/// the transaction once, then redirect to the transactions view on success.
pub async fn update_transaction_endpoint(
    State(state): State<WorkflowActionState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut workflow = state.workflow.lock().await;

    if let Err(error) = apply_posted_fields(&mut workflow, &form) {
        tracing::error!("Could not apply entry form fields: {error}");
        return error.into_alert_response();
    }

    match workflow.submit_edit(state.api.as_ref()).await {
        Ok(SubmitOutcome::Accepted) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Ok(SubmitOutcome::Rejected(errors)) => render_form(&workflow, &errors),
        Err(error @ (Error::NotEditing | Error::SubmitInProgress)) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            render_form(&workflow, &FieldErrors::default())
        }
    }
}

/// A route handler for opening the date picker on top of the entry form.
pub async fn open_calendar_endpoint(
    State(state): State<WorkflowActionState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut workflow = state.workflow.lock().await;

    // Keep unsaved edits: the open button submits the surrounding form.
    if let Err(error) = apply_posted_fields(&mut workflow, &form) {
        tracing::error!("Could not apply entry form fields: {error}");
        return error.into_alert_response();
    }

    if let Err(error) = workflow.push_overlay(Overlay::Calendar) {
        return error.into_alert_response();
    }

    render_form(&workflow, &FieldErrors::default())
}

/// A route handler for dismissing the date picker.
pub async fn close_calendar_endpoint(State(state): State<WorkflowActionState>) -> Response {
    let mut workflow = state.workflow.lock().await;
    workflow.pop_overlay();

    render_form(&workflow, &FieldErrors::default())
}

/// The query parameters for navigating the date picker to another month.
#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    /// The year to display.
    pub year: i32,
    /// The month to display, 1 through 12.
    pub month: u8,
}

/// A route handler for rendering the date picker grid for a month.
pub async fn get_calendar_partial(
    State(state): State<WorkflowActionState>,
    Query(params): Query<CalendarParams>,
) -> Response {
    let Ok(month) = Month::try_from(params.month) else {
        return Error::InvalidDate(format!("{}-{}", params.year, params.month))
            .into_alert_response();
    };

    let workflow = state.workflow.lock().await;
    let calendar = CalendarMonth::new(params.year, month);

    (
        StatusCode::OK,
        date_picker(&calendar, workflow.draft().date),
    )
        .into_response()
}
