//! Pocketbook is a web UI for tracking personal income, expenses, and debts.
//!
//! The app renders HTML pages directly and drives interactivity with HTMX.
//! Transactions are not stored locally: every read and write goes through a
//! remote transactions API, consumed via the [TransactionApi] trait.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod date_picker;
mod endpoints;
mod html;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

pub use api::{HttpTransactionApi, ListQuery, Period, TransactionApi, TransactionsResponse};
pub use app_state::AppState;
pub use routing::build_router;
pub use transaction::{
    NewTransaction, PaymentMethod, PersistedTransaction, TransactionId, TransactionType,
};

use crate::{alert::Alert, html::error_view, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transactions API could not be reached at all (connection refused,
    /// DNS failure, dropped connection).
    #[error("could not reach the transactions API: {0}")]
    ApiUnreachable(String),

    /// The transactions API answered with a non-success status code.
    ///
    /// The message carries the response body for the server logs; it should
    /// not be shown to the client verbatim.
    #[error("the transactions API returned status {status}: {message}")]
    ApiStatus {
        /// The HTTP status code of the response.
        status: u16,
        /// The response body, if any.
        message: String,
    },

    /// The transactions API answered with a body that could not be parsed.
    #[error("could not parse the transactions API response: {0}")]
    InvalidResponse(String),

    /// A request to the transactions API could not be constructed.
    #[error("could not build the transactions API request: {0}")]
    InvalidRequest(String),

    /// A date string was not a valid ISO calendar date (YYYY-MM-DD).
    #[error("\"{0}\" could not be parsed as an ISO calendar date")]
    InvalidDate(String),

    /// A field name posted by the entry form did not match any draft field.
    #[error("\"{0}\" is not a transaction form field")]
    UnknownField(String),

    /// The draft failed validation and cannot be turned into an API payload.
    #[error("the draft has validation errors and cannot be submitted")]
    InvalidDraft,

    /// An entry action was requested while no entry session is open.
    #[error("no entry session is open")]
    WorkflowClosed,

    /// Batch staging was requested outside of create mode.
    #[error("batch staging is only available when creating transactions")]
    StagingUnavailable,

    /// An edit submit was requested while not editing an existing transaction.
    #[error("the entry session is not editing an existing transaction")]
    NotEditing,

    /// A submit was requested while another submission is still in flight.
    #[error("a submission is already in progress")]
    SubmitInProgress,

    /// Save-all was requested with an empty staging list.
    #[error("no transactions have been staged")]
    NothingStaged,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::ApiStatus { status: 404, .. } => get_404_not_found_response(),
            Error::ApiUnreachable(detail) => {
                tracing::error!("The transactions API is unreachable: {detail}");
                render_error_page(
                    "Transactions API Unreachable",
                    "The remote transactions API could not be reached. \
                    Check that it is running and that the server was started \
                    with the correct --api-url.",
                )
            }
            Error::InvalidTimezone(timezone) => render_error_page(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_error_page(
                    "Something Went Wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
            }
        }
    }
}

fn render_error_page(description: &str, fix: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Error", "500", description, fix),
    )
        .into_response()
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::ApiUnreachable(detail) => {
                tracing::error!("The transactions API is unreachable: {detail}");
                Alert::error(
                    "Could not reach the transactions API",
                    "Your changes were not saved. Try again once the API is back up.",
                )
                .into_response_with_status(StatusCode::BAD_GATEWAY)
            }
            Error::ApiStatus { status, message } => {
                tracing::error!("The transactions API returned status {status}: {message}");
                Alert::error(
                    "The transactions API rejected the request",
                    "Try again or check the server logs for more details.",
                )
                .into_response_with_status(StatusCode::BAD_GATEWAY)
            }
            Error::WorkflowClosed => Alert::error(
                "No entry session is open",
                "The form you submitted belongs to a session that has been closed. \
                Refresh the page and try again.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::SubmitInProgress => Alert::error(
                "A submission is already in progress",
                "Wait for the current submission to finish before trying again.",
            )
            .into_response_with_status(StatusCode::CONFLICT),
            Error::NothingStaged => Alert::error(
                "Nothing to save",
                "Add at least one transaction to the batch before saving.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::NotFound => Alert::error(
                "Could not find the transaction",
                "Try refreshing the page to see if it has already been deleted.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
