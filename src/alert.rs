//! Alert partials for displaying success and error messages to users.
//!
//! Alerts are swapped into the fixed alert container with an out-of-band
//! swap, so any HTMX response can surface one alongside its main content.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

const SUCCESS_STYLE: &str = "flex items-center p-4 mb-4 text-sm rounded-lg \
    text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400";
const ERROR_STYLE: &str = "flex items-center p-4 mb-4 text-sm rounded-lg \
    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400";

/// A dismissable alert message.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A green "it worked" alert.
    Success {
        /// The headline of the alert.
        message: String,
        /// Supporting detail below the headline.
        details: String,
    },
    /// A red "something went wrong" alert.
    Error {
        /// The headline of the alert.
        message: String,
        /// Supporting detail below the headline.
        details: String,
    },
}

impl Alert {
    /// Create a success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Alert::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create an error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Alert::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as markup targeting the alert container.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div id="alert-container" hx-swap-oob="true"
            {
                div class=(style) role="alert"
                {
                    div
                    {
                        span class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p { (details) }
                        }
                    }
                }
            }
        }
    }

    /// Render the alert as a response with the given status code.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        let status_code = match self {
            Alert::Success { .. } => StatusCode::OK,
            Alert::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        self.into_response_with_status(status_code)
    }
}
