//! The app's route URIs.
//!
//! For routes that take a parameter, e.g., '/transactions/{transaction_id}/edit',
//! use [format_endpoint].

/// The root route, redirects to the transactions page.
pub const ROOT: &str = "/";
/// The page displaying the filtered transactions list.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for entering new transactions.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";

/// The route for updating a single draft field.
pub const WORKFLOW_FIELD: &str = "/api/workflow/field";
/// The route for staging the current draft (POST) and removing a staged
/// entry (DELETE on [WORKFLOW_STAGED_ENTRY]).
pub const WORKFLOW_STAGED: &str = "/api/workflow/staged";
/// The route for removing one staged entry.
pub const WORKFLOW_STAGED_ENTRY: &str = "/api/workflow/staged/{entry_id}";
/// The route for submitting every staged entry.
pub const WORKFLOW_SAVE_ALL: &str = "/api/workflow/save-all";
/// The route for submitting an edit of an existing transaction.
pub const WORKFLOW_TRANSACTION: &str = "/api/workflow/transaction/{transaction_id}";
/// The route for closing the entry workflow.
pub const WORKFLOW_CANCEL: &str = "/api/workflow/cancel";
/// The route for opening the date picker.
pub const CALENDAR_OPEN: &str = "/api/workflow/calendar/open";
/// The route for closing the date picker.
pub const CALENDAR_CLOSE: &str = "/api/workflow/calendar/close";
/// The route for navigating the date picker to another month.
pub const CALENDAR_PARTIAL: &str = "/api/workflow/calendar";

/// The route for deleting a transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in '/transactions/{transaction_id}/edit',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::WORKFLOW_FIELD);
        assert_endpoint_is_valid_uri(endpoints::WORKFLOW_STAGED);
        assert_endpoint_is_valid_uri(endpoints::WORKFLOW_STAGED_ENTRY);
        assert_endpoint_is_valid_uri(endpoints::WORKFLOW_SAVE_ALL);
        assert_endpoint_is_valid_uri(endpoints::WORKFLOW_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::WORKFLOW_CANCEL);
        assert_endpoint_is_valid_uri(endpoints::CALENDAR_OPEN);
        assert_endpoint_is_valid_uri(endpoints::CALENDAR_CLOSE);
        assert_endpoint_is_valid_uri(endpoints::CALENDAR_PARTIAL);
        assert_endpoint_is_valid_uri(endpoints::DELETE_TRANSACTION);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/transactions/{transaction_id}/edit", 1);

        assert_eq!(formatted_path, "/transactions/1/edit");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/transactions/new", 1);

        assert_eq!(formatted_path, "/transactions/new");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
