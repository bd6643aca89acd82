//! Transaction tracking for the app.
//!
//! This module contains everything related to transactions:
//! - The wire models shared with the remote transactions API
//! - The draft form model, staging list, and entry workflow
//! - View handlers for the transactions page and the entry form

mod cancel_endpoint;
mod categories;
mod delete_endpoint;
mod draft;
mod entry_endpoints;
mod entry_page;
mod form;
mod models;
mod staging;
mod transactions_page;
mod view;
mod workflow;

pub use models::{
    NewTransaction, PaymentMethod, PersistedTransaction, TransactionId, TransactionType,
};

pub(crate) use cancel_endpoint::cancel_workflow_endpoint;
pub(crate) use delete_endpoint::delete_transaction_endpoint;
pub(crate) use entry_endpoints::{
    close_calendar_endpoint, get_calendar_partial, open_calendar_endpoint, remove_staged_endpoint,
    save_all_endpoint, stage_draft_endpoint, update_draft_field_endpoint,
    update_transaction_endpoint,
};
pub(crate) use entry_page::{get_edit_transaction_page, get_new_transaction_page};
pub(crate) use transactions_page::get_transactions_page;
pub(crate) use workflow::EntryWorkflow;
