//! Implements a struct that holds the shared state of the web server.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{api::TransactionApi, transaction::EntryWorkflow};

/// The shared state of the web server.
///
/// The entry workflow lives behind an async mutex: handlers lock it for the
/// duration of one user-triggered event, so the draft, the staging list, and
/// the workflow state have a single logical owner and are never mutated
/// concurrently.
#[derive(Clone)]
pub struct AppState {
    /// The remote transactions API.
    pub(crate) api: Arc<dyn TransactionApi>,

    /// The transaction entry workflow for the current session.
    pub(crate) workflow: Arc<Mutex<EntryWorkflow>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub(crate) local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with a closed entry workflow.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland"; it determines what "today" means for new drafts.
    pub fn new(api: Arc<dyn TransactionApi>, local_timezone: &str) -> Self {
        let workflow = EntryWorkflow::new(OffsetDateTime::now_utc().date());

        Self {
            api,
            workflow: Arc::new(Mutex::new(workflow)),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
