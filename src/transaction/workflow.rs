//! The transaction entry workflow.
//!
//! One [EntryWorkflow] owns the draft and the staging list for the duration
//! of an entry session. It is the only writer of both: every mutation happens
//! in response to a discrete user-triggered event, serialized by the caller.

use time::Date;

use crate::{Error, api::TransactionApi};

use super::{
    draft::{Draft, FieldErrors},
    models::{PersistedTransaction, TransactionId, TransactionType},
    staging::{StagedEntryId, StagingList},
};

/// The mode the entry workflow is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// No entry session is open.
    Closed,
    /// Creating new transactions; submits stage drafts for a batch save.
    OpenCreate,
    /// Editing an existing transaction; submits update it immediately.
    OpenEdit {
        /// The server-assigned id of the transaction being edited.
        id: TransactionId,
    },
}

/// An auxiliary picker rendered on top of the entry form.
///
/// Open pickers form an explicit stack: a close request dismisses the topmost
/// picker before it may close the workflow itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// The month-calendar date picker.
    Calendar,
}

/// What a close request actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// An open picker was dismissed; the workflow stays open.
    DismissedOverlay,
    /// The workflow transitioned to [WorkflowState::Closed].
    Closed,
}

/// The result of a submit action that must first pass draft validation.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The draft was accepted and acted on.
    Accepted,
    /// The draft failed validation; nothing was staged or submitted.
    Rejected(FieldErrors),
}

/// The create/edit session controlling the draft and staging list lifecycle.
#[derive(Debug)]
pub struct EntryWorkflow {
    state: WorkflowState,
    draft: Draft,
    staged: StagingList,
    overlays: Vec<Overlay>,
    submitting: bool,
    error: Option<String>,
}

impl EntryWorkflow {
    /// Create a closed workflow. The draft is seeded with `today` but has no
    /// meaning until a session is opened.
    pub fn new(today: Date) -> Self {
        Self {
            state: WorkflowState::Closed,
            draft: Draft::new(TransactionType::Expense, today),
            staged: StagingList::new(),
            overlays: Vec::new(),
            submitting: false,
            error: None,
        }
    }

    /// The current workflow state.
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// The current draft.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The staged entries awaiting the batch save.
    pub fn staged(&self) -> &StagingList {
        &self.staged
    }

    /// The topmost open picker, if any.
    pub fn overlay(&self) -> Option<Overlay> {
        self.overlays.last().copied()
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The general-purpose error from the last failed submission, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open a create session for `kind`, resetting the draft to its defaults.
    pub fn open_create(&mut self, kind: TransactionType, today: Date) {
        self.close();
        self.draft = Draft::new(kind, today);
        self.state = WorkflowState::OpenCreate;
    }

    /// Open an edit session populated from a transaction fetched from the
    /// remote API.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if the transaction's date cannot be
    /// parsed; the workflow stays closed in that case.
    pub fn open_edit(&mut self, transaction: &PersistedTransaction) -> Result<(), Error> {
        let draft = Draft::from_persisted(transaction)?;

        self.close();
        self.draft = draft;
        self.state = WorkflowState::OpenEdit { id: transaction.id };

        Ok(())
    }

    /// Update one draft field from its form name and raw posted value.
    ///
    /// # Errors
    /// Returns [Error::WorkflowClosed] if no session is open, otherwise
    /// whatever [Draft::set_field] returns.
    pub fn update_field(&mut self, name: &str, raw: &str) -> Result<(), Error> {
        self.ensure_open()?;

        self.draft.set_field(name, raw)
    }

    /// Open an auxiliary picker on top of the entry form.
    ///
    /// # Errors
    /// Returns [Error::WorkflowClosed] if no session is open.
    pub fn push_overlay(&mut self, overlay: Overlay) -> Result<(), Error> {
        self.ensure_open()?;

        if self.overlays.last() != Some(&overlay) {
            self.overlays.push(overlay);
        }

        Ok(())
    }

    /// Dismiss the topmost picker, if any.
    pub fn pop_overlay(&mut self) -> Option<Overlay> {
        self.overlays.pop()
    }

    /// Validate the draft and, on success, stage it and reset the draft for
    /// the next entry (keeping the type).
    ///
    /// # Errors
    /// Returns [Error::WorkflowClosed] outside a session,
    /// [Error::StagingUnavailable] in edit mode (edits always submit
    /// immediately), and [Error::SubmitInProgress] while a save is in flight.
    pub fn stage_current(&mut self, today: Date) -> Result<SubmitOutcome, Error> {
        match self.state {
            WorkflowState::Closed => return Err(Error::WorkflowClosed),
            WorkflowState::OpenEdit { .. } => return Err(Error::StagingUnavailable),
            WorkflowState::OpenCreate => {}
        }

        if self.submitting {
            return Err(Error::SubmitInProgress);
        }

        let errors = self.draft.validate();
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Rejected(errors));
        }

        self.staged.stage(self.draft.clone());
        self.draft.reset(true, today);
        self.error = None;

        Ok(SubmitOutcome::Accepted)
    }

    /// Remove one staged entry. Does nothing if it is absent.
    ///
    /// # Errors
    /// Returns [Error::WorkflowClosed] if no session is open.
    pub fn remove_staged(&mut self, id: StagedEntryId) -> Result<(), Error> {
        self.ensure_open()?;
        self.staged.remove(id);

        Ok(())
    }

    /// Submit every staged entry against the create endpoint, then close the
    /// workflow on full success.
    ///
    /// On failure the workflow stays open: the submitted prefix is gone from
    /// the staging list, the remainder stays staged, and the error is kept
    /// for display until the next action.
    ///
    /// # Errors
    /// Returns the workflow-guard errors of [EntryWorkflow::stage_current]
    /// plus [Error::NothingStaged] for an empty list, or the first error from
    /// the remote API.
    pub async fn save_all(&mut self, api: &dyn TransactionApi) -> Result<usize, Error> {
        match self.state {
            WorkflowState::Closed => return Err(Error::WorkflowClosed),
            WorkflowState::OpenEdit { .. } => return Err(Error::StagingUnavailable),
            WorkflowState::OpenCreate => {}
        }

        if self.submitting {
            return Err(Error::SubmitInProgress);
        }

        if self.staged.is_empty() {
            return Err(Error::NothingStaged);
        }

        self.submitting = true;
        let result = self.staged.drain_and_submit(api).await;
        self.submitting = false;

        match result {
            Ok(submitted) => {
                self.close();
                Ok(submitted)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Validate the draft and submit it once against the update endpoint,
    /// closing the workflow on success.
    ///
    /// # Errors
    /// Returns [Error::NotEditing] outside an edit session,
    /// [Error::SubmitInProgress] while a save is in flight, or the error from
    /// the remote API (the workflow stays open with the error surfaced).
    pub async fn submit_edit(&mut self, api: &dyn TransactionApi) -> Result<SubmitOutcome, Error> {
        let WorkflowState::OpenEdit { id } = self.state else {
            return Err(Error::NotEditing);
        };

        if self.submitting {
            return Err(Error::SubmitInProgress);
        }

        let errors = self.draft.validate();
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let payload = self.draft.to_payload()?;

        self.submitting = true;
        let result = api.update_transaction(id, &payload).await;
        self.submitting = false;

        match result {
            Ok(_) => {
                self.close();
                Ok(SubmitOutcome::Accepted)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Handle an explicit close request.
    ///
    /// An open picker is dismissed first; only a request with no pickers open
    /// closes the workflow itself. Closing clears the draft, the staging
    /// list, and the error state unconditionally.
    pub fn request_close(&mut self) -> CloseOutcome {
        if self.overlays.pop().is_some() {
            return CloseOutcome::DismissedOverlay;
        }

        self.close();

        CloseOutcome::Closed
    }

    fn close(&mut self) {
        let date = self.draft.date;

        self.state = WorkflowState::Closed;
        self.draft.reset(false, date);
        self.staged.clear();
        self.overlays.clear();
        self.error = None;
    }

    fn ensure_open(&self) -> Result<(), Error> {
        if self.state == WorkflowState::Closed {
            return Err(Error::WorkflowClosed);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        api::test_utils::FakeTransactionApi,
        transaction::models::{PaymentMethod, PersistedTransaction, TransactionType},
    };

    use super::{CloseOutcome, EntryWorkflow, Overlay, SubmitOutcome, WorkflowState};

    const TODAY: time::Date = date!(2025 - 06 - 01);

    fn open_create_workflow() -> EntryWorkflow {
        let mut workflow = EntryWorkflow::new(TODAY);
        workflow.open_create(TransactionType::Expense, TODAY);

        workflow
    }

    fn persisted_expense() -> PersistedTransaction {
        PersistedTransaction {
            id: 7,
            kind: TransactionType::Expense,
            category: "Rent".to_owned(),
            amount: 850.0,
            description: "June rent".to_owned(),
            date: "2025-06-01T08:30:00.000Z".to_owned(),
            payment_method: PaymentMethod::BankTransfer,
            created_at: None,
        }
    }

    fn fill_valid_draft(workflow: &mut EntryWorkflow, category: &str, amount: &str) {
        workflow
            .update_field("category", category)
            .expect("could not set category");
        workflow
            .update_field("amount", amount)
            .expect("could not set amount");
    }

    #[test]
    fn open_create_resets_draft_with_requested_type() {
        let mut workflow = EntryWorkflow::new(TODAY);

        workflow.open_create(TransactionType::Debt, TODAY);

        assert_eq!(workflow.state(), WorkflowState::OpenCreate);
        assert_eq!(workflow.draft().kind, TransactionType::Debt);
        assert!(workflow.draft().category.is_empty());
        assert_eq!(workflow.draft().date, TODAY);
    }

    #[test]
    fn open_edit_populates_draft_from_transaction() {
        let mut workflow = EntryWorkflow::new(TODAY);
        let transaction = persisted_expense();

        workflow
            .open_edit(&transaction)
            .expect("could not open edit session");

        assert_eq!(workflow.state(), WorkflowState::OpenEdit { id: 7 });
        assert_eq!(workflow.draft().amount, "850");
        assert_eq!(workflow.draft().date, date!(2025 - 06 - 01));
        assert_eq!(workflow.draft().payment_method, PaymentMethod::BankTransfer);
    }

    #[test]
    fn stage_rejects_invalid_draft_with_field_errors() {
        let mut workflow = open_create_workflow();

        let outcome = workflow.stage_current(TODAY).expect("stage should run");

        let SubmitOutcome::Rejected(errors) = outcome else {
            panic!("want rejection for empty draft, got {outcome:?}");
        };
        assert!(errors.category.is_some());
        assert!(errors.amount.is_some());
        assert!(workflow.staged().is_empty());
    }

    #[test]
    fn stage_accepts_valid_draft_and_resets_keeping_type() {
        let mut workflow = EntryWorkflow::new(TODAY);
        workflow.open_create(TransactionType::Income, TODAY);
        fill_valid_draft(&mut workflow, "Salary", "1000");

        let outcome = workflow.stage_current(TODAY).expect("stage should run");

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(workflow.staged().len(), 1);
        assert_eq!(workflow.draft().kind, TransactionType::Income);
        assert!(workflow.draft().category.is_empty());
        assert!(workflow.draft().amount.is_empty());
    }

    #[test]
    fn staging_is_disabled_in_edit_mode() {
        let mut workflow = EntryWorkflow::new(TODAY);
        workflow
            .open_edit(&persisted_expense())
            .expect("could not open edit session");

        let result = workflow.stage_current(TODAY);

        assert_eq!(result, Err(Error::StagingUnavailable));
    }

    #[tokio::test]
    async fn save_all_submits_and_closes_on_success() {
        let api = FakeTransactionApi::new();
        let mut workflow = open_create_workflow();
        fill_valid_draft(&mut workflow, "Food", "10");
        workflow.stage_current(TODAY).expect("could not stage");
        fill_valid_draft(&mut workflow, "Rent", "500");
        workflow.stage_current(TODAY).expect("could not stage");

        let submitted = workflow.save_all(&api).await.expect("save-all should succeed");

        assert_eq!(submitted, 2);
        assert_eq!(workflow.state(), WorkflowState::Closed);
        assert!(workflow.staged().is_empty());
        assert_eq!(api.created().len(), 2);
    }

    #[tokio::test]
    async fn save_all_keeps_unsubmitted_entries_on_failure() {
        let api = FakeTransactionApi::new().fail_after_creates(1);
        let mut workflow = open_create_workflow();
        fill_valid_draft(&mut workflow, "Food", "10");
        workflow.stage_current(TODAY).expect("could not stage");
        fill_valid_draft(&mut workflow, "Rent", "500");
        workflow.stage_current(TODAY).expect("could not stage");

        let result = workflow.save_all(&api).await;

        assert!(matches!(result, Err(Error::ApiStatus { .. })));
        assert_eq!(workflow.state(), WorkflowState::OpenCreate);
        assert_eq!(workflow.staged().len(), 1);
        assert_eq!(workflow.staged().entries()[0].draft.category, "Rent");
        assert!(workflow.error().is_some(), "want a surfaced error");
    }

    #[tokio::test]
    async fn save_all_requires_staged_entries() {
        let api = FakeTransactionApi::new();
        let mut workflow = open_create_workflow();

        let result = workflow.save_all(&api).await;

        assert_eq!(result, Err(Error::NothingStaged));
    }

    #[tokio::test]
    async fn submit_edit_updates_and_closes_on_success() {
        let transaction = persisted_expense();
        let api = FakeTransactionApi::new().with_transactions(vec![transaction.clone()]);
        let mut workflow = EntryWorkflow::new(TODAY);
        workflow
            .open_edit(&transaction)
            .expect("could not open edit session");

        let outcome = workflow.submit_edit(&api).await.expect("submit should succeed");

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(workflow.state(), WorkflowState::Closed);
        let updates = api.updated();
        assert_eq!(updates.len(), 1);
        let (id, payload) = &updates[0];
        assert_eq!(*id, 7);
        assert_eq!(payload.amount, 850.0);
        assert_eq!(payload.date, "2025-06-01");
    }

    #[tokio::test]
    async fn submit_edit_surfaces_failure_and_stays_open() {
        let transaction = persisted_expense();
        let api = FakeTransactionApi::new().fail_everything();
        let mut workflow = EntryWorkflow::new(TODAY);
        workflow
            .open_edit(&transaction)
            .expect("could not open edit session");

        let result = workflow.submit_edit(&api).await;

        assert!(result.is_err());
        assert_eq!(workflow.state(), WorkflowState::OpenEdit { id: 7 });
        assert!(workflow.error().is_some());
    }

    #[tokio::test]
    async fn submit_edit_is_rejected_in_create_mode() {
        let api = FakeTransactionApi::new();
        let mut workflow = open_create_workflow();

        let result = workflow.submit_edit(&api).await;

        assert_eq!(result, Err(Error::NotEditing));
    }

    #[test]
    fn close_request_dismisses_picker_before_closing() {
        let mut workflow = open_create_workflow();
        workflow
            .push_overlay(Overlay::Calendar)
            .expect("could not open picker");

        assert_eq!(workflow.request_close(), CloseOutcome::DismissedOverlay);
        assert_eq!(workflow.state(), WorkflowState::OpenCreate);

        assert_eq!(workflow.request_close(), CloseOutcome::Closed);
        assert_eq!(workflow.state(), WorkflowState::Closed);
    }

    #[test]
    fn closing_clears_draft_staging_and_error() {
        let mut workflow = open_create_workflow();
        fill_valid_draft(&mut workflow, "Food", "10");
        workflow.stage_current(TODAY).expect("could not stage");
        fill_valid_draft(&mut workflow, "Rent", "500");

        workflow.request_close();

        assert_eq!(workflow.state(), WorkflowState::Closed);
        assert!(workflow.staged().is_empty());
        assert!(workflow.draft().category.is_empty());
        assert!(workflow.error().is_none());
    }

    #[test]
    fn field_updates_require_an_open_session() {
        let mut workflow = EntryWorkflow::new(TODAY);

        let result = workflow.update_field("amount", "10");

        assert_eq!(result, Err(Error::WorkflowClosed));
    }
}
