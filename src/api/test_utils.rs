//! An in-memory stand-in for the remote transactions API, used in tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    Error,
    transaction::{NewTransaction, PersistedTransaction, TransactionId},
};

use super::{ListQuery, TransactionApi};

#[derive(Debug, Default)]
struct FakeState {
    transactions: Vec<PersistedTransaction>,
    next_id: TransactionId,
    created: Vec<NewTransaction>,
    updated: Vec<(TransactionId, NewTransaction)>,
    deleted: Vec<TransactionId>,
    list_queries: Vec<ListQuery>,
    successful_creates_allowed: Option<usize>,
    fail_everything: bool,
}

/// A [TransactionApi] backed by a vector, with programmable failures.
#[derive(Debug, Default)]
pub(crate) struct FakeTransactionApi {
    state: Mutex<FakeState>,
}

impl FakeTransactionApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seed the fake with existing transactions.
    pub(crate) fn with_transactions(self, transactions: Vec<PersistedTransaction>) -> Self {
        {
            let mut state = self.state.lock().expect("fake API lock poisoned");
            state.next_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
            state.transactions = transactions;
        }

        self
    }

    /// Let `count` create calls succeed, then fail every call after that.
    pub(crate) fn fail_after_creates(self, count: usize) -> Self {
        self.state
            .lock()
            .expect("fake API lock poisoned")
            .successful_creates_allowed = Some(count);

        self
    }

    /// Fail every call.
    pub(crate) fn fail_everything(self) -> Self {
        self.state.lock().expect("fake API lock poisoned").fail_everything = true;

        self
    }

    /// Stop failing calls that were set up to fail.
    pub(crate) fn clear_failures(&self) {
        let mut state = self.state.lock().expect("fake API lock poisoned");
        state.successful_creates_allowed = None;
        state.fail_everything = false;
    }

    /// The create payloads received so far, in order.
    pub(crate) fn created(&self) -> Vec<NewTransaction> {
        self.state
            .lock()
            .expect("fake API lock poisoned")
            .created
            .clone()
    }

    /// The update calls received so far, in order.
    pub(crate) fn updated(&self) -> Vec<(TransactionId, NewTransaction)> {
        self.state
            .lock()
            .expect("fake API lock poisoned")
            .updated
            .clone()
    }

    /// The ids deleted so far, in order.
    pub(crate) fn deleted(&self) -> Vec<TransactionId> {
        self.state
            .lock()
            .expect("fake API lock poisoned")
            .deleted
            .clone()
    }

    /// The list queries received so far, in order.
    pub(crate) fn list_queries(&self) -> Vec<ListQuery> {
        self.state
            .lock()
            .expect("fake API lock poisoned")
            .list_queries
            .clone()
    }

    fn remote_failure() -> Error {
        Error::ApiStatus {
            status: 500,
            message: "simulated remote failure".to_owned(),
        }
    }
}

#[async_trait]
impl TransactionApi for FakeTransactionApi {
    async fn list_transactions(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<PersistedTransaction>, Error> {
        let mut state = self.state.lock().expect("fake API lock poisoned");

        if state.fail_everything {
            return Err(Self::remote_failure());
        }

        state.list_queries.push(*query);

        let transactions = state
            .transactions
            .iter()
            .filter(|transaction| match query.kind {
                Some(kind) => transaction.kind == kind,
                None => true,
            })
            .cloned()
            .collect();

        Ok(transactions)
    }

    async fn get_transaction(&self, id: TransactionId) -> Result<PersistedTransaction, Error> {
        let state = self.state.lock().expect("fake API lock poisoned");

        if state.fail_everything {
            return Err(Self::remote_failure());
        }

        state
            .transactions
            .iter()
            .find(|transaction| transaction.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn create_transaction(
        &self,
        payload: &NewTransaction,
    ) -> Result<PersistedTransaction, Error> {
        let mut state = self.state.lock().expect("fake API lock poisoned");

        if state.fail_everything {
            return Err(Self::remote_failure());
        }

        if let Some(allowed) = state.successful_creates_allowed {
            if state.created.len() >= allowed {
                return Err(Self::remote_failure());
            }
        }

        state.created.push(payload.clone());
        state.next_id += 1;

        let transaction = PersistedTransaction {
            id: state.next_id,
            kind: payload.kind,
            category: payload.category.clone(),
            amount: payload.amount,
            description: payload.description.clone(),
            date: payload.date.clone(),
            payment_method: payload.payment_method,
            created_at: None,
        };
        state.transactions.push(transaction.clone());

        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        payload: &NewTransaction,
    ) -> Result<PersistedTransaction, Error> {
        let mut state = self.state.lock().expect("fake API lock poisoned");

        if state.fail_everything {
            return Err(Self::remote_failure());
        }

        state.updated.push((id, payload.clone()));

        let Some(transaction) = state
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
        else {
            return Err(Error::NotFound);
        };

        transaction.kind = payload.kind;
        transaction.category = payload.category.clone();
        transaction.amount = payload.amount;
        transaction.description = payload.description.clone();
        transaction.date = payload.date.clone();
        transaction.payment_method = payload.payment_method;

        Ok(transaction.clone())
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        let mut state = self.state.lock().expect("fake API lock poisoned");

        if state.fail_everything {
            return Err(Self::remote_failure());
        }

        let before = state.transactions.len();
        state.transactions.retain(|transaction| transaction.id != id);

        if state.transactions.len() == before {
            return Err(Error::NotFound);
        }

        state.deleted.push(id);

        Ok(())
    }
}
