use super::{StoreError, TransactionStore};
use crate::entity::{NewTransaction, Transaction};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;

/// In-process store used by tests. Rows are kept in insertion order and
/// sorted on read; `fail_with` makes every call return an HTTP error.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Transaction>>,
    inserts: Mutex<Vec<NewTransaction>>,
    fail_with: Option<String>,
}

impl MemoryStore {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn inserted(&self) -> Vec<NewTransaction> {
        self.inserts.lock().unwrap().clone()
    }

    fn failure(&self) -> Option<StoreError> {
        self.fail_with.as_ref().map(|body| StoreError::Status {
            status: 503,
            body: body.clone(),
        })
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn insert(&self, record: &NewTransaction) -> Result<(), StoreError> {
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.inserts.lock().unwrap().push(record.clone());
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() + 1;
        rows.push(Transaction {
            id: Some(json!(id)),
            created_at: Some(json!(format!("2026-01-01T00:00:{:02}+00:00", id))),
            username: Some(record.username.clone()),
            kind: Some(record.kind.clone()),
            amount: Value::String(record.amount.clone()),
            category: Some(record.category.clone()),
            description: Some(record.description.clone()),
            date: Some(record.date.clone()),
            ..Default::default()
        });
        Ok(())
    }

    async fn list(
        &self,
        order_by: &str,
        descending: bool,
    ) -> Result<Vec<Transaction>, StoreError> {
        if let Some(err) = self.failure() {
            return Err(err);
        }
        let mut rows = self.rows.lock().unwrap().clone();
        let key = |t: &Transaction| match order_by {
            "date" => t.date.clone(),
            "category" => t.category.clone(),
            _ => None,
        };
        rows.sort_by_key(key);
        if descending {
            rows.reverse();
        }
        Ok(rows)
    }
}
