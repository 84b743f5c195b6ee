use crate::entity::{NewTransaction, Transaction};
use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
pub mod memory;
mod supabase;

pub use supabase::SupabaseStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Durable storage for registered transactions. Failures propagate to the
/// caller untouched; nothing is retried.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert(&self, record: &NewTransaction) -> Result<(), StoreError>;

    async fn list(
        &self,
        order_by: &str,
        descending: bool,
    ) -> Result<Vec<Transaction>, StoreError>;
}
