use super::{StoreError, TransactionStore};
use crate::entity::{NewTransaction, Transaction};
use async_trait::async_trait;
use tracing::{info, warn};

/// PostgREST client for a hosted Supabase table.
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    key: String,
    table: String,
}

impl SupabaseStore {
    pub fn new(url: &str, key: &str, table: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            table: table.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn order_param(order_by: &str, descending: bool) -> String {
        format!("{}.{}", order_by, if descending { "desc" } else { "asc" })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read store error body: {}", e);
                format!("<unreadable body: {}>", e)
            }
        };
        warn!("Store responded with HTTP {}: {}", status, body);
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TransactionStore for SupabaseStore {
    async fn insert(&self, record: &NewTransaction) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await?;

        Self::check(response).await?;
        info!(
            "Inserted {} transaction into {} ({})",
            record.kind, self.table, record.category
        );
        Ok(())
    }

    async fn list(
        &self,
        order_by: &str,
        descending: bool,
    ) -> Result<Vec<Transaction>, StoreError> {
        let response = self
            .client
            .get(self.table_url())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .query(&[
                ("select", "*".to_string()),
                ("order", Self::order_param(order_by, descending)),
            ])
            .send()
            .await?;

        let rows: Vec<Transaction> = Self::check(response).await?.json().await?;
        Ok(rows)
    }
}
