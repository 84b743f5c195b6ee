use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A transaction as written to the `transactions` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub username: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
}

/// A transaction row as returned by the store. Nothing here is validated:
/// nullable columns stay null, `id` keeps whatever type the table uses and
/// columns not named below are carried in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    pub username: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Value,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
