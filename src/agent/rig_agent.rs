use super::preamble::build_preamble;
use crate::store::TransactionStore;
use crate::tools::RegisterTransaction;
use anyhow::Result;
use async_trait::async_trait;
use rig::{client::CompletionClient, completion::Prompt, tool::Tool};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};

/// Upper bound on completion rounds within one request, so a model that keeps
/// calling the tool cannot loop forever.
const MAX_TURNS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentReply {
    pub message: String,
}

#[async_trait]
pub trait Agent: Send + Sync {
    async fn respond(&self, user_message: &str) -> Result<AgentReply>;
}

/// The `{response, registered}` shape requested from OpenAI-compatible
/// providers. The reply is forwarded as raw text and never parsed against it.
pub fn structured_output_params() -> Value {
    json!({
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "ResponseFormat",
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "response": { "type": "string" },
                        "registered": { "type": "boolean" }
                    },
                    "required": ["response", "registered"],
                    "additionalProperties": false
                }
            }
        }
    })
}

pub struct RigAgent<C: CompletionClient> {
    client: C,
    model: String,
    store: Arc<dyn TransactionStore>,
    additional_params: Option<Value>,
}

impl<C: CompletionClient> RigAgent<C> {
    pub fn new(
        client: C,
        model: &str,
        store: Arc<dyn TransactionStore>,
        additional_params: Option<Value>,
    ) -> Arc<Self> {
        Arc::new(Self {
            client,
            model: model.to_string(),
            store,
            additional_params,
        })
    }
}

#[async_trait]
impl<C> Agent for RigAgent<C>
where
    C: CompletionClient + Send + Sync,
    C::CompletionModel: 'static,
{
    async fn respond(&self, user_message: &str) -> Result<AgentReply> {
        let preamble = build_preamble(chrono::Local::now(), RegisterTransaction::NAME);

        let mut builder = self
            .client
            .agent(&self.model)
            .preamble(&preamble)
            .tool(RegisterTransaction {
                store: self.store.clone(),
            });

        if let Some(ref params) = self.additional_params {
            builder = builder.additional_params(params.clone());
        }

        let agent = builder.default_max_turns(MAX_TURNS).build();

        info!("Forwarding message to model {}", self.model);
        let response = agent.prompt(user_message).await?;
        debug!("Completion result: {}", response);

        Ok(AgentReply { message: response })
    }
}
