use crate::config::Config;
use crate::store::TransactionStore;
use anyhow::{Result, bail};
use rig::providers::{anthropic, azure, gemini, openai};
use rig_agent::{RigAgent, structured_output_params};
pub use rig_agent::{Agent, AgentReply};
use std::sync::Arc;
use tracing::info;

mod preamble;
mod rig_agent;

pub fn create_agent(config: &Config, store: Arc<dyn TransactionStore>) -> Result<Arc<dyn Agent>> {
    info!(
        "Creating {} agent with model {}",
        config.api_provider, config.model
    );
    match config.api_provider.as_str() {
        "azure" => {
            // The model name is the Azure deployment name.
            let client: azure::Client = azure::Client::builder()
                .api_key(azure::AzureOpenAIAuth::ApiKey(config.api_key.clone()))
                .azure_endpoint(config.api_url.clone())
                .api_version(&config.api_version)
                .build()?;
            let agent = RigAgent::new(
                client,
                &config.model,
                store,
                Some(structured_output_params()),
            );
            Ok(agent as Arc<dyn Agent>)
        }
        "openai" => {
            let client: openai::CompletionsClient = openai::CompletionsClient::builder()
                .api_key(&config.api_key)
                .base_url(&config.api_url)
                .build()?;
            let agent = RigAgent::new(
                client,
                &config.model,
                store,
                Some(structured_output_params()),
            );
            Ok(agent as Arc<dyn Agent>)
        }
        "gemini" => {
            let client = gemini::Client::new(&config.api_key)?;
            let agent = RigAgent::new(client, &config.model, store, None);
            Ok(agent as Arc<dyn Agent>)
        }
        "anthropic" => {
            let client: anthropic::Client = anthropic::Client::builder()
                .api_key(&config.api_key)
                .base_url(&config.api_url)
                .build()?;
            let agent = RigAgent::new(client, &config.model, store, None);
            Ok(agent as Arc<dyn Agent>)
        }
        other => bail!("Unsupported LLM provider: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn config(provider: &str) -> Config {
        let mut config = Config::from_toml_str(
            r#"
            [api]
            key = "sk-test"
            url = "https://finance.openai.azure.com"
            model = "finance-gpt4o"

            [store]
            url = "https://project.supabase.co"
            key = "anon-key"
            "#,
        )
        .expect("config");
        config.api_provider = provider.to_string();
        config
    }

    #[test]
    fn azure_and_openai_clients_build_offline() {
        for provider in ["azure", "openai"] {
            let result = create_agent(&config(provider), Arc::new(MemoryStore::default()));
            assert!(result.is_ok(), "{} agent should build", provider);
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = match create_agent(&config("mistral"), Arc::new(MemoryStore::default())) {
            Ok(_) => panic!("unknown provider must fail"),
            Err(e) => e,
        };

        assert!(err.to_string().contains("mistral"));
    }
}
