use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_PROVIDER: &str = "azure";
const DEFAULT_API_VERSION: &str = "2024-10-21";
const DEFAULT_TABLE: &str = "transactions";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    api: ApiConfig,
    store: StoreConfig,
    #[serde(default)]
    server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiConfig {
    #[serde(default = "default_provider")]
    provider: String,
    key: String,
    url: String,
    model: String,
    #[serde(default = "default_api_version")]
    api_version: String,
}

#[derive(Debug, Clone, Deserialize)]
struct StoreConfig {
    url: String,
    key: String,
    #[serde(default = "default_table")]
    table: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_provider: String,
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub api_version: String,
    pub store_url: String,
    pub store_key: String,
    pub store_table: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config_file: ConfigFile =
            toml::from_str(content).context("Failed to parse config file")?;

        Ok(Self {
            api_provider: config_file.api.provider,
            api_key: config_file.api.key,
            api_url: config_file.api.url,
            model: config_file.api.model,
            api_version: config_file.api.api_version,
            store_url: config_file.store.url,
            store_key: config_file.store.key,
            store_table: config_file.store.table,
            listen_addr: parse_listen_addr(&config_file.server.listen_addr)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Missing required environment variable: {}", key))
        };

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        Ok(Self {
            api_provider: lookup("LLM_PROVIDER").unwrap_or_else(default_provider),
            api_key: required("AZURE_API_KEY")?,
            api_url: required("AZURE_HOST")?,
            model: required("AZURE_NAME_MODEL")?,
            api_version: lookup("AZURE_API_VERSION").unwrap_or_else(default_api_version),
            store_url: required("SUPABASE_URL")?,
            store_key: required("SUPABASE_KEY")?,
            store_table: lookup("SUPABASE_TABLE").unwrap_or_else(default_table),
            listen_addr: parse_listen_addr(&listen_addr)?,
        })
    }

    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)
        } else {
            Self::from_env()
        }
    }
}

fn parse_listen_addr(value: &str) -> Result<SocketAddr> {
    value
        .parse()
        .with_context(|| format!("Invalid listen address: {}", value))
}
