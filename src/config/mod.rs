mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

/// Loads `.env`, then the YAML file at `CONFIG_PATH` (default `config.yaml`),
/// then applies environment overrides.
pub async fn load() -> Result<Config> {
    dotenvy::dotenv().ok();

    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_from_path(&config_path).await?;

    apply_env_overrides(&mut config, |key| env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

/// A missing file yields the default configuration.
pub async fn load_from_path(config_path: impl AsRef<Path>) -> Result<Config> {
    let config_path = config_path.as_ref();

    if !tokio::fs::try_exists(config_path).await? {
        debug!(
            "No configuration file at {}, using defaults",
            config_path.display()
        );
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", config_path.display());

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = lookup("OPENAI_API_KEY") {
        config.llm.api_key = api_key;
    }
    if let Some(base_url) = lookup("OPENAI_BASE_URL") {
        config.llm.base_url = base_url;
    }
    if let Some(model) = lookup("OPENAI_MODEL") {
        config.llm.model = model;
    }
    if let Some(namespace) = lookup("KUBE_NAMESPACE") {
        config.cluster.namespace = namespace;
    }
}

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        return Err(Error::config(
            "OpenAI API key is not set (llm.api_key or OPENAI_API_KEY)",
        ));
    }
    if config.cluster.namespace.trim().is_empty() {
        return Err(Error::config("cluster.namespace must not be empty"));
    }
    if config.cluster.log_tail_lines <= 0 {
        return Err(Error::config("cluster.log_tail_lines must be positive"));
    }
    Ok(())
}
