//! Provider settings commands

use crate::config::Settings;
use anyhow::Result;
use clap::Subcommand;
use quill_core::providers::{mask_key, ApiConfig, ProviderId};

#[derive(Subcommand)]
pub enum ProviderCommand {
    /// Show the configured endpoints
    Show,

    /// Set a provider's key and/or endpoint
    Set {
        /// openai, anthropic, mistral or local
        provider: ProviderId,

        #[arg(long)]
        api_key: Option<String>,

        /// Endpoint URL (empty restores the default)
        #[arg(long)]
        api_url: Option<String>,
    },
}

/// Run a provider command
pub async fn provider(settings: &Settings, command: ProviderCommand) -> Result<()> {
    let storage = settings.storage();
    let mut config = ApiConfig::load(&storage).await?;

    match command {
        ProviderCommand::Show => {
            for (id, provider) in config.iter() {
                let key = if provider.api_key.is_empty() {
                    "-".to_string()
                } else {
                    mask_key(&provider.api_key)
                };
                println!(
                    "{:<16} {:<32} {}: {}",
                    id.display_name(),
                    provider.api_url,
                    id.key_label(),
                    key
                );
            }
        }
        ProviderCommand::Set {
            provider,
            api_key,
            api_url,
        } => {
            config.set(provider, api_key, api_url);
            config.save(&storage).await?;
            println!(
                "Updated {} ({})",
                provider.display_name(),
                config.get(provider).api_url
            );
        }
    }
    Ok(())
}
