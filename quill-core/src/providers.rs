//! Language-model provider settings
//!
//! Endpoints and keys are captured and persisted so a real generation backend
//! can be configured; nothing in this crate sends requests to them.

use crate::error::{ParseError, Result};
use crate::storage::StorageProvider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Storage key holding the provider settings
pub const API_CONFIG_KEY: &str = "lmm-api-config";

const VISIBLE_KEY_CHARS: usize = 4;

/// Supported providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    #[default]
    OpenAi,
    Anthropic,
    Mistral,
    Local,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::Mistral,
        ProviderId::Local,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Mistral => "mistral",
            ProviderId::Local => "local",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::Mistral => "Mistral AI",
            ProviderId::Local => "Lokales Modell",
        }
    }

    pub fn default_url(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "https://api.openai.com/v1",
            ProviderId::Anthropic => "https://api.anthropic.com",
            ProviderId::Mistral => "https://api.mistral.ai/v1",
            ProviderId::Local => "http://localhost:1234/v1",
        }
    }

    /// Label of the secret field; the local server only takes an optional password
    pub fn key_label(&self) -> &'static str {
        match self {
            ProviderId::Local => "Passwort (optional)",
            _ => "API-Schlüssel",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownProvider(s.to_string()))
    }
}

/// Endpoint and credential for one provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    #[serde(default)]
    pub api_key: String,
    pub api_url: String,
}

/// Settings for every provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ApiConfig {
    providers: BTreeMap<ProviderId, ProviderSettings>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let providers = ProviderId::ALL
            .into_iter()
            .map(|p| {
                (
                    p,
                    ProviderSettings {
                        api_key: String::new(),
                        api_url: p.default_url().to_string(),
                    },
                )
            })
            .collect();
        Self { providers }
    }
}

impl ApiConfig {
    /// Settings for a provider, falling back to its default URL
    pub fn get(&self, provider: ProviderId) -> ProviderSettings {
        self.providers
            .get(&provider)
            .cloned()
            .unwrap_or_else(|| ProviderSettings {
                api_key: String::new(),
                api_url: provider.default_url().to_string(),
            })
    }

    /// Change a provider's key and/or URL; an empty URL restores the default
    pub fn set(&mut self, provider: ProviderId, api_key: Option<String>, api_url: Option<String>) {
        let mut settings = self.get(provider);
        if let Some(key) = api_key {
            settings.api_key = key;
        }
        if let Some(url) = api_url {
            settings.api_url = if url.trim().is_empty() {
                provider.default_url().to_string()
            } else {
                url
            };
        }
        self.providers.insert(provider, settings);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProviderId, ProviderSettings)> + '_ {
        ProviderId::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Load the stored settings, or the defaults when nothing is stored
    pub async fn load(storage: &dyn StorageProvider) -> Result<Self> {
        match storage.read_optional(API_CONFIG_KEY).await? {
            Some(data) => serde_json::from_slice(&data).map_err(|e| {
                ParseError::MalformedContent(format!("provider settings: {}", e)).into()
            }),
            None => Ok(Self::default()),
        }
    }

    /// Persist the settings
    pub async fn save(&self, storage: &dyn StorageProvider) -> Result<()> {
        storage
            .write(API_CONFIG_KEY, serde_json::to_vec_pretty(self)?)
            .await?;
        tracing::info!("Saved provider settings");
        Ok(())
    }
}

/// Mask a secret for display
///
/// Keys longer than four characters keep their last four visible; shorter
/// keys are masked completely.
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= VISIBLE_KEY_CHARS {
        return "*".repeat(count);
    }
    let visible: String = key.chars().skip(count - VISIBLE_KEY_CHARS).collect();
    format!("{}{}", "*".repeat(count - VISIBLE_KEY_CHARS), visible)
}
