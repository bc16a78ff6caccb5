//! Provider credential resolution
//!
//! Each credential resolves with ENV → TOML priority. Blank values are ignored. A
//! credential that resolves to nothing leaves its provider unconfigured: the service
//! still starts and the provider's calls degrade.

use artdrawer_common::config::TomlConfig;
use tracing::{info, warn};

pub const SEARCH_API_KEY_ENV: &str = "ARTDRAWER_SEARCH_API_KEY";
pub const SEARCH_ENGINE_ID_ENV: &str = "ARTDRAWER_SEARCH_ENGINE_ID";
pub const GEMINI_API_KEY_ENV: &str = "ARTDRAWER_GEMINI_API_KEY";
pub const REMOTE_API_KEY_ENV: &str = "ARTDRAWER_REMOTE_API_KEY";

/// Resolved provider settings
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub search_api_key: Option<String>,
    pub search_engine_id: Option<String>,
    pub gemini_api_key: Option<String>,
    pub profile_model: String,
    pub chat_model: String,
    /// `(base_url, api_key)` when a remote document store is configured
    pub remote: Option<(String, Option<String>)>,
}

impl ProviderSettings {
    pub fn resolve(toml_config: &TomlConfig) -> Self {
        let remote = toml_config
            .remote
            .as_ref()
            .filter(|r| is_valid_key(&r.base_url))
            .map(|r| {
                (
                    r.base_url.clone(),
                    resolve_credential("Remote store API key", REMOTE_API_KEY_ENV, r.api_key.as_deref()),
                )
            });

        Self {
            search_api_key: resolve_credential(
                "Search API key",
                SEARCH_API_KEY_ENV,
                toml_config.search.api_key.as_deref(),
            ),
            search_engine_id: resolve_credential(
                "Search engine id",
                SEARCH_ENGINE_ID_ENV,
                toml_config.search.engine_id.as_deref(),
            ),
            gemini_api_key: resolve_credential(
                "Gemini API key",
                GEMINI_API_KEY_ENV,
                toml_config.enrichment.api_key.as_deref(),
            ),
            profile_model: toml_config.enrichment.profile_model.clone(),
            chat_model: toml_config.enrichment.chat_model.clone(),
            remote,
        }
    }
}

/// Resolve one credential
///
/// **Priority:** ENV → TOML
pub fn resolve_credential(label: &str, env_var: &str, toml_value: Option<&str>) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|v| is_valid_key(v));
    let toml_value = toml_value.filter(|v| is_valid_key(v));

    if env_value.is_some() && toml_value.is_some() {
        warn!("{} found in environment and TOML. Using environment (highest priority).", label);
    }

    if let Some(value) = env_value {
        info!("{} loaded from environment variable", label);
        return Some(value);
    }

    if let Some(value) = toml_value {
        info!("{} loaded from TOML config", label);
        return Some(value.to_string());
    }

    warn!("{} not configured ({} or TOML); provider calls will degrade", label, env_var);
    None
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
