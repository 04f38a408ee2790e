//! Binding surface for `oauth.providers.<name>` and the layered loader that
//! produces it.
//!
//! Sources are applied in this order, later ones overriding earlier ones:
//! - configuration files (TOML or YAML, chosen by extension)
//! - inline configuration strings
//! - environment variables prefixed with `OAUTH`, using `__` as the nesting
//!   separator, e.g. `OAUTH__PROVIDERS__KAKAO__CLIENT_ID`

use crate::error::{OAuthConfigError, OAuthResult};
use crate::preset::ProviderPreset;
use crate::provider::ProviderConfig;
use config::{Config, ConfigError, Environment, File, FileFormat, Map, Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Root key of the OAuth section.
pub const SETTINGS_KEY: &str = "oauth";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "OAUTH";

/// Nesting separator for environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Environment variable naming the configuration file.
pub const CONFIG_FILE_ENV: &str = "OAUTH_CONFIG_FILE";

/// File used when `OAUTH_CONFIG_FILE` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Provider configurations keyed by provider name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthSettings {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl OAuthSettings {
    /// Loads from `OAUTH_CONFIG_FILE` (or `config.toml` when present) and the
    /// process environment.
    pub fn load() -> OAuthResult<Self> {
        let mut loader = SettingsLoader::new();

        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => {
                info!("Loading OAuth configuration from {}", path);
                loader = loader.with_file(path);
            }
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("Loading OAuth configuration from {}", DEFAULT_CONFIG_FILE);
                loader = loader.with_file(DEFAULT_CONFIG_FILE);
            }
            Err(_) => {
                debug!(
                    "No config file found at {}, using environment only",
                    DEFAULT_CONFIG_FILE
                );
            }
        }

        loader.load()
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// Provider names in sorted order.
    pub fn provider_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Overlays every provider whose name matches a [`ProviderPreset`] on
    /// that preset's defaults. Other providers are kept as configured.
    pub fn with_presets(&self) -> OAuthSettings {
        let providers = self
            .providers
            .iter()
            .map(|(name, config)| {
                let resolved = match ProviderPreset::from_name(name) {
                    Some(preset) => config.with_preset(preset),
                    None => config.clone(),
                };
                (name.clone(), resolved)
            })
            .collect();

        OAuthSettings { providers }
    }

    /// Validates every provider in name order, stopping at the first failure.
    pub fn validate(&self) -> OAuthResult<()> {
        for name in self.provider_names() {
            if let Some(config) = self.providers.get(name) {
                config.validate().map_err(|e| {
                    warn!("OAuth provider '{}' is misconfigured: {}", name, e);
                    OAuthConfigError::for_provider(name, e)
                })?;
            }
        }
        Ok(())
    }
}

/// Key path of the provider tables.
const PROVIDERS_KEY: &str = "oauth.providers";

/// Spells the field keys of one provider table in kebab-case. A key already
/// in kebab-case wins over its snake_case spelling, so an environment value
/// (always rewritten to kebab-case) overrides a snake_case file key.
fn kebab_case_fields(fields: Map<String, Value>) -> Map<String, Value> {
    let (snake, kebab): (Vec<_>, Vec<_>) =
        fields.into_iter().partition(|(key, _)| key.contains('_'));

    let mut normalized: Map<String, Value> = kebab.into_iter().collect();
    for (key, value) in snake {
        normalized.entry(key.replace('_', "-")).or_insert(value);
    }
    normalized
}

/// Position of the field name in `PREFIX__PROVIDERS__<name>__<field>`.
const FIELD_SEGMENT: usize = 3;

/// Keeps the variables under `prefix` and spells their field segment in
/// kebab-case, so `..._CLIENT_ID` binds to the same `client-id` key a file
/// uses instead of colliding with it.
fn normalize_env_keys(prefix: &str, vars: Map<String, String>) -> Map<String, String> {
    let marker = format!("{}{}", prefix, ENV_SEPARATOR).to_lowercase();

    vars.into_iter()
        .filter(|(key, _)| key.to_lowercase().starts_with(&marker))
        .map(|(key, value)| {
            let key = key
                .split(ENV_SEPARATOR)
                .enumerate()
                .map(|(i, segment)| {
                    if i == FIELD_SEGMENT {
                        segment.replace('_', "-")
                    } else {
                        segment.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(ENV_SEPARATOR);
            (key, value)
        })
        .collect()
}

enum Source {
    File(PathBuf),
    Inline(String, FileFormat),
}

/// Builds [`OAuthSettings`] from layered sources.
pub struct SettingsLoader {
    sources: Vec<Source>,
    env_prefix: String,
    env_source: Option<Map<String, String>>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            env_prefix: ENV_PREFIX.to_string(),
            env_source: None,
        }
    }

    /// Adds a required file; the format comes from its extension.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(Source::File(path.into()));
        self
    }

    /// Adds configuration text in the given format.
    pub fn with_str(mut self, content: impl Into<String>, format: FileFormat) -> Self {
        self.sources.push(Source::Inline(content.into(), format));
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Reads environment values from `vars` instead of the process
    /// environment.
    pub fn with_env_source(mut self, vars: Map<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    pub fn load(self) -> OAuthResult<OAuthSettings> {
        let mut builder = Config::builder();

        for source in self.sources {
            builder = match source {
                Source::File(path) => {
                    debug!("Adding OAuth configuration file {}", path.display());
                    builder.add_source(File::from(path).required(true))
                }
                Source::Inline(content, format) => {
                    builder.add_source(File::from_str(&content, format))
                }
            };
        }

        let vars = match self.env_source {
            Some(vars) => vars,
            None => std::env::vars().collect(),
        };

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .keep_prefix(true)
                .source(Some(normalize_env_keys(&self.env_prefix, vars))),
        );

        let config = builder.build()?;

        let tables = match config.get_table(PROVIDERS_KEY) {
            Ok(tables) => tables,
            Err(ConfigError::NotFound(_)) => {
                debug!("No '{}' section configured", PROVIDERS_KEY);
                Map::new()
            }
            Err(e) => return Err(e.into()),
        };

        let mut providers = HashMap::with_capacity(tables.len());
        for (name, table) in tables {
            let provider = table
                .into_table()
                .and_then(|fields| {
                    Value::new(None, ValueKind::Table(kebab_case_fields(fields)))
                        .try_deserialize::<ProviderConfig>()
                })
                .map_err(|e| OAuthConfigError::for_provider(name.as_str(), e.into()))?;
            providers.insert(name, provider);
        }

        let settings = OAuthSettings { providers };

        info!(
            "Loaded OAuth configuration for providers: {:?}",
            settings.provider_names()
        );

        Ok(settings)
    }
}
