//! OAuth2 provider configuration.
//!
//! This crate holds the static configuration for OAuth2 identity providers
//! (client credentials, redirect URI, endpoints and scopes), bound from the
//! `oauth.providers.<name>` section of layered configuration sources. It also
//! offers the pieces consumers need around that record: on-demand
//! validation, endpoint presets for well-known providers, request parts for
//! the authorization-code flow and a hot-reloadable shared handle.
//!
//! # Example
//!
//! ```rust
//! use ras_oauth_provider::{ProviderConfig, generate_state};
//!
//! let config = ProviderConfig::builder()
//!     .client_id("abc123")
//!     .redirect_uri("http://localhost:8080/cb")
//!     .code_path("https://p.example/authorize")
//!     .token_path("https://p.example/token")
//!     .user_info_path("https://p.example/me")
//!     .scopes(vec!["profile".to_string(), "email".to_string()])
//!     .build();
//!
//! assert!(config.validate().is_ok());
//!
//! let url = config.authorization_url(&generate_state()).unwrap();
//! assert!(url.as_str().contains("scope=profile+email"));
//! ```

mod error;
mod params;
mod preset;
mod provider;
mod request;
mod scopes;
mod settings;
mod shared;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{OAuthConfigError, OAuthResult};
pub use preset::ProviderPreset;
pub use provider::ProviderConfig;
pub use request::{
    DEFAULT_STATE_LENGTH, TokenRequest, UserInfoRequest, generate_state, generate_state_with_len,
};
pub use scopes::ScopeDelimiter;
pub use settings::{
    CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE, ENV_PREFIX, ENV_SEPARATOR, OAuthSettings, SETTINGS_KEY,
    SettingsLoader,
};
pub use shared::SharedProviderConfig;
pub use validation::{ProviderField, validate_absolute_uri};

// Re-export for callers passing inline sources or environment maps
pub use config::{FileFormat, Map};
