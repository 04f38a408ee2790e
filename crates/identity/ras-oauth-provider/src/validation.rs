//! Consumer-side checks for provider configuration.
//!
//! Nothing here runs when a [`ProviderConfig`] is built or mutated. The code
//! that drives an OAuth2 flow calls [`ProviderConfig::validate`] (or the
//! per-request helpers, which check the fields they need) before using a
//! record.

use crate::error::{OAuthConfigError, OAuthResult};
use crate::provider::ProviderConfig;
use std::fmt;
use url::Url;

/// Configuration keys of a provider record.
///
/// Names keys, not values: it is used to report which key is missing or
/// malformed. Only the string-valued keys have a value that
/// [`ProviderField::string_value`] can return; `Scopes` is a list and never
/// has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderField {
    ClientId,
    ClientSecret,
    RedirectUri,
    TokenPath,
    CodePath,
    UserInfoPath,
    Scopes,
}

impl ProviderField {
    /// Fields the authorization-code flow cannot run without.
    pub const REQUIRED: [ProviderField; 5] = [
        ProviderField::ClientId,
        ProviderField::RedirectUri,
        ProviderField::TokenPath,
        ProviderField::CodePath,
        ProviderField::UserInfoPath,
    ];

    /// Fields holding absolute URIs.
    pub const URIS: [ProviderField; 4] = [
        ProviderField::RedirectUri,
        ProviderField::TokenPath,
        ProviderField::CodePath,
        ProviderField::UserInfoPath,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ProviderField::ClientId => "client-id",
            ProviderField::ClientSecret => "client-secret",
            ProviderField::RedirectUri => "redirect-uri",
            ProviderField::TokenPath => "token-path",
            ProviderField::CodePath => "code-path",
            ProviderField::UserInfoPath => "user-info-path",
            ProviderField::Scopes => "scopes",
        }
    }

    /// The configured string for this key, or `None` when unset or when the
    /// key is not string-valued.
    pub fn string_value<'a>(&self, config: &'a ProviderConfig) -> Option<&'a str> {
        match self {
            ProviderField::ClientId => config.client_id(),
            ProviderField::ClientSecret => config.client_secret(),
            ProviderField::RedirectUri => config.redirect_uri(),
            ProviderField::TokenPath => config.token_path(),
            ProviderField::CodePath => config.code_path(),
            ProviderField::UserInfoPath => config.user_info_path(),
            ProviderField::Scopes => None,
        }
    }
}

impl fmt::Display for ProviderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Parses `value` as an absolute URI with a host.
pub fn validate_absolute_uri(field: ProviderField, value: &str) -> OAuthResult<Url> {
    let malformed = |reason: String| OAuthConfigError::MalformedUri {
        field,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| malformed(e.to_string()))?;

    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(malformed("URI has no host".to_string()));
    }

    Ok(url)
}

impl ProviderConfig {
    /// Required fields that are absent or blank, in declaration order.
    pub fn missing_fields(&self) -> Vec<ProviderField> {
        ProviderField::REQUIRED
            .into_iter()
            .filter(|field| field.string_value(self).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    /// Checks that every required field is set and every URI field parses.
    ///
    /// All missing fields are reported together; URI problems are reported
    /// one at a time, in declaration order.
    pub fn validate(&self) -> OAuthResult<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(OAuthConfigError::MissingFields { fields: missing });
        }

        for field in ProviderField::URIS {
            if let Some(value) = field.string_value(self) {
                validate_absolute_uri(field, value)?;
            }
        }

        Ok(())
    }

    /// Returns the value of a required string field, or a `MissingFields`
    /// error naming it.
    pub(crate) fn require(&self, field: ProviderField) -> OAuthResult<&str> {
        field
            .string_value(self)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| OAuthConfigError::missing(field))
    }

    /// Returns a required URI field parsed as an absolute URI.
    pub(crate) fn require_uri(&self, field: ProviderField) -> OAuthResult<Url> {
        let value = self.require(field)?;
        validate_absolute_uri(field, value)
    }
}
