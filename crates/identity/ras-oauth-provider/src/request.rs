//! Request parts derived from a provider configuration.
//!
//! These helpers only assemble URLs and form fields; sending them is up to
//! the caller's HTTP client.

use crate::error::OAuthResult;
use crate::provider::ProviderConfig;
use crate::scopes::ScopeDelimiter;
use crate::validation::{ProviderField, validate_absolute_uri};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::fmt;
use tracing::debug;
use url::Url;

/// Length of states produced by [`generate_state`].
pub const DEFAULT_STATE_LENGTH: usize = 32;

/// Random alphanumeric value for the `state` parameter.
pub fn generate_state() -> String {
    generate_state_with_len(DEFAULT_STATE_LENGTH)
}

pub fn generate_state_with_len(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Token endpoint call for the authorization-code grant.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub endpoint: Url,
    /// `application/x-www-form-urlencoded` body fields.
    pub form: Vec<(&'static str, String)>,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form: Vec<(&str, &str)> = self
            .form
            .iter()
            .map(|(key, value)| match *key {
                "client_secret" | "code" => (*key, "[REDACTED]"),
                _ => (*key, value.as_str()),
            })
            .collect();

        f.debug_struct("TokenRequest")
            .field("endpoint", &self.endpoint.as_str())
            .field("form", &form)
            .finish()
    }
}

/// User-info endpoint call.
#[derive(Clone, PartialEq, Eq)]
pub struct UserInfoRequest {
    pub endpoint: Url,
    /// Value for the `Authorization` header.
    pub authorization: String,
}

impl fmt::Debug for UserInfoRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInfoRequest")
            .field("endpoint", &self.endpoint.as_str())
            .field("authorization", &"Bearer [REDACTED]")
            .finish()
    }
}

impl ProviderConfig {
    /// URL the user agent is sent to for consent.
    ///
    /// Query parameters already present on `code-path` are kept. `scope` is
    /// omitted when no scopes are configured so the provider applies its
    /// defaults. `redirect-uri` must parse as an absolute URI but is sent as
    /// configured, since providers match it byte for byte.
    pub fn authorization_url(&self, state: &str) -> OAuthResult<Url> {
        let mut url = self.require_uri(ProviderField::CodePath)?;
        let client_id = self.require(ProviderField::ClientId)?;
        let redirect_uri = self.require(ProviderField::RedirectUri)?;
        validate_absolute_uri(ProviderField::RedirectUri, redirect_uri)?;

        {
            let mut params = url.query_pairs_mut();
            params.append_pair("response_type", "code");
            params.append_pair("client_id", client_id);
            params.append_pair("redirect_uri", redirect_uri);
            params.append_pair("state", state);

            if !self.scopes().is_empty() {
                params.append_pair("scope", &self.joined_scopes(ScopeDelimiter::Space));
            }

            for (key, value) in self.extra_params() {
                params.append_pair(key, value);
            }
        }

        debug!("Generated authorization URL for {}", url.host_str().unwrap_or_default());
        Ok(url)
    }

    /// Token exchange request for an authorization `code`.
    ///
    /// `client_secret` is sent only when configured and non-blank, and
    /// `redirect_uri` only when configured.
    pub fn token_request(&self, code: &str) -> OAuthResult<TokenRequest> {
        let endpoint = self.require_uri(ProviderField::TokenPath)?;
        let client_id = self.require(ProviderField::ClientId)?;

        let mut form = vec![
            ("grant_type", "authorization_code".to_string()),
            ("code", code.to_string()),
            ("client_id", client_id.to_string()),
        ];

        if let Some(secret) = self.client_secret().filter(|_| self.has_client_secret()) {
            form.push(("client_secret", secret.to_string()));
        }

        if let Some(redirect_uri) = self.redirect_uri().filter(|v| !v.trim().is_empty()) {
            validate_absolute_uri(ProviderField::RedirectUri, redirect_uri)?;
            form.push(("redirect_uri", redirect_uri.to_string()));
        }

        Ok(TokenRequest { endpoint, form })
    }

    /// User profile request authorized with `access_token`.
    pub fn user_info_request(&self, access_token: &str) -> OAuthResult<UserInfoRequest> {
        let endpoint = self.require_uri(ProviderField::UserInfoPath)?;

        Ok(UserInfoRequest {
            endpoint,
            authorization: format!("Bearer {}", access_token),
        })
    }
}
