//! OAuth2 provider configuration record.

use crate::params::{deserialize_extra_params, serialize_extra_params};
use crate::scopes::deserialize_scopes;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Static configuration needed to drive an authorization-code flow against
/// one OAuth2 provider.
///
/// Bound from `oauth.providers.<name>`; the provider name is the key of that
/// map and is not stored here. Every string field is optional at binding time
/// so that `None` ("not configured") stays distinct from `Some("")`
/// ("configured as empty").
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfig {
    /// Opaque identifier issued by the provider.
    #[serde(default, alias = "client_id")]
    #[builder(into)]
    client_id: Option<String>,

    /// Never serialized and never printed by `Debug`.
    #[serde(default, alias = "client_secret", skip_serializing)]
    #[builder(into)]
    client_secret: Option<String>,

    /// Must match the URI registered with the provider, path and query included.
    #[serde(default, alias = "redirect_uri")]
    #[builder(into)]
    redirect_uri: Option<String>,

    /// Token endpoint.
    #[serde(default, alias = "token_path")]
    #[builder(into)]
    token_path: Option<String>,

    /// Authorization (consent) endpoint.
    #[serde(default, alias = "code_path")]
    #[builder(into)]
    code_path: Option<String>,

    /// User-info endpoint, queried with a bearer token.
    #[serde(default, alias = "user_info_path")]
    #[builder(into)]
    user_info_path: Option<String>,

    #[serde(default, deserialize_with = "deserialize_scopes")]
    #[builder(default)]
    scopes: Vec<String>,

    /// Appended verbatim to the authorization URL. Bound from a list so
    /// parameter names keep their case.
    #[serde(
        default,
        alias = "extra_params",
        deserialize_with = "deserialize_extra_params",
        serialize_with = "serialize_extra_params"
    )]
    #[builder(default)]
    extra_params: BTreeMap<String, String>,
}

impl ProviderConfig {
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn token_path(&self) -> Option<&str> {
        self.token_path.as_deref()
    }

    pub fn code_path(&self) -> Option<&str> {
        self.code_path.as_deref()
    }

    pub fn user_info_path(&self) -> Option<&str> {
        self.user_info_path.as_deref()
    }

    /// Requested scopes in configured order. Empty when none were configured.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn extra_params(&self) -> &BTreeMap<String, String> {
        &self.extra_params
    }

    /// True when a non-blank secret is configured.
    pub fn has_client_secret(&self) -> bool {
        self.client_secret
            .as_deref()
            .is_some_and(|secret| !secret.trim().is_empty())
    }

    pub fn set_client_id(&mut self, client_id: impl Into<String>) {
        self.client_id = Some(client_id.into());
    }

    pub fn set_client_secret(&mut self, client_secret: impl Into<String>) {
        self.client_secret = Some(client_secret.into());
    }

    pub fn clear_client_secret(&mut self) {
        self.client_secret = None;
    }

    pub fn set_redirect_uri(&mut self, redirect_uri: impl Into<String>) {
        self.redirect_uri = Some(redirect_uri.into());
    }

    pub fn set_token_path(&mut self, token_path: impl Into<String>) {
        self.token_path = Some(token_path.into());
    }

    pub fn set_code_path(&mut self, code_path: impl Into<String>) {
        self.code_path = Some(code_path.into());
    }

    pub fn set_user_info_path(&mut self, user_info_path: impl Into<String>) {
        self.user_info_path = Some(user_info_path.into());
    }

    pub fn set_scopes(&mut self, scopes: Vec<String>) {
        self.scopes = scopes;
    }

    pub fn set_extra_params(&mut self, extra_params: BTreeMap<String, String>) {
        self.extra_params = extra_params;
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("redirect_uri", &self.redirect_uri)
            .field("token_path", &self.token_path)
            .field("code_path", &self.code_path)
            .field("user_info_path", &self.user_info_path)
            .field("scopes", &self.scopes)
            .field("extra_params", &self.extra_params)
            .finish()
    }
}
