//! Scope list binding and joining.

use crate::provider::ProviderConfig;
use serde::{Deserialize, Deserializer};

/// Separator used when scopes are sent to a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeDelimiter {
    /// RFC 6749 form, used by most providers.
    #[default]
    Space,
    Comma,
}

impl ScopeDelimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeDelimiter::Space => " ",
            ScopeDelimiter::Comma => ",",
        }
    }
}

impl ProviderConfig {
    /// Joins the configured scopes, preserving their order.
    pub fn joined_scopes(&self, delimiter: ScopeDelimiter) -> String {
        self.scopes().join(delimiter.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScopesRepr {
    List(Vec<String>),
    Joined(String),
}

/// Accepts a sequence of strings or a single comma/whitespace separated
/// string (environment sources only produce strings). `null` yields an empty
/// list.
pub(crate) fn deserialize_scopes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let scopes = match Option::<ScopesRepr>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(ScopesRepr::List(scopes)) => scopes,
        Some(ScopesRepr::Joined(joined)) => split_scopes(&joined),
    };
    Ok(scopes)
}

pub(crate) fn split_scopes(joined: &str) -> Vec<String> {
    joined
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|scope| !scope.is_empty())
        .map(str::to_string)
        .collect()
}
