//! OAuth provider configuration error types.

use crate::validation::ProviderField;
use thiserror::Error;

pub type OAuthResult<T> = Result<T, OAuthConfigError>;

#[derive(Debug, Error)]
pub enum OAuthConfigError {
    #[error("Missing required fields: {}", join_fields(.fields))]
    MissingFields { fields: Vec<ProviderField> },

    #[error("Malformed URI in {field}: {value} ({reason})")]
    MalformedUri {
        field: ProviderField,
        value: String,
        reason: String,
    },

    #[error("Provider '{name}': {source}")]
    Provider {
        name: String,
        #[source]
        source: Box<OAuthConfigError>,
    },

    #[error("Configuration load failed: {0}")]
    Load(#[from] config::ConfigError),
}

impl OAuthConfigError {
    pub(crate) fn for_provider(name: impl Into<String>, source: OAuthConfigError) -> Self {
        Self::Provider {
            name: name.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn missing(field: ProviderField) -> Self {
        Self::MissingFields {
            fields: vec![field],
        }
    }
}

fn join_fields(fields: &[ProviderField]) -> String {
    fields
        .iter()
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}
