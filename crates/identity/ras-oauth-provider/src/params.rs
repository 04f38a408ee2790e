//! Binding for `extra-params`.
//!
//! Layered configuration sources lowercase map keys, while OAuth2 query
//! parameter names are case-sensitive. Parameter names are therefore carried
//! as values: a list of `{ name, value }` entries or `name=value` strings, or
//! one comma separated string of `name=value` pairs (for environment
//! variables).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(untagged)]
enum ParamRepr {
    Entry { name: String, value: String },
    Pair(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ParamsRepr {
    List(Vec<ParamRepr>),
    Joined(String),
}

#[derive(Serialize)]
struct ParamEntry<'a> {
    name: &'a str,
    value: &'a str,
}

fn parse_pair(pair: &str) -> Option<(String, String)> {
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// Later entries win when a name repeats.
pub(crate) fn deserialize_extra_params<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let invalid = |pair: &str| D::Error::custom(format!("expected name=value, got '{}'", pair));

    let mut params = BTreeMap::new();
    match Option::<ParamsRepr>::deserialize(deserializer)? {
        None => {}
        Some(ParamsRepr::List(entries)) => {
            for entry in entries {
                let (name, value) = match entry {
                    ParamRepr::Entry { name, value } => (name, value),
                    ParamRepr::Pair(pair) => parse_pair(&pair).ok_or_else(|| invalid(&pair))?,
                };
                params.insert(name, value);
            }
        }
        Some(ParamsRepr::Joined(joined)) => {
            for pair in joined.split(',').filter(|pair| !pair.trim().is_empty()) {
                let (name, value) = parse_pair(pair).ok_or_else(|| invalid(pair))?;
                params.insert(name, value);
            }
        }
    }
    Ok(params)
}

pub(crate) fn serialize_extra_params<S>(
    params: &BTreeMap<String, String>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(
        params
            .iter()
            .map(|(name, value)| ParamEntry { name, value }),
    )
}
