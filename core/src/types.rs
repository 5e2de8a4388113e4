//! Domain DTOs for the CacheFly v2.5 API.
//!
//! # Design
//! Option values are a tagged union rather than a raw `serde_json::Value` so
//! callers match on `Bool`, `Number` or `String`. `Other` keeps any nested
//! value the server reports so a read-then-write round-trips unchanged.
//! `ServiceOptions` is a `BTreeMap`, which fixes iteration (and therefore
//! validation error) order to ascending option name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Value of a single service option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Other(serde_json::Value),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value.into())
    }
}

/// Fails for NaN and infinities, which have no JSON form.
impl TryFrom<f64> for OptionValue {
    type Error = ApiError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        serde_json::Number::from_f64(value)
            .map(OptionValue::Number)
            .ok_or_else(|| ApiError::SerializationError(format!("{value} is not a JSON number")))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

/// Option name to value, as read from or written to `/services/{id}/options`.
pub type ServiceOptions = BTreeMap<String, OptionValue>;

/// Response of `GET /services/{id}/options/metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsMetadata {
    pub meta: MetadataMeta,
    #[serde(default)]
    pub data: Vec<OptionMetadata>,
}

impl OptionsMetadata {
    /// Names of every option the service accepts. Unnamed entries are skipped.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.data
            .iter()
            .map(|entry| entry.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataMeta {
    pub count: u64,
}

/// Server-declared schema of one option.
///
/// Only `name` takes part in validation; every field decodes to its default
/// when the server leaves it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionMetadata {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<OptionProperty>,
}

impl OptionMetadata {
    /// Value type tag such as `"boolean"`.
    pub fn declared_type(&self) -> &str {
        self.property
            .as_ref()
            .map(|p| p.kind.as_str())
            .unwrap_or(self.kind.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response of the legacy API key endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyApiKey {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// A CacheFly account as reported by `/accounts/...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "twofaEnabled", default)]
    pub twofa_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
