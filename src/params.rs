//! Build parameter normalization.
//!
//! The CI payload is loosely typed: values may be missing, blank, the literal
//! `false`, or not strings at all. All of those collapse to "unset" (`None`)
//! before required fields are checked and defaults are applied.
use crate::config::BuildDefaults;
use serde_json::{Map, Value};

/// Recognized payload keys, in output order.
pub const FIELD_KEYS: [&str; 5] = ["filename", "platforms", "repo", "tag", "variants"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// A required field was unset after normalization.
    MissingField(&'static str),
    /// The payload was not a JSON object.
    InvalidInput(String),
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsError::MissingField(field) => write!(f, "{field} not defined"),
            ParamsError::InvalidInput(reason) => write!(f, "invalid payload: {reason}"),
        }
    }
}

impl std::error::Error for ParamsError {}

/// Parse the raw payload argument into a JSON object.
pub fn parse_payload(raw: &str) -> Result<Map<String, Value>, ParamsError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| ParamsError::InvalidInput(format!("not valid JSON ({err})")))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ParamsError::InvalidInput(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Normalize one payload value: trimmed string, or `None` when the value is
/// missing, not a string, blank, or `false` in any case.
pub fn normalize_value(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    let folded = text.to_lowercase();
    if folded.is_empty() || folded == "false" {
        return None;
    }
    Some(text.to_string())
}

/// The five recognized fields after normalization, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFields {
    pub filename: Option<String>,
    pub platforms: Option<String>,
    pub repo: Option<String>,
    pub tag: Option<String>,
    pub variants: Option<String>,
}

impl NormalizedFields {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        for key in payload.keys() {
            if !FIELD_KEYS.contains(&key.as_str()) {
                tracing::debug!(key = %key, "ignoring unrecognized payload key");
            }
        }
        let fields = Self {
            filename: normalize_value(payload.get("filename")),
            platforms: normalize_value(payload.get("platforms")),
            repo: normalize_value(payload.get("repo")),
            tag: normalize_value(payload.get("tag")),
            variants: normalize_value(payload.get("variants")),
        };
        for (key, value) in FIELD_KEYS.iter().zip(fields.values()) {
            if value.is_none() {
                tracing::debug!(field = *key, "field unset after normalization");
            }
        }
        fields
    }

    fn values(&self) -> [&Option<String>; 5] {
        [
            &self.filename,
            &self.platforms,
            &self.repo,
            &self.tag,
            &self.variants,
        ]
    }
}

/// Validated build parameters with defaults applied.
///
/// `variants` stays `None` when the payload did not supply it so the emitted
/// line reads `variants=undefined`; use [`ArgBundle::variants_or`] for tag
/// derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgBundle {
    pub filename: String,
    pub platforms: String,
    pub repo: String,
    pub tag: String,
    pub variants: Option<String>,
}

impl ArgBundle {
    /// Check required fields, then fill optional ones from `defaults`.
    pub fn resolve(
        fields: NormalizedFields,
        defaults: &BuildDefaults,
    ) -> Result<Self, ParamsError> {
        let filename = fields
            .filename
            .ok_or(ParamsError::MissingField("filename"))?;
        let tag = fields.tag.ok_or(ParamsError::MissingField("tag"))?;
        let platforms = fields.platforms.unwrap_or_else(|| {
            tracing::debug!(value = %defaults.platforms, "applying default platforms");
            defaults.platforms.clone()
        });
        let repo = fields.repo.unwrap_or_else(|| {
            tracing::debug!(value = %defaults.repo, "applying default repo");
            defaults.repo.clone()
        });
        Ok(Self {
            filename,
            platforms,
            repo,
            tag,
            variants: fields.variants,
        })
    }

    /// Parse, normalize, and resolve a raw payload argument.
    pub fn from_payload_str(raw: &str, defaults: &BuildDefaults) -> Result<Self, ParamsError> {
        let payload = parse_payload(raw)?;
        Self::resolve(NormalizedFields::from_payload(&payload), defaults)
    }

    pub fn variants_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.variants.as_deref().unwrap_or(default)
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
