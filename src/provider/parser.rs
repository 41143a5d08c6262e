//! Parsing of identity provider configuration documents.
//!
//! One file holds one JSON document describing one provider. A document that
//! carries nothing (blank file, `null`, `{}`) yields `None` rather than an
//! error so the caller can skip it quietly.

use super::record::IdentityProvider;
use crate::error::{IdpMgtError, IdpMgtResult};
use serde_json::Value;
use std::path::Path;

/// Turns configuration documents into [`IdentityProvider`] records.
pub struct ProviderRecordParser;

impl ProviderRecordParser {
    /// Read a whole file and parse it.
    ///
    /// The file handle is opened, drained and closed inside the read call,
    /// before parsing starts.
    pub async fn load_from_file<P: AsRef<Path>>(
        path: P,
    ) -> IdpMgtResult<Option<IdentityProvider>> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| IdpMgtError::io(path, e))?;
        Self::parse_str(&content)
    }

    /// Parse a JSON document.
    pub fn parse_str(content: &str) -> IdpMgtResult<Option<IdentityProvider>> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        let document: Value = serde_json::from_str(content)?;
        Self::parse_value(document)
    }

    /// Parse an already decoded document.
    pub fn parse_value(document: Value) -> IdpMgtResult<Option<IdentityProvider>> {
        match &document {
            Value::Null => return Ok(None),
            Value::Object(map) if map.is_empty() => return Ok(None),
            Value::Object(_) => {}
            other => {
                return Err(IdpMgtError::invalid_record(format!(
                    "expected a JSON object, found {}",
                    value_type(other)
                )));
            }
        }

        let idp: IdentityProvider = serde_json::from_value(document)?;
        if idp.name.trim().is_empty() {
            return Err(IdpMgtError::invalid_record(
                "identityProviderName cannot be empty",
            ));
        }

        Ok(Some(idp))
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
