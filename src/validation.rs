//! Request shape checks and the accumulated validation state returned on failure.

use crate::error::AppError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Model-level errors are recorded under the empty key.
pub const MODEL_KEY: &str = "";

/// Field (or model) key to error messages. Serialized as a plain JSON object,
/// e.g. `{"": ["Category already exists"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationState(BTreeMap<String, Vec<String>>);

impl ValidationState {
    pub fn new() -> Self {
        ValidationState(BTreeMap::new())
    }

    /// State holding a single model-level error.
    pub fn with_error(message: impl Into<String>) -> Self {
        let mut state = Self::new();
        state.add_error(MODEL_KEY, message);
        state
    }

    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self, key: &str) -> &[String] {
        self.0.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().flatten().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Null, absent or unreadable bodies are rejected before any repository call.
pub fn require_body<T>(body: Option<T>) -> Result<T, AppError> {
    body.ok_or_else(|| AppError::bad_request("A non-empty request body is required."))
}

pub fn require_matching_id(path_id: i32, body_id: i32) -> Result<(), AppError> {
    if path_id != body_id {
        return Err(AppError::bad_request(format!(
            "id in path ({}) does not match id in body ({})",
            path_id, body_id
        )));
    }
    Ok(())
}

/// Comparison key for unique names: surrounding whitespace dropped, case folded.
/// Mirrors the `upper(btrim(name))` unique index.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Linear scan of existing names against a candidate.
pub fn name_taken<'a>(mut existing: impl Iterator<Item = &'a str>, candidate: &str) -> bool {
    let candidate = normalize_name(candidate);
    existing.any(|name| normalize_name(name) == candidate)
}
