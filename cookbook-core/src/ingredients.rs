//! Ingredient input normalization.
//!
//! Clients send ingredients either as an already-split JSON array or as a
//! single newline-delimited block from a textarea. Both shapes end up as an
//! ordered `Vec<String>` on the stored recipe.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw ingredients value as it arrives in a request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum IngredientsInput {
    /// A JSON array. Each element is one ingredient, kept verbatim.
    Lines(Vec<Value>),
    /// A newline-delimited text block.
    Text(String),
    /// Anything else (null, numbers, objects).
    Other(Value),
}

impl Default for IngredientsInput {
    fn default() -> Self {
        Self::Other(Value::Null)
    }
}

impl IngredientsInput {
    /// Convert the raw input into the stored ingredient list.
    ///
    /// Arrays are trusted as-is (no trimming, no filtering); number and bool
    /// elements are written out as text. Text is split on `\n`, trimmed, and
    /// blank lines are dropped. Every other shape yields an empty list.
    pub fn normalize(self) -> Vec<String> {
        match self {
            Self::Lines(lines) => lines.into_iter().map(scalar_text).collect(),
            Self::Text(text) => split_ingredient_lines(&text),
            Self::Other(_) => Vec::new(),
        }
    }
}

impl From<Vec<String>> for IngredientsInput {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines.into_iter().map(Value::String).collect())
    }
}

impl From<&str> for IngredientsInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Text form of a loosely typed JSON scalar.
///
/// Strings pass through, numbers and bools are printed, and null, arrays or
/// objects become `""`.
pub fn scalar_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Split a textarea block into ingredient lines, dropping blank ones.
pub fn split_ingredient_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
