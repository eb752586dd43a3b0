use crate::ingredients::{scalar_text, IngredientsInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A stored recipe, as returned by every endpoint that yields one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(id: Uuid, fields: RecipeFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            ingredients: fields.ingredients,
            instructions: fields.instructions,
            image_url: fields.image_url,
            created_at,
        }
    }

    /// Overwrite the four mutable fields. `id` and `created_at` are kept.
    pub fn replace_fields(&mut self, fields: RecipeFields) {
        self.title = fields.title;
        self.ingredients = fields.ingredients;
        self.instructions = fields.instructions;
        self.image_url = fields.image_url;
    }
}

/// The mutable part of a recipe, already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image_url: String,
}

/// Request body for create and update.
///
/// Every field is optional on the wire. Missing or null values become empty
/// strings and an empty ingredient list; nothing is merged from a stored
/// recipe. Text fields accept any JSON value: numbers and bools are written
/// out, anything else is stored as `""`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecipeRequest {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(default)]
    pub ingredients: IngredientsInput,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructions: Option<String>,
    #[serde(
        rename = "imageURL",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(scalar_text))
}

impl RecipeRequest {
    pub fn into_fields(self) -> RecipeFields {
        RecipeFields {
            title: self.title.unwrap_or_default(),
            ingredients: self.ingredients.normalize(),
            instructions: self.instructions.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
        }
    }
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteResponse {
    pub success: bool,
}

/// Shared error body used by all endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
