//! Recipe persistence.
//!
//! Handlers only see the [`RecipeStore`] trait, so the PostgreSQL backend can
//! be swapped for the in-memory one in tests and local runs.

mod memory;
mod postgres;

pub use memory::MemoryRecipeStore;
pub use postgres::PgRecipeStore;

use async_trait::async_trait;
use cookbook_core::{Recipe, RecipeFields};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The two outcomes a store call can fail with.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Recipe not found")]
    NotFound,

    #[error("Storage operation failed: {0}")]
    Failed(String),
}

/// Create/read/update/delete over recipe records.
///
/// Each call is atomic on its own. There is no cross-call transaction and no
/// conflict detection; concurrent updates to one recipe are last-write-wins.
#[async_trait]
pub trait RecipeStore: Send + Sync + fmt::Debug {
    /// Assign an id and creation time, persist, and return the full record.
    async fn create(&self, fields: RecipeFields) -> Result<Recipe, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Recipe, StoreError>;

    /// All recipes, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Recipe>, StoreError>;

    /// Replace every mutable field. `id` and `created_at` never change.
    async fn update(&self, id: Uuid, fields: RecipeFields) -> Result<Recipe, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Backend name for logs ("postgres", "memory").
    fn backend_name(&self) -> &'static str;
}

/// Parse a path segment into a recipe id. Anything that is not a UUID can
/// never name a recipe, so it is reported as not found.
pub fn parse_recipe_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::NotFound)
}
