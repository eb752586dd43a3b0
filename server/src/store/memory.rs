use super::{RecipeStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use cookbook_core::{Recipe, RecipeFields};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-process store used by tests and `STORE=memory` runs. Nothing survives a
/// restart.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    recipes: HashMap<Uuid, Entry>,
    next_seq: u64,
}

/// `seq` breaks ties between recipes created within the same clock tick.
#[derive(Debug)]
struct Entry {
    seq: u64,
    recipe: Recipe,
}

impl Inner {
    fn insert(&mut self, recipe: Recipe) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.recipes.insert(recipe.id, Entry { seq, recipe });
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Failed("Memory store lock poisoned".to_string())
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding already-complete records (ids and timestamps
    /// are kept as given).
    #[cfg(test)]
    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut inner = Inner::default();
        for recipe in recipes {
            inner.insert(recipe);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn create(&self, fields: RecipeFields) -> Result<Recipe, StoreError> {
        let recipe = Recipe::new(Uuid::new_v4(), fields, Utc::now());
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.insert(recipe.clone());
        Ok(recipe)
    }

    async fn get(&self, id: Uuid) -> Result<Recipe, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        inner
            .recipes
            .get(&id)
            .map(|entry| entry.recipe.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut entries: Vec<&Entry> = inner.recipes.values().collect();
        entries.sort_by(|a, b| {
            b.recipe
                .created_at
                .cmp(&a.recipe.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(entries.into_iter().map(|e| e.recipe.clone()).collect())
    }

    async fn update(&self, id: Uuid, fields: RecipeFields) -> Result<Recipe, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let entry = inner.recipes.get_mut(&id).ok_or(StoreError::NotFound)?;
        entry.recipe.replace_fields(fields);
        Ok(entry.recipe.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner
            .recipes
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
