use super::{RecipeStore, StoreError};
use crate::db::DbPool;
use crate::models::{ingredient_column, NewRecipe, RecipeChanges, RecipeRow};
use crate::schema::recipes;
use async_trait::async_trait;
use chrono::Utc;
use cookbook_core::{Recipe, RecipeFields};
use diesel::prelude::*;
use diesel::r2d2::PoolError;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::NotFound => StoreError::NotFound,
            other => StoreError::Failed(other.to_string()),
        }
    }
}

impl From<PoolError> for StoreError {
    fn from(err: PoolError) -> Self {
        StoreError::Failed(format!("Database connection failed: {err}"))
    }
}

/// PostgreSQL-backed store. Diesel is synchronous, so each call checks out a
/// pooled connection on the blocking thread pool.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: Arc<DbPool>,
}

impl fmt::Debug for PgRecipeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRecipeStore")
            .field("pool", &self.pool.state())
            .finish()
    }
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Run one query inside a `db.query` span.
    ///
    /// The span is created on the request task so the per-request query
    /// counter sees it.
    async fn run<T, F>(&self, operation: &'static str, query: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        let span = tracing::info_span!("db.query", db.operation = operation);

        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            let mut conn = pool.get()?;
            query(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Failed(format!("Query task for {operation} failed: {e}")))?
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn create(&self, fields: RecipeFields) -> Result<Recipe, StoreError> {
        self.run("insert", move |conn| {
            let ingredients = ingredient_column(&fields);
            let row: RecipeRow = diesel::insert_into(recipes::table)
                .values(&NewRecipe {
                    id: Uuid::new_v4(),
                    title: &fields.title,
                    ingredients: &ingredients,
                    instructions: &fields.instructions,
                    image_url: &fields.image_url,
                    created_at: Utc::now(),
                })
                .returning(RecipeRow::as_returning())
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn get(&self, id: Uuid) -> Result<Recipe, StoreError> {
        self.run("select", move |conn| {
            let row: RecipeRow = recipes::table
                .find(id)
                .select(RecipeRow::as_select())
                .first(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        self.run("select", |conn| {
            let rows: Vec<RecipeRow> = recipes::table
                .order((recipes::created_at.desc(), recipes::id.desc()))
                .select(RecipeRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Recipe::from).collect())
        })
        .await
    }

    async fn update(&self, id: Uuid, fields: RecipeFields) -> Result<Recipe, StoreError> {
        self.run("update", move |conn| {
            let ingredients = ingredient_column(&fields);
            let row: RecipeRow = diesel::update(recipes::table.find(id))
                .set(&RecipeChanges {
                    title: &fields.title,
                    ingredients: &ingredients,
                    instructions: &fields.instructions,
                    image_url: &fields.image_url,
                })
                .returning(RecipeRow::as_returning())
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.run("delete", move |conn| {
            let deleted = diesel::delete(recipes::table.find(id)).execute(conn)?;
            if deleted == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
