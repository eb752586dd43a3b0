use chrono::{DateTime, Utc};
use cookbook_core::{Recipe, RecipeFields};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<Option<String>>,
    pub instructions: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            title: row.title,
            ingredients: row.ingredients.into_iter().flatten().collect(),
            instructions: row.instructions,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// Insert values for a new recipe. `created_at` is passed explicitly so the
/// row and the returned record agree with the application clock.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub ingredients: &'a [Option<String>],
    pub instructions: &'a str,
    pub image_url: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Whole-object replace of the mutable columns.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges<'a> {
    pub title: &'a str,
    pub ingredients: &'a [Option<String>],
    pub instructions: &'a str,
    pub image_url: &'a str,
}

/// The array column allows NULL elements; the domain type does not.
pub fn ingredient_column(fields: &RecipeFields) -> Vec<Option<String>> {
    fields.ingredients.iter().cloned().map(Some).collect()
}
