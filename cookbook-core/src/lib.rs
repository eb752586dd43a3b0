pub mod ingredients;
pub mod types;

pub use ingredients::{split_ingredient_lines, IngredientsInput};
pub use types::{DeleteResponse, ErrorResponse, Recipe, RecipeFields, RecipeRequest};
