use crate::api::{store_error_response, ErrorResponse};
use crate::store::parse_recipe_id;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cookbook_core::Recipe;

const FAILURE_MESSAGE: &str = "Failed to fetch recipe";

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_recipe(State(store): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let id = match parse_recipe_id(&id) {
        Ok(id) => id,
        Err(e) => return store_error_response(e, FAILURE_MESSAGE),
    };

    match store.get(id).await {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => store_error_response(e, FAILURE_MESSAGE),
    }
}
