use crate::api::{store_error_response, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cookbook_core::Recipe;

const FAILURE_MESSAGE: &str = "Failed to fetch recipes";

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes, newest first", body = [Recipe]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(store): State<AppState>) -> impl IntoResponse {
    match store.list().await {
        Ok(recipes) => (StatusCode::OK, Json(recipes)).into_response(),
        Err(e) => store_error_response(e, FAILURE_MESSAGE),
    }
}
