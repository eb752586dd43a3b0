use crate::api::{
    rejected_body_response, store_error_response, BodyRejection, ErrorResponse, RecipeBody,
};
use crate::store::parse_recipe_id;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cookbook_core::{Recipe, RecipeRequest};

const FAILURE_MESSAGE: &str = "Failed to update recipe";

/// Replace a recipe's title, ingredients, instructions and image URL.
///
/// This is a whole-object replace: a field left out of the body is stored as
/// empty, never carried over from the previous version.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body(
        content = RecipeRequest,
        description = "JSON or form-encoded recipe fields"
    ),
    responses(
        (status = 200, description = "Recipe updated successfully", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Unreadable body or storage failure", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(store): State<AppState>,
    Path(id): Path<String>,
    payload: Result<RecipeBody, BodyRejection>,
) -> impl IntoResponse {
    let RecipeBody(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected_body_response(rejection, FAILURE_MESSAGE),
    };

    let id = match parse_recipe_id(&id) {
        Ok(id) => id,
        Err(e) => return store_error_response(e, FAILURE_MESSAGE),
    };

    match store.update(id, request.into_fields()).await {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => store_error_response(e, FAILURE_MESSAGE),
    }
}
