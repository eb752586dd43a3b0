use crate::api::{
    rejected_body_response, store_error_response, BodyRejection, ErrorResponse, RecipeBody,
};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cookbook_core::{Recipe, RecipeRequest};

const FAILURE_MESSAGE: &str = "Failed to create recipe";

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body(
        content = RecipeRequest,
        description = "JSON or form-encoded recipe fields"
    ),
    responses(
        (status = 201, description = "Recipe created successfully", body = Recipe),
        (status = 500, description = "Unreadable body or storage failure", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(store): State<AppState>,
    payload: Result<RecipeBody, BodyRejection>,
) -> impl IntoResponse {
    let RecipeBody(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected_body_response(rejection, FAILURE_MESSAGE),
    };

    match store.create(request.into_fields()).await {
        Ok(recipe) => {
            tracing::info!(recipe_id = %recipe.id, "created recipe");
            (StatusCode::CREATED, Json(recipe)).into_response()
        }
        Err(e) => store_error_response(e, FAILURE_MESSAGE),
    }
}
