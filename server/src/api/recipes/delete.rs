use crate::api::{store_error_response, ErrorResponse};
use crate::store::parse_recipe_id;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cookbook_core::DeleteResponse;

const FAILURE_MESSAGE: &str = "Failed to delete recipe";

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted successfully", body = DeleteResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_recipe_id(&id) {
        Ok(id) => id,
        Err(e) => return store_error_response(e, FAILURE_MESSAGE),
    };

    match store.delete(id).await {
        Ok(()) => {
            tracing::info!(recipe_id = %id, "deleted recipe");
            (StatusCode::OK, Json(DeleteResponse { success: true })).into_response()
        }
        Err(e) => store_error_response(e, FAILURE_MESSAGE),
    }
}
