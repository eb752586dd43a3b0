pub mod recipes;

use crate::store::StoreError;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use cookbook_core::RecipeRequest;
use thiserror::Error;
use utoipa::OpenApi;

pub use cookbook_core::ErrorResponse;

/// Message returned for every not-found outcome.
pub const NOT_FOUND_MESSAGE: &str = "Recipe not found";

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// Map a store failure onto the two-tier HTTP error model.
///
/// Not-found becomes 404. Everything else becomes a 500 carrying the
/// operation's fixed message; the detail only goes to the log.
pub fn store_error_response(err: StoreError, failure_message: &'static str) -> Response {
    match err {
        StoreError::NotFound => error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        StoreError::Failed(detail) => {
            tracing::error!("{}: {}", failure_message, detail);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, failure_message)
        }
    }
}

/// Recipe request body, read as a form when the content type says so and as
/// JSON otherwise.
#[derive(Debug)]
pub struct RecipeBody(pub RecipeRequest);

#[derive(Debug, Error)]
pub enum BodyRejection {
    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    Form(#[from] FormRejection),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        tracing::error!("Unreadable request body: {}", self);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read request body")
    }
}

impl<S> FromRequest<S> for RecipeBody
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            let Form(request) = Form::<RecipeRequest>::from_request(req, state).await?;
            Ok(Self(request))
        } else {
            let Json(request) = Json::<RecipeRequest>::from_request(req, state).await?;
            Ok(Self(request))
        }
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

/// A body that could not be read as a recipe is an operation failure, not a
/// client error.
pub fn rejected_body_response(rejection: BodyRejection, failure_message: &'static str) -> Response {
    tracing::error!("{}: {}", failure_message, rejection);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, failure_message)
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Cookbook", description = "Recipe catalog API"),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();
    spec.merge(recipes::ApiDoc::openapi());
    spec
}
