pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::{get, MethodRouter};
use axum::Router;
use cookbook_core::{DeleteResponse, IngredientsInput, Recipe, RecipeRequest};
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", collection())
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

/// List and create, shared by `/api/recipes` and `/api/recipes/`.
pub fn collection() -> MethodRouter<AppState> {
    get(list::list_recipes).post(create::create_recipe)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(Recipe, RecipeRequest, IngredientsInput, DeleteResponse))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryRecipeStore, RecipeStore, StoreError};
    use crate::test_util::{read_json, send, send_raw};
    use async_trait::async_trait;
    use axum::http::{Method, StatusCode};
    use cookbook_core::RecipeFields;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use uuid::Uuid;

    fn app_with(store: Arc<MemoryRecipeStore>) -> Router {
        let state: AppState = store;
        Router::new().nest("/api/recipes", router()).with_state(state)
    }

    fn app() -> (Router, Arc<MemoryRecipeStore>) {
        let store = Arc::new(MemoryRecipeStore::new());
        (app_with(store.clone()), store)
    }

    async fn create(app: &Router, body: Value) -> Value {
        let response = send(app.clone(), Method::POST, "/api/recipes", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await
    }

    #[tokio::test]
    async fn test_create_normalizes_text_ingredients() {
        let (app, _) = app();

        let body = create(
            &app,
            json!({ "title": "T", "ingredients": "one\ntwo\n", "instructions": "I" }),
        )
        .await;

        assert_eq!(body["title"], "T");
        assert_eq!(body["ingredients"], json!(["one", "two"]));
        assert_eq!(body["instructions"], "I");
        assert_eq!(body["imageURL"], "");
        assert!(Uuid::parse_str(body["_id"].as_str().unwrap()).is_ok());
        assert!(!body["createdAt"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_keeps_array_ingredients_verbatim() {
        let (app, _) = app();

        let body = create(&app, json!({ "title": "T", "ingredients": ["a", " b "] })).await;

        assert_eq!(body["ingredients"], json!(["a", " b "]));
    }

    #[tokio::test]
    async fn test_create_with_empty_body_stores_defaults() {
        let (app, store) = app();

        let body = create(&app, json!({})).await;

        assert_eq!(body["title"], "");
        assert_eq!(body["ingredients"], json!([]));
        assert_eq!(body["instructions"], "");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (app, _) = app();
        let created = create(
            &app,
            json!({
                "title": "Pancakes",
                "ingredients": ["flour", "milk"],
                "instructions": "Whisk and fry.",
                "imageURL": "https://example.com/p.jpg",
            }),
        )
        .await;

        let uri = format!("/api/recipes/{}", created["_id"].as_str().unwrap());
        let response = send(app, Method::GET, &uri, None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, created);
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let (app, _) = app();
        let uri = format!("/api/recipes/{}", Uuid::new_v4());

        let response = send(app, Method::GET, &uri, None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await, json!({ "error": "Recipe not found" }));
    }

    #[tokio::test]
    async fn test_get_malformed_id_is_not_found() {
        let (app, _) = app();

        let response = send(app, Method::GET, "/api/recipes/not-an-id", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await, json!({ "error": "Recipe not found" }));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (app, _) = app();
        for title in ["first", "second", "third"] {
            create(&app, json!({ "title": title })).await;
        }

        let response = send(app, Method::GET, "/api/recipes", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let titles: Vec<String> = read_json(response)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_replaces_omitted_fields_with_empty() {
        let (app, _) = app();
        let created = create(
            &app,
            json!({
                "title": "Old",
                "ingredients": "salt\npepper",
                "instructions": "Old steps",
                "imageURL": "https://example.com/old.jpg",
            }),
        )
        .await;
        let uri = format!("/api/recipes/{}", created["_id"].as_str().unwrap());

        let response = send(
            app.clone(),
            Method::PUT,
            &uri,
            Some(json!({ "title": "New", "ingredients": "sugar\n\n" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let updated = read_json(response).await;
        assert_eq!(updated["_id"], created["_id"]);
        assert_eq!(updated["createdAt"], created["createdAt"]);
        assert_eq!(updated["title"], "New");
        assert_eq!(updated["ingredients"], json!(["sugar"]));
        assert_eq!(updated["instructions"], "");
        assert_eq!(updated["imageURL"], "");

        let fetched = read_json(send(app, Method::GET, &uri, None).await).await;
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_unchanged() {
        let (app, store) = app();
        create(&app, json!({ "title": "Keep me" })).await;
        let before = store.list().await.unwrap();
        let uri = format!("/api/recipes/{}", Uuid::new_v4());

        let response = send(app, Method::PUT, &uri, Some(json!({ "title": "X" }))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await, json!({ "error": "Recipe not found" }));
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (app, _) = app();
        let created = create(&app, json!({ "title": "Gone soon" })).await;
        let uri = format!("/api/recipes/{}", created["_id"].as_str().unwrap());

        let first = send(app.clone(), Method::DELETE, &uri, None).await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(read_json(first).await, json!({ "success": true }));

        let second = send(app.clone(), Method::DELETE, &uri, None).await;
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(second).await, json!({ "error": "Recipe not found" }));

        let get = send(app, Method::GET, &uri, None).await;
        assert_eq!(get.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_body_is_operation_failure() {
        let (app, store) = app();

        let response = send_raw(
            app.clone(),
            Method::POST,
            "/api/recipes",
            "application/json",
            "{not json",
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Failed to create recipe" })
        );
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_accepts_loosely_typed_fields() {
        let (app, store) = app();

        let body = create(
            &app,
            json!({
                "title": 5,
                "ingredients": ["a", 1],
                "instructions": ["not", "a", "string"],
                "imageURL": false,
            }),
        )
        .await;

        assert_eq!(body["title"], "5");
        assert_eq!(body["ingredients"], json!(["a", "1"]));
        assert_eq!(body["instructions"], "");
        assert_eq!(body["imageURL"], "false");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_from_form_body() {
        let (app, _) = app();

        let response = send_raw(
            app,
            Method::POST,
            "/api/recipes",
            "application/x-www-form-urlencoded",
            "title=Form+Soup&ingredients=water%0A+salt+%0A%0A&instructions=Stir&imageURL=http%3A%2F%2Fimg",
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["title"], "Form Soup");
        assert_eq!(body["ingredients"], json!(["water", "salt"]));
        assert_eq!(body["instructions"], "Stir");
        assert_eq!(body["imageURL"], "http://img");
    }

    #[tokio::test]
    async fn test_update_from_form_body_replaces_fields() {
        let (app, _) = app();
        let created = create(
            &app,
            json!({ "title": "Old", "ingredients": ["x"], "instructions": "old" }),
        )
        .await;
        let uri = format!("/api/recipes/{}", created["_id"].as_str().unwrap());

        let response = send_raw(
            app,
            Method::PUT,
            &uri,
            "application/x-www-form-urlencoded; charset=UTF-8",
            "title=New&ingredients=sugar%0Aeggs",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let updated = read_json(response).await;
        assert_eq!(updated["_id"], created["_id"]);
        assert_eq!(updated["title"], "New");
        assert_eq!(updated["ingredients"], json!(["sugar", "eggs"]));
        assert_eq!(updated["instructions"], "");
    }

    #[tokio::test]
    async fn test_update_with_wrong_content_type_is_operation_failure() {
        let (app, store) = app();
        let created = create(&app, json!({ "title": "Stay" })).await;
        let uri = format!("/api/recipes/{}", created["_id"].as_str().unwrap());

        let response = send_raw(app, Method::PUT, &uri, "text/plain", "title=Changed").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Failed to update recipe" })
        );
        assert_eq!(store.list().await.unwrap()[0].title, "Stay");
    }

    /// Store whose every call fails, for checking the 500 messages.
    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl RecipeStore for BrokenStore {
        async fn create(&self, _fields: RecipeFields) -> Result<Recipe, StoreError> {
            Err(StoreError::Failed("disk full".to_string()))
        }

        async fn get(&self, _id: Uuid) -> Result<Recipe, StoreError> {
            Err(StoreError::Failed("disk full".to_string()))
        }

        async fn list(&self) -> Result<Vec<Recipe>, StoreError> {
            Err(StoreError::Failed("disk full".to_string()))
        }

        async fn update(&self, _id: Uuid, _fields: RecipeFields) -> Result<Recipe, StoreError> {
            Err(StoreError::Failed("disk full".to_string()))
        }

        async fn delete(&self, _id: Uuid) -> Result<(), StoreError> {
            Err(StoreError::Failed("disk full".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_storage_failures_use_fixed_messages() {
        let state: AppState = Arc::new(BrokenStore);
        let app = Router::new().nest("/api/recipes", router()).with_state(state);
        let item = format!("/api/recipes/{}", Uuid::new_v4());

        let cases = [
            (Method::GET, "/api/recipes".to_string(), None, "Failed to fetch recipes"),
            (Method::GET, item.clone(), None, "Failed to fetch recipe"),
            (
                Method::POST,
                "/api/recipes".to_string(),
                Some(json!({ "title": "T" })),
                "Failed to create recipe",
            ),
            (
                Method::PUT,
                item.clone(),
                Some(json!({ "title": "T" })),
                "Failed to update recipe",
            ),
            (Method::DELETE, item, None, "Failed to delete recipe"),
        ];

        for (method, uri, body, message) in cases {
            let response = send(app.clone(), method.clone(), &uri, body).await;
            assert_eq!(
                response.status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "{method} {uri}"
            );
            assert_eq!(read_json(response).await, json!({ "error": message }));
        }
    }
}
