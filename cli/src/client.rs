//! Thin HTTP client for the recipe API.

use cookbook_core::{DeleteResponse, ErrorResponse, Recipe, RecipeRequest};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(server: &str) -> Self {
        Self {
            base_url: server.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn recipes_url(&self) -> String {
        format!("{}/api/recipes", self.base_url)
    }

    pub fn recipe_url(&self, id: Uuid) -> String {
        format!("{}/api/recipes/{}", self.base_url, id)
    }

    pub async fn list(&self) -> Result<Vec<Recipe>, ClientError> {
        self.send(Method::GET, self.recipes_url(), None::<&()>).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Recipe, ClientError> {
        self.send(Method::GET, self.recipe_url(id), None::<&()>).await
    }

    pub async fn create(&self, request: &RecipeRequest) -> Result<Recipe, ClientError> {
        self.send(Method::POST, self.recipes_url(), Some(request))
            .await
    }

    pub async fn update(&self, id: Uuid, request: &RecipeRequest) -> Result<Recipe, ClientError> {
        self.send(Method::PUT, self.recipe_url(id), Some(request))
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResponse, ClientError> {
        self.send(Method::DELETE, self.recipe_url(id), None::<&()>)
            .await
    }

    async fn send<T, B>(&self, method: Method, url: String, body: Option<&B>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        Err(ClientError::Api { status, message })
    }
}
