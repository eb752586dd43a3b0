//! HTML pages and static assets for the browser client.
//!
//! The pages themselves are deployment assets living in `VIEWS_DIR`; this
//! module only maps fixed paths onto them.

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get_service;
use axum::Router;
use std::path::{Path, PathBuf};
use tower_http::services::{ServeDir, ServeFile};

/// Route path -> file name inside the views directory.
pub const PAGES: &[(&str, &str)] = &[
    ("/", "index.html"),
    ("/view", "view.html"),
    ("/add", "add.html"),
    ("/edit", "edit.html"),
    ("/about", "about.html"),
    ("/contact", "contact.html"),
    ("/feedback", "feedback.html"),
];

pub const NOT_FOUND_PAGE: &str = "404.html";

/// Page routes, `/public` assets, and the 404 fallback for everything the
/// other routers do not match.
pub fn router(views_dir: &Path, public_dir: &Path) -> Router<AppState> {
    let mut router = Router::new();
    for (path, file) in PAGES {
        router = router.route(path, get_service(ServeFile::new(views_dir.join(file))));
    }

    let not_found_path = views_dir.join(NOT_FOUND_PAGE);
    router
        .route_layer(middleware::map_response_with_state(
            not_found_path.clone(),
            missing_page_fallback,
        ))
        .nest_service("/public", ServeDir::new(public_dir))
        .fallback(move || not_found_page(not_found_path.clone()))
}

/// A page route whose file is missing answers like any unknown route.
async fn missing_page_fallback(
    State(not_found_path): State<PathBuf>,
    response: Response,
) -> Response {
    if response.status() == StatusCode::NOT_FOUND {
        not_found_page(not_found_path).await
    } else {
        response
    }
}

async fn not_found_page(path: PathBuf) -> Response {
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        Err(e) => {
            tracing::debug!("Could not read {}: {}", path.display(), e);
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}
