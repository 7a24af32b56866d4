//! Axum HTTP surface over the store, ranking engine and file storage.

pub mod images;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::error::Result;
use crate::state::AppState;

/// Headroom for multipart boundaries and the coordinate fields.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES);
    let uploads = ServeDir::new(state.files.dir());

    Router::new()
        .route("/", get(hello))
        .route("/api/upload", post(upload::upload).layer(body_limit))
        .route("/api/getimages", get(images::list_images))
        .route("/api/latest", get(images::latest))
        .route("/api/nearest", get(images::nearest))
        .route("/api/getimage/{image_name}", get(images::get_image))
        .nest_service("/uploads", uploads)
        // The frontend is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run store or file I/O on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

async fn hello() -> &'static str {
    "Hello, World!"
}
