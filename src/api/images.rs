use std::io::ErrorKind;
use std::path::PathBuf;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use super::blocking;
use crate::error::{Error, Result};
use crate::files::content_type_for;
use crate::models::{NearestQuery, RankedRecord, UploadRecord};
use crate::ranking::{by_proximity_raw, by_recency};
use crate::state::AppState;

async fn read_records(state: &AppState) -> Result<Vec<UploadRecord>> {
    let store = state.store.clone();
    blocking(move || store.read_all()).await
}

/// GET /api/getimages - All records in upload order
pub async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<UploadRecord>>> {
    Ok(Json(read_records(&state).await?))
}

/// GET /api/latest - Most recent first
pub async fn latest(State(state): State<AppState>) -> Result<Json<Vec<UploadRecord>>> {
    let records = read_records(&state).await?;
    Ok(Json(by_recency(&records)))
}

/// GET /api/nearest?lat=..&long=.. - Nearest first, with `distance` in km
pub async fn nearest(
    State(state): State<AppState>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<Vec<RankedRecord>>> {
    let records = read_records(&state).await?;
    let ranked = by_proximity_raw(&records, query.lat.as_deref(), query.long.as_deref())?;
    Ok(Json(ranked))
}

/// GET /api/getimage/{image_name} - Raw image bytes
pub async fn get_image(
    State(state): State<AppState>,
    Path(image_name): Path<String>,
) -> Result<impl IntoResponse> {
    let path = state.files.resolve(&image_name)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| read_error(&image_name, path, e))?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&image_name))], bytes))
}

// Only a vanished file is the client's problem.
fn read_error(image_name: &str, path: PathBuf, e: std::io::Error) -> Error {
    match e.kind() {
        ErrorKind::NotFound => Error::NotFound(image_name.to_string()),
        _ => Error::store_read(path, e),
    }
}
