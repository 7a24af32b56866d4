use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::Json;

use super::blocking;
use crate::error::{Error, Result};
use crate::models::{Coordinates, UploadRecord, UploadResponse};
use crate::state::AppState;

struct PhotoPart {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /api/upload - Store an image with its coordinates.
///
/// Multipart fields: `photo` (file), `lat`, `long`. Everything is validated
/// before the image is written, and the image is removed again if its
/// metadata cannot be stored.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut photo = None;
    let mut lat = None;
    let mut long = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed("body"))? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "photo" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(malformed("photo"))?;
                photo = Some(PhotoPart {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            "lat" | "latitude" => {
                lat = Some(field.text().await.map_err(malformed("latitude"))?);
            }
            "long" | "lng" | "longitude" => {
                long = Some(field.text().await.map_err(malformed("longitude"))?);
            }
            other => tracing::debug!("Ignoring multipart field '{other}'"),
        }
    }

    let photo = photo.ok_or_else(|| Error::validation("photo", "No file uploaded"))?;
    let coords = Coordinates::parse(lat.as_deref(), long.as_deref())?;

    let files = state.files.clone();
    let stored = blocking(move || {
        files.save(
            &photo.file_name,
            photo.content_type.as_deref(),
            &photo.bytes,
        )
    })
    .await?;

    let files = state.files.clone();
    let store = state.store.clone();
    let metadata = blocking(move || {
        let record = UploadRecord::new(stored.file_name.clone(), coords);
        store.insert(record).inspect_err(|_| files.discard(&stored))
    })
    .await?;

    tracing::info!(
        "Stored {} at ({}, {})",
        metadata.file_name,
        metadata.latitude,
        metadata.longitude
    );

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_path: metadata.file_path.clone(),
        metadata,
    }))
}

fn malformed(field: &'static str) -> impl Fn(MultipartError) -> Error {
    move |e| Error::validation(field, e.body_text())
}
