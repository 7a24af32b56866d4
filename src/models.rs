use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Public URL prefix under which stored images are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Persisted metadata for one uploaded photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub file_name: String,
    pub file_path: String,
    pub upload_date: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

impl UploadRecord {
    /// Build a record stamped with the current instant.
    pub fn new(file_name: impl Into<String>, coords: Coordinates) -> Self {
        Self::with_date(file_name, coords, Utc::now())
    }

    pub fn with_date(
        file_name: impl Into<String>,
        coords: Coordinates,
        upload_date: DateTime<Utc>,
    ) -> Self {
        let file_name = file_name.into();
        Self {
            file_path: public_path(&file_name),
            file_name,
            upload_date,
            latitude: coords.latitude(),
            longitude: coords.longitude(),
        }
    }

    pub fn coordinates(&self) -> Result<Coordinates> {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Checks every field before the record is allowed near the store.
    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(Error::validation("fileName", "is required"));
        }
        if self.file_path != public_path(&self.file_name) {
            return Err(Error::validation(
                "filePath",
                format!("must be {}", public_path(&self.file_name)),
            ));
        }
        self.coordinates()?;
        Ok(())
    }
}

/// `/uploads/<file_name>`
pub fn public_path(file_name: &str) -> String {
    format!("{UPLOADS_PREFIX}/{file_name}")
}

/// A latitude/longitude pair known to be finite and in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_range("latitude", latitude, 90.0)?;
        check_range("longitude", longitude, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse raw form or query text. Missing and blank values are rejected.
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Result<Self> {
        let latitude = parse_component("latitude", latitude)?;
        let longitude = parse_component("longitude", longitude)?;
        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn parse_component(field: &'static str, raw: Option<&str>) -> Result<f64> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(Error::validation(field, "is required"));
    }
    raw.parse::<f64>()
        .map_err(|_| Error::validation(field, format!("'{raw}' is not a number")))
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::validation(field, "must be a finite number"));
    }
    if !(-limit..=limit).contains(&value) {
        return Err(Error::validation(
            field,
            format!("{value} is outside -{limit}..{limit}"),
        ));
    }
    Ok(())
}

/// A record annotated with its distance from a query point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    #[serde(flatten)]
    pub record: UploadRecord,
    /// Great-circle distance in kilometres
    pub distance: f64,
}

/// Upload response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_path: String,
    pub metadata: UploadRecord,
}

/// Query string for `/api/nearest`. Values stay raw so bad input surfaces
/// as an invalid query rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearestQuery {
    pub lat: Option<String>,
    pub long: Option<String>,
}
