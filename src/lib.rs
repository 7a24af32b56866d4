//! # geo-photos
//!
//! A small photo-sharing service: clients upload an image with the latitude
//! and longitude it was taken at, and list uploads either newest first or
//! nearest to a given point.
//!
//! ## Architecture
//!
//! ```text
//!   POST /api/upload                     GET /api/latest | /api/nearest
//!          │                                         │
//!          ▼                                         ▼
//!  ┌────────────────┐                      ┌───────────────────┐
//!  │  FileStorage   │                      │  MetadataStore    │
//!  │ type + size    │                      │   read_all()      │
//!  │ unique name    │                      └─────────┬─────────┘
//!  └───────┬────────┘                                │ insertion order
//!          │ file name                               ▼
//!          ▼                               ┌───────────────────┐
//!  ┌────────────────┐                      │  Ranking engine   │
//!  │ MetadataStore  │                      │  by_recency       │
//!  │  insert()      │                      │  by_proximity     │
//!  │ read → append  │                      │  (haversine, km)  │
//!  │ → atomic write │                      └───────────────────┘
//!  └────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for bind address, data dir and upload limits
//! - [`models`] - `UploadRecord`, validated `Coordinates`, response types
//! - [`error`] - Error taxonomy and its HTTP mapping
//! - [`store`] - `MetadataStore` trait with JSON-file and in-memory backends
//! - [`ranking`] - Recency and haversine proximity orderings
//! - [`files`] - Image byte storage with allow-listed types and a size cap
//! - [`api`] - Axum router and handlers
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod error;
pub mod files;
pub mod models;
pub mod ranking;
pub mod state;
pub mod store;

pub use error::{Error, Result};
