//! Pure functions turning the stored record sequence into ordered views.
//!
//! Inputs are borrowed slices and are never reordered in place; every view is
//! a fresh `Vec`. All sorts are stable, so records that compare equal keep
//! their insertion order.

pub mod proximity;
pub mod recency;

pub use proximity::{by_proximity, by_proximity_raw, haversine_km, EARTH_RADIUS_KM};
pub use recency::by_recency;
