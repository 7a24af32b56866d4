use crate::error::{Error, Result};
use crate::models::{Coordinates, RankedRecord, UploadRecord};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points on a spherical Earth (haversine).
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let d_lat = (to.latitude() - from.latitude()).to_radians();
    let d_lon = (to.longitude() - from.longitude()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Nearest first, each record paired with its distance from the query point.
pub fn by_proximity(
    records: &[UploadRecord],
    query_lat: f64,
    query_lon: f64,
) -> Result<Vec<RankedRecord>> {
    let origin = Coordinates::new(query_lat, query_lon).map_err(as_query_error)?;
    Ok(rank(records, origin))
}

/// Like [`by_proximity`] but takes the raw `lat`/`long` query values.
pub fn by_proximity_raw(
    records: &[UploadRecord],
    query_lat: Option<&str>,
    query_lon: Option<&str>,
) -> Result<Vec<RankedRecord>> {
    let origin = query_point(query_lat, query_lon)?;
    Ok(rank(records, origin))
}

fn query_point(query_lat: Option<&str>, query_lon: Option<&str>) -> Result<Coordinates> {
    Coordinates::parse(query_lat, query_lon).map_err(as_query_error)
}

fn rank(records: &[UploadRecord], origin: Coordinates) -> Vec<RankedRecord> {
    let mut ranked: Vec<RankedRecord> = records
        .iter()
        .map(|record| RankedRecord {
            distance: distance_to(origin, record),
            record: record.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

// Records carrying invalid coordinates sort last.
fn distance_to(origin: Coordinates, record: &UploadRecord) -> f64 {
    match record.coordinates() {
        Ok(point) => haversine_km(origin, point),
        Err(_) => f64::INFINITY,
    }
}

fn as_query_error(err: Error) -> Error {
    match err {
        Error::Validation { field, reason } => Error::InvalidQuery { field, reason },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    fn record(name: &str, lat: f64, lon: f64) -> UploadRecord {
        UploadRecord::new(name, point(lat, lon))
    }

    #[test]
    fn test_new_york_to_los_angeles() {
        let d = haversine_km(point(40.7128, -74.0060), point(34.0522, -118.2437));
        assert!((d - 3935.75).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (point(51.5074, -0.1278), point(48.8566, 2.3522)),
            (point(-33.8688, 151.2093), point(35.6762, 139.6503)),
            (point(0.0, 179.9), point(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = point(12.34, 56.78);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_antipodes_are_half_circumference() {
        let d = haversine_km(point(0.0, 0.0), point(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_first_and_own_point_is_zero() {
        let records = vec![
            record("far.jpg", -33.8688, 151.2093),
            record("here.jpg", 40.7128, -74.0060),
            record("near.jpg", 40.7306, -73.9352),
        ];
        let ranked = by_proximity(&records, 40.7128, -74.0060).unwrap();

        let names: Vec<_> = ranked.iter().map(|r| r.record.file_name.as_str()).collect();
        assert_eq!(names, ["here.jpg", "near.jpg", "far.jpg"]);
        assert_eq!(ranked[0].distance, 0.0);
    }

    #[test]
    fn test_equal_distances_keep_insertion_order() {
        let records = vec![
            record("east.jpg", 0.0, 1.0),
            record("west.jpg", 0.0, -1.0),
            record("origin.jpg", 0.0, 0.0),
        ];
        let ranked = by_proximity(&records, 0.0, 0.0).unwrap();
        let names: Vec<_> = ranked.iter().map(|r| r.record.file_name.as_str()).collect();
        assert_eq!(names, ["origin.jpg", "east.jpg", "west.jpg"]);
    }

    #[test]
    fn test_invalid_query_point() {
        let err = by_proximity(&[], 95.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { field: "latitude", .. }));

        let err = by_proximity(&[], 0.0, f64::NAN).unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { field: "longitude", .. }));
    }

    #[test]
    fn test_raw_query_missing_or_garbage() {
        let err = by_proximity_raw(&[], None, Some("1")).unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { field: "latitude", .. }));

        let err = by_proximity_raw(&[], Some("1"), Some("east")).unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { field: "longitude", .. }));

        let ranked = by_proximity_raw(&[record("a.jpg", 1.0, 1.0)], Some("1"), Some("1")).unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_input_untouched() {
        let records = vec![record("b.jpg", 10.0, 10.0), record("a.jpg", 0.0, 0.0)];
        let snapshot = records.clone();
        let _ = by_proximity(&records, 0.0, 0.0).unwrap();
        assert_eq!(records, snapshot);
    }
}
