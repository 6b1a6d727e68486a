//! Check-in geofence.

use crate::config::GeofenceConfig;
use crate::error::{EngineError, EngineResult};

/// Mean Earth radius used for distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two points, in meters (haversine).
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Checks a check-in position against the configured geofence.
///
/// Returns the distance when the geofence is enforced, `None` when it is
/// not, and `OutsideGeofence` when the position is beyond the allowed area.
pub fn check_geofence(
    config: &GeofenceConfig,
    latitude: f64,
    longitude: f64,
) -> EngineResult<Option<f64>> {
    if !config.required {
        return Ok(None);
    }

    let distance = distance_meters(config.latitude, config.longitude, latitude, longitude);
    if distance > config.allowed_area_meters {
        return Err(EngineError::OutsideGeofence {
            distance_meters: (distance * 100.0).round() / 100.0,
            allowed_meters: config.allowed_area_meters,
        });
    }
    Ok(Some(distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office() -> GeofenceConfig {
        GeofenceConfig {
            required: true,
            latitude: 23.7808875,
            longitude: 90.2792371,
            allowed_area_meters: 100.0,
        }
    }

    #[test]
    fn test_same_point_is_zero_distance() {
        assert_eq!(distance_meters(23.78, 90.27, 23.78, 90.27), 0.0);
    }

    #[test]
    fn test_one_hundredth_degree_of_latitude() {
        let d = distance_meters(0.0, 0.0, 0.01, 0.0);
        assert!((d - 1111.95).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn test_inside_area_returns_distance() {
        let d = check_geofence(&office(), 23.7809, 90.2792).unwrap().unwrap();
        assert!(d < 100.0);
    }

    #[test]
    fn test_outside_area_is_rejected_with_rounded_distance() {
        match check_geofence(&office(), 23.7908875, 90.2792371) {
            Err(EngineError::OutsideGeofence {
                distance_meters,
                allowed_meters,
            }) => {
                assert!((distance_meters - 1111.95).abs() < 0.01);
                assert_eq!(distance_meters, (distance_meters * 100.0).round() / 100.0);
                assert_eq!(allowed_meters, 100.0);
            }
            other => panic!("Expected OutsideGeofence, got {:?}", other),
        }
    }

    #[test]
    fn test_not_required_skips_check() {
        let mut config = office();
        config.required = false;
        assert!(check_geofence(&config, 0.0, 0.0).unwrap().is_none());
    }
}
