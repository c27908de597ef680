//! Geographic coordinate utilities
//!
//! Projects latitude/longitude pairs onto the surface of a globe and derives the
//! orientation that turns a location toward the camera.
//!
//! Convention: latitude 0 is the equator, longitude 0 lands on the +X meridian,
//! the north pole is +Y. Inputs are not range-checked; out-of-range values still
//! produce a point on the sphere.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Fraction of the latitude applied to pitch when focusing a location.
pub const FOCUS_PITCH_DAMPING: f32 = 0.3;

/// A named real-world location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

/// Orientation of a globe: yaw around +Y, pitch around +X (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub yaw: f32,
    pub pitch: f32,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn surface_position(&self, radius: f32) -> Vec3 {
        project(self.latitude, self.longitude, radius)
    }
}

/// Point on a sphere of `radius` for the given latitude/longitude in degrees.
pub fn project(lat: f64, lng: f64, radius: f32) -> Vec3 {
    // f64 for pole precision, cast once for the renderer
    let r = radius as f64;
    let phi = (90.0 - lat) * (PI / 180.0);
    let theta = (lng + 180.0) * (PI / 180.0);

    let x = -r * phi.sin() * theta.cos();
    let y = r * phi.cos();
    let z = r * phi.sin() * theta.sin();

    Vec3::new(x as f32, y as f32, z as f32)
}

/// Globe orientation that brings `(lat, lng)` in front of a camera looking down -Z.
pub fn focus_angles(lat: f64, lng: f64) -> RotationState {
    let yaw = -lng.to_radians() - PI / 2.0;
    let pitch = lat.to_radians() * FOCUS_PITCH_DAMPING as f64;
    RotationState {
        yaw: yaw as f32,
        pitch: pitch as f32,
    }
}

/// Rewrites `target` by whole turns so it lies within half a turn of `current`.
pub fn nearest_equivalent_angle(current: f32, target: f32) -> f32 {
    let tau = std::f32::consts::TAU;
    let diff = (target - current).rem_euclid(tau);
    if diff > std::f32::consts::PI {
        current + diff - tau
    } else {
        current + diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Quat;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_project_stays_on_sphere() {
        let radius = 5.0;
        let mut lat = -90.0;
        while lat <= 90.0 {
            let mut lng = -180.0;
            while lng <= 180.0 {
                let p = project(lat, lng, radius);
                assert!(
                    (p.length() - radius).abs() < EPSILON,
                    "lat={lat} lng={lng} len={}",
                    p.length()
                );
                lng += 15.0;
            }
            lat += 7.5;
        }
    }

    #[test]
    fn test_project_north_pole() {
        let p = project(90.0, 0.0, 5.0);
        assert!(p.x.abs() < EPSILON);
        assert!((p.y - 5.0).abs() < EPSILON);
        assert!(p.z.abs() < EPSILON);
    }

    #[test]
    fn test_project_south_pole() {
        let p = project(-90.0, 0.0, 5.0);
        assert!(p.x.abs() < EPSILON);
        assert!((p.y + 5.0).abs() < EPSILON);
        assert!(p.z.abs() < EPSILON);
    }

    #[test]
    fn test_project_equator_reference_meridian() {
        // theta = pi puts the reference meridian on +X with this sign convention
        let p = project(0.0, 0.0, 2.0);
        assert!((p.x - 2.0).abs() < EPSILON, "{p:?}");
        assert!(p.y.abs() < EPSILON);
        assert!(p.z.abs() < EPSILON);
    }

    #[test]
    fn test_project_antimeridian_is_opposite() {
        let p = project(0.0, -180.0, 2.0);
        assert!((p.x + 2.0).abs() < EPSILON, "{p:?}");
        assert!(p.y.abs() < EPSILON);
        assert!(p.z.abs() < EPSILON);
        assert!(!((p - Vec3::new(0.0, 2.0, 0.0)).length() < EPSILON));
    }

    #[test]
    fn test_project_out_of_range_still_on_sphere() {
        let p = project(135.0, 400.0, 3.0);
        assert!((p.length() - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_geo_point_surface_position_matches_project() {
        let berlin = GeoPoint::new(52.52, 13.405);
        assert_eq!(berlin.surface_position(5.0), project(52.52, 13.405, 5.0));
    }

    #[test]
    fn test_focus_angles_bring_location_to_camera() {
        // Applying the focus orientation should move the pin onto +Z (toward the camera)
        for (lat, lng) in [(0.0, 0.0), (0.0, 90.0), (0.0, -74.0), (0.0, 100.5)] {
            let rot = focus_angles(lat, lng);
            let q = Quat::from_rotation_y(rot.yaw);
            let p = q * project(lat, lng, 1.0);
            assert!((p.z - 1.0).abs() < EPSILON, "lat={lat} lng={lng} -> {p:?}");
        }
    }

    #[test]
    fn test_focus_angles_damp_pitch() {
        let rot = focus_angles(60.0, 0.0);
        assert!((rot.pitch - 60f32.to_radians() * 0.3).abs() < EPSILON);
    }

    #[test]
    fn test_nearest_equivalent_angle() {
        let tau = std::f32::consts::TAU;
        let a = nearest_equivalent_angle(10.0 * tau + 0.1, 0.2);
        assert!((a - (10.0 * tau + 0.2)).abs() < EPSILON);

        let b = nearest_equivalent_angle(0.1, tau - 0.1);
        assert!((b - (-0.1)).abs() < EPSILON);

        let c = nearest_equivalent_angle(-3.0, -3.0);
        assert!((c + 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_geo_point_deserializes_short_keys() {
        let p: GeoPoint = serde_json::from_str(r#"{"lat": 41.2995, "lng": 69.2401}"#).unwrap();
        assert_eq!(p, GeoPoint::new(41.2995, 69.2401));
    }
}
