use crate::models::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in km between two degree coordinates (Haversine).
///
/// No input validation: NaN coordinates propagate to a NaN distance, which
/// callers treat as infinitely far (it fails every `<=` radius check).
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_km(a.lat, a.lng, b.lat, b.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero() {
        assert_eq!(haversine_km(1.3521, 103.8198, 1.3521, 103.8198), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_km(1.3521, 103.8198, 1.29, 103.85);
        let ba = haversine_km(1.29, 103.85, 1.3521, 103.8198);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn known_distance_singapore() {
        // Marina Bay to Woodlands is roughly 21 km
        let d = haversine_km(1.2839, 103.8607, 1.4382, 103.7891);
        assert!(d > 18.0 && d < 22.0, "got {}", d);
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn nan_input_propagates() {
        assert!(haversine_km(f64::NAN, 0.0, 1.0, 1.0).is_nan());
    }
}
