pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const AVG_ISS_ALTITUDE_KM: f64 = 400.0;
/// Radius of the sphere the station is assumed to move on.
pub const ORBITAL_RADIUS_KM: f64 = EARTH_RADIUS_KM + AVG_ISS_ALTITUDE_KM;

/// Central angle in radians between two points given in radians.
fn central_angle(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (lon2 - lon1) / 2.0;
    let a = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    // rounding can push `a` a hair past 1 for antipodal points
    2.0 * a.clamp(0.0, 1.0).sqrt().asin()
}

/// Great-circle distance at orbital altitude, inputs in radians.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    central_angle(lat1, lon1, lat2, lon2) * ORBITAL_RADIUS_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn identical_points_are_zero_apart() {
        let (lat, lon) = (51.5f64.to_radians(), (-0.12f64).to_radians());
        assert_eq!(haversine_km(lat, lon, lat, lon), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = (12.3f64.to_radians(), 45.6f64.to_radians());
        let b = ((-33.9f64).to_radians(), 151.2f64.to_radians());
        assert_relative_eq!(
            haversine_km(a.0, a.1, b.0, b.1),
            haversine_km(b.0, b.1, a.0, a.1),
            epsilon = 1e-9
        );
    }

    #[test]
    fn one_degree_along_equator() {
        let d = haversine_km(0.0, 0.0, 0.0, 1f64.to_radians());
        assert_relative_eq!(d, PI / 180.0 * 6771.0, epsilon = 1e-9);
        assert_relative_eq!(d, 118.17, epsilon = 0.01);
    }

    #[test]
    fn antipodal_points_are_half_a_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, PI);
        assert_relative_eq!(d, PI * ORBITAL_RADIUS_KM, epsilon = 1e-6);
    }

    #[test]
    fn crossing_the_antimeridian_takes_the_short_way() {
        let d = haversine_km(0.0, 179.5f64.to_radians(), 0.0, (-179.5f64).to_radians());
        assert_relative_eq!(d, PI / 180.0 * ORBITAL_RADIUS_KM, epsilon = 1e-6);
    }
}
