//! Great-circle distance between coordinates.

use crate::models::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance in meters between two coordinates.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Coordinate;
/// use u_tsp::distance::haversine;
///
/// let a = Coordinate::new(0.0, 0.0).unwrap();
/// let b = Coordinate::new(0.0, 1.0).unwrap();
/// // One degree of longitude on the equator is about 111.2 km.
/// assert!((haversine(&a, &b) - 111_195.0).abs() < 1.0);
/// ```
pub fn haversine(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid")
    }

    #[test]
    fn test_zero_distance() {
        let p = coord(41.15, -8.61);
        assert!(haversine(&p, &p).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let porto = coord(41.1579, -8.6291);
        let lisbon = coord(38.7223, -9.1393);
        assert!((haversine(&porto, &lisbon) - haversine(&lisbon, &porto)).abs() < 1e-9);
    }

    #[test]
    fn test_porto_lisbon() {
        let porto = coord(41.1579, -8.6291);
        let lisbon = coord(38.7223, -9.1393);
        let d = haversine(&porto, &lisbon);
        // ~274 km as the crow flies
        assert!(d > 270_000.0 && d < 280_000.0, "got {d}");
    }

    #[test]
    fn test_antipodal() {
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((haversine(&a, &b) - half_circumference).abs() < 1e-3);
    }
}
