//! Geographic coordinates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A latitude/longitude pair in degrees.
///
/// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Coordinate;
///
/// let porto = Coordinate::new(41.1579, -8.6291).unwrap();
/// assert_eq!(porto.latitude(), 41.1579);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::semantic(format!(
                "latitude must be between -90 and 90 (inclusive), got {latitude}"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::semantic(format!(
                "longitude must be between -180 and 180 (inclusive), got {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(matches!(
            Coordinate::new(90.5, 0.0),
            Err(Error::Semantic(_))
        ));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }
}
