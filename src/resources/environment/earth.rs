use serde::{Deserialize, Serialize};

use crate::utils::{EARTH_MEAN_RADIUS, MIN_COS_LATITUDE, WGS84_ECCENTRICITY_SQ, WGS84_SEMI_MAJOR_AXIS};

/// Shape of the earth used to turn NED velocity into latitude/longitude rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EarthModel {
    #[default]
    Wgs84,
    Spherical,
}

impl EarthModel {
    /// Meridian and prime-vertical radii of curvature (m) at `lat`.
    pub fn radii(&self, lat: f64) -> (f64, f64) {
        match self {
            EarthModel::Spherical => (EARTH_MEAN_RADIUS, EARTH_MEAN_RADIUS),
            EarthModel::Wgs84 => {
                let s = lat.sin();
                let w = 1.0 - WGS84_ECCENTRICITY_SQ * s * s;
                let prime = WGS84_SEMI_MAJOR_AXIS / w.sqrt();
                let meridian = WGS84_SEMI_MAJOR_AXIS * (1.0 - WGS84_ECCENTRICITY_SQ) / (w * w.sqrt());
                (meridian, prime)
            }
        }
    }

    /// Latitude and longitude rates (rad/s) for north/east velocity at `lat`, `alt`.
    pub fn position_rates(&self, lat: f64, alt: f64, v_north: f64, v_east: f64) -> (f64, f64) {
        let (meridian, prime) = self.radii(lat);
        let cos_lat = lat.cos();
        let cos_lat = if cos_lat.abs() < MIN_COS_LATITUDE {
            MIN_COS_LATITUDE.copysign(cos_lat)
        } else {
            cos_lat
        };

        (
            v_north / (meridian + alt),
            v_east / ((prime + alt) * cos_lat),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_radii() {
        let (meridian, prime) = EarthModel::Wgs84.radii(0.0);
        assert_relative_eq!(prime, WGS84_SEMI_MAJOR_AXIS);
        assert_relative_eq!(meridian, 6_335_439.3, epsilon = 1.0);

        let (meridian, prime) = EarthModel::Wgs84.radii(std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(meridian, prime, epsilon = 1e-3);
    }

    #[test]
    fn test_spherical_rates() {
        let (lat_dot, lon_dot) = EarthModel::Spherical.position_rates(0.0, 0.0, 100.0, 100.0);
        assert_relative_eq!(lat_dot, 100.0 / EARTH_MEAN_RADIUS);
        assert_relative_eq!(lon_dot, 100.0 / EARTH_MEAN_RADIUS);
    }

    #[test]
    fn test_pole_stays_finite() {
        let (_, lon_dot) =
            EarthModel::Wgs84.position_rates(std::f64::consts::FRAC_PI_2, 0.0, 0.0, 10.0);
        assert!(lon_dot.is_finite());
    }
}
