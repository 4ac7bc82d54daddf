use serde::{Deserialize, Serialize};

/// A navigation fix. Angles in radians, altitude in metres, speed in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    pub speed: f64,
    pub heading: f64,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64, alt: f64, speed: f64, heading: f64) -> Self {
        Self {
            lat,
            lon,
            alt,
            speed,
            heading,
        }
    }
}
