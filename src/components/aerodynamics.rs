use serde::{Deserialize, Serialize};

/// Non-dimensional force coefficients in wind axes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroCoefficients {
    pub cl: f64,
    pub cd: f64,
    pub cy: f64,
}

/// Thrust (N) and fuel flow (kg/s) produced by a propulsion model.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropulsionOutput {
    pub thrust: f64,
    pub fuel_flow: f64,
}

/// Vehicle state an aerodynamic model is evaluated at.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightCondition {
    pub alpha: f64,
    pub beta: f64,
    pub mach: f64,
    pub altitude: f64,
    /// Spooled engine setting in [0, 1].
    pub throttle: f64,
    /// Air density (kg/m^3).
    pub rho: f64,
}

/// Configuration for the geometry of an aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftGeometry {
    /// The total wing area of the aircraft (m²).
    pub wing_area: f64,
    /// The wingspan of the aircraft (m).
    pub wing_span: f64,
    /// The mean aerodynamic chord of the aircraft (m).
    pub mac: f64,
}

impl AircraftGeometry {
    pub fn new(wing_area: f64, wing_span: f64, mac: f64) -> Self {
        AircraftGeometry {
            wing_area,
            wing_span,
            mac,
        }
    }

    /// Span squared over area; zero when the area is not positive.
    pub fn aspect_ratio(&self) -> f64 {
        if self.wing_area > 0.0 {
            self.wing_span * self.wing_span / self.wing_area
        } else {
            0.0
        }
    }

    pub fn twin_otter() -> Self {
        Self::new(39.0, 19.8, 1.98)
    }

    pub fn cessna_172() -> Self {
        Self::new(16.2, 11.0, 1.6)
    }
}

impl Default for AircraftGeometry {
    fn default() -> Self {
        Self::cessna_172()
    }
}
