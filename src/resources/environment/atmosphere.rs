use serde::{Deserialize, Serialize};

use super::config::{AtmosphereConfig, AtmosphereType};
use crate::utils::{bracket, AIR_GAMMA, AIR_GAS_CONSTANT, GRAVITY, ISA_SEA_LEVEL_TEMP};

// 1976 US Standard Atmosphere layers: base altitude (m), lapse rate (K/m),
// base temperature (K), base pressure (Pa).
const LAYER_BASE: [f64; 7] = [0.0, 11_000.0, 20_000.0, 32_000.0, 47_000.0, 51_000.0, 71_000.0];
const LAYER_LAPSE: [f64; 7] = [-0.0065, 0.0, 0.001, 0.0028, 0.0, -0.0028, -0.002];
const LAYER_TEMP: [f64; 7] = [288.15, 216.65, 216.65, 228.65, 270.65, 270.65, 214.65];
const LAYER_PRESSURE: [f64; 7] = [
    101_325.0, 22_632.06, 5_474.889, 868.0187, 110.9063, 66.938_87, 3.956_420,
];

const MIN_ALTITUDE: f64 = -1_000.0;
const MAX_ALTITUDE: f64 = 84_852.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereProperties {
    /// Static temperature (K)
    pub temperature: f64,
    /// Static pressure (Pa)
    pub pressure: f64,
    /// Air density (kg/m^3)
    pub density: f64,
    /// Speed of sound (m/s)
    pub speed_of_sound: f64,
}

/// Piecewise standard atmosphere. Altitudes outside [-1 km, 84.852 km] are
/// clamped to the table bounds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Atmosphere {
    config: AtmosphereConfig,
}

impl Atmosphere {
    pub fn new(config: AtmosphereConfig) -> Self {
        Self { config }
    }

    pub fn standard() -> Self {
        Self::default()
    }

    pub fn properties(&self, altitude: f64) -> AtmosphereProperties {
        let (temperature, pressure) = match self.config.model_type {
            AtmosphereType::Constant => {
                let t = self.config.sea_level_temperature;
                (t, self.config.sea_level_density * AIR_GAS_CONSTANT * t)
            }
            AtmosphereType::Standard => {
                let (t, p) = standard_layer(altitude);
                (t + self.config.sea_level_temperature - ISA_SEA_LEVEL_TEMP, p)
            }
        };

        AtmosphereProperties {
            temperature,
            pressure,
            density: pressure / (AIR_GAS_CONSTANT * temperature),
            speed_of_sound: (AIR_GAMMA * AIR_GAS_CONSTANT * temperature).sqrt(),
        }
    }

    pub fn temperature(&self, altitude: f64) -> f64 {
        self.properties(altitude).temperature
    }

    pub fn pressure(&self, altitude: f64) -> f64 {
        self.properties(altitude).pressure
    }

    pub fn density(&self, altitude: f64) -> f64 {
        self.properties(altitude).density
    }

    pub fn speed_of_sound(&self, altitude: f64) -> f64 {
        self.properties(altitude).speed_of_sound
    }
}

/// Temperature and pressure of the ISA at `altitude`.
fn standard_layer(altitude: f64) -> (f64, f64) {
    let h = if altitude.is_finite() {
        altitude.clamp(MIN_ALTITUDE, MAX_ALTITUDE)
    } else {
        0.0
    };

    let (index, fraction) = bracket(&LAYER_BASE, h);
    // bracket reports the last interval with fraction 1 once past the top base
    let layer = if fraction >= 1.0 { index + 1 } else { index };

    let dh = h - LAYER_BASE[layer];
    let lapse = LAYER_LAPSE[layer];
    let base_temp = LAYER_TEMP[layer];
    let base_pressure = LAYER_PRESSURE[layer];

    let temperature = base_temp + lapse * dh;
    let pressure = if lapse.abs() > f64::EPSILON {
        base_pressure * (temperature / base_temp).powf(-GRAVITY / (AIR_GAS_CONSTANT * lapse))
    } else {
        base_pressure * (-GRAVITY * dh / (AIR_GAS_CONSTANT * base_temp)).exp()
    };

    (temperature, pressure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sea_level() {
        let props = Atmosphere::standard().properties(0.0);
        assert_relative_eq!(props.temperature, 288.15);
        assert_relative_eq!(props.pressure, 101_325.0);
        assert_relative_eq!(props.density, 1.225, epsilon = 1e-3);
        assert_relative_eq!(props.speed_of_sound, 340.29, epsilon = 0.05);
    }

    #[test]
    fn test_layer_boundaries_are_continuous() {
        let atmosphere = Atmosphere::standard();
        for &base in LAYER_BASE.iter().skip(1) {
            let below = atmosphere.properties(base - 1e-6);
            let above = atmosphere.properties(base + 1e-6);
            assert_relative_eq!(below.temperature, above.temperature, epsilon = 1e-3);
            assert_relative_eq!(below.pressure, above.pressure, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_tropopause() {
        let props = Atmosphere::standard().properties(11_000.0);
        assert_relative_eq!(props.temperature, 216.65, epsilon = 1e-9);
        assert_relative_eq!(props.density, 0.3639, epsilon = 1e-3);
        assert_relative_eq!(props.speed_of_sound, 295.07, epsilon = 0.05);
    }

    #[test]
    fn test_density_decreases_with_altitude() {
        let atmosphere = Atmosphere::standard();
        let altitudes = [0.0, 1000.0, 5000.0, 10_000.0, 25_000.0, 60_000.0];
        for pair in altitudes.windows(2) {
            assert!(atmosphere.density(pair[0]) > atmosphere.density(pair[1]));
        }
    }

    #[test]
    fn test_out_of_range_altitudes_clamp() {
        let atmosphere = Atmosphere::standard();
        assert_eq!(
            atmosphere.properties(200_000.0),
            atmosphere.properties(MAX_ALTITUDE)
        );
        assert_eq!(
            atmosphere.properties(-50_000.0),
            atmosphere.properties(MIN_ALTITUDE)
        );
        assert!(atmosphere.properties(f64::NAN).density.is_finite());
    }

    #[test]
    fn test_constant_model() {
        let atmosphere = Atmosphere::new(AtmosphereConfig {
            model_type: AtmosphereType::Constant,
            ..Default::default()
        });
        assert_relative_eq!(atmosphere.density(0.0), 1.225, epsilon = 1e-9);
        assert_relative_eq!(atmosphere.density(8000.0), 1.225, epsilon = 1e-9);
    }
}
