use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AeroModel, CalibrationPoint, LinearAero, LinearAeroParams};
use crate::components::{AeroCoefficients, FlightCondition, PropulsionOutput};
use crate::resources::{Atmosphere, AtmosphereConfig};
use crate::utils::{CalibrationError, Result, GRAVITY};

/// A steady, wings-level flight condition the vehicle is known to trim in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimCondition {
    pub mach: f64,
    pub altitude: f64,
    pub alpha: f64,
    /// Flight path angle, positive climbing (rad)
    pub gamma: f64,
    pub mass: f64,
    /// Installed thrust along the body x axis (N)
    pub thrust: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InverseDesignParams {
    #[serde(flatten)]
    pub aero: LinearAeroParams,
    pub trim: Vec<TrimCondition>,
    pub atmosphere: AtmosphereConfig,
}

/// Linear aero model whose calibration points are solved from trim
/// conditions instead of being supplied as coefficients.
#[derive(Debug, Clone)]
pub struct InverseDesign {
    linear: LinearAero,
    trim: Vec<TrimCondition>,
    atmosphere: Atmosphere,
}

impl InverseDesign {
    pub fn new(params: InverseDesignParams) -> Self {
        Self {
            linear: LinearAero::new(params.aero),
            trim: params.trim,
            atmosphere: Atmosphere::new(params.atmosphere),
        }
    }

    pub fn linear(&self) -> &LinearAero {
        &self.linear
    }

    /// Lift and drag coefficients that balance weight and thrust at `trim`.
    pub fn solve(&self, trim: &TrimCondition) -> Result<CalibrationPoint> {
        let wing_area = self.linear.params().geometry.wing_area;
        if trim.mach <= 0.0 || trim.mass <= 0.0 || wing_area <= 0.0 {
            return Err(CalibrationError::InvalidCondition(format!(
                "mach {}, mass {} and wing area {} must all be positive",
                trim.mach, trim.mass, wing_area
            ))
            .into());
        }

        let air = self.atmosphere.properties(trim.altitude);
        let speed = trim.mach * air.speed_of_sound;
        let qs = 0.5 * air.density * speed * speed * wing_area;
        let weight = trim.mass * GRAVITY;

        let (sin_alpha, cos_alpha) = trim.alpha.sin_cos();
        let (sin_gamma, cos_gamma) = trim.gamma.sin_cos();
        let cl = (weight * cos_gamma - trim.thrust * sin_alpha) / qs;
        let cd = (trim.thrust * cos_alpha - weight * sin_gamma) / qs;

        debug!(
            "Trim at M{:.3}, {:.0} m solved to CL={:.4}, CD={:.5}",
            trim.mach, trim.altitude, cl, cd
        );
        Ok(CalibrationPoint {
            alpha: trim.alpha,
            mach: trim.mach,
            cl,
            cd,
        })
    }
}

impl AeroModel for InverseDesign {
    fn calibrate(&mut self) -> Result<()> {
        let points = self
            .trim
            .iter()
            .map(|trim| self.solve(trim))
            .collect::<Result<Vec<_>>>()?;
        self.linear.calibrate(&points)
    }

    fn coefficients(&self, condition: &FlightCondition) -> AeroCoefficients {
        self.linear.coefficients(condition)
    }

    fn propulsion(&self, condition: &FlightCondition) -> PropulsionOutput {
        self.linear.propulsion(condition)
    }
}
