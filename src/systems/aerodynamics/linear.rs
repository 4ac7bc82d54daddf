use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AeroModel;
use crate::components::{AeroCoefficients, AircraftGeometry, FlightCondition, PropulsionOutput};
use crate::utils::{
    CalibrationError, Result, ISA_SEA_LEVEL_DENSITY, MACH_COMPRESSIBILITY_LIMIT,
};

const MIN_SLOPE_SPAN: f64 = 1e-9;

/// Prandtl-Glauert compressibility factor `sqrt(1 - M^2)`, with Mach capped
/// below one so the factor never reaches zero.
pub fn prandtl_glauert(mach: f64) -> f64 {
    let m = mach.abs().min(MACH_COMPRESSIBILITY_LIMIT);
    (1.0 - m * m).sqrt()
}

/// Abscissa the drag polar is linear in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPolar {
    /// `CD = CD0 + k * CL^2`
    #[default]
    LiftSquared,
    /// `CD = CD0 + k * sin^2(alpha)`
    SinAlphaSquared,
}

/// A measured or trimmed flight condition used to fit the linear model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub alpha: f64,
    pub mach: f64,
    pub cl: f64,
    pub cd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearAeroParams {
    pub geometry: AircraftGeometry,
    pub drag_polar: DragPolar,
    /// One (cruise) or two (cruise, climb) calibration conditions.
    pub calibration: Vec<CalibrationPoint>,
    /// Sea-level static thrust at full throttle (N)
    pub max_thrust: f64,
    /// Thrust specific fuel consumption (kg/s per N)
    pub tsfc: f64,
}

impl Default for LinearAeroParams {
    fn default() -> Self {
        Self {
            geometry: AircraftGeometry::default(),
            drag_polar: DragPolar::default(),
            calibration: Vec::new(),
            max_thrust: 2500.0,
            tsfc: 2.0e-5,
        }
    }
}

/// Linear lift curve and parabolic drag polar fitted through one or two
/// flight conditions.
///
/// Coefficients are held in incompressible form. Calibration multiplies the
/// measured coefficients by the Prandtl-Glauert factor at the measured Mach
/// and evaluation divides by the factor at the current Mach, so a model
/// evaluated at its own calibration point reproduces that point exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAero {
    params: LinearAeroParams,
    cl0: f64,
    cl_alpha: f64,
    cd0: f64,
    drag_factor: f64,
}

impl LinearAero {
    pub fn new(params: LinearAeroParams) -> Self {
        Self {
            params,
            cl0: 0.0,
            cl_alpha: 0.0,
            cd0: 0.0,
            drag_factor: 0.0,
        }
    }

    pub fn params(&self) -> &LinearAeroParams {
        &self.params
    }

    pub fn cl0(&self) -> f64 {
        self.cl0
    }

    pub fn cl_alpha(&self) -> f64 {
        self.cl_alpha
    }

    pub fn cd0(&self) -> f64 {
        self.cd0
    }

    /// Slope of the drag polar against its abscissa.
    pub fn drag_factor(&self) -> f64 {
        self.drag_factor
    }

    /// Fits the model to the configured calibration points.
    pub fn calibrate_configured(&mut self) -> Result<()> {
        let points = self.params.calibration.clone();
        self.calibrate(&points)
    }

    /// Fits the model through `points`. On failure every coefficient is left
    /// at zero.
    pub fn calibrate(&mut self, points: &[CalibrationPoint]) -> Result<()> {
        match self.fit(points) {
            Ok((cl0, cl_alpha, cd0, drag_factor)) => {
                self.cl0 = cl0;
                self.cl_alpha = cl_alpha;
                self.cd0 = cd0;
                self.drag_factor = drag_factor;
                info!(
                    "Linear aero calibrated from {} point(s): CL0={:.4}, CLa={:.4}, CD0={:.5}, k={:.5}",
                    points.len(),
                    cl0,
                    cl_alpha,
                    cd0,
                    drag_factor
                );
                Ok(())
            }
            Err(err) => {
                warn!("Linear aero calibration failed: {}", err);
                self.cl0 = 0.0;
                self.cl_alpha = 0.0;
                self.cd0 = 0.0;
                self.drag_factor = 0.0;
                Err(err.into())
            }
        }
    }

    fn drag_abscissa(&self, cl_incompressible: f64, alpha: f64) -> f64 {
        match self.params.drag_polar {
            DragPolar::LiftSquared => cl_incompressible * cl_incompressible,
            DragPolar::SinAlphaSquared => {
                let s = alpha.sin();
                s * s
            }
        }
    }

    fn fit(
        &self,
        points: &[CalibrationPoint],
    ) -> std::result::Result<(f64, f64, f64, f64), CalibrationError> {
        let incompressible: Vec<(f64, f64, f64)> = points
            .iter()
            .map(|p| {
                let beta = prandtl_glauert(p.mach);
                (p.alpha, p.cl * beta, p.cd * beta)
            })
            .collect();

        let (cl0, cl_alpha, cd0, drag_factor) = match incompressible.as_slice() {
            [(alpha, cl, cd)] => {
                let aspect_ratio = self.params.geometry.aspect_ratio();
                if aspect_ratio <= 0.0 {
                    return Err(CalibrationError::InvalidCondition(format!(
                        "single-point calibration needs a positive aspect ratio, got {}",
                        aspect_ratio
                    )));
                }
                let cl_alpha = 2.0 * PI;
                let induced = 1.0 / (PI * aspect_ratio);
                let drag_factor = match self.params.drag_polar {
                    DragPolar::LiftSquared => induced,
                    // CL ~ CLa * alpha, so k * CL^2 becomes k * CLa^2 * sin^2(alpha)
                    DragPolar::SinAlphaSquared => induced * cl_alpha * cl_alpha,
                };
                let cl0 = cl - cl_alpha * alpha;
                let cd0 = cd - drag_factor * self.drag_abscissa(*cl, *alpha);
                (cl0, cl_alpha, cd0, drag_factor)
            }
            [(a1, cl1, cd1), (a2, cl2, cd2)] => {
                let d_alpha = a2 - a1;
                if d_alpha.abs() < MIN_SLOPE_SPAN {
                    return Err(CalibrationError::DegenerateAlpha { alpha: *a1 });
                }
                let x1 = self.drag_abscissa(*cl1, *a1);
                let x2 = self.drag_abscissa(*cl2, *a2);
                if (x2 - x1).abs() < MIN_SLOPE_SPAN {
                    return Err(CalibrationError::DegenerateDrag { value: x1 });
                }

                let cl_alpha = (cl2 - cl1) / d_alpha;
                let drag_factor = (cd2 - cd1) / (x2 - x1);
                (cl1 - cl_alpha * a1, cl_alpha, cd1 - drag_factor * x1, drag_factor)
            }
            _ => return Err(CalibrationError::PointCount(points.len())),
        };

        for (label, value) in [
            ("CL0", cl0),
            ("lift slope", cl_alpha),
            ("CD0", cd0),
            ("drag factor", drag_factor),
        ] {
            if !value.is_finite() {
                return Err(CalibrationError::NonFinite(label));
            }
        }
        Ok((cl0, cl_alpha, cd0, drag_factor))
    }
}

impl AeroModel for LinearAero {
    fn calibrate(&mut self) -> Result<()> {
        self.calibrate_configured()
    }

    fn coefficients(&self, condition: &FlightCondition) -> AeroCoefficients {
        let beta = prandtl_glauert(condition.mach);
        let cl = self.cl0 + self.cl_alpha * condition.alpha;
        let cd = self.cd0 + self.drag_factor * self.drag_abscissa(cl, condition.alpha);

        AeroCoefficients {
            cl: cl / beta,
            cd: cd / beta,
            cy: 0.0,
        }
    }

    fn propulsion(&self, condition: &FlightCondition) -> PropulsionOutput {
        let density_ratio = (condition.rho / ISA_SEA_LEVEL_DENSITY).max(0.01);
        let thrust = (self.params.max_thrust * condition.throttle.clamp(0.0, 1.0)
            * density_ratio.sqrt())
        .max(0.0);

        PropulsionOutput {
            thrust,
            fuel_flow: self.params.tsfc * thrust,
        }
    }
}
