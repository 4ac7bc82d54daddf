mod aero_module;
mod force_calculator;
mod inverse_design;
mod linear;
mod table_aero;

pub use aero_module::AeroModule;
pub use force_calculator::{wind_to_body, wind_to_body_matrix};
pub use inverse_design::{InverseDesign, InverseDesignParams, TrimCondition};
pub use linear::{prandtl_glauert, CalibrationPoint, DragPolar, LinearAero, LinearAeroParams};
pub use table_aero::TableAero;

use crate::components::{AeroCoefficients, FlightCondition, PropulsionOutput};
use crate::utils::Result;

/// A source of force coefficients and installed thrust for a flight condition.
pub trait AeroModel {
    /// One-time fit of the model's coefficients. Models without a
    /// calibration step keep the default.
    fn calibrate(&mut self) -> Result<()> {
        Ok(())
    }

    fn coefficients(&self, condition: &FlightCondition) -> AeroCoefficients;

    fn propulsion(&self, condition: &FlightCondition) -> PropulsionOutput;
}
