use serde::{Deserialize, Serialize};

use super::AeroModel;
use crate::components::{AeroCoefficients, FlightCondition, PropulsionOutput};
use crate::resources::Table3D;

/// Aerodynamic and propulsive data looked up directly from tables.
///
/// * `lift`: pages over Mach, rows over altitude, columns over alpha
/// * `drag`: pages over Mach, rows over altitude, columns over CL
/// * `thrust`, `fuel_flow`: pages over throttle, rows over altitude,
///   columns over Mach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAero {
    pub lift: Table3D,
    pub drag: Table3D,
    pub thrust: Table3D,
    pub fuel_flow: Table3D,
}

impl TableAero {
    pub fn new(lift: Table3D, drag: Table3D, thrust: Table3D, fuel_flow: Table3D) -> Self {
        Self {
            lift,
            drag,
            thrust,
            fuel_flow,
        }
    }
}

impl AeroModel for TableAero {
    fn coefficients(&self, condition: &FlightCondition) -> AeroCoefficients {
        let cl = self
            .lift
            .interp(condition.mach, condition.altitude, condition.alpha);
        let cd = self.drag.interp(condition.mach, condition.altitude, cl);

        AeroCoefficients { cl, cd, cy: 0.0 }
    }

    fn propulsion(&self, condition: &FlightCondition) -> PropulsionOutput {
        let throttle = condition.throttle.clamp(0.0, 1.0);
        PropulsionOutput {
            thrust: self
                .thrust
                .interp(throttle, condition.altitude, condition.mach)
                .max(0.0),
            fuel_flow: self
                .fuel_flow
                .interp(throttle, condition.altitude, condition.mach)
                .max(0.0),
        }
    }
}
