use serde::{Deserialize, Serialize};

use crate::utils::{ISA_SEA_LEVEL_DENSITY, ISA_SEA_LEVEL_TEMP};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    pub model_type: AtmosphereType,
    /// Only used by [`AtmosphereType::Constant`] (kg/m^3).
    pub sea_level_density: f64,
    /// Sea-level temperature (K). The standard model shifts every layer by
    /// the offset from ISA.
    pub sea_level_temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AtmosphereType {
    Constant,
    Standard,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            model_type: AtmosphereType::Standard,
            sea_level_density: ISA_SEA_LEVEL_DENSITY,
            sea_level_temperature: ISA_SEA_LEVEL_TEMP,
        }
    }
}
