pub const GRAVITY: f64 = 9.80665; // m/s^2
pub const AIR_GAS_CONSTANT: f64 = 287.05287; // J/(kg·K)
pub const AIR_GAMMA: f64 = 1.4; // ratio of specific heats
pub const ISA_SEA_LEVEL_TEMP: f64 = 288.15; // K
pub const ISA_SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa
pub const ISA_SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const ISA_LAPSE_RATE: f64 = -0.0065; // K/m

// Earth models
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0; // m
pub const WGS84_ECCENTRICITY_SQ: f64 = 6.694_379_990_14e-3;
pub const EARTH_MEAN_RADIUS: f64 = 6_371_008.8; // m

// Numerical guards
pub const MIN_AIRSPEED: f64 = 1e-3; // m/s, below this alpha/beta are held at zero
pub const GIMBAL_EPSILON: f64 = 1e-6; // floor on |cos(theta)| for Euler rate conversion
pub const MIN_COS_LATITUDE: f64 = 1e-9; // floor on |cos(lat)| for longitude rate
pub const MACH_COMPRESSIBILITY_LIMIT: f64 = 0.95; // Prandtl-Glauert is evaluated at or below this
pub const MAX_TURN_COMP_BANK: f64 = 80.0 * std::f64::consts::PI / 180.0; // rad
