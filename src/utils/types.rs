/// Three-component double-precision vector used for every body/NED quantity.
pub type Vector3 = nalgebra::Vector3<f64>;
