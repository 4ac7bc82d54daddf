pub mod constants;
pub mod errors;
pub mod euler;
pub mod math;
pub mod quaternion;
pub mod types;

pub use constants::*;
pub use errors::*;
pub use euler::Euler;
pub use math::*;
pub use quaternion::Quaternion;
pub use types::*;
