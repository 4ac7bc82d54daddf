mod assertions;
mod fixtures;

pub use assertions::{assert_angle_eq, assert_state_valid};
pub use fixtures::*;
