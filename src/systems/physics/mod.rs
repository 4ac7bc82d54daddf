mod eom;

pub use eom::{EomFiveDof, EomParams};
