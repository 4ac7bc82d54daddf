use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Module '{name}' failed: {source}")]
    Module {
        name: String,
        #[source]
        source: Box<SimError>,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Failures of the two-point aerodynamic calibration. The model is left
/// with zeroed coefficients whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("expected one or two calibration points, got {0}")]
    PointCount(usize),

    #[error("calibration points share the same alpha ({alpha} rad), lift slope is undefined")]
    DegenerateAlpha { alpha: f64 },

    #[error("calibration points share the same drag abscissa ({value}), drag slope is undefined")]
    DegenerateDrag { value: f64 },

    #[error("calibration produced a non-finite {0}")]
    NonFinite(&'static str),

    #[error("invalid trim condition: {0}")]
    InvalidCondition(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("table axis '{0}' is empty")]
    EmptyAxis(&'static str),

    #[error("table data has {actual} cells, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("table has {pages} page values but {tables} pages")]
    PageMismatch { pages: usize, tables: usize },
}

pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Attaches the failing module's name to an error raised inside it.
    pub fn in_module(name: &str, err: SimError) -> Self {
        SimError::Module {
            name: name.to_string(),
            source: Box::new(err),
        }
    }
}
