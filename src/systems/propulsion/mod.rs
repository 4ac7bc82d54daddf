mod engine;

pub use engine::{spool_engine, Engine, EngineParams};
