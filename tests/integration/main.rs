#[path = "../common/mod.rs"]
mod common;

mod autopilot;
mod configuration;
mod simulation;
