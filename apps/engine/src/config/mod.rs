//! Engine configuration.

pub mod engine;

pub use engine::{EngineConfig, Timings};
