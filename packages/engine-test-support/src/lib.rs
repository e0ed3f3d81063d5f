//! Engine test support utilities
//!
//! This crate provides utilities shared by the engine's unit and integration
//! tests, currently unified logging initialization.

pub mod test_logging;
