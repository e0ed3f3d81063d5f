//! Error types that are independent of any transport or storage layer.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
