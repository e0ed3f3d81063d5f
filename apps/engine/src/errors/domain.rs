//! Domain-level error type used across the pure session logic.
//!
//! This error type is transport-agnostic. Service entry points return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds for business-rule violations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// An operation was attempted in the wrong session phase.
    PhaseMismatch,
    /// The conversation has not signalled readiness for card selection.
    NotReady,
    /// Confirmation requires exactly a full selection.
    SelectionIncomplete,
    /// The toggled card is not part of the dealt spread.
    CardNotInSpread,
    /// The source deck cannot cover the spread size.
    DeckTooSmall,
    Other(String),
}

impl ValidationKind {
    /// Stable machine-readable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationKind::PhaseMismatch => "PHASE_MISMATCH",
            ValidationKind::NotReady => "NOT_READY",
            ValidationKind::SelectionIncomplete => "SELECTION_INCOMPLETE",
            ValidationKind::CardNotInSpread => "CARD_NOT_IN_SPREAD",
            ValidationKind::DeckTooSmall => "DECK_TOO_SMALL",
            ValidationKind::Other(_) => "VALIDATION_OTHER",
        }
    }
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::Other("OTHER".into()), detail.into())
    }
}
