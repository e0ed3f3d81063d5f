use thiserror::Error;

use crate::errors::domain::DomainError;

/// Engine boundary error.
///
/// The only failure a user ever sees as an error is a rate-limit denial:
/// external-call failures degrade to local fallbacks inside their owning
/// service, and a refused close is a handled `CloseOutcome::Blocked`, not
/// an error. `Validation` and `Config` surface programming and wiring
/// mistakes.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Rate limited: {detail}")]
    RateLimited { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. } => code,
            AppError::RateLimited { .. } => "RATE_LIMITED",
            AppError::Config { .. } => "CONFIG_ERROR",
        }
    }

    pub fn rate_limited(detail: impl Into<String>) -> Self {
        Self::RateLimited {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => AppError::Validation {
                code: kind.code(),
                detail,
            },
        }
    }
}
