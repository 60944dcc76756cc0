//! Rater-construction error type.

use thiserror::Error;

/// Errors produced by `dn-rating` builders.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("max ticks off must be positive")]
    NonPositiveMaxTicksOff,
}

pub type RatingResult<T> = Result<T, RatingError>;
