use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during Euler integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("step size must be finite and positive, got {0}")]
    InvalidStep(f64),

    #[error("time span is NaN")]
    InvalidSpan,

    #[error("{requested} steps requested per direction, limit is {max}")]
    TooManySteps { requested: f64, max: usize },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }
}
