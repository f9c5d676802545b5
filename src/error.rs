use thiserror::Error;

/// Recoverable failures of the predictor and its surroundings.
///
/// Every operation returning this error checks its arguments before touching any state,
/// so a layer is left exactly as it was when one of these comes back.
/// The exception is training: steps that succeeded before the failing one are not rolled back.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{context} dimension mismatch: expected {expected} actual {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid learning rate {0}, must be positive")]
    InvalidLearningRate(f64),

    #[error("epoch count must be positive")]
    InvalidEpochCount,

    #[error("training did not converge within {epochs} epochs")]
    NotConverged { epochs: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
