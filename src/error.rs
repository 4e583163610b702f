use thiserror::Error;

/// Configuration errors reported at construction time. Lookup misses are not
/// errors; they surface as `None`/`false` from the operation itself.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The requested maximum level is zero or beyond [`crate::MAX_LEVEL_LIMIT`].
    #[error("invalid maximum level: {0}")]
    InvalidMaxLevel(usize),

    /// The upgrade probability is outside the open interval (0, 1).
    #[error("invalid upgrade probability: {0}")]
    InvalidProbability(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
