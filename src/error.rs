use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Invariant violations reported by [`Validate`](crate::prelude::Validate).
///
/// None of the map operations return these; a well-formed map never produces one.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("keys are not in strictly ascending order")]
    OrderViolation,

    #[error("cached height {cached} does not match computed height {computed}")]
    HeightMismatch { cached: usize, computed: usize },

    #[error("cached length {cached} does not match node count {counted}")]
    LengthMismatch { cached: usize, counted: usize },
}
