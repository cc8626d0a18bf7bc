use thiserror::Error;

/// Error raised by the cardinality-checking terminal operators.
///
/// Every other failure mode of a pipeline originates in caller-supplied
/// closures and propagates as a panic; the library introduces no error
/// values of its own beyond these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A terminal expected exactly one element but the sequence produced
    /// none.
    #[error("expected exactly one element, but the sequence is empty")]
    NoElements,
    /// A terminal expected exactly one element but the sequence produced
    /// more than one.
    #[error("expected exactly one element, but the sequence contains more")]
    MultipleElements,
}

pub type Result<T> = std::result::Result<T, Error>;
