pub mod error;
mod sequence;

pub use crate::error::{Error, Result};
pub use crate::sequence::{OrderedSequence, Sequence};

pub use ahash::HashMap;
