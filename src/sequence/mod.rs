mod creation;
mod iter;
mod ordered;
mod sequence_core;

pub use ordered::OrderedSequence;
pub use sequence_core::Sequence;
