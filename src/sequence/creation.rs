use super::sequence_core::Sequence;

impl<'a, T: 'a> Sequence<'a, T> {
    /// Wrap a source collection in a sequence without iterating it.
    ///
    /// Anything that can be traversed once in finite time works: a `Vec`,
    /// a slice iterator, a set, a map, another adapter. The source is
    /// pulled element by element, only when a terminal operator (or an
    /// eager stage such as [`Sequence::distinct`]) demands it.
    pub fn from<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            producer: Box::new(source.into_iter()),
        }
    }

    /// A sequence producing no elements.
    pub fn empty() -> Self {
        Self {
            producer: Box::new(std::iter::empty()),
        }
    }

    /// A sequence producing a single element.
    pub fn one(item: T) -> Self {
        Self {
            producer: Box::new(std::iter::once(item)),
        }
    }

    pub(crate) fn from_boxed(producer: Box<dyn Iterator<Item = T> + 'a>) -> Self {
        Self { producer }
    }
}
