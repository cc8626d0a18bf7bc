use std::hash::Hash;
use std::vec;

use ahash::{HashSet, HashSetExt};

use super::ordered::SortKey;

/// Yields the elements of `iter` that are absent from `other`.
///
/// `other` is drained into a membership set on the first pull, not when
/// the adapter is built; until then the stage costs nothing.
pub(crate) struct ExceptIter<I, J>
where
    I: Iterator,
{
    iter: I,
    other: Option<J>,
    membership: HashSet<I::Item>,
}

impl<I, J> ExceptIter<I, J>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
{
    pub(crate) fn new(iter: I, other: J) -> Self {
        Self {
            iter,
            other: Some(other),
            membership: HashSet::new(),
        }
    }
}

impl<I, J> Iterator for ExceptIter<I, J>
where
    I: Iterator,
    I::Item: Eq + Hash,
    J: Iterator<Item = I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(other) = self.other.take() {
            self.membership = other.collect();
        }
        loop {
            let value = self.iter.next()?;
            if !self.membership.contains(&value) {
                return Some(value);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // any element may be filtered out, so only the upper bound survives
        let (_, upper) = self.iter.size_hint();
        (0, upper)
    }
}

/// Yields the elements of `iter` that are present in `other`.
///
/// Same membership-set strategy as [`ExceptIter`]; an empty `other`
/// produces nothing.
pub(crate) struct IntersectIter<I, J>
where
    I: Iterator,
{
    iter: I,
    other: Option<J>,
    membership: HashSet<I::Item>,
}

impl<I, J> IntersectIter<I, J>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
{
    pub(crate) fn new(iter: I, other: J) -> Self {
        Self {
            iter,
            other: Some(other),
            membership: HashSet::new(),
        }
    }
}

impl<I, J> Iterator for IntersectIter<I, J>
where
    I: Iterator,
    I::Item: Eq + Hash,
    J: Iterator<Item = I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(other) = self.other.take() {
            self.membership = other.collect();
        }
        loop {
            let value = self.iter.next()?;
            if self.membership.contains(&value) {
                return Some(value);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.iter.size_hint();
        (0, upper)
    }
}

/// Replays `source` back to front.
///
/// The source is buffered in full on the first pull; reverse order cannot
/// be produced from a single forward pass.
pub(crate) struct ReverseIter<I>
where
    I: Iterator,
{
    source: Option<I>,
    buffered: std::iter::Rev<vec::IntoIter<I::Item>>,
}

impl<I> ReverseIter<I>
where
    I: Iterator,
{
    pub(crate) fn new(source: I) -> Self {
        Self {
            source: Some(source),
            buffered: Vec::new().into_iter().rev(),
        }
    }
}

impl<I> Iterator for ReverseIter<I>
where
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(source) = self.source.take() {
            self.buffered = source.collect::<Vec<_>>().into_iter().rev();
        }
        self.buffered.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Some(source) => source.size_hint(),
            None => self.buffered.size_hint(),
        }
    }
}

/// The ordering stage's state machine.
///
/// Starts out unsorted, holding the upstream producer and the accumulated
/// sort keys. The first `next()` call drains the producer, stable-sorts
/// the buffer by the lexicographic composite of the keys, and from then
/// on replays the sorted buffer. There is no way back to the unsorted
/// state.
pub(crate) struct SortIter<'a, I>
where
    I: Iterator,
{
    unsorted: Option<(I, Vec<SortKey<'a, I::Item>>)>,
    sorted: vec::IntoIter<I::Item>,
}

impl<'a, I> SortIter<'a, I>
where
    I: Iterator,
{
    pub(crate) fn new(source: I, keys: Vec<SortKey<'a, I::Item>>) -> Self {
        Self {
            unsorted: Some((source, keys)),
            sorted: Vec::new().into_iter(),
        }
    }
}

impl<'a, I> Iterator for SortIter<'a, I>
where
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((source, keys)) = self.unsorted.take() {
            let mut buffer = source.collect::<Vec<_>>();
            // sort_by is stable: full ties keep their original relative order
            buffer.sort_by(|a, b| SortKey::composite(&keys, a, b));
            self.sorted = buffer.into_iter();
        }
        self.sorted.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.unsorted {
            Some((source, _)) => source.size_hint(),
            None => self.sorted.size_hint(),
        }
    }
}
