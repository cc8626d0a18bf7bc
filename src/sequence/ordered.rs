use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use ahash::HashMap;
use ordered_float::OrderedFloat;

use crate::error;

use super::iter::SortIter;
use super::sequence_core::Sequence;

/// Sort direction of a single ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Ascending,
    Descending,
}

/// One (key comparator, direction) pair of an ordering stage.
///
/// The caller's key extractor is erased into a pairwise comparator here,
/// which is what lets keys of different types stack up in one `Vec`.
pub(crate) struct SortKey<'a, T> {
    compare: Box<dyn Fn(&T, &T) -> Ordering + 'a>,
    direction: Direction,
}

impl<'a, T> SortKey<'a, T> {
    pub(crate) fn by_key<K: Ord>(key: impl Fn(&T) -> K + 'a, direction: Direction) -> Self {
        Self {
            compare: Box::new(move |a, b| key(a).cmp(&key(b))),
            direction,
        }
    }

    pub(crate) fn by_float_key(key: impl Fn(&T) -> f64 + 'a, direction: Direction) -> Self {
        Self {
            // OrderedFloat turns the partial f64 order into a total one;
            // NaN sorts greatest
            compare: Box::new(move |a, b| OrderedFloat(key(a)).cmp(&OrderedFloat(key(b)))),
            direction,
        }
    }

    pub(crate) fn by_compare(
        compare: impl Fn(&T, &T) -> Ordering + 'a,
        direction: Direction,
    ) -> Self {
        Self {
            compare: Box::new(compare),
            direction,
        }
    }

    fn ordering(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.compare)(a, b);
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }

    /// Lexicographic comparison over the key list: the first key decides,
    /// each later key only breaks ties left by its predecessors.
    pub(crate) fn composite(keys: &[SortKey<'a, T>], a: &T, b: &T) -> Ordering {
        for key in keys {
            let ordering = key.ordering(a, b);
            if !ordering.is_eq() {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl<T> fmt::Debug for SortKey<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey")
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// A sequence with one or more pending ordering keys.
///
/// Produced by the `order_by` family on [`Sequence`]. Appending a key with
/// the `then_by` family never pulls an element; the accumulated keys are
/// applied as one stable, lexicographic sort the first time a downstream
/// consumer pulls. The `then_by` family exists only on this type, so a
/// tie-break key can never be attached to a sequence that has no primary
/// key.
///
/// `OrderedSequence` is not a subtype of [`Sequence`]; it holds one,
/// together with the pending keys, and delegates every combinator and
/// terminal operator through [`OrderedSequence::into_sequence`].
pub struct OrderedSequence<'a, T> {
    source: Sequence<'a, T>,
    keys: Vec<SortKey<'a, T>>,
}

impl<'a, T: 'a> OrderedSequence<'a, T> {
    pub(crate) fn new(source: Sequence<'a, T>, key: SortKey<'a, T>) -> Self {
        Self {
            source,
            keys: vec![key],
        }
    }

    /// Append an ascending tie-break key to the pending sort.
    pub fn then_by<K: Ord>(mut self, key: impl Fn(&T) -> K + 'a) -> Self {
        self.keys.push(SortKey::by_key(key, Direction::Ascending));
        self
    }

    /// Append a descending tie-break key to the pending sort.
    pub fn then_by_desc<K: Ord>(mut self, key: impl Fn(&T) -> K + 'a) -> Self {
        self.keys.push(SortKey::by_key(key, Direction::Descending));
        self
    }

    /// Append an ascending floating-point tie-break key.
    pub fn then_by_float(mut self, key: impl Fn(&T) -> f64 + 'a) -> Self {
        self.keys
            .push(SortKey::by_float_key(key, Direction::Ascending));
        self
    }

    /// Append a descending floating-point tie-break key.
    pub fn then_by_float_desc(mut self, key: impl Fn(&T) -> f64 + 'a) -> Self {
        self.keys
            .push(SortKey::by_float_key(key, Direction::Descending));
        self
    }

    /// Append a tie-break key given as a three-way comparator.
    pub fn then_by_with(mut self, compare: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        self.keys
            .push(SortKey::by_compare(compare, Direction::Ascending));
        self
    }

    /// Re-expose the pipeline as a plain [`Sequence`] for further
    /// chaining.
    ///
    /// The sort still has not run; it fires inside the returned sequence
    /// when the first element is pulled.
    pub fn into_sequence(self) -> Sequence<'a, T> {
        Sequence::from_boxed(Box::new(SortIter::new(self.source.producer, self.keys)))
    }

    // every combinator and terminal of Sequence, by delegation

    /// See [`Sequence::filter`].
    pub fn filter(self, predicate: impl FnMut(&T) -> bool + 'a) -> Sequence<'a, T> {
        self.into_sequence().filter(predicate)
    }

    /// See [`Sequence::map`].
    pub fn map<U: 'a>(self, projection: impl FnMut(T) -> U + 'a) -> Sequence<'a, U> {
        self.into_sequence().map(projection)
    }

    /// See [`Sequence::distinct`].
    pub fn distinct(self) -> Sequence<'a, T>
    where
        T: Eq + Hash + Clone,
    {
        self.into_sequence().distinct()
    }

    /// See [`Sequence::except`].
    pub fn except<I>(self, other: I) -> Sequence<'a, T>
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        self.into_sequence().except(other)
    }

    /// See [`Sequence::intersect`].
    pub fn intersect<I>(self, other: I) -> Sequence<'a, T>
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        self.into_sequence().intersect(other)
    }

    /// See [`Sequence::concat`].
    pub fn concat(self, other: Sequence<'a, T>) -> Sequence<'a, T> {
        self.into_sequence().concat(other)
    }

    /// See [`Sequence::reversed`].
    pub fn reversed(self) -> Sequence<'a, T> {
        self.into_sequence().reversed()
    }

    /// Begin a fresh ordering stage over the sorted result.
    ///
    /// This is a new sort, not a tie-break; use the `then_by` family to
    /// refine the pending one.
    pub fn order_by<K: Ord>(self, key: impl Fn(&T) -> K + 'a) -> OrderedSequence<'a, T> {
        self.into_sequence().order_by(key)
    }

    /// See [`Sequence::order_by_desc`].
    pub fn order_by_desc<K: Ord>(self, key: impl Fn(&T) -> K + 'a) -> OrderedSequence<'a, T> {
        self.into_sequence().order_by_desc(key)
    }

    /// See [`Sequence::order_by_float`].
    pub fn order_by_float(self, key: impl Fn(&T) -> f64 + 'a) -> OrderedSequence<'a, T> {
        self.into_sequence().order_by_float(key)
    }

    /// See [`Sequence::order_by_float_desc`].
    pub fn order_by_float_desc(self, key: impl Fn(&T) -> f64 + 'a) -> OrderedSequence<'a, T> {
        self.into_sequence().order_by_float_desc(key)
    }

    /// See [`Sequence::order_by_with`].
    pub fn order_by_with(
        self,
        compare: impl Fn(&T, &T) -> Ordering + 'a,
    ) -> OrderedSequence<'a, T> {
        self.into_sequence().order_by_with(compare)
    }

    /// See [`Sequence::any`].
    pub fn any(self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.into_sequence().any(predicate)
    }

    /// See [`Sequence::all`].
    pub fn all(self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.into_sequence().all(predicate)
    }

    /// See [`Sequence::count`].
    pub fn count(self) -> usize {
        self.into_sequence().count()
    }

    /// See [`Sequence::count_where`].
    pub fn count_where(self, predicate: impl FnMut(&T) -> bool) -> usize {
        self.into_sequence().count_where(predicate)
    }

    /// The least element under the pending sort, if any.
    pub fn first(self) -> Option<T> {
        self.into_sequence().first()
    }

    /// See [`Sequence::first_where`].
    pub fn first_where(self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.into_sequence().first_where(predicate)
    }

    /// The greatest element under the pending sort, if any.
    pub fn last(self) -> Option<T> {
        self.into_sequence().last()
    }

    /// See [`Sequence::last_where`].
    pub fn last_where(self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.into_sequence().last_where(predicate)
    }

    /// See [`Sequence::single`].
    pub fn single(self) -> error::Result<T> {
        self.into_sequence().single()
    }

    /// See [`Sequence::single_where`].
    pub fn single_where(self, predicate: impl FnMut(&T) -> bool) -> error::Result<T> {
        self.into_sequence().single_where(predicate)
    }

    /// See [`Sequence::is_empty`].
    pub fn is_empty(self) -> bool {
        self.into_sequence().is_empty()
    }

    /// See [`Sequence::for_each`].
    pub fn for_each(self, action: impl FnMut(T)) {
        self.into_sequence().for_each(action)
    }

    /// See [`Sequence::for_each_rev`].
    pub fn for_each_rev(self, action: impl FnMut(T)) {
        self.into_sequence().for_each_rev(action)
    }

    /// See [`Sequence::to_vec`].
    pub fn to_vec(self) -> Vec<T> {
        self.into_sequence().to_vec()
    }

    /// See [`Sequence::to_map`].
    pub fn to_map<K>(self, key: impl FnMut(&T) -> K) -> HashMap<K, T>
    where
        K: Eq + Hash,
    {
        self.into_sequence().to_map(key)
    }
}

impl<'a, T: 'a> IntoIterator for OrderedSequence<'a, T> {
    type Item = T;
    type IntoIter = Box<dyn Iterator<Item = T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_sequence().into_iter()
    }
}

impl<T> fmt::Debug for OrderedSequence<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedSequence")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_first_key_decides() {
        let keys = vec![
            SortKey::by_key(|value: &(i32, i32)| value.0, Direction::Ascending),
            SortKey::by_key(|value: &(i32, i32)| value.1, Direction::Ascending),
        ];
        assert_eq!(
            SortKey::composite(&keys, &(1, 9), &(2, 0)),
            Ordering::Less
        );
        assert_eq!(
            SortKey::composite(&keys, &(1, 9), &(1, 0)),
            Ordering::Greater
        );
        assert_eq!(SortKey::composite(&keys, &(1, 9), &(1, 9)), Ordering::Equal);
    }

    #[test]
    fn test_then_by_does_not_pull() {
        let pulled = std::cell::Cell::new(false);
        let source = vec![2, 1].into_iter().inspect(|_| pulled.set(true));
        let ordered = Sequence::from(source)
            .order_by(|&value| value)
            .then_by_desc(|&value| value);
        assert!(!pulled.get());
        assert_eq!(ordered.to_vec(), vec![1, 2]);
        assert!(pulled.get());
    }

    #[test]
    fn test_float_keys_total_order() {
        let values = vec![2.5_f64, f64::NAN, 0.5];
        let sorted = Sequence::from(values).order_by_float(|&value| value).to_vec();
        assert_eq!(sorted[0], 0.5);
        assert_eq!(sorted[1], 2.5);
        assert!(sorted[2].is_nan());
    }
}
