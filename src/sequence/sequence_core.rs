use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

use crate::error;

use super::iter::{ExceptIter, IntersectIter, ReverseIter};
use super::ordered::{Direction, OrderedSequence, SortKey};

/// A deferred, single-pass run of elements.
///
/// A `Sequence` owns a producer and describes a computation over it;
/// nothing is pulled from the producer until a terminal operator demands
/// results. Combinators take the sequence by value and hand back a new
/// sequence owning a freshly composed producer, so a pipeline is a chain
/// of moves: once a stage has been built on top of a sequence, the
/// original can no longer be observed in an earlier state.
///
/// Terminal operators also consume the sequence. A fully consumed
/// pipeline cannot be queried again; re-derive it from its source.
pub struct Sequence<'a, T> {
    pub(crate) producer: Box<dyn Iterator<Item = T> + 'a>,
}

impl<'a, T: 'a> Sequence<'a, T> {
    /// Keep only the elements for which `predicate` holds.
    ///
    /// Lazy; the predicate runs once per element, at the moment a
    /// downstream consumer pulls that element. Order is preserved.
    pub fn filter(self, predicate: impl FnMut(&T) -> bool + 'a) -> Sequence<'a, T> {
        Sequence {
            producer: Box::new(self.producer.filter(predicate)),
        }
    }

    /// Transform each element with `projection`.
    ///
    /// Lazy; the projection runs once per pulled element, in producer
    /// order.
    pub fn map<U: 'a>(self, projection: impl FnMut(T) -> U + 'a) -> Sequence<'a, U> {
        Sequence {
            producer: Box::new(self.producer.map(projection)),
        }
    }

    /// Remove duplicate elements, keeping the first occurrence of each
    /// value.
    ///
    /// Unlike every other combinator this one evaluates the pipeline built
    /// so far at call time: deduplication needs a completed membership set,
    /// so the producer is drained here and the result replays
    /// first-occurrence order. The stages chained after it are lazy again.
    pub fn distinct(self) -> Sequence<'a, T>
    where
        T: Eq + Hash + Clone,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for value in self.producer {
            if seen.insert(value.clone()) {
                kept.push(value);
            }
        }
        Sequence {
            producer: Box::new(kept.into_iter()),
        }
    }

    /// Keep the elements that are not present in `other`.
    ///
    /// `other` is drained into a membership set once, when the downstream
    /// consumer first pulls. An empty `other` passes everything through.
    /// Duplicates in the receiver are preserved.
    pub fn except<I>(self, other: I) -> Sequence<'a, T>
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Sequence {
            producer: Box::new(ExceptIter::new(self.producer, other.into_iter())),
        }
    }

    /// Keep the elements that are present in `other`.
    ///
    /// `other` is drained into a membership set once, when the downstream
    /// consumer first pulls. An empty `other` produces no elements.
    /// Duplicates in the receiver are preserved.
    pub fn intersect<I>(self, other: I) -> Sequence<'a, T>
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Sequence {
            producer: Box::new(IntersectIter::new(self.producer, other.into_iter())),
        }
    }

    /// Concatenate two sequences producing a new sequence.
    pub fn concat(self, other: Sequence<'a, T>) -> Sequence<'a, T> {
        Sequence {
            producer: Box::new(self.producer.chain(other.producer)),
        }
    }

    /// Reverse the element order.
    ///
    /// Reversal needs the full run, so the producer is buffered on the
    /// first pull and replayed back to front.
    pub fn reversed(self) -> Sequence<'a, T> {
        Sequence {
            producer: Box::new(ReverseIter::new(self.producer)),
        }
    }

    /// Begin an ordering stage, sorting ascending by `key`.
    ///
    /// No element is pulled here; the sort runs when a downstream consumer
    /// first pulls from the returned [`OrderedSequence`]. Chain
    /// [`OrderedSequence::then_by`] to break ties with further keys. The
    /// key closure runs several times per element during the sort and must
    /// be consistent.
    pub fn order_by<K: Ord>(self, key: impl Fn(&T) -> K + 'a) -> OrderedSequence<'a, T> {
        OrderedSequence::new(self, SortKey::by_key(key, Direction::Ascending))
    }

    /// Begin an ordering stage, sorting descending by `key`.
    pub fn order_by_desc<K: Ord>(self, key: impl Fn(&T) -> K + 'a) -> OrderedSequence<'a, T> {
        OrderedSequence::new(self, SortKey::by_key(key, Direction::Descending))
    }

    /// Begin an ordering stage with a floating-point key, ascending.
    ///
    /// Keys are compared under the `OrderedFloat` total order, so NaN keys
    /// sort greatest instead of poisoning the sort.
    pub fn order_by_float(self, key: impl Fn(&T) -> f64 + 'a) -> OrderedSequence<'a, T> {
        OrderedSequence::new(self, SortKey::by_float_key(key, Direction::Ascending))
    }

    /// Begin an ordering stage with a floating-point key, descending.
    pub fn order_by_float_desc(self, key: impl Fn(&T) -> f64 + 'a) -> OrderedSequence<'a, T> {
        OrderedSequence::new(self, SortKey::by_float_key(key, Direction::Descending))
    }

    /// Begin an ordering stage with a caller-supplied three-way
    /// comparator.
    ///
    /// The comparator is the sole source of ordering for this key and must
    /// be a total order; an inconsistent comparator yields an unspecified
    /// (but still complete) element order.
    pub fn order_by_with(
        self,
        compare: impl Fn(&T, &T) -> Ordering + 'a,
    ) -> OrderedSequence<'a, T> {
        OrderedSequence::new(self, SortKey::by_compare(compare, Direction::Ascending))
    }

    // ---- terminal operators ----

    /// Does any element satisfy `predicate`?
    ///
    /// Stops pulling at the first match. False on an empty sequence.
    pub fn any(self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        for value in self.producer {
            if predicate(&value) {
                return true;
            }
        }
        false
    }

    /// Do all elements satisfy `predicate`?
    ///
    /// Stops pulling at the first miss. Vacuously true on an empty
    /// sequence.
    pub fn all(self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        for value in self.producer {
            if !predicate(&value) {
                return false;
            }
        }
        true
    }

    /// Count the elements.
    pub fn count(self) -> usize {
        self.producer.count()
    }

    /// Count the elements satisfying `predicate`.
    pub fn count_where(self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let mut count = 0;
        for value in self.producer {
            if predicate(&value) {
                count += 1;
            }
        }
        count
    }

    /// The first element, if any.
    pub fn first(mut self) -> Option<T> {
        self.producer.next()
    }

    /// The first element satisfying `predicate`, if any.
    ///
    /// Stops pulling at the first match.
    pub fn first_where(mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.producer.find(|value| predicate(value))
    }

    /// The last element, if any.
    ///
    /// Needs a full pass; there is no way to know an element is last
    /// without seeing the one after it not arrive.
    pub fn last(self) -> Option<T> {
        self.producer.last()
    }

    /// The last element satisfying `predicate`, if any. Full pass.
    pub fn last_where(self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        let mut last = None;
        for value in self.producer {
            if predicate(&value) {
                last = Some(value);
            }
        }
        last
    }

    /// The only element.
    ///
    /// Errors with [`error::Error::NoElements`] on an empty sequence and
    /// [`error::Error::MultipleElements`] as soon as a second element
    /// shows up.
    pub fn single(mut self) -> error::Result<T> {
        if let Some(one) = self.producer.next() {
            if self.producer.next().is_none() {
                Ok(one)
            } else {
                Err(error::Error::MultipleElements)
            }
        } else {
            Err(error::Error::NoElements)
        }
    }

    /// The only element satisfying `predicate`.
    ///
    /// Stops pulling as soon as a second match shows up.
    pub fn single_where(self, mut predicate: impl FnMut(&T) -> bool) -> error::Result<T> {
        let mut found = None;
        for value in self.producer {
            if predicate(&value) {
                if found.is_some() {
                    return Err(error::Error::MultipleElements);
                }
                found = Some(value);
            }
        }
        found.ok_or(error::Error::NoElements)
    }

    /// Does the sequence produce no elements?
    ///
    /// Pulls at most one element, then consumes the sequence.
    pub fn is_empty(mut self) -> bool {
        self.producer.next().is_none()
    }

    /// Run `action` once per element, in producer order.
    pub fn for_each(self, mut action: impl FnMut(T)) {
        for value in self.producer {
            action(value);
        }
    }

    /// Run `action` once per element, in reverse producer order.
    ///
    /// Fully materializes first; reverse order requires the complete run.
    pub fn for_each_rev(self, mut action: impl FnMut(T)) {
        let buffered = self.producer.collect::<Vec<_>>();
        for value in buffered.into_iter().rev() {
            action(value);
        }
    }

    /// Materialize into a `Vec`, preserving order.
    pub fn to_vec(self) -> Vec<T> {
        self.producer.collect()
    }

    /// Materialize into a map from `key` to element.
    ///
    /// The caller is responsible for key uniqueness: when two elements
    /// produce the same key, the later one silently overwrites the
    /// earlier entry.
    pub fn to_map<K>(self, mut key: impl FnMut(&T) -> K) -> HashMap<K, T>
    where
        K: Eq + Hash,
    {
        let mut map = HashMap::new();
        for value in self.producer {
            map.insert(key(&value), value);
        }
        map
    }
}

impl<'a, T> IntoIterator for Sequence<'a, T> {
    type Item = T;
    type IntoIter = Box<dyn Iterator<Item = T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.producer
    }
}

impl<T> fmt::Debug for Sequence<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence").finish_non_exhaustive()
    }
}
