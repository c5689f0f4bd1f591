//! Lazy views over live element entries.

use std::collections::btree_map;
use std::iter::FusedIterator;

/// Live `(index, value)` pairs over a half-open key range, in key order.
///
/// Reverse it (`.rev()`) for descending order. Holes in a dense store are
/// skipped; the sequence is finite and not restartable.
pub struct Entries<'a, V> {
    inner: EntriesInner<'a, V>,
}

enum EntriesInner<'a, V> {
    Empty,
    Dense {
        slots: &'a [Option<V>],
        front: usize,
        back: usize,
    },
    Sparse(btree_map::Range<'a, u64, V>),
}

impl<'a, V> Entries<'a, V> {
    pub(crate) fn empty() -> Self {
        Entries {
            inner: EntriesInner::Empty,
        }
    }

    pub(crate) fn dense(slots: &'a [Option<V>], from: u64, to: u64) -> Self {
        let clamp = |bound: u64| usize::try_from(bound).map_or(slots.len(), |b| b.min(slots.len()));
        Entries {
            inner: EntriesInner::Dense {
                slots,
                front: clamp(from),
                back: clamp(to),
            },
        }
    }

    pub(crate) fn sparse(range: btree_map::Range<'a, u64, V>) -> Self {
        Entries {
            inner: EntriesInner::Sparse(range),
        }
    }
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Empty => None,
            EntriesInner::Dense { slots, front, back } => {
                let slots: &'a [Option<V>] = *slots;
                while *front < *back {
                    let index = *front;
                    *front += 1;
                    if let Some(value) = &slots[index] {
                        return Some((index as u64, value));
                    }
                }
                None
            }
            EntriesInner::Sparse(range) => range.next().map(|(&k, v)| (k, v)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            EntriesInner::Empty => (0, Some(0)),
            EntriesInner::Dense { front, back, .. } => (0, Some(back.saturating_sub(*front))),
            EntriesInner::Sparse(range) => range.size_hint(),
        }
    }
}

impl<'a, V> DoubleEndedIterator for Entries<'a, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Empty => None,
            EntriesInner::Dense { slots, front, back } => {
                let slots: &'a [Option<V>] = *slots;
                while *back > *front {
                    *back -= 1;
                    if let Some(value) = &slots[*back] {
                        return Some((*back as u64, value));
                    }
                }
                None
            }
            EntriesInner::Sparse(range) => range.next_back().map(|(&k, v)| (k, v)),
        }
    }
}

impl<V> FusedIterator for Entries<'_, V> {}
