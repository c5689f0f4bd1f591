//! The indexed element store.
//!
//! `IndexedMap` behaves like an unbounded ordered map from index to value,
//! but picks its backing representation from observed density:
//!
//! - **Empty**: nothing allocated.
//! - **Dense**: `Vec<Option<V>>` addressed directly by index, plus a count
//!   of live (non-hole) slots.
//! - **Sparse**: `BTreeMap<u64, V>`, used for low density and for indices
//!   outside the dense-addressable range.
//!
//! Transitions happen on `put`, on `remove`, and on an explicit
//! [`IndexedMap::update_length`]. None of them loses an entry or changes
//! iteration order, because a dense slot number *is* its key.

use std::collections::BTreeMap;
use std::iter::Rev;

use crate::index::is_valid_index;
use crate::iter::Entries;
use crate::ElementsError;

/// Largest dense capacity, and exclusive bound of the dense-addressable
/// index range (`2^31 / 16`).
pub const MAX_DENSE_CAPACITY: usize = (1 << 31) / 16;

/// A dense store is abandoned once `capacity / count` exceeds this ratio.
pub const SPARSENESS_RATIO: usize = 8;

/// Capacity at or below which the sparseness ratio is not checked, and
/// below which dense compaction never trims.
pub const MIN_SPARSE_CHECK: usize = 32;

/// Smallest capacity a dense store grows to.
pub const MIN_DENSE_CAPACITY: usize = 8;

/// Observable backing representation of an [`IndexedMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Representation {
    Empty,
    Dense,
    Sparse,
}

#[derive(Clone, Debug)]
struct DenseSlots<V> {
    slots: Vec<Option<V>>,
    count: usize,
}

impl<V> DenseSlots<V> {
    fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        DenseSlots { slots, count: 0 }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn is_too_sparse(&self) -> bool {
        let capacity = self.capacity();
        capacity > MIN_SPARSE_CHECK && capacity > self.count.saturating_mul(SPARSENESS_RATIO)
    }

    /// One past the highest live slot, or zero.
    fn live_len(&self) -> usize {
        self.slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1)
    }

    fn into_sparse(self) -> BTreeMap<u64, V> {
        self.slots
            .into_iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|v| (i as u64, v)))
            .collect()
    }
}

#[derive(Clone, Debug)]
enum Repr<V> {
    Empty,
    Dense(DenseSlots<V>),
    Sparse(BTreeMap<u64, V>),
}

/// Integer-keyed element storage with a derived logical length.
#[derive(Clone, Debug)]
pub struct IndexedMap<V> {
    length: u64,
    repr: Repr<V>,
}

impl<V> Default for IndexedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dense storage is worth it while more than half of `[0, length)` is live.
fn dense_worthy(count: usize, length: u64) -> bool {
    length <= MAX_DENSE_CAPACITY as u64 && (count as u64).saturating_mul(2) > length
}

impl<V> IndexedMap<V> {
    /// Create an empty store.
    pub const fn new() -> Self {
        IndexedMap {
            length: 0,
            repr: Repr::Empty,
        }
    }

    /// Smallest upper bound on live indices (zero when empty).
    #[inline]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Number of live entries.
    #[inline]
    pub fn count(&self) -> usize {
        match &self.repr {
            Repr::Empty => 0,
            Repr::Dense(dense) => dense.count,
            Repr::Sparse(map) => map.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self.repr, Repr::Sparse(_))
    }

    #[inline]
    pub fn representation(&self) -> Representation {
        match self.repr {
            Repr::Empty => Representation::Empty,
            Repr::Dense(_) => Representation::Dense,
            Repr::Sparse(_) => Representation::Sparse,
        }
    }

    /// Dense slot count, or zero when not dense.
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Dense(dense) => dense.capacity(),
            Repr::Empty | Repr::Sparse(_) => 0,
        }
    }

    /// Look up a live entry.
    pub fn get(&self, index: u64) -> Option<&V> {
        match &self.repr {
            Repr::Empty => None,
            Repr::Dense(dense) => usize::try_from(index)
                .ok()
                .and_then(|i| dense.slots.get(i))
                .and_then(Option::as_ref),
            Repr::Sparse(map) => map.get(&index),
        }
    }

    pub fn get_mut(&mut self, index: u64) -> Option<&mut V> {
        match &mut self.repr {
            Repr::Empty => None,
            Repr::Dense(dense) => usize::try_from(index)
                .ok()
                .and_then(|i| dense.slots.get_mut(i))
                .and_then(Option::as_mut),
            Repr::Sparse(map) => map.get_mut(&index),
        }
    }

    pub fn contains(&self, index: u64) -> bool {
        self.get(index).is_some()
    }

    /// Store `value` at `index`, returning the value it replaced.
    ///
    /// Indices inside the dense-addressable range take the small-put path,
    /// which may switch representation in either direction. Larger indices
    /// force the sparse representation.
    pub fn put(&mut self, index: u64, value: V) -> Result<Option<V>, ElementsError> {
        if !is_valid_index(index) {
            return Err(ElementsError::InvalidIndex { index });
        }
        let previous = match usize::try_from(index) {
            Ok(small) if small < MAX_DENSE_CAPACITY => self.small_put(small, value),
            _ => self.large_put(index, value),
        };
        Ok(previous)
    }

    fn small_put(&mut self, index: usize, value: V) -> Option<V> {
        debug_assert!(index < MAX_DENSE_CAPACITY, "index {index} is not dense-addressable");
        let key = index as u64;
        let new_length = self.length.max(key + 1);

        if !matches!(self.repr, Repr::Dense(_)) {
            let count_after = self.count() + usize::from(!self.contains(key));
            if dense_worthy(count_after, new_length) {
                self.convert_to_dense(new_length);
            }
        } else if let Repr::Dense(dense) = &self.repr {
            // Growth that would immediately cross the sparseness ratio goes
            // sparse without allocating the larger array first.
            if index >= dense.capacity() {
                let grown = grown_capacity(index);
                if grown > MIN_SPARSE_CHECK
                    && grown > (dense.count + 1).saturating_mul(SPARSENESS_RATIO)
                {
                    self.convert_to_sparse();
                }
            }
        }

        let previous = if let Repr::Dense(dense) = &mut self.repr {
            if index >= dense.capacity() {
                dense.slots.resize_with(grown_capacity(index), || None);
            }
            let previous = dense.slots[index].replace(value);
            if previous.is_none() {
                dense.count += 1;
            }
            previous
        } else {
            let mut map = self.take_sparse();
            let previous = map.insert(key, value);
            self.repr = Repr::Sparse(map);
            previous
        };
        self.length = new_length;

        if let Repr::Dense(dense) = &self.repr {
            if dense.is_too_sparse() {
                self.convert_to_sparse();
            }
        }
        previous
    }

    fn large_put(&mut self, index: u64, value: V) -> Option<V> {
        let mut map = self.take_sparse();
        let previous = map.insert(index, value);
        self.repr = Repr::Sparse(map);
        self.length = self.length.max(index + 1);
        previous
    }

    /// Delete the entry at `index` and recompute length and representation.
    pub fn remove(&mut self, index: u64) -> Option<V> {
        let removed = self.remove_unchecked(index);
        if removed.is_some() {
            self.update_length();
        }
        removed
    }

    /// Delete the entry at `index` without recomputing anything.
    ///
    /// `length` may be stale afterwards; callers batching deletions must
    /// finish with [`update_length`](Self::update_length).
    pub fn remove_unchecked(&mut self, index: u64) -> Option<V> {
        match &mut self.repr {
            Repr::Empty => None,
            Repr::Dense(dense) => {
                let slot = usize::try_from(index)
                    .ok()
                    .and_then(|i| dense.slots.get_mut(i))?;
                let removed = slot.take();
                if removed.is_some() {
                    dense.count -= 1;
                }
                removed
            }
            Repr::Sparse(map) => map.remove(&index),
        }
    }

    /// Delete every entry at or above `new_length`.
    ///
    /// Only shrinks; a `new_length` at or past the current length is a no-op.
    pub fn truncate(&mut self, new_length: u64) {
        if new_length >= self.length {
            return;
        }
        match &mut self.repr {
            Repr::Empty => {}
            Repr::Dense(dense) => {
                let capacity = dense.capacity();
                let start = usize::try_from(new_length).map_or(capacity, |n| n.min(capacity));
                let removed = dense.slots[start..]
                    .iter_mut()
                    .filter_map(Option::take)
                    .count();
                dense.count -= removed;
            }
            Repr::Sparse(map) => {
                drop(map.split_off(&new_length));
            }
        }
        self.update_length();
    }

    /// Re-derive `length` from the highest live key and re-evaluate the
    /// representation with the same thresholds `put` uses.
    pub fn update_length(&mut self) {
        match &mut self.repr {
            Repr::Empty => self.length = 0,
            Repr::Dense(dense) => {
                let live_len = dense.live_len();
                if live_len == 0 {
                    self.repr = Repr::Empty;
                    self.length = 0;
                    return;
                }
                self.length = live_len as u64;

                let capacity = dense.capacity();
                let trailing = capacity - live_len;
                if capacity > MIN_SPARSE_CHECK && trailing > capacity / 4 {
                    tracing::trace!(capacity, live_len, "elements: trimming trailing holes");
                    dense.slots.truncate(live_len);
                    dense.slots.shrink_to_fit();
                }
                if dense.is_too_sparse() {
                    self.convert_to_sparse();
                }
            }
            Repr::Sparse(map) => {
                let Some((&last, _)) = map.last_key_value() else {
                    self.repr = Repr::Empty;
                    self.length = 0;
                    return;
                };
                self.length = last + 1;
                if dense_worthy(map.len(), self.length) {
                    self.convert_to_dense(self.length);
                }
            }
        }
    }

    fn convert_to_sparse(&mut self) {
        let map = self.take_sparse();
        self.repr = Repr::Sparse(map);
    }

    /// Move the entries out as an ordered map, leaving the store `Empty`.
    fn take_sparse(&mut self) -> BTreeMap<u64, V> {
        match std::mem::replace(&mut self.repr, Repr::Empty) {
            Repr::Empty => BTreeMap::new(),
            Repr::Dense(dense) => {
                tracing::debug!(
                    capacity = dense.capacity(),
                    count = dense.count,
                    "elements: dense -> sparse"
                );
                dense.into_sparse()
            }
            Repr::Sparse(map) => map,
        }
    }

    /// Materialize a flat array of `length` slots holding every live entry.
    fn convert_to_dense(&mut self, length: u64) {
        debug_assert!(length <= MAX_DENSE_CAPACITY as u64);
        let dense = match std::mem::replace(&mut self.repr, Repr::Empty) {
            Repr::Dense(existing) => existing,
            Repr::Empty => DenseSlots::with_capacity(dense_capacity_for(length)),
            Repr::Sparse(map) => {
                tracing::debug!(count = map.len(), length, "elements: sparse -> dense");
                let mut dense = DenseSlots::with_capacity(dense_capacity_for(length));
                for (key, value) in map {
                    if let Some(slot) = usize::try_from(key).ok().and_then(|k| dense.slots.get_mut(k)) {
                        *slot = Some(value);
                        dense.count += 1;
                    }
                }
                dense
            }
        };
        self.repr = Repr::Dense(dense);
    }

    /// All live entries in ascending key order.
    pub fn iter(&self) -> Entries<'_, V> {
        self.entries(0, u64::MAX)
    }

    /// Live entries with keys in `[from, to)`, ascending.
    pub fn ascending(&self, from: u64, to: u64) -> Result<Entries<'_, V>, ElementsError> {
        check_range(from, to)?;
        Ok(self.entries(from, to))
    }

    /// Live entries with keys in `[from, to)`, descending.
    pub fn descending(&self, from: u64, to: u64) -> Result<Rev<Entries<'_, V>>, ElementsError> {
        check_range(from, to)?;
        Ok(self.entries(from, to).rev())
    }

    /// Keys of all live entries as decimal strings, ascending.
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }

    /// Keys of live entries in `[from, to)` as decimal strings, ascending.
    pub fn keys_in(&self, from: u64, to: u64) -> Result<Vec<String>, ElementsError> {
        Ok(self
            .ascending(from, to)?
            .map(|(key, _)| key.to_string())
            .collect())
    }

    fn entries(&self, from: u64, to: u64) -> Entries<'_, V> {
        match &self.repr {
            Repr::Empty => Entries::empty(),
            Repr::Dense(dense) => Entries::dense(&dense.slots, from, to),
            Repr::Sparse(map) => Entries::sparse(map.range(from..to)),
        }
    }
}

/// Capacity a dense store grows to so that `index` fits.
fn grown_capacity(index: usize) -> usize {
    (index + 1).next_power_of_two().max(MIN_DENSE_CAPACITY)
}

fn dense_capacity_for(length: u64) -> usize {
    usize::try_from(length).map_or(MAX_DENSE_CAPACITY, |l| l.min(MAX_DENSE_CAPACITY))
}

fn check_range(from: u64, to: u64) -> Result<(), ElementsError> {
    if from > to {
        return Err(ElementsError::InvalidRange { from, to });
    }
    Ok(())
}
