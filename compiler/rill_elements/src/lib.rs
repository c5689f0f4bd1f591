//! Rill Elements - adaptive storage for integer-indexed properties.
//!
//! This crate provides:
//! - `IndexedMap`: a dense/sparse element store with a derived length
//! - Index predicates used by the object system to route property keys
//!   (`to_index`, `is_index_32`, `is_index_64`, `index_from_number`)
//! - `Entries`: ordered, lazy views over live entries
//!
//! # Representation
//!
//! The store starts `Empty`, goes `Dense` while more than half of its
//! index range is populated, and goes `Sparse` once the dense array's
//! `capacity / count` ratio passes 8 (checked only above 32 slots) or an
//! index lands outside the dense-addressable range. Readers never see the
//! difference: `get`, `keys` and both iteration orders are identical
//! across representations.

mod index;
mod iter;
mod store;

pub use index::{index_from_number, is_index_32, is_index_64, is_valid_index, to_index, MAX_INDEX};
pub use iter::Entries;
pub use store::{
    IndexedMap, Representation, MAX_DENSE_CAPACITY, MIN_DENSE_CAPACITY, MIN_SPARSE_CHECK,
    SPARSENESS_RATIO,
};

/// Failures raised synchronously by the element store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ElementsError {
    /// A range argument had `from > to`.
    #[error("invalid element range [{from}, {to})")]
    InvalidRange { from: u64, to: u64 },
    /// A key at or above the index limit reached `put`.
    #[error("{index} is not a valid element index")]
    InvalidIndex { index: u64 },
}
