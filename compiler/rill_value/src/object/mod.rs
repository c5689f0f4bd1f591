//! Ordinary objects.
//!
//! Integer-like keys live in an adaptive [`IndexedMap`]; every other key is
//! a named property. [`PropertyKey`] does the routing, so `obj["7"]` and
//! `obj[7]` reach the same slot while `obj["07"]` is a name.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rill_elements::{index_from_number, to_index, IndexedMap, Representation};
use rustc_hash::FxHashMap;

use crate::errors::EvalError;
use crate::value::Value;

/// A property key after index classification.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Index(u64),
    Name(String),
}

impl PropertyKey {
    /// Classify a string key.
    pub fn from_name(name: &str) -> Self {
        match to_index(name) {
            Some(index) => PropertyKey::Index(index),
            None => PropertyKey::Name(name.to_string()),
        }
    }

    /// Classify an arbitrary value used as a key.
    pub fn from_value(key: &Value) -> Self {
        match key {
            Value::Number(n) => match index_from_number(*n) {
                Some(index) => PropertyKey::Index(index),
                None => PropertyKey::Name(key.to_display_string()),
            },
            Value::Str(s) => PropertyKey::from_name(s),
            other => PropertyKey::from_name(&other.to_display_string()),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Index(i) => write!(f, "{i}"),
            PropertyKey::Name(n) => f.write_str(n),
        }
    }
}

/// Object storage.
pub struct ObjectData {
    class_name: String,
    names: FxHashMap<String, Value>,
    // Insertion order of `names`.
    order: Vec<String>,
    elements: IndexedMap<Value>,
}

impl ObjectData {
    fn new(class_name: String) -> Self {
        ObjectData {
            class_name,
            names: FxHashMap::default(),
            order: Vec::new(),
            elements: IndexedMap::new(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn elements(&self) -> &IndexedMap<Value> {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut IndexedMap<Value> {
        &mut self.elements
    }
}

/// Shared handle to an ordinary object. Equality is identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<ObjectData>>);

impl ObjectRef {
    pub fn new(class_name: impl Into<String>) -> Self {
        ObjectRef(Arc::new(RwLock::new(ObjectData::new(class_name.into()))))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn class_name(&self) -> String {
        self.0.read().class_name.clone()
    }

    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        let data = self.0.read();
        match key {
            PropertyKey::Index(i) => data.elements.get(*i).cloned(),
            PropertyKey::Name(n) => data.names.get(n).cloned(),
        }
    }

    /// Shorthand for `get(&PropertyKey::from_name(name))`.
    pub fn get_named(&self, name: &str) -> Option<Value> {
        self.get(&PropertyKey::from_name(name))
    }

    /// Store a property, returning the previous value.
    pub fn set(&self, key: PropertyKey, value: Value) -> Result<Option<Value>, EvalError> {
        let mut data = self.0.write();
        match key {
            PropertyKey::Index(i) => Ok(data.elements.put(i, value)?),
            PropertyKey::Name(n) => {
                if !data.names.contains_key(&n) {
                    data.order.push(n.clone());
                }
                Ok(data.names.insert(n, value))
            }
        }
    }

    /// Shorthand for `set(PropertyKey::from_name(name), value)`.
    pub fn set_named(&self, name: &str, value: Value) -> Result<Option<Value>, EvalError> {
        self.set(PropertyKey::from_name(name), value)
    }

    pub fn delete(&self, key: &PropertyKey) -> bool {
        let mut data = self.0.write();
        match key {
            PropertyKey::Index(i) => data.elements.remove(*i).is_some(),
            PropertyKey::Name(n) => {
                let removed = data.names.remove(n).is_some();
                if removed {
                    data.order.retain(|k| k != n);
                }
                removed
            }
        }
    }

    /// Own keys: indices ascending, then names in insertion order.
    pub fn own_keys(&self) -> Vec<String> {
        let data = self.0.read();
        let mut keys = data.elements.keys();
        keys.extend(data.order.iter().cloned());
        keys
    }

    /// One past the largest element index.
    pub fn element_length(&self) -> u64 {
        self.0.read().elements.length()
    }

    pub fn element_representation(&self) -> Representation {
        self.0.read().elements.representation()
    }

    /// Run `f` with shared access to the object's storage.
    pub fn with<R>(&self, f: impl FnOnce(&ObjectData) -> R) -> R {
        f(&self.0.read())
    }

    /// Run `f` with exclusive access to the object's storage.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut ObjectData) -> R) -> R {
        f(&mut self.0.write())
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.read();
        write!(
            f,
            "Object({}, {} elements, {} names)",
            data.class_name,
            data.elements.count(),
            data.names.len()
        )
    }
}
