//! `rill elements`: build an ordinary object from property keys and report
//! on its element store.

use std::fmt;

use rill_elements::Representation;
use rill_value::{ObjectRef, PropertyKey, Value};

/// Snapshot of an object's element store.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementsReport {
    pub representation: Representation,
    pub length: u64,
    pub keys: Vec<String>,
}

pub fn representation_name(representation: Representation) -> &'static str {
    match representation {
        Representation::Empty => "empty",
        Representation::Dense => "dense",
        Representation::Sparse => "sparse",
    }
}

/// Apply `ops` in order to a fresh object.
///
/// `key` stores the op's position under `key`; `!key` deletes it. Keys
/// that are canonical array indices land in the element store, anything
/// else becomes a named property.
pub fn build_elements<S: AsRef<str>>(ops: &[S]) -> Result<ElementsReport, String> {
    let obj = ObjectRef::new("Object");
    for (position, op) in ops.iter().enumerate() {
        let op = op.as_ref();
        if let Some(key) = op.strip_prefix('!') {
            obj.delete(&PropertyKey::from_name(key));
        } else {
            obj.set(PropertyKey::from_name(op), Value::number(position as f64))
                .map_err(|err| err.to_string())?;
        }
    }
    Ok(ElementsReport {
        representation: obj.element_representation(),
        length: obj.element_length(),
        keys: obj.own_keys(),
    })
}

impl fmt::Display for ElementsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "representation: {}", representation_name(self.representation))?;
        writeln!(f, "length: {}", self.length)?;
        write!(f, "keys: [{}]", self.keys.join(", "))
    }
}
