//! Built-in functions addressable as `@name` operands.

use rill_value::{FunctionKind, MethodRef, Value};

/// Names accepted after `@`.
pub const NAMES: [&str; 5] = ["identity", "this", "count", "Point", "Base"];

/// A fresh compiled method for the built-in called `name`.
pub fn lookup(name: &str) -> Option<MethodRef> {
    let method = match name {
        "identity" => MethodRef::new("identity", FunctionKind::Normal, 1, |inv| Ok(inv.arg(0))),
        "this" => MethodRef::new("this", FunctionKind::Method, 0, |inv| Ok(inv.this.clone())),
        "count" => MethodRef::new("count", FunctionKind::Arrow, 0, |inv| {
            Ok(Value::number(inv.args.len() as f64))
        }),
        // Records its first two arguments as `x` and `y` on the receiver.
        "Point" => MethodRef::new("Point", FunctionKind::ClassConstructor, 2, |inv| {
            if let Value::Object(obj) = inv.this {
                obj.set_named("x", inv.arg(0))?;
                obj.set_named("y", inv.arg(1))?;
            }
            Ok(Value::Undefined)
        }),
        // Stores every argument as an element of the receiver.
        "Base" => MethodRef::new(
            "Base",
            FunctionKind::Native {
                constructible: true,
            },
            0,
            |inv| {
                if let Value::Object(obj) = inv.this {
                    for (i, arg) in inv.args.iter().enumerate() {
                        obj.set(rill_value::PropertyKey::Index(i as u64), arg.clone())?;
                    }
                }
                Ok(Value::Undefined)
            },
        ),
        _ => return None,
    };
    Some(method)
}
