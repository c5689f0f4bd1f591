//! Operand literals accepted on the command line.
//!
//! | Literal              | Value                      |
//! |----------------------|----------------------------|
//! | `12`, `-1.5`, `0x1f` | number                     |
//! | `NaN`, `Infinity`    | number                     |
//! | `7n`, `-0x10n`       | bigint                     |
//! | `"text"`, `'text'`   | string                     |
//! | `true`, `false`      | boolean                    |
//! | `null`, `undefined`  | themselves                 |
//! | `@name`              | a fresh built-in function  |

use rill_value::{string_to_bigint, string_to_number, Value};

use crate::builtins;

/// Parse one operand literal.
pub fn parse_operand(text: &str) -> Result<Value, String> {
    match text {
        "undefined" => return Ok(Value::Undefined),
        "null" => return Ok(Value::Null),
        "true" => return Ok(Value::boolean(true)),
        "false" => return Ok(Value::boolean(false)),
        "NaN" => return Ok(Value::number(f64::NAN)),
        "" => return Err("empty operand".to_string()),
        _ => {}
    }

    if let Some(inner) = unquote(text) {
        return Ok(Value::string(inner));
    }

    if let Some(name) = text.strip_prefix('@') {
        return builtins::lookup(name)
            .map(|method| Value::function(&method))
            .ok_or_else(|| {
                format!(
                    "unknown function `@{name}` (known: @{})",
                    builtins::NAMES.join(", @")
                )
            });
    }

    if let Some(digits) = text.strip_suffix('n') {
        if let Some(value) = bigint_literal(digits) {
            return Ok(value);
        }
    }

    let n = string_to_number(text);
    if n.is_nan() {
        return Err(format!(
            "`{text}` is not a literal; quote strings, e.g. '\"{text}\"'"
        ));
    }
    Ok(Value::number(n))
}

/// Parse every operand, stopping at the first bad one.
pub fn parse_operands<S: AsRef<str>>(texts: &[S]) -> Result<Vec<Value>, String> {
    texts.iter().map(|t| parse_operand(t.as_ref())).collect()
}

fn unquote(text: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        text.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

fn bigint_literal(digits: &str) -> Option<Value> {
    let (negative, magnitude) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits),
    };
    // `string_to_bigint` reads "" as zero and accepts a sign of its own.
    if magnitude.is_empty() || magnitude.starts_with(['-', '+']) {
        return None;
    }
    let value = string_to_bigint(magnitude)?;
    Some(Value::bigint(if negative { -value } else { value }))
}

#[cfg(test)]
mod tests;
