//! Lossy JSON view of an NBT tree.
//!
//! For collaborators that render or diff trees. This is a one-way view:
//! tag kinds and byte-preserving strings are flattened, so it is not a
//! round-trip surface.

use serde_json::{Map, Number, Value};

use crate::nbt_value::NbtValue;

/// Converts a tree to `serde_json::Value`.
///
/// Non-finite floats become `null` (JSON has no representation for them),
/// invalid-UTF-8 strings are replaced lossily, and duplicate compound
/// names collapse last-wins — the same winner the tree API resolves to.
pub fn nbt_to_json(value: &NbtValue) -> Value {
    match value {
        NbtValue::Byte(v) => Value::from(*v),
        NbtValue::Short(v) => Value::from(*v),
        NbtValue::Int(v) => Value::from(*v),
        NbtValue::Long(v) => Value::from(*v),
        NbtValue::Float(v) => float_to_json(*v as f64),
        NbtValue::Double(v) => float_to_json(*v),
        NbtValue::ByteArray(v) => Value::Array(v.iter().map(|b| Value::from(*b)).collect()),
        NbtValue::String(s) => Value::String(s.to_string_lossy().into_owned()),
        NbtValue::List(list) => Value::Array(list.iter().map(nbt_to_json).collect()),
        NbtValue::Compound(entries) => {
            let mut map = Map::new();
            for (name, v) in entries {
                map.insert(name.to_string_lossy().into_owned(), nbt_to_json(v));
            }
            Value::Object(map)
        }
        NbtValue::IntArray(v) => Value::Array(v.iter().map(|n| Value::from(*n)).collect()),
        NbtValue::LongArray(v) => Value::Array(v.iter().map(|n| Value::from(*n)).collect()),
    }
}

fn float_to_json(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}
