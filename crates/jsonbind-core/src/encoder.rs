//! The serializer -- typed values to compact JSON text.
//!
//! [`ToJson`] mirrors the decoder's [`FromJson`](crate::FromJson): one
//! impl per shape, each appending into a shared `String`. Output is
//! always compact (no inserted whitespace). Record members whose value
//! reports [`ToJson::is_json_null`] are omitted from the output entirely;
//! absence, not `null`, is how missing optional data is represented.

use std::collections::HashMap;
use std::hash::Hash;

use crate::escape::escape_into;
use crate::types::Value;

/// Serialize a value to compact JSON text.
///
/// # Examples
///
/// ```
/// assert_eq!(jsonbind_core::to_string(&vec![1i64, 2, 3]), "[1,2,3]");
/// ```
pub fn to_string<T: ToJson + ?Sized>(value: &T) -> String {
    let mut out = String::new();
    value.append_json(&mut out);
    out
}

/// A shape the serializer can emit.
pub trait ToJson {
    /// Append this value's JSON representation to `out`.
    fn append_json(&self, out: &mut String);

    /// Whether this value serializes as JSON `null`. Record members for
    /// which this returns `true` are omitted from record output.
    fn is_json_null(&self) -> bool {
        false
    }
}

impl ToJson for str {
    fn append_json(&self, out: &mut String) {
        out.push('"');
        escape_into(out, self);
        out.push('"');
    }
}

impl ToJson for String {
    fn append_json(&self, out: &mut String) {
        self.as_str().append_json(out);
    }
}

macro_rules! to_json_display {
    ($($t:ty),* $(,)?) => {$(
        impl ToJson for $t {
            fn append_json(&self, out: &mut String) {
                out.push_str(&self.to_string());
            }
        }
    )*};
}

// Invariant decimal text for integers; `Display` rendering for floats.
to_json_display!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize, f32, f64);

impl ToJson for bool {
    fn append_json(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn append_json(&self, out: &mut String) {
        match self {
            Some(value) => value.append_json(out),
            None => out.push_str("null"),
        }
    }

    fn is_json_null(&self) -> bool {
        match self {
            Some(value) => value.is_json_null(),
            None => true,
        }
    }
}

impl<T: ToJson> ToJson for [T] {
    fn append_json(&self, out: &mut String) {
        append_elements(self, out);
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn append_json(&self, out: &mut String) {
        append_elements(self, out);
    }
}

impl<T: ToJson> ToJson for Box<[T]> {
    fn append_json(&self, out: &mut String) {
        append_elements(self, out);
    }
}

impl<K: JsonKey + Eq + Hash, V: ToJson> ToJson for HashMap<K, V> {
    fn append_json(&self, out: &mut String) {
        if !K::IS_TEXT {
            out.push_str("{}");
            return;
        }
        out.push('{');
        let mut first = true;
        for (key, value) in self {
            if !first {
                out.push(',');
            }
            first = false;
            out.push('"');
            key.write_key(out);
            out.push_str("\":");
            value.append_json(out);
        }
        out.push('}');
    }
}

impl ToJson for Value {
    fn append_json(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => b.append_json(out),
            Value::Int(n) => n.append_json(out),
            Value::Float(f) => f.append_json(out),
            Value::Str(s) => s.as_str().append_json(out),
            Value::Array(items) => append_elements(items, out),
            Value::Object(pairs) => {
                out.push('{');
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push('"');
                    out.push_str(key);
                    out.push_str("\":");
                    value.append_json(out);
                }
                out.push('}');
            }
        }
    }

    fn is_json_null(&self) -> bool {
        self.is_null()
    }
}

/// Marker for map key types. JSON object keys must be text; a map keyed
/// by anything else serializes as the empty object.
pub trait JsonKey {
    /// Whether keys of this type can appear in JSON output.
    const IS_TEXT: bool;

    /// Write the key without escaping. Only called when `IS_TEXT` holds.
    fn write_key(&self, out: &mut String);
}

impl JsonKey for String {
    const IS_TEXT: bool = true;

    fn write_key(&self, out: &mut String) {
        out.push_str(self);
    }
}

macro_rules! non_text_key {
    ($($t:ty),* $(,)?) => {$(
        impl JsonKey for $t {
            const IS_TEXT: bool = false;

            fn write_key(&self, _out: &mut String) {}
        }
    )*};
}

non_text_key!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize, bool, char);

/// Emit `[` + comma-joined elements + `]`.
fn append_elements<T: ToJson>(items: &[T], out: &mut String) {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        item.append_json(out);
    }
    out.push(']');
}
