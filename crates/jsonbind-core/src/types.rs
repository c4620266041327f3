//! Dynamic JSON values, for parses with no static target shape.

/// An untyped JSON value.
///
/// Mirrors the JSON types but separates integers from floats (decided by
/// the presence of a decimal point in the source text) and uses
/// `Vec<(String, Value)>` for objects to maintain insertion order without
/// depending on `IndexMap`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Look up a key in an object value. Returns `None` for non-objects
    /// and missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Insert a key into an object value, overwriting an existing entry
    /// (last write wins). Non-object values are left untouched.
    pub fn insert(&mut self, key: String, value: Value) {
        if let Value::Object(pairs) = self {
            if let Some(slot) = pairs.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = value;
            } else {
                pairs.push((key, value));
            }
        }
    }

    /// `true` only for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
