//! Dynamic runtime values.
//!
//! Overloaded functions receive their arguments as [`Value`]s so that the
//! dispatcher can inspect the runtime type of every argument. The model
//! covers the types the classifier distinguishes: `undefined`, `null`,
//! booleans, numbers, strings, arrays, insertion-ordered objects, functions
//! and pending values.

mod format;
mod function;
mod pending;

use std::fmt;

use indexmap::IndexMap;

pub use format::{to_source_string, FormatOptions};
pub use function::{Function, NativeFn, Thrown};
pub use pending::{Pending, PendingState};

/// An insertion-ordered string-keyed object.
pub type Object = IndexMap<String, Value>;

/// A dynamically typed runtime value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Undefined,
    /// The explicit null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    Array(Vec<Value>),
    /// An insertion-ordered object.
    Object(Object),
    /// A callable value.
    Function(Function),
    /// An asynchronous value that may not have settled yet.
    Pending(Pending),
}

impl Value {
    /// Creates an object value from key/value pairs, preserving their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_pending(&self) -> Option<&Pending> {
        match self {
            Value::Pending(p) => Some(p),
            _ => None,
        }
    }

    /// Looks up an object member. Non-objects have no members.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Returns true for values that behave like an asynchronous result:
    /// pending values, and objects whose `then` member is a function.
    pub fn is_thenable(&self) -> bool {
        match self {
            Value::Pending(_) => true,
            Value::Object(map) => matches!(map.get("then"), Some(Value::Function(_))),
            _ => false,
        }
    }

    /// Loose boolean conversion.
    ///
    /// `undefined`, `null`, `false`, `0`, `NaN` and the empty string are
    /// falsy; everything else is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Pending(_) => true,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Pending(a), Value::Pending(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_source_string(self, &FormatOptions::default()))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Pending> for Value {
    fn from(p: Pending) -> Self {
        Value::Pending(p)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Undefined, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Undefined.truthy());
        assert!(!Value::Null.truthy());
        assert!(!Value::from(0).truthy());
        assert!(!Value::from(f64::NAN).truthy());
        assert!(!Value::from("").truthy());
        assert!(Value::from("x").truthy());
        assert!(Value::Array(vec![]).truthy());
        assert!(Value::Object(Object::new()).truthy());
    }

    #[test]
    fn test_thenable_detection() {
        assert!(Value::from(Pending::new()).is_thenable());

        let then = Function::new(|_| Ok(Value::Undefined));
        let thenable = Value::object([("then", Value::from(then))]);
        assert!(thenable.is_thenable());

        let not_callable = Value::object([("then", Value::from(1))]);
        assert!(!not_callable.is_thenable());
        assert!(!Value::from("then").is_thenable());
    }

    #[test]
    fn test_identity_equality_for_functions() {
        let f = Function::new(|_| Ok(Value::Null));
        let g = Function::new(|_| Ok(Value::Null));
        assert_eq!(Value::from(f.clone()), Value::from(f.clone()));
        assert_ne!(Value::from(f), Value::from(g));
    }

    #[test]
    fn test_from_json_nested() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"b": 1, "a": [true, null, "x"]}"#).unwrap();
        let value = Value::from(json);
        assert_eq!(value.as_object().map(Object::len), Some(2));
        assert_eq!(
            value.get("a"),
            Some(&Value::Array(vec![Value::Bool(true), Value::Null, Value::from("x")]))
        );
        assert_eq!(value.get("b"), Some(&Value::from(1)));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Undefined);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
