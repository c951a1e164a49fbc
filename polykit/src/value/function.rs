//! Callable values and the errors they raise.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use super::Value;

/// The signature every native function body implements.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, Thrown>;

/// A shared, optionally named callable.
///
/// Cloning a `Function` shares the underlying body; two functions are equal
/// only when they are clones of each other.
#[derive(Clone)]
pub struct Function {
    name: Option<Rc<str>>,
    body: Rc<NativeFn>,
}

impl Function {
    /// Wraps an anonymous function body.
    pub fn new(body: impl Fn(&[Value]) -> Result<Value, Thrown> + 'static) -> Self {
        Self {
            name: None,
            body: Rc::new(body),
        }
    }

    /// Wraps a function body under a name, used when formatting and logging.
    pub fn named(
        name: impl Into<String>,
        body: impl Fn(&[Value]) -> Result<Value, Thrown> + 'static,
    ) -> Self {
        Self {
            name: Some(Rc::from(name.into())),
            body: Rc::new(body),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Calls the function with the given arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value, Thrown> {
        (self.body)(args)
    }

    /// Returns true if both handles share the same body.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Function({name})"),
            None => f.write_str("Function(<anonymous>)"),
        }
    }
}

/// A value raised by a function body.
///
/// The payload is an arbitrary [`Value`]; error-like payloads are objects
/// with `name` and `message` members, see [`Thrown::error`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", describe(.0))]
pub struct Thrown(pub Value);

impl Thrown {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(payload.into())
    }

    /// Raises an error object `{name, message}`.
    pub fn error(name: &str, message: impl Into<String>) -> Self {
        Self(Value::object([
            ("name", Value::from(name)),
            ("message", Value::from(message.into())),
        ]))
    }

    pub fn payload(&self) -> &Value {
        &self.0
    }

    pub fn into_payload(self) -> Value {
        self.0
    }

    /// The `name` member of an error object payload.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// The `message` member of an error object payload.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }
}

fn describe(payload: &Value) -> String {
    let name = payload.get("name").and_then(Value::as_str);
    let message = payload.get("message").and_then(Value::as_str);
    match (name, message) {
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (None, Some(message)) => message.to_string(),
        _ => format!("uncaught {payload}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_passes_arguments_through() {
        let echo = Function::named("echo", |args| Ok(Value::Array(args.to_vec())));
        let out = echo.call(&[Value::from(1), Value::from("a")]).unwrap();
        assert_eq!(out, Value::Array(vec![Value::from(1), Value::from("a")]));
        assert_eq!(echo.name(), Some("echo"));
    }

    #[test]
    fn test_errors_propagate_from_body() {
        let fail = Function::new(|_| Err(Thrown::error("RangeError", "too big")));
        let err = fail.call(&[]).unwrap_err();
        assert_eq!(err.name(), Some("RangeError"));
        assert_eq!(err.message(), Some("too big"));
        assert_eq!(err.to_string(), "RangeError: too big");
    }

    #[test]
    fn test_thrown_plain_value_display() {
        assert_eq!(Thrown::new(42).to_string(), "uncaught 42");
    }
}
