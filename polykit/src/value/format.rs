//! Source-like rendering of values.
//!
//! Produces the compact literal notation used in diagnostics and by the
//! `inspect` command: `{a: 1, b: "2"}`, `[1, 2]`, `undefined`.

use serde::{Deserialize, Serialize};

use super::{PendingState, Value};

/// Options controlling [`to_source_string`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Put each object entry on its own line.
    pub wrap: bool,

    /// Number of indent characters per nesting level when wrapping.
    pub indent: usize,

    /// The character repeated to build indentation.
    pub indent_char: char,

    /// Quote strings with `'` instead of `"`.
    pub single_quotes: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            wrap: false,
            indent: 2,
            indent_char: ' ',
            single_quotes: false,
        }
    }
}

impl FormatOptions {
    /// Returns indentation at the given level.
    fn indent_at(&self, level: usize) -> String {
        std::iter::repeat(self.indent_char)
            .take(self.indent * level)
            .collect()
    }

    fn quote(&self) -> char {
        if self.single_quotes {
            '\''
        } else {
            '"'
        }
    }
}

/// Renders a value in literal notation.
pub fn to_source_string(value: &Value, options: &FormatOptions) -> String {
    let mut out = String::new();
    write_value(&mut out, value, options, 0);
    out
}

fn write_value(out: &mut String, value: &Value, options: &FormatOptions, level: usize) {
    match value {
        Value::Undefined => out.push_str("undefined"),
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::String(s) => write_quoted(out, s, options.quote()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item, options, level);
            }
            out.push(']');
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if options.wrap {
                    out.push_str(if i > 0 { ",\n" } else { "\n" });
                    out.push_str(&options.indent_at(level + 1));
                } else if i > 0 {
                    out.push_str(", ");
                }
                write_key(out, key, options.quote());
                out.push_str(": ");
                write_value(out, item, options, level + 1);
            }
            if options.wrap {
                out.push('\n');
                out.push_str(&options.indent_at(level));
            }
            out.push('}');
        }
        Value::Function(f) => {
            out.push_str("function ");
            out.push_str(f.name().unwrap_or_default());
            out.push_str("() { [native code] }");
        }
        Value::Pending(p) => match p.state() {
            PendingState::Pending => out.push_str("Promise {<pending>}"),
            PendingState::Fulfilled(v) => {
                out.push_str("Promise {<fulfilled>: ");
                write_value(out, &v, options, level);
                out.push('}');
            }
            PendingState::Rejected(v) => {
                out.push_str("Promise {<rejected>: ");
                write_value(out, &v, options, level);
                out.push('}');
            }
        },
    }
}

/// Formats a number the way a script engine prints it.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

/// `1e21` prints as `1e+21`, `1.5e-7` as `1.5e-7`.
fn exponent_form(n: f64) -> String {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

fn write_key(out: &mut String, key: &str, quote: char) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        write_quoted(out, key, quote);
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn write_quoted(out: &mut String, s: &str, quote: char) {
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Function, Pending};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn ab() -> Value {
        Value::object([("a", Value::from(1)), ("b", Value::from(2))])
    }

    #[test]
    fn test_inline_object() {
        assert_snapshot!(to_source_string(&ab(), &FormatOptions::default()), @"{a: 1, b: 2}");
    }

    #[test]
    fn test_wrapped_object() {
        let options = FormatOptions {
            wrap: true,
            ..FormatOptions::default()
        };
        assert_eq!(to_source_string(&ab(), &options), "{\n  a: 1,\n  b: 2\n}");
    }

    #[test]
    fn test_wrapped_object_custom_indent() {
        let options = FormatOptions {
            wrap: true,
            indent: 4,
            ..FormatOptions::default()
        };
        assert_eq!(to_source_string(&ab(), &options), "{\n    a: 1,\n    b: 2\n}");

        let options = FormatOptions {
            wrap: true,
            indent_char: '-',
            ..FormatOptions::default()
        };
        assert_eq!(to_source_string(&ab(), &options), "{\n--a: 1,\n--b: 2\n}");
    }

    #[test]
    fn test_nested_wrap_indents_per_level() {
        let value = Value::object([("outer", Value::object([("inner", Value::Null)]))]);
        let options = FormatOptions {
            wrap: true,
            ..FormatOptions::default()
        };
        assert_eq!(
            to_source_string(&value, &options),
            "{\n  outer: {\n    inner: null\n  }\n}"
        );
    }

    #[test]
    fn test_quotes() {
        let value = Value::object([("a", Value::from(1)), ("b", Value::from("2"))]);
        assert_snapshot!(to_source_string(&value, &FormatOptions::default()), @r#"{a: 1, b: "2"}"#);

        let options = FormatOptions {
            single_quotes: true,
            ..FormatOptions::default()
        };
        assert_snapshot!(to_source_string(&value, &options), @"{a: 1, b: '2'}");
    }

    #[test]
    fn test_mixed_members() {
        let value = Value::object([
            ("a", Value::from(1)),
            ("boolean", Value::from(true)),
            ("array", Value::from(vec![Value::from(1), Value::from(2)])),
            ("arrObj", Value::from(vec![Value::object([("b", Value::Array(vec![]))])])),
            ("emptyObj", Value::object(Vec::<(String, Value)>::new())),
            ("null", Value::Null),
            ("undefined", Value::Undefined),
            ("two words", Value::from(0.5)),
        ]);
        let options = FormatOptions {
            single_quotes: true,
            ..FormatOptions::default()
        };
        assert_snapshot!(
            to_source_string(&value, &options),
            @"{a: 1, boolean: true, array: [1, 2], arrObj: [{b: []}], emptyObj: {}, null: null, undefined: undefined, 'two words': 0.5}"
        );
    }

    #[test]
    fn test_scalars() {
        let options = FormatOptions::default();
        assert_eq!(to_source_string(&Value::from(1), &options), "1");
        assert_eq!(to_source_string(&Value::from("1"), &options), "\"1\"");
        assert_eq!(to_source_string(&Value::from(true), &options), "true");
        assert_eq!(to_source_string(&Value::Array(vec![]), &options), "[]");
        assert_eq!(to_source_string(&Value::from(f64::NAN), &options), "NaN");
        assert_eq!(to_source_string(&Value::from(f64::NEG_INFINITY), &options), "-Infinity");
        assert_eq!(to_source_string(&Value::from(-0.0), &options), "0");
        assert_eq!(to_source_string(&Value::from(-2.25), &options), "-2.25");
    }

    #[test]
    fn test_escapes() {
        let value = Value::from("say \"hi\"\n\\");
        assert_eq!(value.to_string(), r#""say \"hi\"\n\\""#);

        let control = Value::from("bell\u{7}esc\u{1b}[0m\u{0}");
        assert_eq!(control.to_string(), r#""bell\u0007esc\u001b[0m\u0000""#);
    }

    #[test]
    fn test_large_and_tiny_numbers_use_exponent_form() {
        let options = FormatOptions::default();
        let render = |n: f64| to_source_string(&Value::from(n), &options);
        assert_eq!(render(1e21), "1e+21");
        assert_eq!(render(-1.5e300), "-1.5e+300");
        assert_eq!(render(1e-7), "1e-7");
        assert_eq!(render(2.5e-9), "2.5e-9");
        assert_eq!(render(1e20), "100000000000000000000");
        assert_eq!(render(0.000_001), "0.000001");
    }

    #[test]
    fn test_functions_and_pending() {
        let f = Function::named("test", |_| Ok(Value::Undefined));
        assert_eq!(Value::from(f).to_string(), "function test() { [native code] }");

        let p = Pending::new();
        assert_eq!(Value::from(p.clone()).to_string(), "Promise {<pending>}");
        p.resolve("done");
        assert_eq!(Value::from(p).to_string(), r#"Promise {<fulfilled>: "done"}"#);
    }
}
