//! Canonical text rendering of values.
//!
//! | Value     | Rendering                                  |
//! |-----------|--------------------------------------------|
//! | nil       | `'()`                                      |
//! | boolean   | `#!t` / `#!f`                              |
//! | number    | shortest round-trip decimal, e.g. `1.5`    |
//! | symbol    | `name:hash`                                |
//! | string    | double-quoted, control characters escaped  |
//! | list      | `(a b c)`, an empty list payload is `()`   |

use crate::value::Value;
use std::fmt::{self, Write};

impl Value {
    /// Render the canonical text form.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("'()"),
            Value::Boolean(true) => f.write_str("#!t"),
            Value::Boolean(false) => f.write_str("#!f"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Symbol(sym) => write!(f, "{sym}"),
            Value::String(s) => write_quoted(f, s),
            Value::List(items) => {
                f.write_char('(')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(')')
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\x08' => f.write_str("\\b")?,
            '\x07' => f.write_str("\\a")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\x1b' => f.write_str("\\e")?,
            '\x0c' => f.write_str("\\f")?,
            '\x0b' => f.write_str("\\v")?,
            '\0' => f.write_str("\\0")?,
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            _ => f.write_char(c)?,
        }
    }
    f.write_char('"')
}
