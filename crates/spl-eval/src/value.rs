//! Runtime values.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;

/// A runtime value. All numbers are 64-bit floats; a `range(...)` call
/// produces a lazy [`Value::Range`] that is only expanded on iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    List(Vec<Value>),
    Range { start: i64, end: i64, step: i64 },
}

impl Value {
    /// The type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Range { .. } => "range",
        }
    }

    /// Truthiness: `False`, `0`, `""`, `[]`, and an empty range are
    /// falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Range { start, end, step } => {
                (*step > 0 && start < end) || (*step < 0 && start > end)
            }
        }
    }

    /// Render a value the way it appears inside a list: strings gain
    /// surrounding quotes, everything else uses its display form.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{s}\""),
            other => write!(f, "{other}"),
        }
    }
}

/// Format a number without a trailing `.0` when it is integral.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Range { start, end, step } => {
                if *step == 1 {
                    write!(f, "range({start}, {end})")
                } else {
                    write!(f, "range({start}, {end}, {step})")
                }
            }
        }
    }
}

// Values serialize untagged: plain JSON numbers, strings, booleans and
// arrays; a range becomes an object with its three fields.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::List(items) => items.serialize(serializer),
            Value::Range { start, end, step } => {
                let mut st = serializer.serialize_struct("Range", 3)?;
                st.serialize_field("start", start)?;
                st.serialize_field("end", end)?;
                st.serialize_field("step", step)?;
                st.end()
            }
        }
    }
}
