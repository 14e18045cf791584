//! Canonical text form for [`Value`].
//!
//! Integers print without a decimal point, floats always carry one, strings
//! are quoted with embedded `"` escaped, and list elements are joined by a
//! single space. Re-parsing the output yields an equal value, so dumping is a
//! fixed point under `dump(parse(dump(v)))`.

use std::fmt::{self, Write};

use crate::value::Value;

/// Renders `value` in canonical form.
#[must_use]
pub fn dump(value: &Value) -> String {
    value.to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(formatter, "{value}"),
            Self::Float(value) => write_float(formatter, *value),
            Self::Text(text) => write_text(formatter, text),
            Self::List(items) => {
                formatter.write_char('(')?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        formatter.write_char(' ')?;
                    }
                    write!(formatter, "{item}")?;
                }
                formatter.write_char(')')
            }
        }
    }
}

fn write_float(formatter: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    // `Display` for f64 never uses exponent notation and drops `.0` for whole
    // numbers, so only the missing fraction needs restoring.
    let rendered = value.to_string();
    formatter.write_str(&rendered)?;
    if value.is_finite() && !rendered.contains('.') {
        formatter.write_str(".0")?;
    }
    Ok(())
}

fn write_text(formatter: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    formatter.write_char('"')?;
    for character in text.chars() {
        if character == '"' {
            formatter.write_str("\\\"")?;
        } else {
            formatter.write_char(character)?;
        }
    }
    formatter.write_char('"')
}
