//! Tagged value model for parsed S-expressions.

use std::fmt;

/// A parsed S-expression.
///
/// Values form a tree: every list exclusively owns its children, so there are
/// no cycles and no shared nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed 64-bit integer atom.
    Integer(i64),
    /// Double-precision float atom.
    Float(f64),
    /// String atom.
    Text(String),
    /// Ordered list of values.
    List(Vec<Value>),
}

/// Runtime kind of a [`Value`], used by shape validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Integer`].
    Integer,
    /// [`Value::Float`].
    Float,
    /// [`Value::Text`].
    Text,
    /// [`Value::List`].
    List,
}

impl Value {
    /// Returns the runtime kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
        }
    }

    /// Borrows the contents of a string atom.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrows the elements of a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "string",
            Self::List => "list",
        };
        formatter.write_str(name)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_kinds() {
        assert_eq!(Value::Integer(1).kind(), ValueKind::Integer);
        assert_eq!(Value::Float(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::from("a").kind(), ValueKind::Text);
        assert_eq!(Value::List(Vec::new()).kind(), ValueKind::List);
    }

    #[test]
    fn accessors_reject_other_kinds() {
        let value = Value::from("text");
        assert_eq!(value.as_text(), Some("text"));
        assert_eq!(value.as_integer(), None);
        assert!(value.as_list().is_none());
    }
}
