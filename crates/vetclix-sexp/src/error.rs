//! Error types for S-expression parsing and structural projection.
//!
//! Parse failures carry the byte offset at which the tokenizer gave up so the
//! daemon can log actionable diagnostics, while [`ParseErrorKind`] offers a
//! position-free tag for callers that only care about the failure class.

use thiserror::Error;

/// Errors raised while turning text into a [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Input ended while one or more lists were still open.
    #[error("input ended with {depth} unclosed list(s)")]
    UnclosedList {
        /// Number of lists left open at end of input.
        depth: usize,
    },

    /// Input ended inside a string atom.
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// A numeric run could not be read as an integer or float.
    #[error("malformed number '{token}' at byte {offset}")]
    MalformedNumber {
        /// The offending numeric run.
        token: String,
        /// Byte offset where the run starts.
        offset: usize,
    },

    /// A character that cannot start any token.
    #[error("unexpected character {character:?} at byte {offset}")]
    UnexpectedCharacter {
        /// The rejected character.
        character: char,
        /// Byte offset of the character.
        offset: usize,
    },

    /// A second top-level value followed the first complete one.
    #[error("unexpected trailing value at byte {offset}")]
    TrailingInput {
        /// Byte offset where the trailing value starts.
        offset: usize,
    },

    /// The input contained no value.
    #[error("input contains no value")]
    Empty,
}

/// Position-free classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// See [`ParseError::UnclosedList`].
    UnclosedList,
    /// See [`ParseError::UnterminatedString`].
    UnterminatedString,
    /// See [`ParseError::MalformedNumber`].
    MalformedNumber,
    /// See [`ParseError::UnexpectedCharacter`].
    UnexpectedCharacter,
    /// See [`ParseError::TrailingInput`].
    TrailingInput,
    /// See [`ParseError::Empty`].
    Empty,
}

impl ParseError {
    /// Returns the failure class without positional detail.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            Self::UnclosedList { .. } => ParseErrorKind::UnclosedList,
            Self::UnterminatedString { .. } => ParseErrorKind::UnterminatedString,
            Self::MalformedNumber { .. } => ParseErrorKind::MalformedNumber,
            Self::UnexpectedCharacter { .. } => ParseErrorKind::UnexpectedCharacter,
            Self::TrailingInput { .. } => ParseErrorKind::TrailingInput,
            Self::Empty => ParseErrorKind::Empty,
        }
    }
}

/// Errors raised by [`structure`](crate::structure) and
/// [`maplist`](crate::maplist).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StructureError {
    /// The value list and field list differ in length.
    #[error("expected {expected} values but found {actual}")]
    LengthMismatch {
        /// Number of field names supplied.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A `maplist` entry was an atom rather than a list.
    #[error("maplist entry {index} is not a list")]
    EntryNotList {
        /// Position of the entry.
        index: usize,
    },

    /// A `maplist` entry was an empty list and so has no key.
    #[error("maplist entry {index} has no key")]
    EmptyEntry {
        /// Position of the entry.
        index: usize,
    },
}
