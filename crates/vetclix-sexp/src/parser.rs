//! Recursive-descent S-expression parser with a permissive tokenizer.
//!
//! Tokenization rules:
//!
//! - Whitespace outside strings is insignificant and never required between
//!   tokens, so `"foo""bar"` is two atoms and `90(30)` is an atom followed by
//!   a list.
//! - A string runs to the next unescaped `"`; `\"` is the only escape.
//! - A numeric atom is a maximal run of digits and dots starting with a digit.
//!   No dot reads as an integer, one dot as a float.
//! - A `)` with no list open is ignored.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::ParseError;
use crate::value::Value;

/// Parses `input` into a single [`Value`].
///
/// A top-level atom is returned as-is rather than wrapped in a list.
///
/// # Errors
///
/// Returns [`ParseError::UnclosedList`] when input ends with lists still open,
/// and the other [`ParseError`] variants for malformed tokens, empty input, or
/// a second top-level value.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    Parser::new(input).run()
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    open: Vec<Vec<Value>>,
    result: Option<Value>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            open: Vec::new(),
            result: None,
        }
    }

    fn run(mut self) -> Result<Value, ParseError> {
        while let Some(&(offset, character)) = self.chars.peek() {
            match character {
                '(' => {
                    self.chars.next();
                    self.open.push(Vec::new());
                }
                ')' => {
                    self.chars.next();
                    self.close_list(offset)?;
                }
                '"' => {
                    self.chars.next();
                    let text = self.string_atom(offset)?;
                    self.emit(Value::Text(text), offset)?;
                }
                digit if digit.is_ascii_digit() => {
                    let number = self.numeric_atom(offset)?;
                    self.emit(number, offset)?;
                }
                space if space.is_whitespace() => {
                    self.chars.next();
                }
                other => {
                    return Err(ParseError::UnexpectedCharacter {
                        character: other,
                        offset,
                    });
                }
            }
        }

        if !self.open.is_empty() {
            return Err(ParseError::UnclosedList {
                depth: self.open.len(),
            });
        }
        self.result.ok_or(ParseError::Empty)
    }

    /// Closes the innermost list. Unmatched closers are dropped silently.
    fn close_list(&mut self, offset: usize) -> Result<(), ParseError> {
        match self.open.pop() {
            Some(items) => self.emit(Value::List(items), offset),
            None => Ok(()),
        }
    }

    fn emit(&mut self, value: Value, offset: usize) -> Result<(), ParseError> {
        if let Some(parent) = self.open.last_mut() {
            parent.push(value);
            return Ok(());
        }
        if self.result.is_some() {
            return Err(ParseError::TrailingInput { offset });
        }
        self.result = Some(value);
        Ok(())
    }

    fn string_atom(&mut self, start: usize) -> Result<String, ParseError> {
        let mut text = String::new();
        while let Some((_, character)) = self.chars.next() {
            match character {
                '"' => return Ok(text),
                '\\' if matches!(self.chars.peek(), Some((_, '"'))) => {
                    self.chars.next();
                    text.push('"');
                }
                other => text.push(other),
            }
        }

        // A string cut off by end of input inside a list reports the open list.
        if self.open.is_empty() {
            Err(ParseError::UnterminatedString { offset: start })
        } else {
            Err(ParseError::UnclosedList {
                depth: self.open.len(),
            })
        }
    }

    fn numeric_atom(&mut self, start: usize) -> Result<Value, ParseError> {
        let mut end = start;
        let mut dots = 0_usize;
        while let Some(&(offset, character)) = self.chars.peek() {
            if !(character.is_ascii_digit() || character == '.') {
                break;
            }
            if character == '.' {
                dots += 1;
            }
            end = offset + character.len_utf8();
            self.chars.next();
        }

        let token = self.input.get(start..end).unwrap_or_default();
        let malformed = || ParseError::MalformedNumber {
            token: token.to_owned(),
            offset: start,
        };
        match dots {
            0 => token.parse().map(Value::Integer).map_err(|_| malformed()),
            // Overlong digit runs round to infinity, which has no textual form.
            1 => token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Value::Float)
                .ok_or_else(malformed),
            _ => Err(malformed()),
        }
    }
}
