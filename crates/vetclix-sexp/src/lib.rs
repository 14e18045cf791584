//! S-expression value model and text codec for the Vetclix record protocol.
//!
//! Requests and responses travel as a small Lisp-style S-expression language
//! whose only forms are integers, floats, strings, and lists. This crate
//! provides:
//!
//! - **Parsing** via [`parse`], a permissive tokenizer that tolerates missing
//!   separators between adjacent atoms and ignores stray closing parentheses
//! - **Serialization** via [`dump`] (or [`Value`]'s `Display` impl), which
//!   produces the canonical text form
//! - **Structural helpers** [`structure`] and [`maplist`] that project generic
//!   lists into keyed mappings for record marshaling
//!
//! # Example
//!
//! ```
//! use vetclix_sexp::{Value, dump, parse};
//!
//! let value = parse(r#"("foo""bar" (90(30)))"#)?;
//! assert_eq!(
//!     value,
//!     Value::List(vec![
//!         Value::from("foo"),
//!         Value::from("bar"),
//!         Value::List(vec![Value::Integer(90), Value::List(vec![Value::Integer(30)])]),
//!     ])
//! );
//! assert_eq!(dump(&value), r#"("foo" "bar" (90 (30)))"#);
//! # Ok::<(), vetclix_sexp::ParseError>(())
//! ```

mod error;
mod parser;
mod serializer;
mod structure;
mod value;

pub use error::{ParseError, ParseErrorKind, StructureError};
pub use parser::parse;
pub use serializer::dump;
pub use structure::{Mapping, maplist, structure};
pub use value::{Value, ValueKind};
