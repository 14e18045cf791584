//! Authenticated command dispatch.
//!
//! A request is a single S-expression list led by a command string:
//!
//! ```text
//! ("auth" "vet" "hunter2")
//! ("get" "client" "c-1")
//! ```
//!
//! The reply is a single S-expression. Failures are reported as
//! `("error" "<kind>")` where the kind is one of `malformed`, `badrequest`,
//! `badauth`, `nomatch`, `internal` or `unimplemented`.

mod command;
mod dispatcher;
mod errors;
mod handler;
mod handlers;

pub use self::command::{CommandDescriptor, CommandTable, Validator};
pub use self::dispatcher::Dispatcher;
pub use self::errors::{DispatchError, ErrorKind, HandlerError};
pub use self::handler::DispatchConnectionHandler;
pub use self::handlers::{Handler, HandlerContext, PROTOCOL_VERSION};
