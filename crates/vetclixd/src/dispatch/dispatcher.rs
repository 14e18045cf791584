//! Request evaluation against the command table.
//!
//! Checks run in a fixed order: the request must name a known command, the
//! body must pass the command's validator, and the session must satisfy the
//! command's authorisation rule. Only then does the handler run. Handler
//! failures are reported by kind; their detail stays in the logs.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use vetclix_sexp::{Value, parse};

use crate::records::{RecordStore, marshal};
use crate::session::Session;
use crate::users::CredentialTable;

use super::command::CommandTable;
use super::errors::{DispatchError, ErrorKind};
use super::handlers::HandlerContext;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Evaluates requests for any number of sessions.
#[derive(Clone)]
pub struct Dispatcher {
    table: CommandTable,
    users: Arc<dyn CredentialTable>,
    store: Arc<dyn RecordStore>,
}

impl Dispatcher {
    /// Creates a dispatcher over the built-in command table.
    #[must_use]
    pub fn new(users: Arc<dyn CredentialTable>, store: Arc<dyn RecordStore>) -> Self {
        Self::with_table(CommandTable::builtin(), users, store)
    }

    /// Creates a dispatcher over an explicit command table.
    #[must_use]
    pub fn with_table(
        table: CommandTable,
        users: Arc<dyn CredentialTable>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            table,
            users,
            store,
        }
    }

    /// Record store shared by every session.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Evaluates one parsed request.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the request is not a known command, its
    /// body fails validation, the session lacks permission, the command has
    /// no handler, or the handler fails.
    pub fn evaluate(&self, session: &mut Session, request: &Value) -> Result<Value, DispatchError> {
        let (name, body) = split_request(request)?;
        let command = self
            .table
            .lookup(name)
            .ok_or_else(|| DispatchError::unknown_command(name))?;

        if !command.validator.accepts(body) {
            return Err(DispatchError::InvalidBody {
                command: command.name,
            });
        }

        let permissions = session.permissions();
        if !(command.authorise)(permissions) {
            return Err(DispatchError::Unauthorised {
                command: command.name,
                permissions,
            });
        }

        let handler = command.handler.ok_or(DispatchError::Unimplemented {
            command: command.name,
        })?;

        debug!(target: DISPATCH_TARGET, command = command.name, "dispatching request");
        let mut context = HandlerContext {
            session,
            users: self.users.as_ref(),
            store: self.store.as_ref(),
        };
        handler(&mut context, body).map_err(|source| DispatchError::Handler {
            command: command.name,
            source,
        })
    }

    /// Evaluates one parsed request and renders failures as error replies.
    pub fn dispatch(&self, session: &mut Session, request: &Value) -> Value {
        self.evaluate(session, request)
            .unwrap_or_else(|error| error_reply(&error))
    }

    /// Parses request text and dispatches it. Text that does not parse is
    /// answered with a `malformed` error.
    pub fn respond(&self, session: &mut Session, text: &str) -> Value {
        match parse(text) {
            Ok(request) => self.dispatch(session, &request),
            Err(error) => error_reply(&DispatchError::from(error)),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Dispatcher")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

/// Renders an error as its wire reply, logging the detail.
pub(crate) fn error_reply(error: &DispatchError) -> Value {
    let kind = error.kind();
    if kind == ErrorKind::Internal {
        warn!(target: DISPATCH_TARGET, %error, "request failed");
    } else {
        debug!(target: DISPATCH_TARGET, %error, kind = kind.as_str(), "request rejected");
    }
    marshal::error(kind)
}

fn split_request(request: &Value) -> Result<(&str, &[Value]), DispatchError> {
    let items = request
        .as_list()
        .ok_or(DispatchError::not_a_command("request must be a list"))?;
    let (command, body) = items
        .split_first()
        .ok_or(DispatchError::not_a_command("request list is empty"))?;
    let name = command
        .as_text()
        .ok_or(DispatchError::not_a_command("command must be a string"))?;
    Ok((name, body))
}
