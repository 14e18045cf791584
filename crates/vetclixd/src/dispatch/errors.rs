//! Error types for request evaluation.
//!
//! Every failure the dispatcher can report maps onto one wire-level
//! [`ErrorKind`]. Detail carried by the Rust error is for logs only; clients
//! only ever see the kind.

use std::io;

use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;
use vetclix_sexp::ParseError;

use crate::permissions::Permissions;
use crate::records::{MarshalError, RecordKind, StoreError, UnknownRecordKind};

/// Failure kinds carried by `("error" "<kind>")` replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorKind {
    /// The request text is not an S-expression.
    Malformed,
    /// Unknown command, wrong body shape, or unknown record type.
    BadRequest,
    /// The session lacks the permission the command needs.
    BadAuth,
    /// A lookup found no record.
    NoMatch,
    /// A handler or collaborator failed.
    Internal,
    /// The command is declared but has no handler.
    Unimplemented,
}

impl ErrorKind {
    /// Wire spelling of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Failures raised inside command handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// `get` named a record type the server does not store.
    #[error(transparent)]
    UnknownRecordType(#[from] UnknownRecordKind),
    /// The requested record does not exist.
    #[error("no {kind} record with id '{id}'")]
    NoMatch {
        /// Family that was searched.
        kind: RecordKind,
        /// Identifier that missed.
        id: String,
    },
    /// The record store failed.
    #[error("record store failed: {0}")]
    Store(#[from] StoreError),
    /// A record body could not be read.
    #[error("record body could not be read: {0}")]
    Marshal(#[from] MarshalError),
    /// The handler was given a body its validator should have rejected.
    #[error("unexpected body for '{command}'")]
    UnexpectedBody {
        /// Command whose handler ran.
        command: &'static str,
    },
}

impl HandlerError {
    /// Wire kind reported for this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownRecordType(_) => ErrorKind::BadRequest,
            Self::NoMatch { .. } => ErrorKind::NoMatch,
            Self::Store(_) | Self::Marshal(_) | Self::UnexpectedBody { .. } => ErrorKind::Internal,
        }
    }
}

/// Errors surfaced while reading, parsing or evaluating a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request text failed to parse.
    #[error("malformed request: {0}")]
    Malformed(#[from] ParseError),

    /// Request bytes are not UTF-8.
    #[error("request is not valid UTF-8")]
    InvalidUtf8,

    /// Request exceeds the maximum allowed size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Bytes received so far.
        size: usize,
        /// Configured ceiling.
        max_size: usize,
    },

    /// IO error while reading the request.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The request is not a non-empty list led by a command string.
    #[error("request is not a command: {reason}")]
    NotACommand {
        /// What was wrong with the request.
        reason: &'static str,
    },

    /// The command is not in the command table.
    #[error("unknown command '{command}'")]
    UnknownCommand {
        /// Name as received.
        command: String,
    },

    /// The body failed the command's validator.
    #[error("invalid body for '{command}'")]
    InvalidBody {
        /// Command whose validator rejected the body.
        command: &'static str,
    },

    /// The session may not run this command.
    #[error("permission level {permissions} may not run '{command}'")]
    Unauthorised {
        /// Command that was refused.
        command: &'static str,
        /// Permissions held by the session.
        permissions: Permissions,
    },

    /// The command has no handler bound.
    #[error("command '{command}' is not implemented")]
    Unimplemented {
        /// Command without a handler.
        command: &'static str,
    },

    /// The handler failed.
    #[error("'{command}' failed: {source}")]
    Handler {
        /// Command whose handler failed.
        command: &'static str,
        /// Handler failure.
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Wire kind reported for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed(_) | Self::InvalidUtf8 | Self::RequestTooLarge { .. } => {
                ErrorKind::Malformed
            }
            Self::Io(_) => ErrorKind::Internal,
            Self::NotACommand { .. } | Self::UnknownCommand { .. } | Self::InvalidBody { .. } => {
                ErrorKind::BadRequest
            }
            Self::Unauthorised { .. } => ErrorKind::BadAuth,
            Self::Unimplemented { .. } => ErrorKind::Unimplemented,
            Self::Handler { source, .. } => source.kind(),
        }
    }

    /// Creates a not-a-command error.
    pub(crate) const fn not_a_command(reason: &'static str) -> Self {
        Self::NotACommand { reason }
    }

    /// Creates an unknown command error.
    pub(crate) fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates a request too large error.
    pub(crate) const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }
}
