//! Socket transport for the daemon.
//!
//! The listener binds the configured TCP or Unix endpoint and serves
//! connections one at a time on a background thread.

mod errors;
mod listener;
mod stream;
#[cfg(test)]
mod test_utils;

pub use self::errors::ListenerError;
pub(crate) use self::listener::{ListenerHandle, SocketListener};
pub(crate) use self::stream::{ConnectionHandler, ConnectionStream};
#[cfg(test)]
pub(crate) use self::test_utils::EchoCountingHandler;

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
