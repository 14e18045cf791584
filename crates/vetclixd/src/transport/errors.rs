//! Listener errors.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced while binding or running the socket listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The TCP host could not be resolved.
    #[error("could not resolve {host}:{port}: {source}")]
    Resolve {
        /// Host as configured.
        host: String,
        /// Port as configured.
        port: u16,
        /// Resolver failure.
        #[source]
        source: io::Error,
    },
    /// Resolution succeeded but produced no addresses.
    #[error("{host}:{port} resolved to no addresses")]
    NoAddress {
        /// Host as configured.
        host: String,
        /// Port as configured.
        port: u16,
    },
    /// Binding the TCP socket failed.
    #[error("could not bind TCP listener on {addr}: {source}")]
    BindTcp {
        /// Address the bind targeted.
        addr: SocketAddr,
        /// Bind failure.
        #[source]
        source: io::Error,
    },
    /// The listener could not be made non-blocking.
    #[error("could not make listener non-blocking: {source}")]
    NonBlocking {
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Unix sockets are unavailable on this platform.
    #[cfg(not(unix))]
    #[error("unix sockets are not supported here ({endpoint})")]
    UnsupportedUnix {
        /// Rendered endpoint.
        endpoint: String,
    },
    /// Binding the Unix socket failed.
    #[cfg(unix)]
    #[error("could not bind unix listener at {path}: {source}")]
    BindUnix {
        /// Socket path.
        path: String,
        /// Bind failure.
        #[source]
        source: io::Error,
    },
    /// Another process is serving the socket path.
    #[cfg(unix)]
    #[error("unix socket {path} is served by another process")]
    UnixInUse {
        /// Socket path.
        path: String,
    },
    /// Something other than a socket occupies the path.
    #[cfg(unix)]
    #[error("{path} exists and is not a socket")]
    UnixNotSocket {
        /// Occupied path.
        path: String,
    },
    /// Probing an existing socket path failed.
    #[cfg(unix)]
    #[error("could not probe existing unix socket {path}: {source}")]
    UnixProbe {
        /// Socket path.
        path: String,
        /// Probe failure.
        #[source]
        source: io::Error,
    },
    /// A stale socket file could not be removed.
    #[cfg(unix)]
    #[error("could not remove stale unix socket {path}: {source}")]
    UnixCleanup {
        /// Socket path.
        path: String,
        /// Removal failure.
        #[source]
        source: io::Error,
    },
    /// The accept thread panicked.
    #[error("listener thread panicked")]
    ThreadPanic,
}
