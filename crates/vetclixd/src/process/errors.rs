//! Errors that end the daemon process.

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::records::StoreError;
use crate::transport::ListenerError;

use super::shutdown::ShutdownError;

/// Reasons the daemon could not start, run or stop cleanly.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Configuration, telemetry, socket preparation or the users file failed.
    #[error("could not bootstrap vetclixd: {source}")]
    Bootstrap {
        /// What went wrong during bootstrap.
        #[from]
        source: BootstrapError,
    },
    /// The socket could not be bound or the accept thread died.
    #[error("socket listener error: {source}")]
    Listener {
        /// Listener failure.
        #[from]
        source: ListenerError,
    },
    /// Signal handlers could not be installed.
    #[error("could not wait for a shutdown signal: {source}")]
    Shutdown {
        /// Signal setup failure.
        #[from]
        source: ShutdownError,
    },
    /// The record store did not close cleanly.
    #[error("failed to close record store: {source}")]
    Store {
        /// Store failure.
        #[source]
        source: StoreError,
    },
}
