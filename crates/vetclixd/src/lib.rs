//! The Vetclix record server daemon.
//!
//! Clients open a connection, write a single S-expression request, close
//! their write side and read back a single S-expression reply. The daemon
//! authenticates sessions against a users file, checks permissions per
//! command, and keeps client and patient records in memory.
//!
//! Startup goes through [`bootstrap_with`], which loads configuration,
//! installs structured telemetry, prepares the socket directory and loads
//! the users file. [`Daemon::serve`] then binds the socket and answers
//! requests until a shutdown signal arrives.

mod bootstrap;
pub mod dispatch;
mod health;
mod permissions;
mod process;
pub mod records;
mod session;
mod telemetry;
mod transport;
mod users;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, RunningDaemon, StaticConfigLoader, SystemConfigLoader,
    bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use permissions::{PermissionChange, Permissions};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon};
pub use session::Session;
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::ListenerError;
pub use users::{CredentialTable, UserTable, UserTableError};

#[cfg(test)]
mod tests;
