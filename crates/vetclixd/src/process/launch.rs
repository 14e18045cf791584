//! Production launch sequence.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::records::{InMemoryRecordStore, RecordStore};

use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};
use super::PROCESS_TARGET;

/// Runs the daemon in the foreground with the system collaborators until a
/// termination signal arrives.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap, binding or shutdown fails.
pub fn run_daemon() -> Result<(), LaunchError> {
    run_daemon_with(
        &SystemConfigLoader,
        Arc::new(StructuredHealthReporter::new()),
        Arc::new(InMemoryRecordStore::new()),
        &SystemShutdownSignal::new(),
    )
}

/// Runs the daemon with injected collaborators.
fn run_daemon_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    store: Arc<dyn RecordStore>,
    shutdown: &dyn ShutdownSignal,
) -> Result<(), LaunchError> {
    let daemon = bootstrap_with(loader, reporter, store)?;
    info!(
        target: PROCESS_TARGET,
        server = daemon.config().server_name(),
        "starting daemon runtime"
    );
    daemon.serve(shutdown)
}
