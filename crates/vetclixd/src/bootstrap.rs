//! Daemon bootstrap and serving.

use std::net::SocketAddr;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;
use tracing::info;

use vetclix_config::{Config, SocketPreparationError};

use crate::dispatch::{DispatchConnectionHandler, Dispatcher};
use crate::health::HealthReporter;
use crate::process::{LaunchError, PROCESS_TARGET, ShutdownSignal};
use crate::records::RecordStore;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{ListenerHandle, SocketListener};
use crate::users::{UserTable, UserTableError};

/// Source of the daemon configuration.
pub trait ConfigLoader: Send + Sync {
    /// Loads the daemon configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when configuration cannot be resolved.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that reads defaults, file, environment and flags.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that hands out a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry could not be installed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The socket directory could not be prepared.
    #[error("failed to prepare daemon socket: {source}")]
    Socket {
        /// Filesystem error.
        #[source]
        source: SocketPreparationError,
    },
    /// The users file could not be loaded.
    #[error("failed to load users: {source}")]
    Users {
        /// Users file error.
        #[source]
        source: UserTableError,
    },
}

/// A bootstrapped daemon, ready to bind its socket.
pub struct Daemon {
    config: Config,
    dispatcher: Arc<Dispatcher>,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Daemon {
    /// Resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Dispatcher shared by every connection.
    #[must_use]
    pub const fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Telemetry handle.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Binds the configured endpoint and starts accepting connections.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Listener`] when the socket cannot be bound.
    pub fn start(self) -> Result<RunningDaemon, LaunchError> {
        let listener = SocketListener::bind(self.config.daemon_socket())?;
        let local_addr = listener.local_addr();
        let handler = Arc::new(DispatchConnectionHandler::new(Arc::clone(&self.dispatcher)));
        let listener = listener.start(handler)?;
        self.reporter
            .listener_ready(self.config.daemon_socket(), local_addr);
        Ok(RunningDaemon {
            daemon: self,
            listener,
            local_addr,
        })
    }

    /// Serves requests until `shutdown` fires, then stops the listener and
    /// closes the record store.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when binding, waiting for the signal, or
    /// shutting down fails.
    pub fn serve(self, shutdown: &dyn ShutdownSignal) -> Result<(), LaunchError> {
        let running = self.start()?;
        let waited = shutdown.wait();
        let stopped = running.stop();
        waited?;
        stopped
    }
}

/// A daemon whose listener is running.
pub struct RunningDaemon {
    daemon: Daemon,
    listener: ListenerHandle,
    local_addr: Option<SocketAddr>,
}

impl RunningDaemon {
    /// Bound TCP address, when listening on TCP.
    #[must_use]
    pub const fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Stops accepting connections and closes the record store.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when the accept thread panicked or the store
    /// fails to close.
    pub fn stop(self) -> Result<(), LaunchError> {
        let Self {
            daemon, listener, ..
        } = self;
        listener.shutdown();
        listener.join()?;
        daemon
            .dispatcher
            .store()
            .close()
            .map_err(|source| LaunchError::Store { source })?;
        info!(target: PROCESS_TARGET, "shutdown sequence completed");
        daemon.reporter.shutdown_completed();
        Ok(())
    }
}

/// Bootstraps the daemon: loads configuration, installs telemetry, prepares
/// the socket directory and loads the users file.
///
/// # Errors
///
/// Returns [`BootstrapError`] for the first step that fails. The reporter
/// sees the failure before it is returned.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    store: Arc<dyn RecordStore>,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();
    let fail = |error: BootstrapError| {
        reporter.bootstrap_failed(&error);
        error
    };

    let config = loader
        .load()
        .map_err(|source| fail(BootstrapError::Configuration { source }))?;
    let telemetry = telemetry::initialise(&config)
        .map_err(|source| fail(BootstrapError::Telemetry { source }))?;
    config
        .daemon_socket()
        .prepare_filesystem()
        .map_err(|source| fail(BootstrapError::Socket { source }))?;
    let users = match config.users_path() {
        Some(path) => UserTable::load(path.as_std_path())
            .map_err(|source| fail(BootstrapError::Users { source }))?,
        None => UserTable::new(),
    };

    let dispatcher = Arc::new(Dispatcher::new(Arc::new(users), store));
    reporter.bootstrap_succeeded(&config);
    Ok(Daemon {
        config,
        dispatcher,
        telemetry,
        reporter,
    })
}
