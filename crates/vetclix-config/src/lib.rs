//! Shared configuration for the Vetclix daemon and client.
//!
//! Values are layered by [`ortho_config`]: built-in defaults, then a TOML file
//! named by `--config-path` (or `VETCLIX_CONFIG_PATH`), then `VETCLIX_*`
//! environment variables, then command-line flags.
//!
//! ```toml
//! daemon_socket = { transport = "tcp", host = "0.0.0.0", port = 6060 }
//! server_name = "clinic-front-desk"
//! users_path = "/etc/vetclix/users.sexp"
//! log_filter = "vetclixd=debug"
//! log_format = "compact"
//! ```

mod defaults;
mod logging;
mod socket;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_SERVER_NAME, DEFAULT_TCP_PORT, default_log_filter,
    default_log_filter_string, default_log_format, default_server_name, default_socket_endpoint,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};

/// Resolved configuration shared by `vetclixd` and `vetclix`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "VETCLIX")]
pub struct Config {
    /// Endpoint the daemon listens on and the client connects to.
    #[ortho_config(default = default_socket_endpoint())]
    pub daemon_socket: SocketEndpoint,
    /// Name the server advertises in logs and health events.
    #[ortho_config(default = default_server_name())]
    pub server_name: String,
    /// Users file holding `(user password level)` entries.
    pub users_path: Option<Utf8PathBuf>,
    /// Tracing filter expression.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Config {
    /// Endpoint the daemon binds.
    #[must_use]
    pub fn daemon_socket(&self) -> &SocketEndpoint {
        &self.daemon_socket
    }

    /// Advertised server name.
    #[must_use]
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Users file path, when configured.
    #[must_use]
    pub fn users_path(&self) -> Option<&camino::Utf8Path> {
        self.users_path.as_deref()
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daemon_socket: default_socket_endpoint(),
            server_name: default_server_name(),
            users_path: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_local_tcp() {
        let config = Config::default();
        assert_eq!(
            config.daemon_socket(),
            &SocketEndpoint::tcp(DEFAULT_HOST, DEFAULT_TCP_PORT)
        );
        assert_eq!(config.server_name(), "vetclix-server");
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.users_path().is_none());
    }
}
