use crate::socket::SocketEndpoint;

/// Default TCP host the daemon listens on.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default TCP port for the record protocol.
pub const DEFAULT_TCP_PORT: u16 = 6060;

/// Default name the server advertises.
pub const DEFAULT_SERVER_NAME: &str = "vetclix-server";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Owned server name used where allocation is required.
pub fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.to_owned()
}

/// Computes the default socket endpoint for the daemon.
pub fn default_socket_endpoint() -> SocketEndpoint {
    SocketEndpoint::tcp(DEFAULT_HOST, DEFAULT_TCP_PORT)
}
