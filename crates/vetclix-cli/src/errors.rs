//! Failures the client reports without a daemon reply to print.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use vetclix_sexp::ParseError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("could not load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to read request from stdin: {0}")]
    ReadRequest(io::Error),
    #[error("request is not a valid S-expression: {0}")]
    InvalidRequest(ParseError),
    #[error("could not resolve {endpoint}: {source}")]
    Resolve { endpoint: String, source: io::Error },
    #[error("no daemon reachable at {endpoint}: {source}")]
    Connect { endpoint: String, source: io::Error },
    #[cfg(not(unix))]
    #[error("unix socket endpoints are not available on this platform: {0}")]
    UnsupportedUnixTransport(String),
    #[error("could not send request: {0}")]
    SendRequest(io::Error),
    #[error("could not read reply: {0}")]
    ReadResponse(io::Error),
    #[error("daemon sent an unparseable response {response:?}: {source}")]
    InvalidResponse { response: String, source: ParseError },
    #[error("could not print reply: {0}")]
    PrintReply(io::Error),
}
