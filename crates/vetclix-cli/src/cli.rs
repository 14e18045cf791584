//! Command-line arguments for `vetclix`.

use clap::Parser;

/// Sends one request to the Vetclix daemon and prints the reply.
///
/// Configuration flags such as `--daemon-socket` are consumed before these
/// arguments are parsed.
#[derive(Parser, Debug)]
#[command(name = "vetclix", version)]
pub(crate) struct Cli {
    /// Request text, for example `("version?")`. Read from stdin when absent.
    #[arg(value_name = "REQUEST")]
    pub(crate) request: Option<String>,
}
