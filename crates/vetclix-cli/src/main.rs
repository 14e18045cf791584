//! Entry point for the `vetclix` client.
//!
//! Delegates to [`vetclix_cli::run`], which loads configuration, sends one
//! request to the daemon and prints the reply.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin: StdinLock<'_> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    vetclix_cli::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
