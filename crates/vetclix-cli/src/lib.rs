//! Client runtime for the Vetclix record server.
//!
//! `vetclix` sends one request per invocation. The request is parsed locally
//! first so a typo never reaches the daemon, then sent in canonical form. The
//! reply is printed verbatim and mapped to an exit status.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use vetclix_config::Config;
use vetclix_sexp::{Value, dump, parse};

mod cli;
mod config;
mod errors;
mod transport;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, split_arguments};
pub(crate) use errors::AppError;
use transport::connect;

/// Exit status for a reply of the form `("error" ...)`.
const ERROR_REPLY: u8 = 1;
/// Exit status for failures that produced no reply.
const LOCAL_FAILURE: u8 = 2;

/// Borrowed process streams.
pub(crate) struct IoStreams<'a, R: Read, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

/// How the daemon answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Any reply other than an error tuple.
    Reply,
    /// An `("error" kind)` tuple.
    ErrorReply,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Reply => Self::SUCCESS,
            Outcome::ErrorReply => Self::from(ERROR_REPLY),
        }
    }
}

/// Runs the client with the given arguments and process streams.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let mut io = IoStreams {
        stdin,
        stdout,
        stderr,
    };
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let split = split_arguments(args.into_iter().collect());
    let cli = match Cli::try_parse_from(split.cli) {
        Ok(cli) => cli,
        Err(error) if matches!(
            error.kind(),
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion
        ) =>
        {
            let _ = write!(io.stdout, "{error}");
            return ExitCode::SUCCESS;
        }
        Err(error) => return report(io, &AppError::CliUsage(error)),
    };

    let result = loader
        .load(&split.config)
        .and_then(|config| execute(&cli, &config, io));
    match result {
        Ok(outcome) => outcome.into(),
        Err(error) => report(io, &error),
    }
}

fn report<R: Read, W: Write, E: Write>(
    io: &mut IoStreams<'_, R, W, E>,
    error: &AppError,
) -> ExitCode {
    let _ = writeln!(io.stderr, "vetclix: {error}");
    ExitCode::from(LOCAL_FAILURE)
}

fn execute<R, W, E>(
    cli: &Cli,
    config: &Config,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<Outcome, AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let text = match &cli.request {
        Some(request) => request.clone(),
        None => {
            let mut buffer = String::new();
            io.stdin
                .read_to_string(&mut buffer)
                .map_err(AppError::ReadRequest)?;
            buffer
        }
    };
    let request = parse(&text).map_err(AppError::InvalidRequest)?;

    let mut connection = connect(config.daemon_socket())?;
    connection
        .send(dump(&request).as_bytes())
        .map_err(AppError::SendRequest)?;
    let response = connection.receive().map_err(AppError::ReadResponse)?;

    let outcome = classify_response(&response)?;
    writeln!(io.stdout, "{}", response.trim_end()).map_err(AppError::PrintReply)?;
    io.stdout.flush().map_err(AppError::PrintReply)?;
    Ok(outcome)
}

/// Decides whether the daemon's reply is an error tuple.
pub(crate) fn classify_response(response: &str) -> Result<Outcome, AppError> {
    let value = parse(response).map_err(|source| AppError::InvalidResponse {
        response: response.to_owned(),
        source,
    })?;
    let is_error = value
        .as_list()
        .and_then(<[Value]>::first)
        .and_then(Value::as_text)
        == Some("error");
    Ok(if is_error {
        Outcome::ErrorReply
    } else {
        Outcome::Reply
    })
}

#[cfg(test)]
mod tests;
