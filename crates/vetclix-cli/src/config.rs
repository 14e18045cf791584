//! Configuration loading for the client.
//!
//! Leading configuration flags (`--daemon-socket`, `--config-path` and
//! friends) are handed to `ortho_config`; everything from the first other
//! token onwards is parsed by [`crate::cli::Cli`].

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use vetclix_config::Config;

use crate::AppError;

/// Flags understood by the configuration loader.
const CONFIG_FLAGS: &[&str] = &[
    "--config-path",
    "--daemon-socket",
    "--server-name",
    "--users-path",
    "--log-filter",
    "--log-format",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the program name and leading config flags.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

/// Arguments split between the configuration loader and the CLI parser.
///
/// Both halves keep the program name in first position.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SplitArguments {
    pub(crate) config: Vec<OsString>,
    pub(crate) cli: Vec<OsString>,
}

/// Classification of a single argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    /// A config flag with its value attached (`--flag=value`).
    Inline,
    /// A config flag whose value is the next argument.
    Separate,
    /// Anything else; ends the config prefix.
    Other,
}

fn classify(argument: &OsString) -> Flag {
    let text = argument.to_string_lossy();
    let (name, inline) = match text.split_once('=') {
        Some((name, _)) => (name, true),
        None => (&*text, false),
    };
    match (CONFIG_FLAGS.contains(&name), inline) {
        (true, true) => Flag::Inline,
        (true, false) => Flag::Separate,
        (false, _) => Flag::Other,
    }
}

pub(crate) fn split_arguments(args: Vec<OsString>) -> SplitArguments {
    let mut remaining = args.into_iter();
    let program = remaining.next().unwrap_or_else(|| OsString::from("vetclix"));
    let mut config = vec![program.clone()];
    let mut cli = vec![program];

    while let Some(argument) = remaining.next() {
        match classify(&argument) {
            Flag::Inline => config.push(argument),
            Flag::Separate => {
                config.push(argument);
                config.extend(remaining.next());
            }
            Flag::Other => {
                cli.push(argument);
                break;
            }
        }
    }
    cli.extend(remaining);
    SplitArguments { config, cli }
}
