//! Unit and behavioural tests for the client runtime.

mod fake_daemon;
mod unit;

use std::ffi::OsString;

use vetclix_config::Config;

use crate::AppError;
use crate::config::ConfigLoader;

/// Loader that ignores flags and hands out a fixed configuration.
pub(crate) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(crate) fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}
