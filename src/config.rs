//! # Dispatch Configuration
//!
//! Runtime settings for the fatal fallback, error-code translation and logging.
//!
//! Defaults are layered under environment overrides using the `config` crate.
//! Keys are nested with a double underscore after the `ERRHANDLER_` prefix:
//!
//! ```text
//! ERRHANDLER_FATAL__ACTION=exit
//! ERRHANDLER_FATAL__EXIT_CODE=3
//! ERRHANDLER_TRANSLATION__UNKNOWN_ERROR_CODE=16
//! ERRHANDLER_LOGGING__JSON=true
//! ```

use crate::constants::{env, error_class};
use crate::error::{DispatchError, DispatchResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub fatal: FatalConfig,
    pub translation: TranslationConfig,
    pub logging: LoggingConfig,
}

/// What the default fatal fallback does once it has logged the diagnostic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatalAction {
    #[default]
    Abort,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatalConfig {
    pub action: FatalAction,
    /// Process exit status used with [`FatalAction::Exit`]
    pub exit_code: i32,
}

impl Default for FatalConfig {
    fn default() -> Self {
        Self {
            action: FatalAction::Abort,
            exit_code: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Portable code reported for internal codes with no registered mapping
    pub unknown_error_code: i32,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            unknown_error_code: error_class::ERR_UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
    /// Explicit filter directive; derived from the environment name when unset
    pub level: Option<String>,
}

impl DispatchConfig {
    /// Load defaults overlaid with `ERRHANDLER_*` environment variables
    pub fn from_env() -> DispatchResult<Self> {
        Self::from_environment(Self::environment_source())
    }

    /// Load defaults overlaid with the given environment source
    pub fn from_environment(source: config::Environment) -> DispatchResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&DispatchConfig::default())?)
            .add_source(source)
            .build()?;

        let loaded: DispatchConfig = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn environment_source() -> config::Environment {
        config::Environment::with_prefix(env::CONFIG_PREFIX)
            .prefix_separator("_")
            .separator(env::CONFIG_SEPARATOR)
            .try_parsing(true)
    }

    pub fn validate(&self) -> DispatchResult<()> {
        if self.translation.unknown_error_code <= error_class::SUCCESS {
            return Err(DispatchError::configuration(
                "translation",
                format!(
                    "unknown_error_code must be a failure code, got {}",
                    self.translation.unknown_error_code
                ),
            ));
        }

        if !(0..=255).contains(&self.fatal.exit_code) {
            return Err(DispatchError::configuration(
                "fatal",
                format!("exit_code must be within 0..=255, got {}", self.fatal.exit_code),
            ));
        }

        Ok(())
    }
}
