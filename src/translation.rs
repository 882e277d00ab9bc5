//! # Error-Code Translation
//!
//! Maps raw completion statuses to the portable codes handlers see.
//!
//! The runtime uses negative values for its internal codes. Non-negative
//! statuses are already portable and pass through unchanged; negative ones are
//! looked up in a table, with unmapped codes reported as a configured
//! "unknown error" class.

use crate::config::TranslationConfig;
use crate::error::{DispatchError, DispatchResult};
use crate::types::{ErrorCode, RawStatus};
use std::collections::HashMap;
use tracing::debug;

/// Translation collaborator. Must be total over every status the transport can report.
pub trait ErrorCodeTranslator: Send + Sync {
    fn translate(&self, raw: RawStatus) -> ErrorCode;
}

/// Reports every status as the portable code with the same value
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl ErrorCodeTranslator for IdentityTranslator {
    fn translate(&self, raw: RawStatus) -> ErrorCode {
        ErrorCode::new(raw.value())
    }
}

#[derive(Debug, Clone)]
pub struct ErrorCodeTable {
    mappings: HashMap<i32, ErrorCode>,
    unknown: ErrorCode,
}

impl ErrorCodeTable {
    pub fn new(unknown: ErrorCode) -> Self {
        Self {
            mappings: HashMap::new(),
            unknown,
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(ErrorCode::new(config.unknown_error_code))
    }

    /// Register the portable code for an internal (negative) status
    pub fn register(&mut self, internal: i32, portable: ErrorCode) -> DispatchResult<()> {
        if internal >= 0 {
            return Err(DispatchError::configuration(
                "translation",
                format!("internal codes are negative, got {internal}"),
            ));
        }
        if portable.value() < 0 {
            return Err(DispatchError::configuration(
                "translation",
                format!("portable codes are non-negative, got {portable}"),
            ));
        }

        if let Some(previous) = self.mappings.insert(internal, portable) {
            debug!(
                internal_code = internal,
                previous = %previous,
                portable = %portable,
                "Replaced error code mapping"
            );
        }
        Ok(())
    }

    pub fn with_mapping(mut self, internal: i32, portable: ErrorCode) -> DispatchResult<Self> {
        self.register(internal, portable)?;
        Ok(self)
    }

    pub fn unknown(&self) -> ErrorCode {
        self.unknown
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Default for ErrorCodeTable {
    fn default() -> Self {
        Self::from_config(&TranslationConfig::default())
    }
}

impl ErrorCodeTranslator for ErrorCodeTable {
    fn translate(&self, raw: RawStatus) -> ErrorCode {
        if raw.value() >= 0 {
            return ErrorCode::new(raw.value());
        }
        self.mappings.get(&raw.value()).copied().unwrap_or(self.unknown)
    }
}
