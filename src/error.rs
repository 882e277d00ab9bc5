//! # Dispatch Error Types
//!
//! Structured errors for the decoding and configuration boundaries of the
//! dispatch core, built with thiserror.
//!
//! Dispatch itself reports outcomes only through the returned error code;
//! these errors surface when a foreign caller hands over a tag or integer
//! that cannot be represented, or when configuration is invalid.

use crate::types::ObjectKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown object kind tag: {raw}")]
    UnknownObjectKind { raw: i32 },

    #[error("Handler kind mismatch: handler expects {handler}, owner is {object}")]
    HandlerKindMismatch {
        handler: ObjectKind,
        object: ObjectKind,
    },

    #[error("Value {value} is outside the binding integer range")]
    CodeOutOfRange { value: i64 },

    #[error("Configuration error: {component}: {message}")]
    Configuration { component: String, message: String },
}

impl DispatchError {
    /// Create an unknown object kind error
    pub fn unknown_object_kind(raw: i32) -> Self {
        Self::UnknownObjectKind { raw }
    }

    /// Create a handler/owner kind mismatch error
    pub fn handler_kind_mismatch(handler: ObjectKind, object: ObjectKind) -> Self {
        Self::HandlerKindMismatch { handler, object }
    }

    /// Create a binding range error
    pub fn code_out_of_range(value: i64) -> Self {
        Self::CodeOutOfRange { value }
    }

    /// Create a configuration error
    pub fn configuration(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for DispatchError {
    fn from(err: config::ConfigError) -> Self {
        DispatchError::configuration("config", err.to_string())
    }
}

/// Result type alias for dispatch boundary operations
pub type DispatchResult<T> = Result<T, DispatchError>;
