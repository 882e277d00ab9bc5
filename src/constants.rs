//! # Runtime Constants
//!
//! Integer tags and well-known error classes shared between the dispatch core
//! and the language bindings that talk to it.
//!
//! The numeric values are part of the binding boundary: foreign callers pass
//! object-kind and operation-category tags as plain integers, and handlers see
//! portable error classes as plain integers.

/// Portable error classes seen by user handlers.
///
/// Only the classes this core refers to directly are listed here; the full
/// catalog belongs to the error-code layer.
pub mod error_class {
    pub const SUCCESS: i32 = 0;
    pub const ERR_COMM: i32 = 5;
    pub const ERR_REQUEST: i32 = 7;
    pub const ERR_ARG: i32 = 13;
    pub const ERR_UNKNOWN: i32 = 14;
    pub const ERR_TRUNCATE: i32 = 15;
    pub const ERR_OTHER: i32 = 16;
    pub const ERR_INTERN: i32 = 17;
    pub const ERR_PENDING: i32 = 19;
    pub const ERR_FILE: i32 = 27;
    pub const ERR_IO: i32 = 35;
    pub const ERR_WIN: i32 = 45;
}

/// Object-kind tags as recorded on owning objects by the binding layer.
pub mod object_kind {
    /// Predefined handlers are not bound to an object kind and never reach dispatch.
    pub const PREDEFINED: i32 = 0;
    pub const COMMUNICATOR: i32 = 1;
    pub const WINDOW: i32 = 2;
    pub const FILE: i32 = 3;
}

/// Request category tags for pending asynchronous operations.
pub mod request_category {
    pub const POINT_TO_POINT: i32 = 0;
    pub const COLLECTIVE_IO: i32 = 1;
    pub const GENERALIZED: i32 = 2;
    pub const ONE_SIDED: i32 = 3;
    pub const NULL: i32 = 4;
    pub const MAX: i32 = 5;
}

/// Environment variables consulted by configuration and logging.
pub mod env {
    pub const CONFIG_PREFIX: &str = "ERRHANDLER";
    pub const CONFIG_SEPARATOR: &str = "__";
    pub const ENVIRONMENT: &str = "ERRHANDLER_ENV";
    pub const FALLBACK_ENVIRONMENT: &str = "APP_ENV";
}

/// Name reported for the process-wide default communicator.
pub const WORLD_COMMUNICATOR_NAME: &str = "COMM_WORLD";
