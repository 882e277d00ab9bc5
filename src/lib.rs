#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # Errhandler Core
//!
//! Error-handler dispatch for a distributed communication runtime.
//!
//! ## Overview
//!
//! When the transport detects a fault on a communicator, a remote-memory
//! window, a parallel file handle or an outstanding asynchronous operation, this
//! crate locates the error handler bound to the responsible object and invokes
//! it with the calling convention it was registered with - the native one, or
//! the alternate convention used by handlers registered from another language
//! binding. Objects with no handler fall back to a fatal handler.
//!
//! ## Architecture
//!
//! ```text
//! RequestFaultResolver ──▶ ErrhandlerDispatcher ──▶ bound ErrorHandler
//!   (first faulted op,        (convention +            │
//!    owner by category)        object kind)            └─▶ FatalHandler (none bound)
//! ```
//!
//! ## Module Organization
//!
//! - [`dispatcher`] - handler invocation for a single owning object
//! - [`request`] - fault location and owner resolution for pending operations
//! - [`errhandler`] - handler types and the fatal fallback
//! - [`objects`] - communicators, windows, files
//! - [`translation`] - raw status to portable error-code translation
//! - [`types`] - error-code representations and classification tags
//! - [`config`] - runtime configuration
//! - [`logging`] - structured logging setup
//! - [`error`] - boundary error types
//!
//! ## Concurrency
//!
//! Every operation is a synchronous call on the invoking thread. Nothing here
//! spawns, suspends or holds a lock while a handler runs.

pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod errhandler;
pub mod error;
pub mod logging;
pub mod objects;
pub mod request;
pub mod translation;
pub mod types;

pub use config::{DispatchConfig, FatalAction, FatalConfig, LoggingConfig, TranslationConfig};
pub use dispatcher::ErrhandlerDispatcher;
pub use errhandler::{
    Convention, ErrorHandler, FatalHandler, HandlerCallback, NativeCallback, ProcessTerminator,
    ReservedSlot,
};
pub use error::{DispatchError, DispatchResult};
pub use objects::{Communicator, File, OwningObject, Window};
pub use request::{OperationOwner, PendingOperation, RequestFaultResolver};
pub use translation::{ErrorCodeTable, ErrorCodeTranslator, IdentityTranslator};
pub use types::{BindingInt, ErrorCode, ObjectKind, OperationCategory, RawStatus};
