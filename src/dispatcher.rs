//! # Error Handler Dispatcher
//!
//! Invokes the error handler bound to a communicator, window or file with the
//! calling convention the handler was registered with.
//!
//! ## Dispatch rules
//!
//! - No handler bound: the fatal fallback runs with no owning object and the
//!   diagnostic message. It is not expected to return; if it does, the error
//!   code comes back unchanged.
//! - Alternate binding: the callback receives the owner's binding handle and a
//!   converted copy of the error code. Changes it makes to that copy are not
//!   seen by the caller.
//! - Native: the callback matching the owner's kind receives the owner, the
//!   error code by mutable reference, the message and an empty reserved slot.
//!   Whatever it leaves in the error code is returned.
//!
//! A native handler created for one object kind but bound to another cannot be
//! called with the right signature. That is an internal-consistency failure and
//! is routed to the fatal fallback. It is the one path where the fallback
//! receives `Some(owner)`; the no-handler path always passes `None`.
//!
//! Dispatch is synchronous on the caller's thread and takes no locks while the
//! handler runs.

use crate::config::DispatchConfig;
use crate::errhandler::{ErrorHandler, FatalHandler, HandlerCallback, NativeCallback, ProcessTerminator};
use crate::error::{DispatchError, DispatchResult};
use crate::logging;
use crate::objects::OwningObject;
use crate::types::{BindingInt, ErrorCode, ObjectKind};
use std::fmt;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Clone)]
pub struct ErrhandlerDispatcher {
    fatal: Arc<dyn FatalHandler>,
}

impl ErrhandlerDispatcher {
    pub fn new(fatal: Arc<dyn FatalHandler>) -> Self {
        Self { fatal }
    }

    /// Dispatcher whose fatal fallback terminates the process as configured
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(Arc::new(ProcessTerminator::new(config.fatal.clone())))
    }

    /// Invoke `handler` on behalf of `owner` and return the resulting error code.
    pub fn invoke(
        &self,
        handler: Option<&ErrorHandler>,
        owner: OwningObject<'_>,
        error_code: ErrorCode,
        message: &str,
    ) -> ErrorCode {
        let Some(handler) = handler else {
            warn!(
                object_kind = %owner.kind(),
                object_name = %owner.name(),
                error_code = error_code.value(),
                "No error handler bound - invoking fatal fallback"
            );
            self.fatal.invoke_fatal(None, message);
            return error_code;
        };

        logging::log_dispatch(
            handler.name(),
            handler.convention(),
            owner.kind(),
            owner.name(),
            error_code,
            message,
        );

        let mut error_code = error_code;
        let mut binding_code = error_code.to_binding();

        match handler.callback() {
            HandlerCallback::AlternateBinding(callback) => {
                let mut handle = BindingInt::from_index(owner.binding_index());
                callback(&mut handle, &mut binding_code);
            }
            HandlerCallback::Native(native) => match (native, owner) {
                (NativeCallback::Communicator(callback), OwningObject::Communicator(comm)) => {
                    callback(comm, &mut error_code, message, None)
                }
                (NativeCallback::Window(callback), OwningObject::Window(win)) => {
                    callback(win, &mut error_code, message, None)
                }
                (NativeCallback::File(callback), OwningObject::File(file)) => {
                    callback(file, &mut error_code, message, None)
                }
                (native, owner) => {
                    let mismatch = DispatchError::handler_kind_mismatch(native.kind(), owner.kind());
                    error!(
                        handler = %handler.name(),
                        object_name = %owner.name(),
                        error = %mismatch,
                        "Error handler bound to the wrong object kind"
                    );
                    self.fatal
                        .invoke_fatal(Some(owner), &format!("{message}: {mismatch}"));
                }
            },
        }

        error_code
    }

    /// Invoke whatever handler is currently bound to `owner`
    pub fn dispatch_owner(
        &self,
        owner: OwningObject<'_>,
        error_code: ErrorCode,
        message: &str,
    ) -> ErrorCode {
        let handler = owner.error_handler();
        self.invoke(handler.as_deref(), owner, error_code, message)
    }

    /// Entry point for callers that carry the object kind as a raw tag.
    ///
    /// The tag must decode to a known kind and agree with `owner`; otherwise no
    /// handler runs and the inconsistency is returned.
    pub fn invoke_tagged(
        &self,
        handler: Option<&ErrorHandler>,
        owner: OwningObject<'_>,
        raw_kind: i32,
        error_code: ErrorCode,
        message: &str,
    ) -> DispatchResult<ErrorCode> {
        let kind = ObjectKind::try_from(raw_kind)?;
        if kind != owner.kind() {
            return Err(DispatchError::handler_kind_mismatch(kind, owner.kind()));
        }
        Ok(self.invoke(handler, owner, error_code, message))
    }
}

impl Default for ErrhandlerDispatcher {
    fn default() -> Self {
        Self::from_config(&DispatchConfig::default())
    }
}

impl fmt::Debug for ErrhandlerDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrhandlerDispatcher").finish_non_exhaustive()
    }
}
