//! # Error Handlers
//!
//! User-installed fault callbacks and the fatal fallback used when no callback
//! is bound.
//!
//! ## Calling conventions
//!
//! A handler is registered either from the native API or through the alternate
//! language binding. The convention is the shape of [`HandlerCallback`], so the
//! callback slot that is meaningful is always the one that exists:
//!
//! - **Native** - one signature per object kind, receiving the owning object,
//!   the error code by mutable reference, the diagnostic message and a reserved
//!   slot that is always `None`
//! - **Alternate binding** - a single signature receiving the object's binding
//!   handle and the error code, both as [`BindingInt`] by mutable reference
//!
//! ```rust
//! use errhandler_core::{ErrorCode, ErrorHandler};
//!
//! let handler = ErrorHandler::for_communicator("log_and_continue", |comm, code, message, _| {
//!     eprintln!("{}: {} ({})", comm.name(), message, code);
//!     *code = ErrorCode::SUCCESS;
//! });
//! assert!(handler.is_native());
//! ```

use crate::config::{FatalAction, FatalConfig};
use crate::logging;
use crate::objects::{Communicator, File, OwningObject, Window};
use crate::types::{BindingInt, ErrorCode, ObjectKind};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Slot kept in the native signature for future use. Always `None`.
pub type ReservedSlot<'a> = Option<&'a (dyn Any + Send + Sync)>;

pub type CommErrorFn = dyn Fn(&Communicator, &mut ErrorCode, &str, ReservedSlot<'_>) + Send + Sync;
pub type WinErrorFn = dyn Fn(&Window, &mut ErrorCode, &str, ReservedSlot<'_>) + Send + Sync;
pub type FileErrorFn = dyn Fn(&File, &mut ErrorCode, &str, ReservedSlot<'_>) + Send + Sync;
pub type BindingErrorFn = dyn Fn(&mut BindingInt, &mut BindingInt) + Send + Sync;

/// Calling convention a handler was registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    Native,
    AlternateBinding,
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::Native => write!(f, "native"),
            Convention::AlternateBinding => write!(f, "alternate_binding"),
        }
    }
}

/// Native callback, typed by the object kind it was created for.
pub enum NativeCallback {
    Communicator(Box<CommErrorFn>),
    Window(Box<WinErrorFn>),
    File(Box<FileErrorFn>),
}

impl NativeCallback {
    pub fn kind(&self) -> ObjectKind {
        match self {
            NativeCallback::Communicator(_) => ObjectKind::Communicator,
            NativeCallback::Window(_) => ObjectKind::Window,
            NativeCallback::File(_) => ObjectKind::File,
        }
    }
}

pub enum HandlerCallback {
    Native(NativeCallback),
    AlternateBinding(Box<BindingErrorFn>),
}

/// A bound fault callback together with a name used in diagnostics.
pub struct ErrorHandler {
    name: String,
    callback: HandlerCallback,
}

impl ErrorHandler {
    pub fn new(name: impl Into<String>, callback: HandlerCallback) -> Self {
        Self {
            name: name.into(),
            callback,
        }
    }

    /// Native handler for communicators
    pub fn for_communicator<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Communicator, &mut ErrorCode, &str, ReservedSlot<'_>) + Send + Sync + 'static,
    {
        Self::new(
            name,
            HandlerCallback::Native(NativeCallback::Communicator(Box::new(callback))),
        )
    }

    /// Native handler for windows
    pub fn for_window<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Window, &mut ErrorCode, &str, ReservedSlot<'_>) + Send + Sync + 'static,
    {
        Self::new(
            name,
            HandlerCallback::Native(NativeCallback::Window(Box::new(callback))),
        )
    }

    /// Native handler for files
    pub fn for_file<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&File, &mut ErrorCode, &str, ReservedSlot<'_>) + Send + Sync + 'static,
    {
        Self::new(
            name,
            HandlerCallback::Native(NativeCallback::File(Box::new(callback))),
        )
    }

    /// Handler registered through the alternate binding; usable on any object kind
    pub fn alternate_binding<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut BindingInt, &mut BindingInt) + Send + Sync + 'static,
    {
        Self::new(name, HandlerCallback::AlternateBinding(Box::new(callback)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn callback(&self) -> &HandlerCallback {
        &self.callback
    }

    pub fn convention(&self) -> Convention {
        match self.callback {
            HandlerCallback::Native(_) => Convention::Native,
            HandlerCallback::AlternateBinding(_) => Convention::AlternateBinding,
        }
    }

    pub fn is_native(&self) -> bool {
        self.convention() == Convention::Native
    }

    /// Object kind a native handler was created for; `None` for the alternate binding
    pub fn native_kind(&self) -> Option<ObjectKind> {
        match &self.callback {
            HandlerCallback::Native(native) => Some(native.kind()),
            HandlerCallback::AlternateBinding(_) => None,
        }
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandler")
            .field("name", &self.name)
            .field("convention", &self.convention())
            .field("native_kind", &self.native_kind())
            .finish()
    }
}

/// Handler invoked when no user handler is bound.
///
/// Implementations are expected to terminate the process. The dispatcher still
/// tolerates a return and hands the error code back unchanged.
///
/// `owner` is `None` when no handler is bound. It is `Some` only when a native
/// handler is bound to an object of a different kind.
pub trait FatalHandler: Send + Sync {
    fn invoke_fatal(&self, owner: Option<OwningObject<'_>>, message: &str);
}

impl<F> FatalHandler for F
where
    F: Fn(Option<OwningObject<'_>>, &str) + Send + Sync,
{
    fn invoke_fatal(&self, owner: Option<OwningObject<'_>>, message: &str) {
        self(owner, message)
    }
}

/// Default fatal fallback: log the diagnostic, then abort or exit.
#[derive(Debug, Clone, Default)]
pub struct ProcessTerminator {
    config: FatalConfig,
}

impl ProcessTerminator {
    pub fn new(config: FatalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FatalConfig {
        &self.config
    }
}

impl FatalHandler for ProcessTerminator {
    fn invoke_fatal(&self, owner: Option<OwningObject<'_>>, message: &str) {
        logging::log_fatal(
            owner.map(|o| o.kind()),
            owner.map(|o| o.name()),
            message,
            self.config.action,
        );

        match self.config.action {
            FatalAction::Abort => std::process::abort(),
            FatalAction::Exit => std::process::exit(self.config.exit_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_native_constructors_record_kind() {
        let comm = ErrorHandler::for_communicator("c", |_, _, _, _| {});
        let win = ErrorHandler::for_window("w", |_, _, _, _| {});
        let file = ErrorHandler::for_file("f", |_, _, _, _| {});

        assert_eq!(comm.native_kind(), Some(ObjectKind::Communicator));
        assert_eq!(win.native_kind(), Some(ObjectKind::Window));
        assert_eq!(file.native_kind(), Some(ObjectKind::File));
        assert!(comm.is_native());
        assert_eq!(file.convention(), Convention::Native);
    }

    #[test]
    fn test_alternate_binding_has_no_native_kind() {
        let handler = ErrorHandler::alternate_binding("fortran_handler", |_, code| {
            *code = BindingInt::new(0);
        });
        assert_eq!(handler.convention(), Convention::AlternateBinding);
        assert_eq!(handler.native_kind(), None);
        assert!(!handler.is_native());
        assert_eq!(handler.name(), "fortran_handler");
    }

    #[test]
    fn test_debug_does_not_require_callback_debug() {
        let handler = ErrorHandler::for_window("win_handler", |_, _, _, _| {});
        let debug = format!("{handler:?}");
        assert!(debug.contains("win_handler"));
        assert!(debug.contains("Native"));
    }

    fn fatal_fn<F>(f: F) -> F
    where
        F: Fn(Option<OwningObject<'_>>, &str) + Send + Sync,
    {
        f
    }

    #[test]
    fn test_closure_fatal_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let fatal = fatal_fn(move |owner, message| {
            sink.lock().push((owner.is_none(), message.to_string()));
        });

        fatal.invoke_fatal(None, "no handler");
        assert_eq!(seen.lock().as_slice(), &[(true, "no handler".to_string())]);
    }

    #[test]
    fn test_process_terminator_keeps_config() {
        let terminator = ProcessTerminator::new(FatalConfig {
            action: FatalAction::Exit,
            exit_code: 3,
        });
        assert_eq!(terminator.config().action, FatalAction::Exit);
        assert_eq!(terminator.config().exit_code, 3);
        assert_eq!(ProcessTerminator::default().config().action, FatalAction::Abort);
    }
}
