//! # Owning Objects
//!
//! Communicators, windows and files as seen by the dispatch core: a name for
//! diagnostics, the index the alternate binding uses as a handle, and the
//! currently bound error handler.
//!
//! Binding storage is a `parking_lot::RwLock`. The dispatch path only ever
//! takes an `Arc` snapshot of the binding and releases the lock before the
//! handler runs, so a handler that rebinds its own object cannot deadlock.

use crate::errhandler::ErrorHandler;
use crate::types::ObjectKind;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

macro_rules! owning_object {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        pub struct $name {
            name: String,
            binding_index: i32,
            error_handler: RwLock<Option<Arc<ErrorHandler>>>,
        }

        impl $name {
            pub fn new(name: impl Into<String>, binding_index: i32) -> Self {
                Self {
                    name: name.into(),
                    binding_index,
                    error_handler: RwLock::new(None),
                }
            }

            /// Builder-style binding, used when the object is created with a handler
            pub fn with_error_handler(self, handler: Arc<ErrorHandler>) -> Self {
                *self.error_handler.write() = Some(handler);
                self
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn binding_index(&self) -> i32 {
                self.binding_index
            }

            pub const fn kind(&self) -> ObjectKind {
                $kind
            }

            /// Snapshot of the bound handler
            pub fn error_handler(&self) -> Option<Arc<ErrorHandler>> {
                self.error_handler.read().clone()
            }

            /// Replace the bound handler, returning the previous binding
            pub fn set_error_handler(
                &self,
                handler: Option<Arc<ErrorHandler>>,
            ) -> Option<Arc<ErrorHandler>> {
                std::mem::replace(&mut *self.error_handler.write(), handler)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("name", &self.name)
                    .field("binding_index", &self.binding_index)
                    .field(
                        "error_handler",
                        &self.error_handler.read().as_ref().map(|h| h.name().to_string()),
                    )
                    .finish()
            }
        }
    };
}

owning_object!(
    /// Communication context; owns errors raised by point-to-point traffic
    Communicator,
    ObjectKind::Communicator
);

owning_object!(
    /// Remote-memory window; owns errors raised by one-sided operations
    Window,
    ObjectKind::Window
);

owning_object!(
    /// Parallel file handle; owns errors raised by collective I/O
    File,
    ObjectKind::File
);

/// Borrowed reference to the object a fault is reported against.
#[derive(Debug, Clone, Copy)]
pub enum OwningObject<'a> {
    Communicator(&'a Communicator),
    Window(&'a Window),
    File(&'a File),
}

impl<'a> OwningObject<'a> {
    pub fn kind(&self) -> ObjectKind {
        match self {
            OwningObject::Communicator(_) => ObjectKind::Communicator,
            OwningObject::Window(_) => ObjectKind::Window,
            OwningObject::File(_) => ObjectKind::File,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            OwningObject::Communicator(comm) => comm.name(),
            OwningObject::Window(win) => win.name(),
            OwningObject::File(file) => file.name(),
        }
    }

    pub fn binding_index(&self) -> i32 {
        match self {
            OwningObject::Communicator(comm) => comm.binding_index(),
            OwningObject::Window(win) => win.binding_index(),
            OwningObject::File(file) => file.binding_index(),
        }
    }

    pub fn error_handler(&self) -> Option<Arc<ErrorHandler>> {
        match self {
            OwningObject::Communicator(comm) => comm.error_handler(),
            OwningObject::Window(win) => win.error_handler(),
            OwningObject::File(file) => file.error_handler(),
        }
    }
}

impl<'a> From<&'a Communicator> for OwningObject<'a> {
    fn from(comm: &'a Communicator) -> Self {
        OwningObject::Communicator(comm)
    }
}

impl<'a> From<&'a Window> for OwningObject<'a> {
    fn from(win: &'a Window) -> Self {
        OwningObject::Window(win)
    }
}

impl<'a> From<&'a File> for OwningObject<'a> {
    fn from(file: &'a File) -> Self {
        OwningObject::File(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_accessors() {
        let comm = Communicator::new("comm_self", 1);
        assert_eq!(comm.name(), "comm_self");
        assert_eq!(comm.binding_index(), 1);
        assert_eq!(comm.kind(), ObjectKind::Communicator);
        assert!(comm.error_handler().is_none());

        let owner = OwningObject::from(&comm);
        assert_eq!(owner.kind(), ObjectKind::Communicator);
        assert_eq!(owner.name(), "comm_self");
        assert_eq!(owner.binding_index(), 1);
    }

    #[test]
    fn test_kind_follows_variant() {
        let win = Window::new("win", 4);
        let file = File::new("file", 8);
        assert_eq!(OwningObject::from(&win).kind(), ObjectKind::Window);
        assert_eq!(OwningObject::from(&file).kind(), ObjectKind::File);
        assert_eq!(OwningObject::from(&file).binding_index(), 8);
    }

    #[test]
    fn test_rebinding_returns_previous_handler() {
        let first = Arc::new(ErrorHandler::alternate_binding("first", |_, _| {}));
        let second = Arc::new(ErrorHandler::alternate_binding("second", |_, _| {}));
        let win = Window::new("win", 2).with_error_handler(Arc::clone(&first));

        let previous = win.set_error_handler(Some(Arc::clone(&second)));
        assert_eq!(previous.map(|h| h.name().to_string()), Some("first".to_string()));
        assert_eq!(
            OwningObject::from(&win).error_handler().map(|h| h.name().to_string()),
            Some("second".to_string())
        );

        assert!(win.set_error_handler(None).is_some());
        assert!(win.error_handler().is_none());
    }

    #[test]
    fn test_debug_output_names_handler() {
        let file = File::new("data.out", 3)
            .with_error_handler(Arc::new(ErrorHandler::alternate_binding("io_errors", |_, _| {})));
        let debug = format!("{file:?}");
        assert!(debug.contains("data.out"));
        assert!(debug.contains("io_errors"));
    }
}
