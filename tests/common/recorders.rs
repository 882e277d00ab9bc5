//! Recording handler doubles shared by the integration tests.

use errhandler_core::constants::WORLD_COMMUNICATOR_NAME;
use errhandler_core::{
    BindingInt, Communicator, ErrhandlerDispatcher, ErrorCode, ErrorHandler, FatalHandler, File,
    IdentityTranslator, ObjectKind, OwningObject, RequestFaultResolver, Window,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// One observed callback invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Communicator {
        name: String,
        code: ErrorCode,
        message: String,
    },
    Window {
        name: String,
        code: ErrorCode,
        message: String,
    },
    File {
        name: String,
        code: ErrorCode,
        message: String,
    },
    Binding {
        handle: BindingInt,
        code: BindingInt,
    },
    Fatal {
        owner: Option<ObjectKind>,
        message: String,
    },
}

/// Shared, ordered log of every callback that ran
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    pub fn fatal_count(&self) -> usize {
        self.0
            .lock()
            .iter()
            .filter(|call| matches!(call, Call::Fatal { .. }))
            .count()
    }
}

impl FatalHandler for CallLog {
    fn invoke_fatal(&self, owner: Option<OwningObject<'_>>, message: &str) {
        self.push(Call::Fatal {
            owner: owner.map(|o| o.kind()),
            message: message.to_string(),
        });
    }
}

pub fn comm_handler(log: &CallLog, rewrite: Option<ErrorCode>) -> Arc<ErrorHandler> {
    let log = log.clone();
    Arc::new(ErrorHandler::for_communicator(
        "recording_comm",
        move |comm, code, message, _| {
            log.push(Call::Communicator {
                name: comm.name().to_string(),
                code: *code,
                message: message.to_string(),
            });
            if let Some(rewrite) = rewrite {
                *code = rewrite;
            }
        },
    ))
}

pub fn win_handler(log: &CallLog, rewrite: Option<ErrorCode>) -> Arc<ErrorHandler> {
    let log = log.clone();
    Arc::new(ErrorHandler::for_window(
        "recording_win",
        move |win, code, message, _| {
            log.push(Call::Window {
                name: win.name().to_string(),
                code: *code,
                message: message.to_string(),
            });
            if let Some(rewrite) = rewrite {
                *code = rewrite;
            }
        },
    ))
}

pub fn file_handler(log: &CallLog, rewrite: Option<ErrorCode>) -> Arc<ErrorHandler> {
    let log = log.clone();
    Arc::new(ErrorHandler::for_file(
        "recording_file",
        move |file, code, message, _| {
            log.push(Call::File {
                name: file.name().to_string(),
                code: *code,
                message: message.to_string(),
            });
            if let Some(rewrite) = rewrite {
                *code = rewrite;
            }
        },
    ))
}

/// Alternate-binding handler that records its inputs and then overwrites both
pub fn binding_handler(log: &CallLog) -> Arc<ErrorHandler> {
    let log = log.clone();
    Arc::new(ErrorHandler::alternate_binding(
        "recording_binding",
        move |handle, code| {
            log.push(Call::Binding {
                handle: *handle,
                code: *code,
            });
            *handle = BindingInt::new(-1);
            *code = BindingInt::new(0);
        },
    ))
}

/// Objects, dispatcher and resolver sharing one call log
pub struct Fixture {
    pub log: CallLog,
    pub world: Arc<Communicator>,
    pub comm: Arc<Communicator>,
    pub win: Arc<Window>,
    pub file: Arc<File>,
    pub dispatcher: ErrhandlerDispatcher,
    pub resolver: RequestFaultResolver,
}

impl Fixture {
    /// No handler bound anywhere
    pub fn unbound() -> Self {
        Self::build(|_| None, |_| None, |_| None, |_| None)
    }

    /// Recording native handlers on every object
    pub fn native() -> Self {
        Self::build(
            |log| Some(comm_handler(log, None)),
            |log| Some(comm_handler(log, None)),
            |log| Some(win_handler(log, None)),
            |log| Some(file_handler(log, None)),
        )
    }

    fn build(
        world_handler: impl Fn(&CallLog) -> Option<Arc<ErrorHandler>>,
        comm_handler: impl Fn(&CallLog) -> Option<Arc<ErrorHandler>>,
        win_handler: impl Fn(&CallLog) -> Option<Arc<ErrorHandler>>,
        file_handler: impl Fn(&CallLog) -> Option<Arc<ErrorHandler>>,
    ) -> Self {
        let log = CallLog::new();

        let world = Arc::new(Communicator::new(WORLD_COMMUNICATOR_NAME, 0));
        world.set_error_handler(world_handler(&log));
        let comm = Arc::new(Communicator::new("ring", 1));
        comm.set_error_handler(comm_handler(&log));
        let win = Arc::new(Window::new("halo", 2));
        win.set_error_handler(win_handler(&log));
        let file = Arc::new(File::new("checkpoint.dat", 3));
        file.set_error_handler(file_handler(&log));

        let dispatcher = ErrhandlerDispatcher::new(Arc::new(log.clone()));
        let resolver = RequestFaultResolver::new(
            dispatcher.clone(),
            Arc::new(IdentityTranslator),
            Arc::clone(&world),
        );

        Self {
            log,
            world,
            comm,
            win,
            file,
            dispatcher,
            resolver,
        }
    }
}
