//! # Request Fault Resolution
//!
//! Finds the first faulted operation in a batch of pending requests, works out
//! which object is responsible for its errors, and dispatches to that object's
//! handler.
//!
//! ## Ownership by category
//!
//! | Category         | Reported to                 |
//! |------------------|-----------------------------|
//! | point-to-point   | the operation's communicator|
//! | collective I/O   | the operation's file        |
//! | one-sided        | the operation's window      |
//! | anything else    | the world communicator      |
//!
//! The owner is read from the operation's category alone; the completion
//! status never influences it. The world communicator is injected at
//! construction rather than looked up globally.
//!
//! ```rust
//! use errhandler_core::constants::WORLD_COMMUNICATOR_NAME;
//! use errhandler_core::{
//!     Communicator, ErrhandlerDispatcher, ErrorCode, ErrorHandler, IdentityTranslator,
//!     OwningObject, PendingOperation, RawStatus, RequestFaultResolver,
//! };
//! use std::sync::Arc;
//!
//! fn ignore_fatal(_owner: Option<OwningObject<'_>>, _message: &str) {}
//!
//! let comm = Arc::new(Communicator::new("ring", 1).with_error_handler(Arc::new(
//!     ErrorHandler::for_communicator("ignore", |_, code, _, _| *code = ErrorCode::SUCCESS),
//! )));
//! let world = Arc::new(Communicator::new(WORLD_COMMUNICATOR_NAME, 0));
//! let resolver = RequestFaultResolver::new(
//!     ErrhandlerDispatcher::new(Arc::new(ignore_fatal)),
//!     Arc::new(IdentityTranslator),
//!     world,
//! );
//!
//! let ops = vec![
//!     None,
//!     Some(PendingOperation::point_to_point(comm).with_status(RawStatus::new(5))),
//! ];
//! assert!(resolver.resolve_slice(&ops, "waitall").is_success());
//! ```

use crate::dispatcher::ErrhandlerDispatcher;
use crate::objects::{Communicator, File, OwningObject, Window};
use crate::translation::ErrorCodeTranslator;
use crate::types::{ErrorCode, OperationCategory, RawStatus};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Object responsible for an operation's errors, keyed by category.
#[derive(Debug, Clone)]
pub enum OperationOwner {
    PointToPoint(Arc<Communicator>),
    CollectiveIo(Arc<File>),
    OneSided(Arc<Window>),
    Unclassified,
}

impl OperationOwner {
    pub fn category(&self) -> OperationCategory {
        match self {
            OperationOwner::PointToPoint(_) => OperationCategory::PointToPoint,
            OperationOwner::CollectiveIo(_) => OperationCategory::CollectiveIo,
            OperationOwner::OneSided(_) => OperationCategory::OneSided,
            OperationOwner::Unclassified => OperationCategory::Unclassified,
        }
    }
}

/// An outstanding asynchronous operation and its completion status
#[derive(Debug, Clone)]
pub struct PendingOperation {
    status: RawStatus,
    owner: OperationOwner,
}

impl PendingOperation {
    pub fn new(owner: OperationOwner) -> Self {
        Self {
            status: RawStatus::SUCCESS,
            owner,
        }
    }

    pub fn point_to_point(comm: Arc<Communicator>) -> Self {
        Self::new(OperationOwner::PointToPoint(comm))
    }

    pub fn collective_io(file: Arc<File>) -> Self {
        Self::new(OperationOwner::CollectiveIo(file))
    }

    pub fn one_sided(win: Arc<Window>) -> Self {
        Self::new(OperationOwner::OneSided(win))
    }

    pub fn unclassified() -> Self {
        Self::new(OperationOwner::Unclassified)
    }

    pub fn with_status(mut self, status: RawStatus) -> Self {
        self.status = status;
        self
    }

    /// Record the completion status reported by the transport
    pub fn complete(&mut self, status: RawStatus) {
        self.status = status;
    }

    pub fn status(&self) -> RawStatus {
        self.status
    }

    pub fn category(&self) -> OperationCategory {
        self.owner.category()
    }

    pub fn owner(&self) -> &OperationOwner {
        &self.owner
    }

    pub fn is_faulted(&self) -> bool {
        !self.status.is_success()
    }
}

#[derive(Clone)]
pub struct RequestFaultResolver {
    dispatcher: ErrhandlerDispatcher,
    translator: Arc<dyn ErrorCodeTranslator>,
    world: Arc<Communicator>,
}

impl RequestFaultResolver {
    pub fn new(
        dispatcher: ErrhandlerDispatcher,
        translator: Arc<dyn ErrorCodeTranslator>,
        world: Arc<Communicator>,
    ) -> Self {
        Self {
            dispatcher,
            translator,
            world,
        }
    }

    pub fn world(&self) -> &Arc<Communicator> {
        &self.world
    }

    pub fn dispatcher(&self) -> &ErrhandlerDispatcher {
        &self.dispatcher
    }

    /// First non-null operation whose status is not success, with its position
    pub fn locate_fault<'a, I>(operations: I) -> Option<(usize, &'a PendingOperation)>
    where
        I: IntoIterator<Item = Option<&'a PendingOperation>>,
    {
        operations
            .into_iter()
            .enumerate()
            .find_map(|(index, op)| op.filter(|op| op.is_faulted()).map(|op| (index, op)))
    }

    /// Object whose handler reports errors for `operation`
    pub fn resolve_owner<'a>(&'a self, operation: &'a PendingOperation) -> OwningObject<'a> {
        match operation.owner() {
            OperationOwner::PointToPoint(comm) => OwningObject::Communicator(comm),
            OperationOwner::CollectiveIo(file) => OwningObject::File(file),
            OperationOwner::OneSided(win) => OwningObject::Window(win),
            OperationOwner::Unclassified => OwningObject::Communicator(&self.world),
        }
    }

    /// Dispatch the first fault in `operations` to its owner's handler.
    ///
    /// Returns success without invoking anything when no operation has faulted.
    pub fn resolve_and_invoke<'a, I>(&self, operations: I, message: &str) -> ErrorCode
    where
        I: IntoIterator<Item = Option<&'a PendingOperation>>,
    {
        let Some((index, operation)) = Self::locate_fault(operations) else {
            warn!(diagnostic = %message, "Fault resolution requested but no operation has faulted");
            return ErrorCode::SUCCESS;
        };

        let error_code = self.translator.translate(operation.status());
        let owner = self.resolve_owner(operation);

        debug!(
            request_index = index,
            category = %operation.category(),
            raw_status = operation.status().value(),
            error_code = error_code.value(),
            object_kind = %owner.kind(),
            object_name = %owner.name(),
            "Resolved faulted request"
        );

        self.dispatcher.dispatch_owner(owner, error_code, message)
    }

    /// Convenience over [`Self::resolve_and_invoke`] for a request array with null slots
    pub fn resolve_slice(&self, operations: &[Option<PendingOperation>], message: &str) -> ErrorCode {
        self.resolve_and_invoke(operations.iter().map(Option::as_ref), message)
    }
}

impl fmt::Debug for RequestFaultResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestFaultResolver")
            .field("dispatcher", &self.dispatcher)
            .field("world", &self.world)
            .finish_non_exhaustive()
    }
}
