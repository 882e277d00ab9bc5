//! # Dispatch Value Types
//!
//! Error codes in their two representations, raw completion statuses, and the
//! tags that classify owning objects and pending operations.
//!
//! ## Representations
//!
//! - [`RawStatus`] - status attached to a completed operation by the transport
//!   layer; internal codes are negative, zero is success
//! - [`ErrorCode`] - portable code seen by native handlers
//! - [`BindingInt`] - integer representation used by the alternate-binding
//!   calling convention; conversion from [`ErrorCode`] is lossless

use crate::constants::{error_class, object_kind, request_category};
use crate::error::{DispatchError, DispatchResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Portable error code passed to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(i32);

impl ErrorCode {
    pub const SUCCESS: ErrorCode = ErrorCode(error_class::SUCCESS);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    pub const fn is_success(self) -> bool {
        self.0 == error_class::SUCCESS
    }

    /// Convert to the alternate-binding representation
    pub const fn to_binding(self) -> BindingInt {
        BindingInt(self.0)
    }
}

impl From<BindingInt> for ErrorCode {
    fn from(value: BindingInt) -> Self {
        ErrorCode(value.0)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer as seen by handlers registered through the alternate binding.
///
/// Both handles and error codes cross that boundary as this type, by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingInt(i32);

impl BindingInt {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Convert an owning object's binding index into a handle
    pub const fn from_index(index: i32) -> Self {
        Self(index)
    }
}

impl From<ErrorCode> for BindingInt {
    fn from(code: ErrorCode) -> Self {
        code.to_binding()
    }
}

impl TryFrom<i64> for BindingInt {
    type Error = DispatchError;

    fn try_from(value: i64) -> DispatchResult<Self> {
        i32::try_from(value)
            .map(BindingInt)
            .map_err(|_| DispatchError::code_out_of_range(value))
    }
}

impl fmt::Display for BindingInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion status recorded on a pending operation before translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawStatus(i32);

impl RawStatus {
    pub const SUCCESS: RawStatus = RawStatus(error_class::SUCCESS);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    pub const fn is_success(self) -> bool {
        self.0 == error_class::SUCCESS
    }
}

impl fmt::Display for RawStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of runtime object an error handler can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Communicator,
    Window,
    File,
}

impl ObjectKind {
    pub const fn tag(self) -> i32 {
        match self {
            ObjectKind::Communicator => object_kind::COMMUNICATOR,
            ObjectKind::Window => object_kind::WINDOW,
            ObjectKind::File => object_kind::FILE,
        }
    }
}

impl TryFrom<i32> for ObjectKind {
    type Error = DispatchError;

    fn try_from(raw: i32) -> DispatchResult<Self> {
        match raw {
            object_kind::COMMUNICATOR => Ok(ObjectKind::Communicator),
            object_kind::WINDOW => Ok(ObjectKind::Window),
            object_kind::FILE => Ok(ObjectKind::File),
            _ => Err(DispatchError::unknown_object_kind(raw)),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Communicator => write!(f, "communicator"),
            ObjectKind::Window => write!(f, "window"),
            ObjectKind::File => write!(f, "file"),
        }
    }
}

/// Category of a pending operation; decides which object handles its errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationCategory {
    /// Send/receive, reported to its communicator
    PointToPoint,
    /// Parallel I/O, reported to its file
    CollectiveIo,
    /// Remote memory access, reported to its window
    OneSided,
    /// Generalized, null or out-of-range; reported to the world communicator
    Unclassified,
}

impl OperationCategory {
    /// Decode a raw category tag. Anything unrecognised is unclassified.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            request_category::POINT_TO_POINT => OperationCategory::PointToPoint,
            request_category::COLLECTIVE_IO => OperationCategory::CollectiveIo,
            request_category::ONE_SIDED => OperationCategory::OneSided,
            _ => OperationCategory::Unclassified,
        }
    }
}

impl fmt::Display for OperationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationCategory::PointToPoint => write!(f, "point_to_point"),
            OperationCategory::CollectiveIo => write!(f, "collective_io"),
            OperationCategory::OneSided => write!(f, "one_sided"),
            OperationCategory::Unclassified => write!(f, "unclassified"),
        }
    }
}
