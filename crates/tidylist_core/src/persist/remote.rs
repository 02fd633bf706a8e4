//! Remote realtime backend surface.
//!
//! # Responsibility
//! - Define the capability contract consumed in Remote Mode.
//! - Carry remote failure details back to the store without panicking.
//!
//! # Invariants
//! - The subscription snapshot is the source of truth; mutation calls
//!   report only success or failure and never return data.

use crate::model::todo::{Priority, Todo};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::Sender;

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure envelope for remote mutation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// Stable machine-readable code (for example `network_unreachable`).
    pub code: String,
    /// Human-readable message, safe to log.
    pub message: String,
}

impl RemoteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "remote call failed ({}): {}", self.code, self.message)
    }
}

impl Error for RemoteError {}

/// Partial-field payload for `RemoteBackend::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

impl TodoPatch {
    /// Patch carrying only a completion flag change.
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }

    /// Patch carrying an inline edit (text plus normalized priority).
    pub fn edited(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: Some(text.into()),
            priority: Some(priority),
            ..Self::default()
        }
    }
}

/// Realtime backend capability, treated as an external collaborator.
///
/// Implementations hold the actual transport; the core only requires that
/// every remote change (including the initial snapshot) is delivered on the
/// subscribed channel as a full replacement collection.
pub trait RemoteBackend {
    /// Registers the snapshot channel for this session.
    fn subscribe(&self, snapshots: Sender<Vec<Todo>>);

    /// Creates an item remotely; the id is backend-assigned.
    fn add(&self, text: &str, priority: Priority) -> RemoteResult<()>;

    /// Deletes an item remotely.
    fn remove(&self, id: &str) -> RemoteResult<()>;

    /// Applies a partial update to an item remotely.
    fn update(&self, id: &str, patch: TodoPatch) -> RemoteResult<()>;
}
