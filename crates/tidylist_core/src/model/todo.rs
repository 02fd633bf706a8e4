//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record shared by storage, store and view.
//! - Normalize priority values before they reach comparison or display.
//!
//! # Invariants
//! - `id` is unique within one in-memory collection.
//! - No todo is ever persisted with empty `text`.
//! - `priority` always holds one of the three known values.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Opaque stable identifier for a todo item.
///
/// Locally created items get a generated UUID string; Remote Mode ids are
/// assigned by the backend, so the type stays an opaque `String`.
pub type TodoId = String;

/// Display priority attached to every todo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parses a stored or remote value, collapsing unknown input to `Medium`.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    /// Stable storage/wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Comparison rank: high(3) > medium(2) > low(1).
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Badge label shown next to the item text.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Style class consumed by the presentation layer.
    pub fn style_class(self) -> &'static str {
        match self {
            Self::High => "priority-high",
            Self::Medium => "priority-medium",
            Self::Low => "priority-low",
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    /// Tolerant decoding: absent or unrecognized values become `Medium`
    /// instead of failing the whole collection load.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .as_deref()
            .map(Self::parse_or_default)
            .unwrap_or_default())
    }
}

/// Validation errors for todo records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// `text` is empty after trimming.
    EmptyText,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text must not be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical todo record.
///
/// Serialized field names (`id`, `text`, `completed`, `priority`,
/// `createdAt`) are the persisted local representation and the remote
/// snapshot shape; keep them stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Stable id; locally generated or backend-assigned.
    pub id: TodoId,
    /// Trimmed, non-empty item text.
    pub text: String,
    /// Completion flag, defaults to false.
    #[serde(default)]
    pub completed: bool,
    /// Normalized display priority, defaults to medium.
    #[serde(default)]
    pub priority: Priority,
    /// Creation timestamp in epoch milliseconds; absent ranks as 0 (oldest).
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Todo {
    /// Creates a locally owned item with a generated id and creation time.
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
            priority,
            created_at: Some(now_epoch_ms()),
        }
    }

    /// Creates an item whose identity already exists externally.
    ///
    /// Used by remote snapshots and tests; `created_at` stays absent unless
    /// the caller fills it in.
    pub fn with_id(id: impl Into<TodoId>, text: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            priority,
            created_at: None,
        }
    }

    /// Rejects records that must never reach persistence.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.text.trim().is_empty() {
            return Err(TodoValidationError::EmptyText);
        }
        Ok(())
    }

    /// Creation-order tie-breaker; absent `createdAt` ranks as oldest.
    pub fn created_rank(&self) -> i64 {
        self.created_at.unwrap_or(0)
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// A clock before the epoch degrades to 0 (oldest possible rank) rather
/// than panicking.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
