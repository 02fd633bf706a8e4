//! View seam between the store and the presentation layer.
//!
//! # Responsibility
//! - Define the rendering/notification surface the store drives.
//! - Define the mutation requests view controls raise back at the store.
//!
//! # Invariants
//! - View code never mutates entities directly; every control resolves to
//!   a `ViewEvent` and the store applies it.

use crate::model::todo::{Priority, Todo, TodoId};

pub mod edit;
pub mod render;

/// Surface the store repaints and notifies after every mutation.
pub trait View {
    /// Full repaint from the current collection snapshot.
    fn render(&mut self, todos: &[Todo]);

    /// User-visible failure notice (remote delete/update failures).
    fn notify_error(&mut self, message: &str);
}

/// Mutation request raised by a view control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Submission control: add an item from the input field and selector.
    Submit { text: String, priority: Priority },
    /// Per-row completion toggle.
    ToggleCompleted { id: TodoId, completed: bool },
    /// Per-row delete control.
    DeleteRequested { id: TodoId },
    /// Edit form save (explicit control or Enter).
    EditCommitted {
        id: TodoId,
        text: String,
        priority: Option<Priority>,
    },
    /// Edit form cancel (explicit control or Escape); repaint unchanged.
    EditCancelled,
}
