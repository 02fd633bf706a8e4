//! Full-rebuild projection of the collection into view nodes.
//!
//! # Responsibility
//! - Rebuild the complete row tree from a freshly sorted snapshot on every
//!   render.
//! - Host per-row edit sessions layered on top of the rebuilt rows.
//!
//! # Invariants
//! - Rendering never mutates the input collection or its order.
//! - A render drops every open edit session; rows are built from scratch.
//! - The empty-state indicator is visible iff the collection is empty.

use crate::model::todo::{Priority, Todo, TodoId};
use crate::order::sorted_for_display;
use crate::view::edit::EditSession;
use crate::view::{View, ViewEvent};
use std::collections::BTreeMap;

/// One rendered row plus the events its controls raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    /// Localized badge label next to the item text.
    pub badge_label: &'static str,
    /// Style class for the badge, keyed by priority.
    pub badge_class: &'static str,
}

impl TodoRow {
    fn from_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            text: todo.text.clone(),
            completed: todo.completed,
            priority: todo.priority,
            badge_label: todo.priority.label(),
            badge_class: todo.priority.style_class(),
        }
    }

    /// Event raised by the completion toggle control.
    pub fn toggle_event(&self) -> ViewEvent {
        ViewEvent::ToggleCompleted {
            id: self.id.clone(),
            completed: !self.completed,
        }
    }

    /// Event raised by the delete control.
    pub fn delete_event(&self) -> ViewEvent {
        ViewEvent::DeleteRequested {
            id: self.id.clone(),
        }
    }
}

/// List projection rebuilt on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<TodoRow>,
    pub empty_state_visible: bool,
}

/// Projects collections into `ListView` trees and hosts edit sessions.
#[derive(Default)]
pub struct RenderEngine {
    tree: ListView,
    editors: BTreeMap<TodoId, EditSession>,
    notice: Option<String>,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current row tree, as of the last render.
    pub fn tree(&self) -> &ListView {
        &self.tree
    }

    /// Last raised failure notice, if any.
    pub fn last_notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Consumes the pending failure notice.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Opens an editor on one row, pre-populated from its current state.
    ///
    /// Re-triggering while that row is already editing is a no-op, as is
    /// targeting an id that is not in the rendered tree.
    pub fn begin_edit(&mut self, id: &str) {
        if self.editors.contains_key(id) {
            return;
        }
        let Some(row) = self.tree.rows.iter().find(|row| row.id == id) else {
            return;
        };
        self.editors.insert(row.id.clone(), EditSession::open(row));
    }

    /// Returns whether a row currently shows its edit form.
    pub fn is_editing(&self, id: &str) -> bool {
        self.editors.contains_key(id)
    }

    pub fn editor(&self, id: &str) -> Option<&EditSession> {
        self.editors.get(id)
    }

    pub fn editor_mut(&mut self, id: &str) -> Option<&mut EditSession> {
        self.editors.get_mut(id)
    }
}

impl View for RenderEngine {
    fn render(&mut self, todos: &[Todo]) {
        // Destroy-and-rebuild: sorting works on a copy, never on the
        // caller's collection, and open editors do not survive a repaint.
        let rows: Vec<TodoRow> = sorted_for_display(todos)
            .iter()
            .map(TodoRow::from_todo)
            .collect();
        self.editors.clear();
        self.tree = ListView {
            empty_state_visible: rows.is_empty(),
            rows,
        };
    }

    fn notify_error(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::RenderEngine;
    use crate::model::todo::{Priority, Todo};
    use crate::view::{View, ViewEvent};

    fn sample() -> Vec<Todo> {
        let mut done = Todo::with_id("done", "shipped", Priority::High);
        done.completed = true;
        vec![
            Todo::with_id("low", "someday", Priority::Low),
            done,
            Todo::with_id("high", "urgent", Priority::High),
        ]
    }

    #[test]
    fn render_sorts_rows_and_keeps_input_order_untouched() {
        let todos = sample();
        let mut engine = RenderEngine::new();
        engine.render(&todos);

        let ids: Vec<&str> = engine
            .tree()
            .rows
            .iter()
            .map(|row| row.id.as_str())
            .collect();
        assert_eq!(ids, vec!["high", "low", "done"]);
        // Input collection keeps insertion order.
        assert_eq!(todos[0].id, "low");
    }

    #[test]
    fn empty_state_tracks_collection_emptiness() {
        let mut engine = RenderEngine::new();
        engine.render(&[]);
        assert!(engine.tree().empty_state_visible);

        engine.render(&sample());
        assert!(!engine.tree().empty_state_visible);
    }

    #[test]
    fn rows_expose_badge_and_control_events() {
        let mut engine = RenderEngine::new();
        engine.render(&sample());

        let row = &engine.tree().rows[0];
        assert_eq!(row.badge_label, "High");
        assert_eq!(row.badge_class, "priority-high");
        assert_eq!(
            row.toggle_event(),
            ViewEvent::ToggleCompleted {
                id: "high".to_string(),
                completed: true,
            }
        );
        assert_eq!(
            row.delete_event(),
            ViewEvent::DeleteRequested {
                id: "high".to_string(),
            }
        );
    }

    #[test]
    fn begin_edit_is_guarded_per_row() {
        let mut engine = RenderEngine::new();
        engine.render(&sample());

        engine.begin_edit("high");
        assert!(engine.is_editing("high"));

        engine.editor_mut("high").unwrap().select_priority(Priority::Low);
        // Re-trigger must not reset the open editor.
        engine.begin_edit("high");
        assert_eq!(engine.editor("high").unwrap().priority(), Priority::Low);

        engine.begin_edit("missing");
        assert!(!engine.is_editing("missing"));
    }

    #[test]
    fn render_closes_all_edit_sessions() {
        let todos = sample();
        let mut engine = RenderEngine::new();
        engine.render(&todos);
        engine.begin_edit("high");
        engine.begin_edit("low");

        engine.render(&todos);
        assert!(!engine.is_editing("high"));
        assert!(!engine.is_editing("low"));
    }

    #[test]
    fn notices_are_raised_and_consumed() {
        let mut engine = RenderEngine::new();
        engine.notify_error("delete failed");

        assert_eq!(engine.last_notice(), Some("delete failed"));
        assert_eq!(engine.take_notice().as_deref(), Some("delete failed"));
        assert_eq!(engine.last_notice(), None);
    }
}
