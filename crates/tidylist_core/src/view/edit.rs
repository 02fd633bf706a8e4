//! Per-row edit session state machine.
//!
//! # Responsibility
//! - Hold the transient editing state (draft text, caret, priority) for one
//!   row between the edit trigger and commit/cancel.
//!
//! # Invariants
//! - A session opens pre-populated from the row, caret at the end.
//! - Only Enter/save commits and only Escape/cancel discards; there is no
//!   timeout.
//! - The caret is a char offset, never an invalid byte index.

use crate::model::todo::{Priority, TodoId};
use crate::view::render::TodoRow;
use crate::view::ViewEvent;

/// Key signals handled while a row is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
    Char(char),
    Backspace,
}

/// Result of an interaction that closes the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Commit current field values through the store.
    Commit(ViewEvent),
    /// Discard the draft; the store repaints from the untouched collection.
    Cancel(ViewEvent),
}

/// Live editing state for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    id: TodoId,
    text: String,
    cursor: usize,
    priority: Priority,
}

impl EditSession {
    /// Opens an editor pre-populated from the rendered row.
    pub(crate) fn open(row: &TodoRow) -> Self {
        Self {
            id: row.id.clone(),
            text: row.text.clone(),
            cursor: row.text.chars().count(),
            priority: row.priority,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caret position as a char offset into the draft text.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Priority selector change; does not close the session.
    pub fn select_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Feeds one key signal; `Some` means the session closed.
    pub fn handle_key(&mut self, key: EditKey) -> Option<EditOutcome> {
        match key {
            EditKey::Enter => Some(self.save()),
            EditKey::Escape => Some(self.cancel()),
            EditKey::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                None
            }
            EditKey::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_offset(self.cursor - 1);
                    self.text.remove(at);
                    self.cursor -= 1;
                }
                None
            }
        }
    }

    /// Explicit save control.
    pub fn save(&self) -> EditOutcome {
        EditOutcome::Commit(ViewEvent::EditCommitted {
            id: self.id.clone(),
            text: self.text.clone(),
            priority: Some(self.priority),
        })
    }

    /// Explicit cancel control.
    pub fn cancel(&self) -> EditOutcome {
        EditOutcome::Cancel(ViewEvent::EditCancelled)
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{EditKey, EditOutcome, EditSession};
    use crate::model::todo::{Priority, Todo};
    use crate::view::render::RenderEngine;
    use crate::view::{View, ViewEvent};

    fn open_session(text: &str, priority: Priority) -> EditSession {
        let mut engine = RenderEngine::new();
        engine.render(&[Todo::with_id("row-1", text, priority)]);
        engine.begin_edit("row-1");
        engine.editor("row-1").unwrap().clone()
    }

    #[test]
    fn session_opens_with_caret_at_end() {
        let session = open_session("déjà vu", Priority::Medium);

        assert_eq!(session.text(), "déjà vu");
        assert_eq!(session.cursor(), 7);
        assert_eq!(session.priority(), Priority::Medium);
    }

    #[test]
    fn typing_appends_at_the_caret() {
        let mut session = open_session("milk", Priority::Medium);

        assert_eq!(session.handle_key(EditKey::Char('!')), None);
        assert_eq!(session.text(), "milk!");
        assert_eq!(session.cursor(), 5);
    }

    #[test]
    fn backspace_removes_before_the_caret_and_stops_at_start() {
        let mut session = open_session("ab", Priority::Medium);

        session.handle_key(EditKey::Backspace);
        session.handle_key(EditKey::Backspace);
        assert_eq!(session.text(), "");
        assert_eq!(session.cursor(), 0);

        // No underflow once the draft is empty.
        assert_eq!(session.handle_key(EditKey::Backspace), None);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn enter_commits_current_field_values() {
        let mut session = open_session("milk", Priority::Medium);
        session.select_priority(Priority::High);
        session.handle_key(EditKey::Char('!'));

        let outcome = session.handle_key(EditKey::Enter).unwrap();
        assert_eq!(
            outcome,
            EditOutcome::Commit(ViewEvent::EditCommitted {
                id: "row-1".to_string(),
                text: "milk!".to_string(),
                priority: Some(Priority::High),
            })
        );
    }

    #[test]
    fn escape_cancels_without_carrying_the_draft() {
        let mut session = open_session("milk", Priority::Medium);
        session.handle_key(EditKey::Char('x'));

        let outcome = session.handle_key(EditKey::Escape).unwrap();
        assert_eq!(outcome, EditOutcome::Cancel(ViewEvent::EditCancelled));
    }
}
