//! Authoritative in-memory todo collection and its operations.
//!
//! # Responsibility
//! - Own the working collection; every mutation flows through one
//!   operation here.
//! - Pair persistence and re-render so the view never shows unsaved state.
//!
//! # Invariants
//! - Local Mode: a successful mutation persists wholesale, then re-renders,
//!   as an inseparable pair.
//! - Remote Mode: mutations only call the backend; the visible effect waits
//!   for the subscription snapshot to echo the change back.
//! - Stored order is insertion order; sorting happens only at render time.

use crate::model::todo::{Priority, Todo};
use crate::persist::remote::{RemoteBackend, TodoPatch};
use crate::persist::{PersistAdapter, PersistMode};
use crate::view::{View, ViewEvent};
use log::{debug, error, info, warn};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

const DELETE_FAILED_NOTICE: &str = "Failed to delete the item. Please try again.";
const UPDATE_FAILED_NOTICE: &str = "Failed to update the item. Please try again.";
const EDIT_FAILED_NOTICE: &str = "Failed to save the edit. Please try again.";

/// Session-scoped owner of the todo collection.
///
/// Constructed once per session with the selected persistence adapter and
/// the view it drives; in Local Mode the stored collection is loaded and
/// painted immediately, in Remote Mode the store subscribes and paints
/// empty until the first snapshot arrives.
pub struct ListStore<V: View> {
    todos: Vec<Todo>,
    adapter: PersistAdapter,
    view: V,
    snapshots: Option<Receiver<Vec<Todo>>>,
}

impl<V: View> ListStore<V> {
    pub fn new(adapter: PersistAdapter, view: V) -> Self {
        let mut store = Self {
            todos: Vec::new(),
            adapter,
            view,
            snapshots: None,
        };
        if let PersistAdapter::Local(local) = &store.adapter {
            store.todos = local.load();
        }
        if store.adapter.mode() == PersistMode::Remote {
            store.subscribe_remote();
        }
        store.render();
        store
    }

    /// Read-only snapshot of the working collection, in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Active persistence mode.
    pub fn mode(&self) -> PersistMode {
        self.adapter.mode()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Adds an item from the submission control.
    ///
    /// Whitespace-only input is silently ignored. Remote add failures are
    /// logged and dropped without a user-facing notice; local adds prepend
    /// a freshly identified item.
    pub fn add_todo(&mut self, text: &str, priority: Priority) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("event=add_todo module=store status=skip reason=empty_text");
            return;
        }

        if let Some(backend) = self.remote() {
            if let Err(err) = backend.add(trimmed, priority) {
                error!("event=add_todo module=store status=error mode=remote error={err}");
            }
            return;
        }

        self.todos.insert(0, Todo::new(trimmed, priority));
        info!("event=add_todo module=store status=ok mode=local");
        self.persist_and_render();
    }

    /// Deletes an item.
    ///
    /// A remote failure raises a user-visible notice and leaves state
    /// unchanged; locally, a missing id still persists and repaints the
    /// (unchanged) collection.
    pub fn delete_todo(&mut self, id: &str) {
        if let Some(backend) = self.remote() {
            if let Err(err) = backend.remove(id) {
                error!("event=delete_todo module=store status=error mode=remote error={err}");
                self.view.notify_error(DELETE_FAILED_NOTICE);
            }
            return;
        }

        self.todos.retain(|todo| todo.id != id);
        self.persist_and_render();
    }

    /// Sets an item's completion flag.
    pub fn toggle_completed(&mut self, id: &str, completed: bool) {
        if let Some(backend) = self.remote() {
            if let Err(err) = backend.update(id, TodoPatch::completed(completed)) {
                error!("event=toggle module=store status=error mode=remote error={err}");
                self.view.notify_error(UPDATE_FAILED_NOTICE);
            }
            return;
        }

        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            // Unknown id leaves both the collection and persisted state
            // untouched.
            return;
        };
        todo.completed = completed;
        self.persist_and_render();
    }

    /// Commits an inline edit.
    ///
    /// Text that trims to empty deletes the item. A missing priority falls
    /// back to the item's current value locally and to medium remotely.
    pub fn commit_edit(&mut self, id: &str, new_text: &str, new_priority: Option<Priority>) {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            self.delete_todo(id);
            return;
        }

        if let Some(backend) = self.remote() {
            let patch = TodoPatch::edited(trimmed, new_priority.unwrap_or_default());
            if let Err(err) = backend.update(id, patch) {
                error!("event=commit_edit module=store status=error mode=remote error={err}");
                self.view.notify_error(EDIT_FAILED_NOTICE);
            }
            return;
        }

        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            return;
        };
        todo.text = trimmed.to_string();
        todo.priority = new_priority.unwrap_or(todo.priority);
        self.persist_and_render();
    }

    /// Routes a view callback to its operation.
    pub fn dispatch(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Submit { text, priority } => self.add_todo(&text, priority),
            ViewEvent::ToggleCompleted { id, completed } => self.toggle_completed(&id, completed),
            ViewEvent::DeleteRequested { id } => self.delete_todo(&id),
            ViewEvent::EditCommitted { id, text, priority } => {
                self.commit_edit(&id, &text, priority)
            }
            ViewEvent::EditCancelled => self.render(),
        }
    }

    /// Drains pending remote snapshots, applying each in arrival order.
    ///
    /// Every applied snapshot replaces the working collection wholesale and
    /// triggers a repaint. Returns how many snapshots were applied, so host
    /// loops can skip repaint bookkeeping when nothing arrived.
    pub fn pump_snapshots(&mut self) -> usize {
        let Some(receiver) = &self.snapshots else {
            return 0;
        };

        let mut pending = Vec::new();
        while let Ok(snapshot) = receiver.try_recv() {
            pending.push(snapshot);
        }

        let applied = pending.len();
        for snapshot in pending {
            self.todos = snapshot;
            self.render();
        }
        applied
    }

    /// Switches a Local Mode session into Remote Mode, once.
    ///
    /// Called when the remote capability signals readiness after startup:
    /// local durable storage and the working collection are cleared, the
    /// store subscribes, and the first snapshot repopulates the view.
    /// Remote Mode sessions ignore the call; there is no demotion path.
    pub fn enable_remote(&mut self, backend: Arc<dyn RemoteBackend>) {
        if self.mode() == PersistMode::Remote {
            debug!("event=mode_promote module=store status=skip reason=already_remote");
            return;
        }

        if let PersistAdapter::Local(local) = &self.adapter {
            if let Err(err) = local.clear() {
                warn!("event=mode_promote module=store status=warn error={err}");
            }
        }
        self.adapter = PersistAdapter::Remote(backend);
        self.todos.clear();
        self.subscribe_remote();
        info!("event=mode_promote module=store status=ok mode=remote");
        self.render();
    }

    fn remote(&self) -> Option<Arc<dyn RemoteBackend>> {
        match &self.adapter {
            PersistAdapter::Remote(backend) => Some(Arc::clone(backend)),
            PersistAdapter::Local(_) => None,
        }
    }

    fn subscribe_remote(&mut self) {
        if let PersistAdapter::Remote(backend) = &self.adapter {
            let (sender, receiver) = channel();
            backend.subscribe(sender);
            self.snapshots = Some(receiver);
        }
    }

    // Persist-then-render is one inseparable pair: a repaint from data that
    // was never written must not occur. A failed save is logged and the
    // in-memory state kept; the next save rewrites storage wholesale.
    fn persist_and_render(&mut self) {
        if let PersistAdapter::Local(local) = &self.adapter {
            if let Err(err) = local.save(&self.todos) {
                error!("event=save module=store status=error mode=local error={err}");
            }
        }
        self.render();
    }

    fn render(&mut self) {
        self.view.render(&self.todos);
    }
}
