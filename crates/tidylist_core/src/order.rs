//! Display ordering policy.
//!
//! # Responsibility
//! - Provide the one deterministic comparator applied on every render.
//!
//! # Invariants
//! - Incomplete items sort before completed items.
//! - Within one completion state, higher priority rank sorts earlier.
//! - Within one priority rank, more recent `createdAt` sorts earlier.

use crate::model::todo::Todo;
use std::cmp::Ordering;

/// Strict total order over todos for display.
///
/// Stored collections keep insertion order; render paths sort a copy with
/// this comparator right before building view rows. Ties are left to the
/// underlying stable sort, so equal keys keep a consistent relative order.
pub fn display_cmp(a: &Todo, b: &Todo) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.priority.rank().cmp(&a.priority.rank()))
        .then_with(|| b.created_rank().cmp(&a.created_rank()))
}

/// Returns a freshly sorted copy of the collection.
///
/// The input slice is never reordered.
pub fn sorted_for_display(todos: &[Todo]) -> Vec<Todo> {
    let mut snapshot = todos.to_vec();
    snapshot.sort_by(display_cmp);
    snapshot
}
