//! Domain model for the todo collection.
//!
//! # Responsibility
//! - Define the single entity shape used by storage, store and view layers.
//! - Keep normalization rules (priority, timestamps) in one place.
//!
//! # Invariants
//! - Every item is identified by a stable opaque `TodoId`.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod todo;
