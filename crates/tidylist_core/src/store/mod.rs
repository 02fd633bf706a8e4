//! Collection ownership and mutation orchestration.
//!
//! # Responsibility
//! - Route every mutation through the single owner of the working
//!   collection.
//! - Keep persistence and rendering paired per active mode.

pub mod list_store;
