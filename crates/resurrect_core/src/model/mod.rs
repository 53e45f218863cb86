//! Domain model for stored items.
//!
//! # Responsibility
//! - Define the canonical record handled by the store and its callers.
//!
//! # Invariants
//! - Records are plain values; ordering and identity belong to the store.

pub mod item;
