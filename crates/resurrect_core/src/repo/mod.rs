//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-snapshot persistence contract used by the store.
//! - Isolate file format and file-replacement details from the service layer.
//!
//! # Invariants
//! - Every save replaces the full snapshot; there are no partial writes.
//! - Read failures on a present file are reported, never silently dropped.

pub mod item_repo;
