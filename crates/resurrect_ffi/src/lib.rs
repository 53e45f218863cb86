//! Flutter-facing bindings for the item store.

pub mod api;
