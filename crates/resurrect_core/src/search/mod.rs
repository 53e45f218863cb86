//! Keyword search entry points.
//!
//! # Responsibility
//! - Filter stored items by case-insensitive substring.
//! - Keep store positions attached to hits for position-based callers.

pub mod substring;
