//! Domain model for board items.
//!
//! # Responsibility
//! - Define the canonical item record rendered by both status lists.
//! - Keep status values closed over the two board partitions.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - Items are never removed once created.

pub mod item;
