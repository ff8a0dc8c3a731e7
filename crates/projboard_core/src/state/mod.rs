//! Authoritative board state and change notification.
//!
//! # Responsibility
//! - Own the only mutable copy of the item sequence.
//! - Fan out immutable snapshots to subscribers after every change.
//!
//! # Invariants
//! - The store is the single writer; subscribers only ever see snapshots.
//! - At most one broadcast per distinct state change.
//! - Subscribers are notified in registration order.

pub mod store;
