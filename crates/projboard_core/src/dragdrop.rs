//! Drag-and-drop handshake between list rows and status lists.
//!
//! # Responsibility
//! - Define the payload a dragged row hands to a drop target.
//! - Define the source/target capabilities implemented by components.
//!
//! # Invariants
//! - The item id travels as plain text under [`DRAG_TRANSFER_TYPE`] and is
//!   read back under the same key.
//! - Drag-over never touches the store; only drop does.

use crate::model::item::ItemId;
use crate::state::store::TransitionOutcome;
use std::collections::BTreeMap;

/// Transfer type key carrying the dragged item id.
pub const DRAG_TRANSFER_TYPE: &str = "text/plain";

/// Cursor hint a drag source advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
}

/// Data carried from drag source to drop target.
///
/// `types` keeps declaration order, matching what drop targets inspect on
/// drag-over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataTransfer {
    types: Vec<String>,
    data: BTreeMap<String, String>,
    effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload produced when dragging the item `id`.
    pub fn for_item(id: ItemId) -> Self {
        let mut transfer = Self::new();
        transfer.set_data(DRAG_TRANSFER_TYPE, id.to_string());
        transfer.set_effect_allowed(DropEffect::Move);
        transfer
    }

    /// Stores `value` under `format`, replacing any earlier value.
    pub fn set_data(&mut self, format: &str, value: impl Into<String>) {
        if !self.types.iter().any(|existing| existing == format) {
            self.types.push(format.to_string());
        }
        self.data.insert(format.to_string(), value.into());
    }

    /// Returns the value for `format`, or an empty string when absent.
    pub fn get_data(&self, format: &str) -> &str {
        self.data.get(format).map(String::as_str).unwrap_or("")
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn effect_allowed(&self) -> DropEffect {
        self.effect_allowed
    }

    pub fn set_effect_allowed(&mut self, effect: DropEffect) {
        self.effect_allowed = effect;
    }

    /// Returns whether the first declared type marks an item reference.
    pub fn carries_item_reference(&self) -> bool {
        self.types
            .first()
            .is_some_and(|format| format == DRAG_TRANSFER_TYPE)
    }
}

/// Something the user can pick up and drag.
pub trait Draggable {
    fn drag_start(&self) -> DataTransfer;
    fn drag_end(&self, transfer: &DataTransfer);
}

/// Something a dragged item can be dropped onto.
pub trait DragTarget {
    /// Returns whether the drop would be accepted.
    fn drag_over(&mut self, transfer: &DataTransfer) -> bool;
    /// Completes the gesture; only this step reaches the store.
    fn drop_item(&mut self, transfer: &DataTransfer) -> TransitionOutcome;
    fn drag_leave(&mut self);
}
