//! Board components wired to the store.
//!
//! # Responsibility
//! - Filter store snapshots into per-status rows and hand them to a renderer.
//! - Turn form input and drop gestures into store calls.
//!
//! # Invariants
//! - Components never mutate items directly; every change goes through
//!   `Store::create` or `Store::transition`.
//! - Drawing is delegated to a host-supplied [`ListRenderer`].

pub mod item_row;
pub mod project_input;
pub mod status_list;

use crate::model::item::Item;
use item_row::ItemRow;

/// Renderable unit attached to the board.
pub trait Component {
    /// Hooks the component up to its collaborators. Called once.
    fn configure(&mut self);
    /// Redraws from an ordered item sequence.
    fn render(&mut self, items: &[Item]);
}

/// Everything a host needs to draw one status list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame<'a> {
    pub list_id: &'a str,
    pub heading: &'a str,
    pub rows: &'a [ItemRow],
    pub droppable: bool,
}

/// Host drawing capability for a status list.
pub trait ListRenderer {
    /// Replaces whatever was drawn before with `frame`.
    fn redraw(&mut self, frame: &ListFrame<'_>);
}
