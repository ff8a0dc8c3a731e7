//! Core state engine for the project board.
//! This crate is the single source of truth for board invariants.

pub mod component;
pub mod dragdrop;
pub mod logging;
pub mod model;
pub mod state;
pub mod validation;

pub use component::item_row::ItemRow;
pub use component::project_input::{FormError, ProjectInput, INVALID_INPUT_MESSAGE};
pub use component::status_list::StatusList;
pub use component::{Component, ListFrame, ListRenderer};
pub use dragdrop::{DataTransfer, DragTarget, Draggable, DropEffect, DRAG_TRANSFER_TYPE};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::item::{parse_item_id, Item, ItemId, ItemStatus};
pub use state::store::{Snapshot, Store, SubscriptionId, TransitionOutcome};
pub use validation::{validate, FieldValue, FormRules, RulesError, Validatable};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
