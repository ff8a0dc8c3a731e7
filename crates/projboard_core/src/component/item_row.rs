//! Rendered row for one item, also the drag source.

use crate::dragdrop::{DataTransfer, Draggable, DRAG_TRANSFER_TYPE};
use crate::model::item::{Item, ItemId};
use log::debug;

/// Display-ready projection of an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: ItemId,
    pub title: String,
    /// e.g. `2 persons assigned`.
    pub assigned: String,
    pub description: String,
}

impl ItemRow {
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id(),
            title: item.title().to_string(),
            assigned: format!("{} assigned", item.persons_label()),
            description: item.description().to_string(),
        }
    }
}

impl Draggable for ItemRow {
    fn drag_start(&self) -> DataTransfer {
        debug!("event=drag_start module=item_row status=ok item_id={}", self.id);
        DataTransfer::for_item(self.id)
    }

    fn drag_end(&self, transfer: &DataTransfer) {
        debug!(
            "event=drag_end module=item_row status=ok item_id={} payload_matches={}",
            self.id,
            transfer.get_data(DRAG_TRANSFER_TYPE) == self.id.to_string()
        );
    }
}
