//! Item domain model.
//!
//! # Responsibility
//! - Define the record created by the input form and shown by status lists.
//! - Provide display helpers shared by every list row.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `status` changes only through `Store::transition`.
//! - `title` and `description` are validated by the caller before creation.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for every item on the board.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = Uuid;

/// Board partition an item currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Work that is still in flight. Default for new items.
    Active,
    /// Work that has been completed.
    Finished,
}

impl ItemStatus {
    /// Both partitions in board display order.
    pub const ALL: [ItemStatus; 2] = [ItemStatus::Active, ItemStatus::Finished];

    /// Stable lowercase name used in list ids and command input.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            other => Err(format!(
                "unknown status `{other}`; expected active|finished"
            )),
        }
    }
}

/// Canonical board record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    title: String,
    description: String,
    /// Number of people assigned, `1..=5` after form validation.
    people: u8,
    status: ItemStatus,
}

impl Item {
    /// Creates a new active item with a generated stable ID.
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            people,
            status: ItemStatus::Active,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn people(&self) -> u8 {
        self.people
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    /// Human-readable headcount, e.g. `1 person` or `3 persons`.
    pub fn persons_label(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} persons", self.people)
        }
    }

    /// Only the store may move an item between partitions.
    pub(crate) fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
    }
}

/// Parses an item id from its textual form, e.g. a drag payload.
///
/// Returns `None` for anything that is not a non-nil UUID; callers treat that
/// the same as a reference to an unknown item.
pub fn parse_item_id(value: &str) -> Option<ItemId> {
    Uuid::parse_str(value.trim())
        .ok()
        .filter(|id| !id.is_nil())
}
