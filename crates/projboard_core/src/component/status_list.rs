//! Per-status list view and drop target.
//!
//! # Responsibility
//! - Keep the rows for one status partition in sync with store snapshots.
//! - Translate drops into `Store::transition` calls.
//!
//! # Invariants
//! - Rows preserve snapshot order and are rebuilt in full on every render.
//! - No store borrow or surface borrow is held while the store broadcasts.
//! - Dropping the list removes its store subscription.

use crate::component::item_row::ItemRow;
use crate::component::{Component, ListFrame, ListRenderer};
use crate::dragdrop::{DataTransfer, DragTarget, DRAG_TRANSFER_TYPE};
use crate::model::item::{parse_item_id, Item, ItemStatus};
use crate::state::store::{Store, SubscriptionId, TransitionOutcome};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;

struct ListSurface {
    status: ItemStatus,
    list_id: String,
    heading: String,
    rows: Vec<ItemRow>,
    droppable: bool,
    renderer: Box<dyn ListRenderer>,
}

impl ListSurface {
    fn rebuild(&mut self, items: &[Item]) {
        self.rows = items
            .iter()
            .filter(|item| item.status() == self.status)
            .map(ItemRow::from_item)
            .collect();
        debug!(
            "event=list_rendered module=status_list status=ok list={} rows={}",
            self.status,
            self.rows.len()
        );
        self.draw();
    }

    fn set_droppable(&mut self, droppable: bool) {
        if self.droppable != droppable {
            self.droppable = droppable;
            self.draw();
        }
    }

    fn draw(&mut self) {
        let frame = ListFrame {
            list_id: &self.list_id,
            heading: &self.heading,
            rows: &self.rows,
            droppable: self.droppable,
        };
        self.renderer.redraw(&frame);
    }
}

/// List showing every item with one status.
pub struct StatusList {
    status: ItemStatus,
    store: Store,
    surface: Rc<RefCell<ListSurface>>,
    subscription: Option<SubscriptionId>,
}

impl StatusList {
    pub fn new(store: Store, status: ItemStatus, renderer: impl ListRenderer + 'static) -> Self {
        let surface = ListSurface {
            status,
            list_id: format!("{}-projects-list", status.as_str()),
            heading: format!("{} PROJECTS", status.as_str().to_ascii_uppercase()),
            rows: Vec::new(),
            droppable: false,
            renderer: Box::new(renderer),
        };
        Self {
            status,
            store,
            surface: Rc::new(RefCell::new(surface)),
            subscription: None,
        }
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn list_id(&self) -> String {
        self.surface.borrow().list_id.clone()
    }

    pub fn heading(&self) -> String {
        self.surface.borrow().heading.clone()
    }

    /// Rows as of the last render.
    pub fn rows(&self) -> Vec<ItemRow> {
        self.surface.borrow().rows.clone()
    }

    pub fn is_droppable(&self) -> bool {
        self.surface.borrow().droppable
    }

    pub fn is_configured(&self) -> bool {
        self.subscription.is_some()
    }

    /// Draws current rows again without touching the store.
    pub fn redraw(&self) {
        self.surface.borrow_mut().draw();
    }
}

impl Component for StatusList {
    /// Subscribes to the store and draws the rows the store holds right now.
    ///
    /// Calling this twice keeps the first subscription.
    fn configure(&mut self) {
        if self.subscription.is_some() {
            return;
        }

        let surface = Rc::downgrade(&self.surface);
        let id = self.store.subscribe(move |snapshot| {
            if let Some(surface) = surface.upgrade() {
                surface.borrow_mut().rebuild(snapshot);
            }
        });
        self.subscription = Some(id);
        let snapshot = self.store.snapshot();
        self.surface.borrow_mut().rebuild(&snapshot);
    }

    fn render(&mut self, items: &[Item]) {
        self.surface.borrow_mut().rebuild(items);
    }
}

impl DragTarget for StatusList {
    fn drag_over(&mut self, transfer: &DataTransfer) -> bool {
        let accepted = transfer.carries_item_reference();
        if accepted {
            self.surface.borrow_mut().set_droppable(true);
        }
        accepted
    }

    fn drop_item(&mut self, transfer: &DataTransfer) -> TransitionOutcome {
        self.surface.borrow_mut().set_droppable(false);

        let raw = transfer.get_data(DRAG_TRANSFER_TYPE);
        let Some(id) = parse_item_id(raw) else {
            warn!(
                "event=drop module=status_list status=ignored list={} reason=unreadable_id",
                self.status
            );
            return TransitionOutcome::NotFound;
        };
        self.store.transition(id, self.status)
    }

    fn drag_leave(&mut self) {
        self.surface.borrow_mut().set_droppable(false);
    }
}

impl Drop for StatusList {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id);
        }
    }
}
