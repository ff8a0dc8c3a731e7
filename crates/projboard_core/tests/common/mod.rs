#![allow(dead_code)]

use projboard_core::{ItemRow, ListFrame, ListRenderer, Snapshot, Store};
use std::cell::RefCell;
use std::rc::Rc;

/// One drawn frame, owned so tests can inspect it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnFrame {
    pub list_id: String,
    pub heading: String,
    pub rows: Vec<ItemRow>,
    pub droppable: bool,
}

/// Renderer that keeps every frame it was asked to draw.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    frames: Rc<RefCell<Vec<DrawnFrame>>>,
}

impl RecordingRenderer {
    pub fn frames(&self) -> Vec<DrawnFrame> {
        self.frames.borrow().clone()
    }

    pub fn last(&self) -> DrawnFrame {
        self.frames
            .borrow()
            .last()
            .cloned()
            .expect("at least one frame drawn")
    }

    pub fn titles(&self) -> Vec<String> {
        self.last().rows.into_iter().map(|row| row.title).collect()
    }
}

impl ListRenderer for RecordingRenderer {
    fn redraw(&mut self, frame: &ListFrame<'_>) {
        self.frames.borrow_mut().push(DrawnFrame {
            list_id: frame.list_id.to_string(),
            heading: frame.heading.to_string(),
            rows: frame.rows.to_vec(),
            droppable: frame.droppable,
        });
    }
}

/// Subscribes a sink that keeps every broadcast snapshot.
pub fn record_broadcasts(store: &Store) -> Rc<RefCell<Vec<Snapshot>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));
    seen
}
