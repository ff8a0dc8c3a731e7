//! Text-mode board host.
//!
//! # Responsibility
//! - Assemble one store, one input form and both status lists.
//! - Execute parsed commands and collect the text to show the user.
//!
//! # Invariants
//! - Exactly one `Store` exists per `Board`; every component shares it.
//! - Lists are printed only when they were redrawn by the last command.

use crate::commands::{Command, CommandError, HELP_TEXT};
use log::info;
use projboard_core::{
    parse_item_id, Component, DataTransfer, DragTarget, Draggable, FormRules, ItemRow,
    ItemStatus, ListFrame, ListRenderer, ProjectInput, StatusList, Store, TransitionOutcome,
};
use std::cell::RefCell;
use std::rc::Rc;

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(Vec<String>),
    Quit,
}

#[derive(Default)]
struct DrawnText {
    lines: Vec<String>,
    dirty: bool,
}

/// Renders a list frame into plain text lines.
#[derive(Clone, Default)]
struct TextRenderer {
    slot: Rc<RefCell<DrawnText>>,
}

impl TextRenderer {
    fn take_if_dirty(&self) -> Option<Vec<String>> {
        let mut slot = self.slot.borrow_mut();
        if !slot.dirty {
            return None;
        }
        slot.dirty = false;
        Some(slot.lines.clone())
    }

    fn current(&self) -> Vec<String> {
        let mut slot = self.slot.borrow_mut();
        slot.dirty = false;
        slot.lines.clone()
    }
}

impl ListRenderer for TextRenderer {
    fn redraw(&mut self, frame: &ListFrame<'_>) {
        let mut slot = self.slot.borrow_mut();
        slot.lines = format_frame(frame);
        slot.dirty = true;
    }
}

fn format_frame(frame: &ListFrame<'_>) -> Vec<String> {
    let mut lines = vec![format!(
        "== {} ({}){}",
        frame.heading,
        frame.rows.len(),
        if frame.droppable { " [drop here]" } else { "" }
    )];
    if frame.rows.is_empty() {
        lines.push("   (empty)".to_string());
    }
    for row in frame.rows {
        lines.push(format!(
            "   [{}] {} | {}",
            short_id(row),
            row.title,
            row.assigned
        ));
        lines.push(format!("          {}", row.description));
    }
    lines
}

fn short_id(row: &ItemRow) -> String {
    row.id.to_string().chars().take(8).collect()
}

/// Store plus the components wired to it.
pub struct Board {
    store: Store,
    form: ProjectInput,
    active: StatusList,
    finished: StatusList,
    active_text: TextRenderer,
    finished_text: TextRenderer,
}

impl Board {
    pub fn new(rules: FormRules) -> Self {
        let store = Store::new();
        let active_text = TextRenderer::default();
        let finished_text = TextRenderer::default();
        let mut active = StatusList::new(store.clone(), ItemStatus::Active, active_text.clone());
        let mut finished =
            StatusList::new(store.clone(), ItemStatus::Finished, finished_text.clone());
        active.configure();
        finished.configure();
        info!("event=board_assembled module=cli status=ok lists=2");

        Self {
            form: ProjectInput::with_rules(store.clone(), rules),
            store,
            active,
            finished,
            active_text,
            finished_text,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Both lists as currently drawn.
    pub fn show(&self) -> Vec<String> {
        let mut lines = self.active_text.current();
        lines.extend(self.finished_text.current());
        lines
    }

    /// Runs one command and returns the lines to print.
    ///
    /// # Errors
    /// - Drag commands whose id prefix matches no row, or more than one.
    pub fn execute(&mut self, command: Command) -> Result<Flow, CommandError> {
        let mut output = Vec::new();
        match command {
            Command::SetTitle(value) => self.form.set_title(value),
            Command::SetDescription(value) => self.form.set_description(value),
            Command::SetPeople(value) => self.form.set_people(value),
            Command::Submit => output.push(self.submit()),
            Command::Add {
                title,
                description,
                people,
            } => {
                self.form.set_title(title);
                self.form.set_description(description);
                self.form.set_people(people);
                output.push(self.submit());
            }
            Command::Drag { id_prefix, target } => {
                let row = self.find_row(&id_prefix)?;
                let transfer = row.drag_start();
                let outcome = self.drop_onto(target, &transfer);
                row.drag_end(&transfer);
                output.push(describe_outcome(&row.title, target, outcome));
            }
            Command::DropRaw { target, payload } => {
                let mut transfer = DataTransfer::new();
                transfer.set_data(projboard_core::DRAG_TRANSFER_TYPE, payload);
                let outcome = self.drop_onto(target, &transfer);
                output.push(describe_outcome("payload", target, outcome));
            }
            Command::Show => return Ok(Flow::Continue(self.show())),
            Command::Export => output.push(self.export()),
            Command::Help => output.push(HELP_TEXT.to_string()),
            Command::Quit => return Ok(Flow::Quit),
        }

        output.extend(self.active_text.take_if_dirty().unwrap_or_default());
        output.extend(self.finished_text.take_if_dirty().unwrap_or_default());
        Ok(Flow::Continue(output))
    }

    fn submit(&mut self) -> String {
        match self.form.submit() {
            Ok(id) => format!("created {}", &id.to_string()[..8]),
            Err(err) => err.to_string(),
        }
    }

    fn drop_onto(&mut self, target: ItemStatus, transfer: &DataTransfer) -> TransitionOutcome {
        let list = match target {
            ItemStatus::Active => &mut self.active,
            ItemStatus::Finished => &mut self.finished,
        };
        if !list.drag_over(transfer) {
            list.drag_leave();
            return TransitionOutcome::NotFound;
        }
        list.drop_item(transfer)
    }

    fn find_row(&self, id_prefix: &str) -> Result<ItemRow, CommandError> {
        let prefix = id_prefix.trim().to_ascii_lowercase();
        if let Some(id) = parse_item_id(&prefix) {
            if let Some(row) = self.all_rows().into_iter().find(|row| row.id == id) {
                return Ok(row);
            }
        }

        let mut matches = self
            .all_rows()
            .into_iter()
            .filter(|row| row.id.to_string().starts_with(prefix.as_str()))
            .collect::<Vec<_>>();
        match matches.len() {
            0 => Err(CommandError::UnknownItem(prefix)),
            1 => Ok(matches.remove(0)),
            _ => Err(CommandError::AmbiguousItem(prefix)),
        }
    }

    fn all_rows(&self) -> Vec<ItemRow> {
        let mut rows = self.active.rows();
        rows.extend(self.finished.rows());
        rows
    }

    fn export(&self) -> String {
        let items = self.store.snapshot();
        serde_json::to_string_pretty(items.items())
            .unwrap_or_else(|err| format!("export failed: {err}"))
    }
}

fn describe_outcome(subject: &str, target: ItemStatus, outcome: TransitionOutcome) -> String {
    match outcome {
        TransitionOutcome::Moved { from, to } => format!("moved {subject} from {from} to {to}"),
        TransitionOutcome::Unchanged => format!("{subject} is already {target}"),
        TransitionOutcome::NotFound => format!("{subject} does not reference an item; ignored"),
    }
}
