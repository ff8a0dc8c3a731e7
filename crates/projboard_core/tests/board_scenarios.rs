mod common;

use common::{record_broadcasts, RecordingRenderer};
use projboard_core::{
    Component, DataTransfer, DragTarget, Draggable, ItemStatus, ProjectInput, StatusList, Store,
    TransitionOutcome,
};

struct Board {
    store: Store,
    form: ProjectInput,
    active: StatusList,
    finished: StatusList,
    active_view: RecordingRenderer,
    finished_view: RecordingRenderer,
}

fn assemble() -> Board {
    let store = Store::new();
    let active_view = RecordingRenderer::default();
    let finished_view = RecordingRenderer::default();
    let mut active = StatusList::new(store.clone(), ItemStatus::Active, active_view.clone());
    let mut finished = StatusList::new(store.clone(), ItemStatus::Finished, finished_view.clone());
    active.configure();
    finished.configure();
    Board {
        form: ProjectInput::new(store.clone()),
        store,
        active,
        finished,
        active_view,
        finished_view,
    }
}

fn submit(board: &mut Board, title: &str, description: &str, people: &str) {
    board.form.set_title(title);
    board.form.set_description(description);
    board.form.set_people(people);
    board.form.submit().expect("valid submission");
}

#[test]
fn configured_lists_start_empty() {
    let board = assemble();

    let active = board.active_view.last();
    assert_eq!(active.list_id, "active-projects-list");
    assert_eq!(active.heading, "ACTIVE PROJECTS");
    assert!(active.rows.is_empty());

    let finished = board.finished_view.last();
    assert_eq!(finished.list_id, "finished-projects-list");
    assert_eq!(finished.heading, "FINISHED PROJECTS");
    assert!(finished.rows.is_empty());
}

#[test]
fn created_item_lands_in_active_list_only() {
    let mut board = assemble();

    submit(
        &mut board,
        "Build API",
        "Design and implement REST endpoints",
        "3",
    );

    assert_eq!(board.store.len(), 1);
    assert_eq!(board.active.rows().len(), 1);
    assert_eq!(board.finished.rows().len(), 0);
    let row = &board.active.rows()[0];
    assert_eq!(row.title, "Build API");
    assert_eq!(row.assigned, "3 persons assigned");
    assert_eq!(row.description, "Design and implement REST endpoints");
}

#[test]
fn dragging_to_finished_moves_row_between_lists() {
    let mut board = assemble();
    submit(
        &mut board,
        "Build API",
        "Design and implement REST endpoints",
        "3",
    );

    let row = board.active.rows()[0].clone();
    let transfer = row.drag_start();
    assert!(board.finished.drag_over(&transfer));
    assert!(board.finished.is_droppable());

    let outcome = board.finished.drop_item(&transfer);
    row.drag_end(&transfer);

    assert_eq!(
        outcome,
        TransitionOutcome::Moved {
            from: ItemStatus::Active,
            to: ItemStatus::Finished,
        }
    );
    assert!(board.active.rows().is_empty());
    assert_eq!(board.finished_view.titles(), vec!["Build API".to_string()]);
    assert!(!board.finished.is_droppable());
    assert!(board.active_view.last().rows.is_empty());
}

#[test]
fn dropping_on_own_list_triggers_no_render() {
    let mut board = assemble();
    submit(&mut board, "Build API", "Design endpoints", "2");
    let active_frames = board.active_view.frames().len();
    let finished_frames = board.finished_view.frames().len();

    let transfer = board.active.rows()[0].drag_start();
    let outcome = board.active.drop_item(&transfer);

    assert_eq!(outcome, TransitionOutcome::Unchanged);
    assert_eq!(board.active_view.frames().len(), active_frames);
    assert_eq!(board.finished_view.frames().len(), finished_frames);
}

#[test]
fn drag_leave_reverts_affordance_without_store_change() {
    let mut board = assemble();
    submit(&mut board, "Build API", "Design endpoints", "2");
    let transfer = board.active.rows()[0].drag_start();

    board.finished.drag_over(&transfer);
    assert!(board.finished_view.last().droppable);
    board.finished.drag_leave();

    assert!(!board.finished_view.last().droppable);
    assert_eq!(board.active.rows().len(), 1);
    assert_eq!(board.store.snapshot()[0].status(), ItemStatus::Active);
}

#[test]
fn foreign_payload_is_not_accepted() {
    let mut board = assemble();
    let mut transfer = DataTransfer::new();
    transfer.set_data("text/html", "<li>Build API</li>");

    assert!(!board.finished.drag_over(&transfer));
    assert!(!board.finished.is_droppable());
}

#[test]
fn lists_preserve_creation_order_per_partition() {
    let mut board = assemble();
    for title in ["one", "two", "three", "four"] {
        submit(&mut board, title, "ordered description", "1");
    }
    let rows = board.active.rows();
    let transfer = rows[2].drag_start();
    board.finished.drop_item(&transfer);
    let transfer = rows[0].drag_start();
    board.finished.drop_item(&transfer);

    assert_eq!(board.active_view.titles(), vec!["two", "four"]);
    assert_eq!(board.finished_view.titles(), vec!["one", "three"]);
}

#[test]
fn manual_render_filters_given_items() {
    let mut board = assemble();
    submit(&mut board, "Build API", "Design endpoints", "2");
    let snapshot = board.store.snapshot();

    board.finished.render(&snapshot);
    assert!(board.finished.rows().is_empty());
    board.active.render(&snapshot);
    assert_eq!(board.active.rows().len(), 1);
}

#[test]
fn list_registered_after_reentrant_subscriber_ends_on_latest_state() {
    let store = Store::new();
    let handle = store.clone();
    store.subscribe(move |snapshot| {
        if let Some(first) = snapshot.first() {
            handle.transition(first.id(), ItemStatus::Finished);
        }
    });
    let active_view = RecordingRenderer::default();
    let mut active = StatusList::new(store.clone(), ItemStatus::Active, active_view.clone());
    active.configure();
    let latest = record_broadcasts(&store);

    store.create("Build API", "Design and implement REST endpoints", 3);

    assert_eq!(store.snapshot()[0].status(), ItemStatus::Finished);
    assert!(active.rows().is_empty());
    assert!(active_view.last().rows.is_empty());
    assert_eq!(
        *latest.borrow().last().expect("delivered"),
        store.snapshot()
    );
}

#[test]
fn list_configured_late_shows_existing_items() {
    let store = Store::new();
    store.create("Build API", "Design and implement REST endpoints", 3);
    let id = store.create("Write docs", "Document public endpoints", 1);
    store.transition(id, ItemStatus::Finished);

    let finished_view = RecordingRenderer::default();
    let mut finished = StatusList::new(store.clone(), ItemStatus::Finished, finished_view.clone());
    finished.configure();

    assert_eq!(finished_view.frames().len(), 1);
    assert_eq!(finished_view.titles(), vec!["Write docs"]);
}
