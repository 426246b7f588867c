use std::sync::{Arc, Mutex};
use taskboard_core::{
    BoardPatch, ChangeEvent, ColumnPatch, ErrorKind, HierarchyStore, ManualClock, NewTask,
    Priority, SequentialIdAllocator, Snapshot, StoreConfig, StoreError, TaskPatch,
    ValidationError,
};

type TestStore = HierarchyStore<SequentialIdAllocator, ManualClock>;

fn setup() -> (TestStore, ManualClock) {
    let clock = ManualClock::starting_at(1_000);
    let store = HierarchyStore::with_parts(
        StoreConfig::default(),
        SequentialIdAllocator::new("t"),
        clock.clone(),
    );
    (store, clock)
}

fn count_commits(store: &mut TestStore) -> Arc<Mutex<usize>> {
    let commits = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&commits);
    store.add_observer(move |_snapshot: &Arc<Snapshot>, _change: &ChangeEvent| {
        *sink.lock().unwrap() += 1;
    });
    commits
}

fn column_titles(snapshot: &Snapshot, board_id: &str) -> Vec<String> {
    snapshot
        .columns_of(board_id)
        .unwrap()
        .into_iter()
        .map(|column| column.title.clone())
        .collect()
}

fn task_titles(snapshot: &Snapshot, column_id: &str) -> Vec<String> {
    snapshot
        .tasks_in(column_id)
        .unwrap()
        .into_iter()
        .map(|task| task.title.clone())
        .collect()
}

#[test]
fn create_board_attaches_dense_starter_columns() {
    let (mut store, _) = setup();
    let board = store
        .create_board("  Launch   plan ", "Q3 work", "owner-1")
        .unwrap();

    assert_eq!(board.title, "Launch plan");
    assert_eq!(board.owner_id, "owner-1");
    assert_eq!(board.created_at, 1_000);
    let snapshot = store.snapshot();
    assert_eq!(
        column_titles(&snapshot, board.id.as_str()),
        ["To Do", "In Progress", "Done"]
    );
    let orders: Vec<usize> = snapshot
        .columns_of(board.id.as_str())
        .unwrap()
        .iter()
        .map(|column| column.order)
        .collect();
    assert_eq!(orders, [0, 1, 2]);
    assert_eq!(snapshot.check_invariants(), Ok(()));
}

#[test]
fn custom_starter_columns_come_from_config() {
    let mut store = HierarchyStore::with_parts(
        StoreConfig::with_starter_columns(["Backlog", "Review"]).unwrap(),
        SequentialIdAllocator::new("c"),
        ManualClock::starting_at(0),
    );
    let board = store.create_board("Board", "", "u1").unwrap();
    assert_eq!(
        column_titles(store.current(), board.id.as_str()),
        ["Backlog", "Review"]
    );
}

#[test]
fn blank_titles_are_rejected_without_publishing() {
    let (mut store, _) = setup();
    let board = store.create_board("Board", "", "u1").unwrap();
    let before = store.snapshot();

    let err = store.create_board("   ", "", "u1").unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(ValidationError::BlankTitle { entity: "board" })
    );
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = store
        .create_task(NewTask::new(board.column_ids[0].clone(), "\t\n", "u1"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = store
        .update_column(board.column_ids[0].as_str(), ColumnPatch::title(""))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn update_board_and_column_change_only_patched_fields() {
    let (mut store, _) = setup();
    let board = store.create_board("Board", "first", "u1").unwrap();

    let updated = store
        .update_board(
            board.id.as_str(),
            BoardPatch {
                title: Some(" Renamed  board ".to_string()),
                description: None,
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Renamed board");
    assert_eq!(updated.description, "first");
    assert_eq!(updated.column_ids, board.column_ids);

    let column = store
        .update_column(board.column_ids[1].as_str(), ColumnPatch::title("Doing"))
        .unwrap();
    assert_eq!(column.title, "Doing");
    assert_eq!(column.order, 1);
}

#[test]
fn create_column_appends_and_delete_column_redensifies() {
    let (mut store, _) = setup();
    let board = store.create_board("Board", "", "u1").unwrap();
    let review = store.create_column(board.id.as_str(), "Review").unwrap();
    assert_eq!(review.order, 3);

    let doomed = board.column_ids[1].clone();
    store
        .create_task(NewTask::new(doomed.clone(), "Goes away", "u1"))
        .unwrap();
    store.delete_column(doomed.as_str()).unwrap();

    let snapshot = store.snapshot();
    assert_eq!(
        column_titles(&snapshot, board.id.as_str()),
        ["To Do", "Done", "Review"]
    );
    assert_eq!(snapshot.column(review.id.as_str()).unwrap().order, 2);
    assert_eq!(snapshot.task_count(), 0);
    assert_eq!(snapshot.check_invariants(), Ok(()));
}

#[test]
fn reorder_columns_moves_and_redensifies() {
    let (mut store, _) = setup();
    let board = store.create_board("Board", "", "u1").unwrap();
    store.reorder_columns(board.id.as_str(), 2, 0).unwrap();

    let snapshot = store.snapshot();
    assert_eq!(
        column_titles(&snapshot, board.id.as_str()),
        ["Done", "To Do", "In Progress"]
    );
    assert_eq!(snapshot.check_invariants(), Ok(()));

    let err = store.reorder_columns(board.id.as_str(), 0, 3).unwrap_err();
    assert_eq!(err, StoreError::IndexOutOfRange { index: 3, len: 3 });
}

#[test]
fn tasks_append_with_dense_order_and_delete_redensifies() {
    let (mut store, _) = setup();
    let board = store.create_board("Board", "", "u1").unwrap();
    let todo = board.column_ids[0].clone();

    let created: Vec<_> = ["One", "Two", "Three"]
        .into_iter()
        .map(|title| {
            store
                .create_task(NewTask::new(todo.clone(), title, "u1"))
                .unwrap()
        })
        .collect();
    assert_eq!(
        created.iter().map(|task| task.order).collect::<Vec<_>>(),
        [0, 1, 2]
    );
    assert_eq!(created[0].priority, Priority::Medium);

    store.delete_task(created[0].id.as_str()).unwrap();
    let snapshot = store.snapshot();
    assert_eq!(task_titles(&snapshot, todo.as_str()), ["Two", "Three"]);
    assert_eq!(snapshot.task(created[2].id.as_str()).unwrap().order, 1);
    assert_eq!(snapshot.check_invariants(), Ok(()));
}

#[test]
fn update_task_bumps_updated_at_but_keeps_position() {
    let (mut store, clock) = setup();
    let board = store.create_board("Board", "", "u1").unwrap();
    let todo = board.column_ids[0].clone();
    store
        .create_task(NewTask::new(todo.clone(), "First", "u1"))
        .unwrap();
    let task = store
        .create_task(
            NewTask::new(todo.clone(), "Second", "u1")
                .with_assignee("2")
                .with_due_date(5_000),
        )
        .unwrap();

    clock.advance(250);
    let updated = store
        .update_task(
            task.id.as_str(),
            TaskPatch {
                priority: Some(Priority::High),
                due_date: Some(None),
                assignee_id: Some(None),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.due_date, None);
    assert_eq!(updated.assignee_id, None);
    assert_eq!(updated.created_at, 1_000);
    assert_eq!(updated.updated_at, 1_250);
    assert_eq!(updated.order, 1);
    assert_eq!(updated.column_id, todo);
}

#[test]
fn delete_board_removes_whole_subtree() {
    let (mut store, _) = setup();
    let keep = store.create_board("Keep", "", "u1").unwrap();
    let drop = store.create_board("Drop", "", "u1").unwrap();
    store
        .create_task(NewTask::new(drop.column_ids[0].clone(), "Gone", "u1"))
        .unwrap();
    store
        .create_task(NewTask::new(keep.column_ids[0].clone(), "Stays", "u1"))
        .unwrap();

    store.delete_board(drop.id.as_str()).unwrap();

    let snapshot = store.snapshot();
    let remaining: Vec<_> = snapshot.boards().map(|board| board.id.clone()).collect();
    assert_eq!(remaining, [keep.id.clone()]);
    assert!(snapshot.column(drop.column_ids[0].as_str()).is_none());
    assert_eq!(snapshot.task_count(), 1);
    assert_eq!(snapshot.check_invariants(), Ok(()));
}

#[test]
fn missing_entities_report_not_found() {
    let (mut store, _) = setup();
    assert_eq!(
        store.delete_board("nope").unwrap_err(),
        StoreError::BoardNotFound("nope".into())
    );
    assert_eq!(
        store.create_column("nope", "Col").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        store
            .create_task(NewTask::new("nope", "Task", "u1"))
            .unwrap_err(),
        StoreError::ColumnNotFound("nope".into())
    );
    assert_eq!(
        store
            .update_task("nope", TaskPatch::default())
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn reorder_columns_onto_same_index_publishes_nothing() {
    let (mut store, _) = setup();
    let board = store.create_board("Board", "", "u1").unwrap();
    let commits = count_commits(&mut store);
    let before = store.snapshot();

    for index in 0..3 {
        store.reorder_columns(board.id.as_str(), index, index).unwrap();
    }

    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert_eq!(*commits.lock().unwrap(), 0);
    assert_eq!(
        column_titles(store.current(), board.id.as_str()),
        ["To Do", "In Progress", "Done"]
    );
}

#[test]
fn column_operations_on_missing_ids_are_not_found() {
    let (mut store, _) = setup();
    store.create_board("Board", "", "u1").unwrap();
    let before = store.snapshot();

    assert_eq!(
        store.reorder_columns("nope", 0, 1).unwrap_err(),
        StoreError::BoardNotFound("nope".into())
    );
    assert_eq!(
        store
            .update_column("nope", ColumnPatch::title("Renamed"))
            .unwrap_err(),
        StoreError::ColumnNotFound("nope".into())
    );
    assert_eq!(
        store.delete_column("nope").unwrap_err(),
        StoreError::ColumnNotFound("nope".into())
    );
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn repeated_deletes_report_not_found_without_state_change() {
    let (mut store, _) = setup();
    let board = store.create_board("Board", "", "u1").unwrap();
    let task = store
        .create_task(NewTask::new(board.column_ids[0].clone(), "Once", "u1"))
        .unwrap();
    let column_id = board.column_ids[2].clone();

    store.delete_task(task.id.as_str()).unwrap();
    store.delete_column(column_id.as_str()).unwrap();
    let commits = count_commits(&mut store);
    let after_first = store.snapshot();

    assert_eq!(
        store.delete_task(task.id.as_str()).unwrap_err(),
        StoreError::TaskNotFound(task.id.clone())
    );
    assert_eq!(
        store.delete_column(column_id.as_str()).unwrap_err(),
        StoreError::ColumnNotFound(column_id.clone())
    );
    assert!(Arc::ptr_eq(&after_first, &store.snapshot()));
    assert_eq!(*commits.lock().unwrap(), 0);
}
