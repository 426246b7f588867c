use taskboard_core::{
    project_tasks, sample_users, DueDateRange, FilterSpec, HierarchyStore, ManualClock, NewTask,
    Priority, SequentialIdAllocator, SortField, SortSpec, StaticUserDirectory, StoreConfig, Task,
    ViewState,
};

type TestStore = HierarchyStore<SequentialIdAllocator, ManualClock>;

const DAY_MS: i64 = 86_400_000;

struct Fixture {
    store: TestStore,
    column_id: String,
    users: StaticUserDirectory,
}

fn setup() -> Fixture {
    let mut store = HierarchyStore::with_parts(
        StoreConfig::default(),
        SequentialIdAllocator::new("v"),
        ManualClock::starting_at(0),
    );
    let board = store.create_board("Board", "", "1").unwrap();
    Fixture {
        store,
        column_id: board.column_ids[0].to_string(),
        users: sample_users(),
    }
}

impl Fixture {
    fn add(&mut self, request: NewTask) {
        self.store.create_task(request).unwrap();
    }

    fn task(&self, title: &str) -> NewTask {
        NewTask::new(self.column_id.as_str(), title, "1")
    }

    fn project(&self, filter: &FilterSpec, sort: &SortSpec) -> Vec<String> {
        let tasks = self.store.current().tasks_in(&self.column_id).unwrap();
        project_tasks(tasks, filter, sort, &self.users)
            .into_iter()
            .map(|task| task.title.clone())
            .collect()
    }
}

#[test]
fn priority_filter_keeps_canonical_order_on_equal_keys() {
    let mut fx = setup();
    for (title, priority) in [
        ("t0", Priority::High),
        ("t1", Priority::Low),
        ("t2", Priority::High),
        ("t3", Priority::Medium),
    ] {
        let request = fx.task(title).with_priority(priority);
        fx.add(request);
    }

    let filter = FilterSpec::new().with_priority(Priority::High);
    assert_eq!(fx.project(&filter, &SortSpec::default()), ["t0", "t2"]);
}

#[test]
fn priority_sort_uses_rank_in_both_directions() {
    let mut fx = setup();
    for (title, priority) in [
        ("low", Priority::Low),
        ("high", Priority::High),
        ("medium", Priority::Medium),
    ] {
        let request = fx.task(title).with_priority(priority);
        fx.add(request);
    }

    let unfiltered = FilterSpec::new();
    assert_eq!(
        fx.project(&unfiltered, &SortSpec::descending(SortField::Priority)),
        ["high", "medium", "low"]
    );
    assert_eq!(
        fx.project(&unfiltered, &SortSpec::ascending(SortField::Priority)),
        ["low", "medium", "high"]
    );
}

#[test]
fn due_date_ascending_puts_missing_due_dates_first() {
    let mut fx = setup();
    let later = fx.task("later").with_due_date(2 * DAY_MS);
    fx.add(later);
    let none = fx.task("none");
    fx.add(none);
    let sooner = fx.task("sooner").with_due_date(DAY_MS);
    fx.add(sooner);

    assert_eq!(
        fx.project(&FilterSpec::new(), &SortSpec::ascending(SortField::DueDate)),
        ["none", "sooner", "later"]
    );
}

#[test]
fn query_matches_title_description_and_assignee_name() {
    let mut fx = setup();
    let by_title = fx.task("Write docs");
    fx.add(by_title);
    let by_description = fx.task("Other").with_description("update the DOCS site");
    fx.add(by_description);
    let by_assignee = fx.task("Review").with_assignee("2");
    fx.add(by_assignee);
    let unrelated = fx.task("Deploy").with_assignee("9");
    fx.add(unrelated);

    let sort = SortSpec::ascending(SortField::CreatedAt);
    assert_eq!(
        fx.project(&FilterSpec::new().with_query("Docs"), &sort),
        ["Write docs", "Other"]
    );
    assert_eq!(
        fx.project(&FilterSpec::new().with_query("jane"), &sort),
        ["Review"]
    );
    assert_eq!(
        fx.project(&FilterSpec::new().with_query(""), &sort).len(),
        4
    );
}

#[test]
fn assignee_and_due_constraints_are_combined() {
    let mut fx = setup();
    let inside = fx.task("inside").with_assignee("3").with_due_date(5 * DAY_MS);
    fx.add(inside);
    let outside = fx.task("outside").with_assignee("3").with_due_date(9 * DAY_MS);
    fx.add(outside);
    let undated = fx.task("undated").with_assignee("3");
    fx.add(undated);
    let unassigned = fx.task("unassigned").with_due_date(5 * DAY_MS);
    fx.add(unassigned);

    let filter = FilterSpec::new()
        .with_assignee("3")
        .with_due(DueDateRange::between(4 * DAY_MS, 6 * DAY_MS));
    assert_eq!(filter.active_constraint_count(), 2);
    assert_eq!(fx.project(&filter, &SortSpec::default()), ["inside"]);
}

#[test]
fn open_due_range_drops_undated_tasks() {
    let mut fx = setup();
    let undated = fx.task("undated");
    fx.add(undated);
    let dated = fx.task("dated").with_due_date(5);
    fx.add(dated);

    let open = FilterSpec::new().with_due(DueDateRange::default());
    assert_eq!(fx.project(&open, &SortSpec::default()), ["dated"]);
    assert_eq!(
        fx.project(&FilterSpec::new(), &SortSpec::default()),
        ["undated", "dated"]
    );
}

#[test]
fn assigned_to_sort_uses_display_names() {
    let mut fx = setup();
    let mike = fx.task("mike").with_assignee("3");
    fx.add(mike);
    let nobody = fx.task("nobody");
    fx.add(nobody);
    let david = fx.task("david").with_assignee("5");
    fx.add(david);
    let unknown = fx.task("unknown").with_assignee("404");
    fx.add(unknown);

    assert_eq!(
        fx.project(&FilterSpec::new(), &SortSpec::ascending(SortField::AssignedTo)),
        ["nobody", "unknown", "david", "mike"]
    );
}

#[test]
fn projection_is_pure_and_repeatable() {
    let mut fx = setup();
    for (day, title) in [(3, "c"), (1, "a"), (2, "b")] {
        fx.store.clock().set(day * DAY_MS);
        let request = fx.task(title);
        fx.add(request);
    }
    let before = fx.store.snapshot();

    let sort = SortSpec::ascending(SortField::CreatedAt);
    let first = fx.project(&FilterSpec::new(), &sort);
    let second = fx.project(&FilterSpec::new(), &sort);

    assert_eq!(first, ["a", "b", "c"]);
    assert_eq!(first, second);
    assert_eq!(*fx.store.snapshot(), *before);
    let canonical: Vec<(String, usize)> = fx
        .store
        .current()
        .tasks_in(&fx.column_id)
        .unwrap()
        .into_iter()
        .map(|task| (task.title.clone(), task.order))
        .collect();
    assert_eq!(
        canonical,
        [("c".to_string(), 0), ("a".to_string(), 1), ("b".to_string(), 2)]
    );
}

#[test]
fn view_state_projects_with_its_own_filter_and_sort() {
    let mut fx = setup();
    for (title, priority) in [("x", Priority::Low), ("y", Priority::High)] {
        let request = fx.task(title).with_priority(priority);
        fx.add(request);
    }
    let tasks: Vec<&Task> = fx.store.current().tasks_in(&fx.column_id).unwrap();

    let mut view = ViewState::new();
    view.set_filter(FilterSpec::new().with_priority(Priority::Low));
    let titles: Vec<&str> = view
        .project(tasks.iter().copied(), &fx.users)
        .into_iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(titles, ["x"]);

    view.clear();
    assert_eq!(view.sort(), &SortSpec::default());
    assert_eq!(view.project(tasks.iter().copied(), &fx.users).len(), 2);
}
