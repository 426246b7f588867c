//! Demo board used by the CLI and first-run flows.

use crate::model::board::Board;
use crate::model::task::{NewTask, Priority};
use crate::model::text::ValidationError;
use crate::ports::{Clock, IdAllocator, StaticUserDirectory};
use crate::store::error::StoreResult;
use crate::store::hierarchy::HierarchyStore;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Directory matching the assignees used by [`seed_sample_board`].
pub fn sample_users() -> StaticUserDirectory {
    StaticUserDirectory::new()
        .with_user("1", "John Doe")
        .with_user("2", "Jane Smith")
        .with_user("3", "Mike Johnson")
        .with_user("4", "Sarah Wilson")
        .with_user("5", "David Brown")
}

/// Creates a sample board with one task per starter column.
///
/// Tasks go to the first three columns; with fewer starter columns the
/// remaining tasks land in the last column. Due dates are 3, 5 and 7 days
/// after the store clock's current time.
pub fn seed_sample_board<A: IdAllocator, C: Clock>(
    store: &mut HierarchyStore<A, C>,
    owner_id: &str,
) -> StoreResult<Board> {
    let board = store.create_board(
        "Sample Project Board",
        "A sample board to demonstrate the task management features",
        owner_id,
    )?;
    let Some(last_column) = board.column_ids.last() else {
        return Err(ValidationError::InvalidConfig(
            "sample board needs at least one starter column".to_string(),
        )
        .into());
    };
    let now = store.clock().now_ms();

    let samples = [
        (
            "Design landing page",
            "Create wireframes and mockups for the new landing page",
            Priority::High,
            3,
            "2",
        ),
        (
            "Set up development environment",
            "Configure development tools and dependencies",
            Priority::Medium,
            5,
            "3",
        ),
        (
            "Write project documentation",
            "Document the project setup and usage instructions",
            Priority::Low,
            7,
            "4",
        ),
    ];

    for (index, (title, description, priority, due_in_days, assignee)) in
        samples.into_iter().enumerate()
    {
        let column_id = board.column_ids.get(index).unwrap_or(last_column).clone();
        store.create_task(
            NewTask::new(column_id, title, owner_id)
                .with_description(description)
                .with_priority(priority)
                .with_due_date(now + due_in_days * DAY_MS)
                .with_assignee(assignee),
        )?;
    }

    Ok(board)
}
