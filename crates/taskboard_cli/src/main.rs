//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskboard_core` linkage end to end.
//! - Print the sample board, a priority projection and the snapshot JSON.
//! - Write rolling logs when `TASKBOARD_LOG_DIR` names an absolute directory.

use std::error::Error;
use taskboard_core::{
    core_version, default_log_level, init_logging, sample_users, seed_sample_board, FilterSpec,
    project_tasks, HierarchyStore, SortField, SortSpec, UserDirectory,
};

const LOG_DIR_ENV: &str = "TASKBOARD_LOG_DIR";

fn main() -> Result<(), Box<dyn Error>> {
    // File logging is opt-in so the smoke output stays on stdout only.
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        init_logging(default_log_level(), &log_dir)?;
    }
    println!("taskboard_core version={}", core_version());

    let mut store = HierarchyStore::new();
    let users = sample_users();
    let board = seed_sample_board(&mut store, "1")?;

    let snapshot = store.snapshot();
    let view = snapshot
        .board_view(board.id.as_str())
        .ok_or("sample board missing from snapshot")?;

    println!("board {} ({})", view.board.title, view.board.id);
    for column in &view.columns {
        println!("  [{}] {}", column.column.order, column.column.title);
        for task in &column.tasks {
            println!("    {}. {} ({})", task.order, task.title, task.priority);
        }
    }

    let all_tasks = view.columns.iter().flat_map(|column| column.tasks.iter().copied());
    let by_priority = project_tasks(
        all_tasks,
        &FilterSpec::new(),
        &SortSpec::descending(SortField::Priority),
        &users,
    );
    println!("by priority:");
    for task in by_priority {
        let assignee = task
            .assignee_id
            .as_deref()
            .and_then(|id| users.resolve(id))
            .map(|profile| profile.display_name)
            .unwrap_or_else(|| "unassigned".to_string());
        println!("  {} [{}] -> {}", task.title, task.priority, assignee);
    }

    println!("{}", serde_json::to_string_pretty(snapshot.as_ref())?);
    Ok(())
}
