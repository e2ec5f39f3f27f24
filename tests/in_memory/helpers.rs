//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryProjectBackend,
    domain::{ColumnId, ProjectId, RawTask, TaskId},
    services::ProjectBoard,
};
use tracing_subscriber::EnvFilter;

/// Board over the in-memory backend.
pub type MemoryBoard = ProjectBoard<InMemoryProjectBackend, InMemoryProjectBackend, DefaultClock>;

/// Routes service logs to the test writer when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Provides the project every test works in.
#[fixture]
pub fn project_id() -> ProjectId {
    ProjectId::new("65f0c0ffee").expect("valid project id")
}

/// Builds a task identifier.
pub fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

/// Records as a mixed fleet of clients would have written them.
pub fn mixed_records() -> Vec<RawTask> {
    vec![
        RawTask::new("t1", "Draft brief", "pendiente"),
        RawTask::new("t2", "Review budget", "To_Do"),
        RawTask::new("t3", "Book venue", "en_progreso"),
        RawTask::new("t4", "Print flyers", "In_Review"),
        RawTask::new("t5", "Send invites", "completada"),
        RawTask::new("t6", "Old idea", "eliminada"),
        RawTask::new("t7", "Imported card", "bloqueada"),
    ]
}

/// Provides a backend seeded with [`mixed_records`].
#[fixture]
pub fn backend(project_id: ProjectId) -> InMemoryProjectBackend {
    init_tracing();
    let backend = InMemoryProjectBackend::new();
    backend
        .seed(&project_id, mixed_records())
        .expect("seed backend");
    backend
}

/// Creates an unloaded board over `backend`.
pub fn board_for(project_id: &ProjectId, backend: &InMemoryProjectBackend) -> MemoryBoard {
    ProjectBoard::new(
        project_id.clone(),
        Arc::new(backend.clone()),
        Arc::new(backend.clone()),
        Arc::new(DefaultClock),
    )
}

/// Returns the task identifiers in a column, in display order.
///
/// # Errors
///
/// Returns an error when board state is unusable.
pub fn column_ids(board: &MemoryBoard, column: ColumnId) -> eyre::Result<Vec<String>> {
    Ok(board
        .column(column)?
        .iter()
        .map(|task| task.id().as_str().to_owned())
        .collect())
}
