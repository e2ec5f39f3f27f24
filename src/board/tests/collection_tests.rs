//! Tests for the task collection and its move bookkeeping.

use super::{raw, task, task_id};
use crate::board::{
    domain::{
        BoardDomainError, CanonicalStatus, ColumnId, DropEvent, QuarantineReason, QuarantinedTask,
        RemoteStatus, ingest,
    },
    services::{BoardError, MoveResolution, TaskCollection},
};
use eyre::{ensure, eyre};
use rstest::{fixture, rstest};

#[fixture]
fn collection() -> TaskCollection {
    let collection = TaskCollection::new();
    collection
        .replace_all(ingest(&[
            raw("a", "todo"),
            raw("b", "todo"),
            raw("c", "in_progress"),
            raw("d", "done"),
            raw("e", "todo"),
        ]))
        .expect("seed collection");
    collection
}

fn column_ids(collection: &TaskCollection, column: ColumnId) -> Vec<String> {
    collection
        .column(column)
        .expect("read column")
        .iter()
        .map(|task| task.id().as_str().to_owned())
        .collect()
}

#[rstest]
fn columns_filter_by_status_in_insertion_order(collection: TaskCollection) -> eyre::Result<()> {
    let columns = collection.columns()?;

    ensure!(columns.len() == 4);
    ensure!(column_ids(&collection, ColumnId::Todo) == ["a", "b", "e"]);
    ensure!(column_ids(&collection, ColumnId::InProgress) == ["c"]);
    ensure!(column_ids(&collection, ColumnId::InReview).is_empty());
    ensure!(column_ids(&collection, ColumnId::Done) == ["d"]);
    Ok(())
}

#[rstest]
fn noop_drop_leaves_collection_untouched(collection: TaskCollection) -> eyre::Result<()> {
    let before = collection.snapshot()?;
    let revision = collection.revision()?;

    let command = collection
        .begin_move(&DropEvent::new(task_id("b"), ColumnId::Todo, ColumnId::Todo).at(1, 1))?;

    ensure!(command.is_none());
    ensure!(collection.snapshot()? == before);
    ensure!(collection.revision()? == revision);
    Ok(())
}

#[rstest]
fn begin_move_places_task_at_destination_index(collection: TaskCollection) -> eyre::Result<()> {
    let command = collection
        .begin_move(&DropEvent::new(task_id("e"), ColumnId::Todo, ColumnId::Done).at(2, 0))?
        .ok_or_else(|| eyre!("expected a move command"))?;

    ensure!(command.from_status() == CanonicalStatus::Todo);
    ensure!(command.to_status() == CanonicalStatus::Done);
    ensure!(column_ids(&collection, ColumnId::Done) == ["e", "d"]);
    ensure!(column_ids(&collection, ColumnId::Todo) == ["a", "b"]);

    let moved = collection
        .get(&task_id("e"))?
        .ok_or_else(|| eyre!("moved task missing"))?;
    ensure!(moved.status() == CanonicalStatus::Done);
    ensure!(
        moved.remote_status() == RemoteStatus::ToDo,
        "shadow status lags until confirmed"
    );
    Ok(())
}

#[rstest]
#[case(0, ["a", "b", "e"])]
#[case(1, ["b", "a", "e"])]
#[case(2, ["b", "e", "a"])]
#[case(9, ["b", "e", "a"])]
fn reorder_within_column_clamps_index(
    collection: TaskCollection,
    #[case] destination_index: usize,
    #[case] expected: [&str; 3],
) -> eyre::Result<()> {
    let event =
        DropEvent::new(task_id("a"), ColumnId::Todo, ColumnId::Todo).at(0, destination_index);

    collection.begin_move(&event)?;

    ensure!(column_ids(&collection, ColumnId::Todo) == expected);
    Ok(())
}

#[rstest]
fn rollback_restores_status_and_position(collection: TaskCollection) -> eyre::Result<()> {
    let before = collection.snapshot()?;
    let command = collection
        .begin_move(&DropEvent::new(task_id("a"), ColumnId::Todo, ColumnId::InReview))?
        .ok_or_else(|| eyre!("expected a move command"))?;

    let resolution = collection.rollback_move(&command)?;

    ensure!(matches!(resolution, MoveResolution::Applied(ref task) if task.status() == CanonicalStatus::Todo));
    ensure!(collection.snapshot()? == before);
    Ok(())
}

#[rstest]
fn confirm_updates_shadow_status(collection: TaskCollection) -> eyre::Result<()> {
    let command = collection
        .begin_move(&DropEvent::new(task_id("c"), ColumnId::InProgress, ColumnId::Done))?
        .ok_or_else(|| eyre!("expected a move command"))?;

    let resolution = collection.confirm_move(&command, RemoteStatus::Completed)?;

    let MoveResolution::Applied(task) = resolution else {
        return Err(eyre!("expected confirmation to apply"));
    };
    ensure!(task.status() == CanonicalStatus::Done);
    ensure!(task.remote_status() == RemoteStatus::Completed);
    Ok(())
}

#[rstest]
fn older_move_response_is_discarded(collection: TaskCollection) -> eyre::Result<()> {
    let first = collection
        .begin_move(&DropEvent::new(task_id("a"), ColumnId::Todo, ColumnId::InProgress))?
        .ok_or_else(|| eyre!("expected first command"))?;
    let second = collection
        .begin_move(&DropEvent::new(task_id("a"), ColumnId::InProgress, ColumnId::Done))?
        .ok_or_else(|| eyre!("expected second command"))?;

    ensure!(second.sequence() > first.sequence());
    ensure!(collection.rollback_move(&first)? == MoveResolution::Superseded);

    let current = collection
        .get(&task_id("a"))?
        .ok_or_else(|| eyre!("task missing"))?;
    ensure!(current.status() == CanonicalStatus::Done);

    ensure!(matches!(
        collection.confirm_move(&second, RemoteStatus::Completed)?,
        MoveResolution::Applied(_)
    ));
    Ok(())
}

#[rstest]
fn reload_supersedes_pending_moves(collection: TaskCollection) -> eyre::Result<()> {
    let command = collection
        .begin_move(&DropEvent::new(task_id("a"), ColumnId::Todo, ColumnId::Done))?
        .ok_or_else(|| eyre!("expected a move command"))?;

    collection.replace_all(ingest(&[raw("a", "In_Progress")]))?;

    ensure!(collection.rollback_move(&command)? == MoveResolution::Superseded);
    ensure!(column_ids(&collection, ColumnId::InProgress) == ["a"]);
    Ok(())
}

#[rstest]
fn stale_drop_is_rejected_without_mutation(collection: TaskCollection) -> eyre::Result<()> {
    let before = collection.snapshot()?;

    let result =
        collection.begin_move(&DropEvent::new(task_id("c"), ColumnId::Todo, ColumnId::Done));

    ensure!(matches!(
        result,
        Err(BoardError::Domain(BoardDomainError::StaleDrop {
            claimed: ColumnId::Todo,
            actual: ColumnId::InProgress,
            ..
        }))
    ));
    ensure!(collection.snapshot()? == before);
    Ok(())
}

#[rstest]
fn unknown_task_drop_is_rejected(collection: TaskCollection) {
    let result =
        collection.begin_move(&DropEvent::new(task_id("zz"), ColumnId::Todo, ColumnId::Done));
    assert!(matches!(
        result,
        Err(BoardError::Domain(BoardDomainError::UnknownTask(_)))
    ));
}

#[rstest]
fn upsert_replaces_in_place_and_appends_new(collection: TaskCollection) -> eyre::Result<()> {
    collection.upsert(task("b", CanonicalStatus::InReview))?;
    collection.upsert(task("f", CanonicalStatus::Todo))?;

    let ids: Vec<String> = collection
        .snapshot()?
        .iter()
        .map(|task| task.id().as_str().to_owned())
        .collect();
    ensure!(ids == ["a", "b", "c", "d", "e", "f"]);
    ensure!(column_ids(&collection, ColumnId::InReview) == ["b"]);
    Ok(())
}

#[rstest]
fn quarantine_removes_live_task(collection: TaskCollection) -> eyre::Result<()> {
    collection.quarantine(QuarantinedTask {
        raw: raw("c", "bloqueada"),
        reason: QuarantineReason::UnmatchedStatus("bloqueada".to_owned()),
    })?;

    ensure!(collection.get(&task_id("c"))?.is_none());
    ensure!(collection.quarantined()?.len() == 1);

    collection.upsert(task("c", CanonicalStatus::InProgress))?;
    ensure!(collection.quarantined()?.is_empty());
    Ok(())
}

#[rstest]
fn padded_quarantined_id_is_released_by_valid_edit(
    collection: TaskCollection,
) -> eyre::Result<()> {
    collection.quarantine(QuarantinedTask {
        raw: raw(" c ", "bloqueada"),
        reason: QuarantineReason::UnmatchedStatus("bloqueada".to_owned()),
    })?;
    ensure!(collection.get(&task_id("c"))?.is_none());

    collection.upsert(task("c", CanonicalStatus::InReview))?;

    ensure!(collection.quarantined()?.is_empty());
    ensure!(column_ids(&collection, ColumnId::InReview) == ["c"]);
    Ok(())
}

#[rstest]
fn remove_returns_removed_task(collection: TaskCollection) -> eyre::Result<()> {
    let removed = collection.remove(&task_id("d"))?;
    ensure!(removed.map(|task| task.status()) == Some(CanonicalStatus::Done));
    ensure!(collection.remove(&task_id("d"))?.is_none());
    ensure!(collection.len()? == 4);
    Ok(())
}
