//! In-memory integration tests for board loading, moves, and edits.

use super::helpers::{MemoryBoard, backend, board_for, column_ids, project_id, task_id};
use eyre::{ensure, eyre};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemoryProjectBackend,
    domain::{
        CanonicalStatus, ColumnId, DropEvent, ProjectId, ProjectStats, QuarantineReason, RawTask,
        RemoteStatus, StatsOrigin,
    },
    services::{LoadSummary, MoveOutcome},
};

async fn loaded(
    project_id: &ProjectId,
    backend: &InMemoryProjectBackend,
) -> eyre::Result<MemoryBoard> {
    let board = board_for(project_id, backend);
    board.load().await?;
    Ok(board)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mixed_vocabularies_land_in_the_same_columns(
    project_id: ProjectId,
    backend: InMemoryProjectBackend,
) -> eyre::Result<()> {
    let board = board_for(&project_id, &backend);

    let summary = board.load().await?;

    ensure!(
        summary
            == LoadSummary {
                placed: 5,
                quarantined: 1,
                deleted: 1,
            }
    );
    ensure!(column_ids(&board, ColumnId::Todo)? == ["t1", "t2"]);
    ensure!(column_ids(&board, ColumnId::InProgress)? == ["t3"]);
    ensure!(column_ids(&board, ColumnId::InReview)? == ["t4"]);
    ensure!(column_ids(&board, ColumnId::Done)? == ["t5"]);

    let held = board.quarantined()?;
    let first = held.first().ok_or_else(|| eyre!("expected quarantine"))?;
    ensure!(first.reason == QuarantineReason::UnmatchedStatus("bloqueada".to_owned()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn load_publishes_authoritative_stats(
    project_id: ProjectId,
    backend: InMemoryProjectBackend,
) -> eyre::Result<()> {
    let board = loaded(&project_id, &backend).await?;

    let snapshot = board.stats()?;
    ensure!(snapshot.origin == StatsOrigin::Authoritative);
    ensure!(snapshot.stats == ProjectStats::from_counts(5, 1));
    ensure!(snapshot.stats.progress_percent == 20);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_stats_keep_the_local_estimate(
    project_id: ProjectId,
    backend: InMemoryProjectBackend,
) -> eyre::Result<()> {
    backend.fail_next_stats_fetches(1)?;

    let board = loaded(&project_id, &backend).await?;

    let snapshot = board.stats()?;
    ensure!(snapshot.origin == StatsOrigin::Estimate);
    ensure!(snapshot.stats == ProjectStats::from_counts(5, 1));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_task_moved_to_done_is_persisted_in_remote_vocabulary(
    project_id: ProjectId,
    backend: InMemoryProjectBackend,
) -> eyre::Result<()> {
    let board = loaded(&project_id, &backend).await?;

    let outcome = board
        .handle_drop(&DropEvent::new(task_id("t1"), ColumnId::Todo, ColumnId::Done))
        .await?;

    ensure!(matches!(outcome, MoveOutcome::Confirmed(_)));
    ensure!(backend.status_calls()? == [(task_id("t1"), RemoteStatus::Completed)]);

    let reloaded = loaded(&project_id, &backend).await?;
    ensure!(column_ids(&reloaded, ColumnId::Done)? == ["t1", "t5"]);
    ensure!(reloaded.stats()?.stats.completed == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_move_leaves_board_matching_remote_records(
    project_id: ProjectId,
    backend: InMemoryProjectBackend,
) -> eyre::Result<()> {
    let board = loaded(&project_id, &backend).await?;
    let before = board.collection().snapshot()?;
    backend.fail_next_status_updates(1)?;

    let outcome = board
        .handle_drop(&DropEvent::new(task_id("t3"), ColumnId::InProgress, ColumnId::Done))
        .await?;

    ensure!(matches!(outcome, MoveOutcome::RolledBack { .. }));
    ensure!(board.collection().snapshot()? == before);
    let stored = backend
        .raw_task(&task_id("t3"))?
        .ok_or_else(|| eyre!("stored record missing"))?;
    ensure!(stored.status.as_deref() == Some("en_progreso"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_from_other_views_flow_through_the_board(
    project_id: ProjectId,
    backend: InMemoryProjectBackend,
) -> eyre::Result<()> {
    let board = loaded(&project_id, &backend).await?;

    let created = board
        .apply_task_created(&RawTask::new("t8", "Order badges", "en_revision"))
        .await?;
    ensure!(created.map(|task| task.status()) == Some(CanonicalStatus::InReview));

    board
        .apply_task_edited(&RawTask::new("t2", "Review budget", "Completed"))
        .await?;
    board
        .apply_task_edited(&RawTask::new("t4", "Print flyers", "Deleted"))
        .await?;
    let removed = board.apply_task_deleted(&task_id("t5")).await?;

    ensure!(removed.is_some());
    ensure!(column_ids(&board, ColumnId::Todo)? == ["t1"]);
    ensure!(column_ids(&board, ColumnId::InReview)? == ["t8"]);
    ensure!(column_ids(&board, ColumnId::Done)? == ["t2"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn quarantined_record_is_released_once_its_status_is_fixed(
    project_id: ProjectId,
    backend: InMemoryProjectBackend,
) -> eyre::Result<()> {
    let board = loaded(&project_id, &backend).await?;

    board
        .apply_task_edited(&RawTask::new("t7", "Imported card", "In_Progress"))
        .await?;

    ensure!(board.quarantined()?.is_empty());
    ensure!(column_ids(&board, ColumnId::InProgress)? == ["t3", "t7"]);
    Ok(())
}
