//! In-memory integration tests for activity paging.

use std::sync::Arc;

use super::helpers::{init_tracing, project_id};
use chrono::{Duration, TimeZone, Utc};
use eyre::ensure;
use rstest::rstest;
use taskboard::activity::{
    adapters::memory::InMemoryActivityFeed,
    domain::ActivityRecord,
    services::{ActivityPaginator, LoadOutcome, SkipReason},
};
use taskboard::board::domain::ProjectId;
use taskboard::config::TrackerConfig;

fn seeded_feed(project_id: &ProjectId, count: i64) -> InMemoryActivityFeed {
    init_tracing();
    let start = Utc
        .with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    let feed = InMemoryActivityFeed::new();
    feed.extend(
        project_id,
        (0..count).map(|index| ActivityRecord {
            id: format!("act-{index}"),
            action: "task_moved".to_owned(),
            description: format!("moved task {index}"),
            actor: None,
            created_at: start + Duration::minutes(index),
        }),
    )
    .expect("seed activity");
    feed
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_page_size_walks_the_whole_feed(project_id: ProjectId) -> eyre::Result<()> {
    let config = TrackerConfig::default();
    let feed = Arc::new(seeded_feed(&project_id, 23));
    let paginator = ActivityPaginator::new(project_id, Arc::clone(&feed));

    paginator.refresh(config.activity_page_size).await?;
    let mut pages = 1;
    while paginator.has_more()? {
        paginator.load_more(config.activity_page_size).await?;
        pages += 1;
    }

    ensure!(pages == 3);
    ensure!(paginator.activities()?.len() == 23);
    ensure!(
        paginator.load_more(config.activity_page_size).await?
            == LoadOutcome::Skipped(SkipReason::Exhausted)
    );
    ensure!(feed.fetch_calls()? == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_after_new_activity_starts_over(project_id: ProjectId) -> eyre::Result<()> {
    let config = TrackerConfig::default().with_activity_page_size(5);
    let feed = Arc::new(seeded_feed(&project_id, 7));
    let paginator = ActivityPaginator::new(project_id.clone(), Arc::clone(&feed));
    paginator.refresh(config.activity_page_size).await?;
    paginator.load_more(config.activity_page_size).await?;
    ensure!(!paginator.has_more()?);

    feed.extend(
        &project_id,
        [ActivityRecord {
            id: "act-new".to_owned(),
            action: "task_created".to_owned(),
            description: String::new(),
            actor: Some("rosa".to_owned()),
            created_at: Utc::now(),
        }],
    )?;
    paginator.refresh(config.activity_page_size).await?;

    let snapshot = paginator.snapshot()?;
    ensure!(snapshot.activities.len() == 5);
    ensure!(snapshot.total == 8);
    ensure!(paginator.has_more()?);
    Ok(())
}
