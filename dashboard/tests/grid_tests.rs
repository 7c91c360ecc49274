//! Editable grid tests
//!
//! Tests for the cell state machine including:
//! - Property 4: Unchanged edits never reach the saver
//! - Property 5: Rejected saves go Idle -> Editing -> Saving -> Error -> Idle
//!   and the cell keeps the typed value
//! - A cell in Saving cannot be edited again until its save completes

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hatchery_dashboard::config::GridConfig;
use hatchery_dashboard::grid::{percent, quantity};
use hatchery_dashboard::{
    CellSaver, CellStatus, CommitOutcome, DashboardError, DashboardResult, EditableGrid,
};
use shared::Percent;

/// Saver that counts calls and fails while `fail` is set
#[derive(Clone, Default)]
struct ScriptedSaver {
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
    delay: Duration,
}

#[async_trait]
impl<V: Sync> CellSaver<u32, V> for ScriptedSaver {
    async fn save(&self, _key: &u32, _value: &V) -> DashboardResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(DashboardError::Api {
                status: 500,
                body: "database unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn grid_with(saver: ScriptedSaver) -> EditableGrid<u32, i64, ScriptedSaver> {
    let grid = EditableGrid::new(saver, GridConfig::default());
    grid.load([(1, 5_000), (2, 7_500)]);
    grid
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

// ============================================================================
// Edit lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_unchanged_edit_skips_saver() {
    let saver = ScriptedSaver::default();
    let grid = grid_with(saver.clone());

    grid.begin_edit(1);
    assert_eq!(grid.status(&1), CellStatus::Editing);
    assert!(matches!(grid.commit().await, CommitOutcome::Unchanged));

    grid.begin_edit(1);
    let outcome = grid.commit_input("5.000", quantity).await;
    assert!(matches!(outcome, CommitOutcome::Unchanged));

    assert_eq!(saver.calls.load(Ordering::SeqCst), 0);
    assert_eq!(grid.status(&1), CellStatus::Idle);
    assert_eq!(grid.editing_key(), None);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_restores_idle_without_saving() {
    let saver = ScriptedSaver::default();
    let grid = grid_with(saver.clone());

    grid.begin_edit(2);
    grid.set_draft(9_999);
    grid.cancel();

    assert_eq!(grid.status(&2), CellStatus::Idle);
    assert_eq!(grid.value(&2), Some(7_500));
    assert_eq!(saver.calls.load(Ordering::SeqCst), 0);
    assert!(matches!(grid.commit().await, CommitOutcome::NotEditing));
}

#[tokio::test(start_paused = true)]
async fn test_single_editing_slot() {
    let grid = grid_with(ScriptedSaver::default());

    grid.begin_edit(1);
    grid.begin_edit(2);

    assert_eq!(grid.editing_key(), Some(2));
    assert_eq!(grid.status(&1), CellStatus::Idle);
    assert_eq!(grid.status(&2), CellStatus::Editing);
    assert_eq!(grid.draft(), Some(7_500));
}

#[tokio::test(start_paused = true)]
async fn test_missing_cell_edits_from_default() {
    let saver = ScriptedSaver::default();
    let grid = grid_with(saver.clone());

    grid.begin_edit(42);
    assert_eq!(grid.draft(), Some(0));
    let outcome = grid.commit_input("abc", quantity).await;
    assert!(matches!(outcome, CommitOutcome::Unchanged));
    assert_eq!(saver.calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Save outcomes and status timers
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_success_clears_after_one_second() {
    let saver = ScriptedSaver::default();
    let grid = grid_with(saver.clone());

    grid.begin_edit(1);
    let outcome = grid.commit_input("6.250", quantity).await;
    assert!(outcome.is_saved());
    assert_eq!(saver.calls.load(Ordering::SeqCst), 1);
    assert_eq!(grid.value(&1), Some(6_250));
    assert_eq!(grid.status(&1), CellStatus::Success);

    tokio::time::sleep(millis(999)).await;
    assert_eq!(grid.status(&1), CellStatus::Success);

    tokio::time::sleep(millis(2)).await;
    assert_eq!(grid.status(&1), CellStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_save_walks_through_error() {
    let saver = ScriptedSaver {
        delay: millis(50),
        ..ScriptedSaver::default()
    };
    saver.fail.store(true, Ordering::SeqCst);
    let grid = grid_with(saver.clone());

    assert_eq!(grid.status(&1), CellStatus::Idle);
    grid.begin_edit(1);
    assert_eq!(grid.status(&1), CellStatus::Editing);
    grid.set_draft(4_000);

    let pending = tokio::spawn({
        let grid = grid.clone();
        async move { grid.commit().await }
    });
    tokio::task::yield_now().await;
    assert_eq!(grid.status(&1), CellStatus::Saving);

    let outcome = pending.await.unwrap();
    assert!(matches!(
        outcome,
        CommitOutcome::Failed(DashboardError::Api { status: 500, .. })
    ));
    assert_eq!(grid.status(&1), CellStatus::Error);
    // The cell keeps what was typed even though the backend refused it
    assert_eq!(grid.value(&1), Some(4_000));

    tokio::time::sleep(millis(1_999)).await;
    assert_eq!(grid.status(&1), CellStatus::Error);
    tokio::time::sleep(millis(2)).await;
    assert_eq!(grid.status(&1), CellStatus::Idle);
    assert_eq!(grid.value(&1), Some(4_000));
}

#[tokio::test(start_paused = true)]
async fn test_stale_timer_does_not_clear_newer_status() {
    let saver = ScriptedSaver::default();
    let grid = grid_with(saver.clone());

    grid.begin_edit(1);
    assert!(grid.commit_input("6.000", quantity).await.is_saved());

    tokio::time::sleep(millis(500)).await;
    saver.fail.store(true, Ordering::SeqCst);
    grid.begin_edit(1);
    let outcome = grid.commit_input("6.500", quantity).await;
    assert!(matches!(outcome, CommitOutcome::Failed(_)));

    // The success timer fires at 1000 ms but the cell now belongs to the error
    tokio::time::sleep(millis(600)).await;
    assert_eq!(grid.status(&1), CellStatus::Error);

    tokio::time::sleep(millis(1_500)).await;
    assert_eq!(grid.status(&1), CellStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_select_commit_saves_immediately() {
    let saver = ScriptedSaver::default();
    let grid = grid_with(saver.clone());

    let outcome = grid.commit_with(2, 8_000).await;
    assert!(outcome.is_saved());
    assert_eq!(grid.value(&2), Some(8_000));
    assert_eq!(saver.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_saving_cell_cannot_be_reopened() {
    let saver = ScriptedSaver {
        delay: millis(500),
        ..ScriptedSaver::default()
    };
    let grid = grid_with(saver.clone());

    grid.begin_edit(1);
    grid.set_draft(6_000);
    let pending = tokio::spawn({
        let grid = grid.clone();
        async move { grid.commit().await }
    });
    tokio::task::yield_now().await;
    assert_eq!(grid.status(&1), CellStatus::Saving);

    assert!(!grid.begin_edit(1));
    assert_eq!(grid.status(&1), CellStatus::Saving);
    assert_eq!(grid.editing_key(), None);
    assert!(matches!(grid.commit_with(1, 9_000).await, CommitOutcome::Busy));

    // Other cells stay editable while the first save is in flight
    assert!(grid.begin_edit(2));
    assert!(grid.commit_input("7.700", quantity).await.is_saved());

    assert!(pending.await.unwrap().is_saved());
    assert_eq!(saver.calls.load(Ordering::SeqCst), 2);
    assert_eq!(grid.value(&1), Some(6_000));
    assert!(grid.begin_edit(1));
}

// ============================================================================
// Percentage cells
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_out_of_range_percent_is_discarded() {
    let saver = ScriptedSaver::default();
    let grid: EditableGrid<u32, Percent, ScriptedSaver> =
        EditableGrid::new(saver.clone(), GridConfig::default());
    grid.load([(24, Percent::from_whole(82).unwrap())]);

    grid.begin_edit(24);
    assert!(matches!(
        grid.commit_input("150", percent).await,
        CommitOutcome::Discarded
    ));
    grid.begin_edit(24);
    assert!(matches!(
        grid.commit_input("molto", percent).await,
        CommitOutcome::Discarded
    ));

    assert_eq!(saver.calls.load(Ordering::SeqCst), 0);
    assert_eq!(grid.status(&24), CellStatus::Idle);
    assert_eq!(grid.value(&24), Percent::from_whole(82).ok());

    grid.begin_edit(24);
    assert!(grid.commit_input("85,5%", percent).await.is_saved());
    assert_eq!(grid.value(&24), Percent::parse("85.5"));
}

#[tokio::test(start_paused = true)]
async fn test_commit_input_without_editor() {
    let grid = grid_with(ScriptedSaver::default());
    assert!(matches!(
        grid.commit_input("12", quantity).await,
        CommitOutcome::NotEditing
    ));
}
