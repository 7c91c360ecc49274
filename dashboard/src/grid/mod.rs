//! Editable grid controller
//!
//! Every table of the dashboard binds its cells the same way: double-click
//! opens an editor, blur or Enter saves, Escape cancels, and the cell shows
//! a transient status while and after the save. [`EditableGrid`] holds that
//! state machine once, parameterised by the cell key, the cell value, and a
//! [`CellSaver`] that persists a single cell.
//!
//! ```text
//! Idle --begin_edit--> Editing --commit--> Saving --ok--> Success --1s--> Idle
//!                        |                   '----err--> Error ---2s--> Idle
//!                        '--cancel / unchanged--> Idle
//!
//! A cell in Saving ignores `begin_edit` until its request completes.
//! ```

mod cell;
mod savers;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::GridConfig;
use crate::error::{DashboardError, DashboardResult};

pub use cell::*;
pub use savers::*;

/// Visible state of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStatus {
    #[default]
    Idle,
    Editing,
    Saving,
    Success,
    Error,
}

/// Persists one cell; implemented once per table
#[async_trait]
pub trait CellSaver<K, V>: Send + Sync {
    async fn save(&self, key: &K, value: &V) -> DashboardResult<()>;
}

/// What a commit did
#[derive(Debug)]
pub enum CommitOutcome {
    /// No cell was being edited
    NotEditing,
    /// The parser rejected the input; the edit was dropped without a save
    Discarded,
    /// The value did not change; no save was attempted
    Unchanged,
    /// The cell is still saving a previous value
    Busy,
    Saved,
    Failed(DashboardError),
}

impl CommitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, CommitOutcome::Saved)
    }
}

struct EditSlot<K, V> {
    key: K,
    original: V,
    draft: V,
}

struct GridState<K, V> {
    editing: Option<EditSlot<K, V>>,
    values: HashMap<K, V>,
    statuses: HashMap<K, (CellStatus, u64)>,
    generation: u64,
}

impl<K: Eq + Hash + Clone, V> GridState<K, V> {
    /// Record a status and return the generation that owns it
    fn mark(&mut self, key: &K, status: CellStatus) -> u64 {
        self.generation += 1;
        self.statuses.insert(key.clone(), (status, self.generation));
        self.generation
    }
}

/// Cell editing state of one table
pub struct EditableGrid<K, V, S> {
    state: Arc<Mutex<GridState<K, V>>>,
    saver: Arc<S>,
    timing: GridConfig,
}

impl<K, V, S> Clone for EditableGrid<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            saver: Arc::clone(&self.saver),
            timing: self.timing,
        }
    }
}

impl<K, V, S> EditableGrid<K, V, S>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + PartialEq + Default + Send + 'static,
    S: CellSaver<K, V> + 'static,
{
    pub fn new(saver: S, timing: GridConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(GridState {
                editing: None,
                values: HashMap::new(),
                statuses: HashMap::new(),
                generation: 0,
            })),
            saver: Arc::new(saver),
            timing,
        }
    }

    pub fn saver(&self) -> &S {
        &self.saver
    }

    fn lock(&self) -> MutexGuard<'_, GridState<K, V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the displayed values after a (re)fetch
    pub fn load(&self, values: impl IntoIterator<Item = (K, V)>) {
        let mut state = self.lock();
        state.values = values.into_iter().collect();
    }

    /// Displayed value of a cell
    pub fn value(&self, key: &K) -> Option<V> {
        self.lock().values.get(key).cloned()
    }

    pub fn status(&self, key: &K) -> CellStatus {
        let state = self.lock();
        if state.editing.as_ref().is_some_and(|slot| &slot.key == key) {
            return CellStatus::Editing;
        }
        state
            .statuses
            .get(key)
            .map(|(status, _)| *status)
            .unwrap_or_default()
    }

    pub fn editing_key(&self) -> Option<K> {
        self.lock().editing.as_ref().map(|slot| slot.key.clone())
    }

    /// Current editor content
    pub fn draft(&self) -> Option<V> {
        self.lock().editing.as_ref().map(|slot| slot.draft.clone())
    }

    /// Open the editor on `key`; any other open editor is dropped.
    ///
    /// A cell whose save is still in flight cannot be reopened; returns
    /// `false` and leaves the current editor untouched.
    pub fn begin_edit(&self, key: K) -> bool {
        let mut state = self.lock();
        if matches!(state.statuses.get(&key), Some((CellStatus::Saving, _))) {
            return false;
        }
        let original = state.values.get(&key).cloned().unwrap_or_default();
        state.editing = Some(EditSlot {
            key,
            draft: original.clone(),
            original,
        });
        true
    }

    pub fn set_draft(&self, value: V) {
        if let Some(slot) = self.lock().editing.as_mut() {
            slot.draft = value;
        }
    }

    /// Close the editor without saving
    pub fn cancel(&self) {
        self.lock().editing = None;
    }

    /// Save the open editor's draft
    pub async fn commit(&self) -> CommitOutcome {
        let (key, value) = {
            let mut state = self.lock();
            let Some(slot) = state.editing.take() else {
                return CommitOutcome::NotEditing;
            };
            if slot.draft == slot.original {
                return CommitOutcome::Unchanged;
            }
            state.values.insert(slot.key.clone(), slot.draft.clone());
            state.mark(&slot.key, CellStatus::Saving);
            (slot.key, slot.draft)
        };

        match self.saver.save(&key, &value).await {
            Ok(()) => {
                self.finish(&key, CellStatus::Success, self.timing.success_clear());
                CommitOutcome::Saved
            }
            Err(err) => {
                tracing::warn!("Failed to save cell {:?}: {}", key, err);
                self.finish(&key, CellStatus::Error, self.timing.error_clear());
                CommitOutcome::Failed(err)
            }
        }
    }

    /// Parse raw editor text and save it; unparseable input cancels the edit
    pub async fn commit_input<P>(&self, raw: &str, parse: P) -> CommitOutcome
    where
        P: FnOnce(&str) -> Option<V>,
    {
        match parse(raw) {
            Some(value) => {
                self.set_draft(value);
                self.commit().await
            }
            None => {
                if self.editing_key().is_none() {
                    return CommitOutcome::NotEditing;
                }
                self.cancel();
                CommitOutcome::Discarded
            }
        }
    }

    /// Select cells save as soon as an option is picked
    pub async fn commit_with(&self, key: K, value: V) -> CommitOutcome {
        if !self.begin_edit(key) {
            return CommitOutcome::Busy;
        }
        self.set_draft(value);
        self.commit().await
    }

    /// Show `status` and schedule its return to Idle
    fn finish(&self, key: &K, status: CellStatus, clear_after: Duration) {
        let generation = self.lock().mark(key, status);
        let state = Arc::clone(&self.state);
        let key = key.clone();
        tokio::spawn(async move {
            tokio::time::sleep(clear_after).await;
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            if state
                .statuses
                .get(&key)
                .is_some_and(|(_, current)| *current == generation)
            {
                state.statuses.remove(&key);
            }
        });
    }
}
