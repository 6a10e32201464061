//! Background hosting for the grid-size search. The search is pure and
//! quadratic in its tolerance window, so interactive callers ship it to a
//! blocking worker and await the single result; the task owns its inputs by
//! value and shares nothing.

use tokio::task::JoinHandle;

use crate::error::CoreError;
use crate::grid::{best_grid, GridSpec};

pub struct GridSearchTask {
    handle: JoinHandle<Result<GridSpec, CoreError>>,
}

/// Dispatches [`best_grid`] onto the runtime's blocking pool. Must be
/// called within a tokio runtime.
pub fn spawn_grid_search(width: u32, height: u32) -> GridSearchTask {
    let handle = tokio::task::spawn_blocking(move || best_grid(width, height));
    GridSearchTask { handle }
}

impl GridSearchTask {
    /// Waits for the search. A task aborted mid-flight reports
    /// [`CoreError::SearchCancelled`].
    pub async fn finish(self) -> Result<GridSpec, CoreError> {
        match self.handle.await {
            Ok(result) => result,
            Err(_) => Err(CoreError::SearchCancelled),
        }
    }

    /// Abandons the search. The computation has no side effects, so there
    /// is nothing to undo; a result that still arrives is dropped.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
