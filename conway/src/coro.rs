// coro.rs - Row coroutines: one tokio task per row of the next generation

use std::sync::Arc;

use crate::automaton::next_state;
use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;

/// Computes one row of the next generation, yielding after every cell.
async fn process_row(row_index: usize, current_grid: Arc<Grid>) -> (usize, Vec<bool>) {
    let mut row_result = vec![false; current_grid.size()];
    for (col, cell) in row_result.iter_mut().enumerate() {
        *cell = next_state(
            current_grid.is_alive(row_index, col),
            current_grid.neighbors(row_index, col),
        );
        tokio::task::yield_now().await;  // Cooperative yielding
    }
    (row_index, row_result)
}

/// Fills every row of `next` from `current`. `current` is never written,
/// so all rows see the same pre-step generation.
pub(crate) async fn step_rows(current: Arc<Grid>, next: &mut Grid) -> LifeResult<()> {
    let handles: Vec<_> = (0..current.size())
        .map(|row| (row, tokio::spawn(process_row(row, Arc::clone(&current)))))
        .collect();

    for (row, handle) in handles {
        let (row_index, completed_row) = handle
            .await
            .map_err(|source| LifeError::RowTask { row, source })?;
        next.row_mut(row_index).copy_from_slice(&completed_row);
    }
    Ok(())
}
