// automaton.rs - The Life transition rule over a double-buffered grid

use std::sync::Arc;

use tracing::debug;

use crate::coro;
use crate::error::LifeResult;
use crate::grid::Grid;

/// Conway's rule for a single cell.
pub fn next_state(alive: bool, neighbors: usize) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Writes the next generation of `row` into `out`, reading only `grid`.
pub(crate) fn next_row(grid: &Grid, row: usize, out: &mut [bool]) {
    for (col, cell) in out.iter_mut().enumerate() {
        *cell = next_state(grid.is_alive(row, col), grid.neighbors(row, col));
    }
}

/// Holds the current generation and a scratch buffer for the next one.
///
/// Every transition is computed entirely from the current grid into the
/// scratch buffer, then the two are swapped, so callers never observe a
/// half-updated generation.
#[derive(Debug, Clone)]
pub struct GridAutomaton {
    current: Grid,
    next: Grid,
}

impl GridAutomaton {
    pub fn new(size: usize) -> LifeResult<Self> {
        Ok(Self {
            current: Grid::new(size)?,
            next: Grid::new(size)?,
        })
    }

    pub fn size(&self) -> usize {
        self.current.size()
    }

    /// Current generation, for rendering.
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn get(&self, row: isize, col: isize) -> LifeResult<bool> {
        self.current.get(row, col)
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, row: isize, col: isize) -> LifeResult<bool> {
        self.current.toggle(row, col)
    }

    pub fn set(&mut self, row: isize, col: isize, alive: bool) -> LifeResult<()> {
        self.current.set(row, col, alive)
    }

    pub fn clear(&mut self) {
        self.current.clear();
    }

    /// Live cells among the up-to-8 neighbors of (row, col).
    pub fn neighbor_count(&self, row: isize, col: isize) -> LifeResult<usize> {
        self.current.get(row, col)?;
        Ok(self.current.neighbors(row as usize, col as usize))
    }

    /// Advances one generation and returns the new grid.
    pub fn step(&mut self) -> &Grid {
        for row in 0..self.size() {
            next_row(&self.current, row, self.next.row_mut(row));
        }
        self.swap_buffers();
        &self.current
    }

    /// Same transition as [`step`](Self::step), computed by one tokio task
    /// per row over a shared snapshot of the current grid.
    pub async fn step_concurrent(&mut self) -> LifeResult<&Grid> {
        let snapshot = Arc::new(self.current.clone());
        coro::step_rows(snapshot, &mut self.next).await?;
        self.swap_buffers();
        Ok(&self.current)
    }

    fn swap_buffers(&mut self) {
        debug_assert!(self.next.border_is_dead());
        std::mem::swap(&mut self.current, &mut self.next);
        debug!(live = self.current.live_count(), "generation computed");
    }
}
