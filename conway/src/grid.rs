// grid.rs - Grid storage for Conway's Game of Life
//
// The active NxN area is surrounded by a one-cell border that is never
// written, so neighbor lookups at the edges read dead cells instead of
// branching on bounds.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{LifeError, LifeResult};

pub const DEFAULT_GRID_SIZE: usize = 50;  // Active grid size (50x50 playing area)
pub const MAX_GRID_SIZE: usize = 4096;    // Largest size the runner accepts
const BORDER: usize = 1;                  // Dead ring around the active area

/// A (row, col) pair inside the active area.
pub type Coord = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    stride: usize,      // size + 2 * BORDER
    cells: Vec<bool>,   // stride * stride, row-major
}

impl Grid {
    /// Creates an all-dead `size`x`size` grid.
    pub fn new(size: usize) -> LifeResult<Self> {
        if size == 0 {
            return Err(LifeError::InvalidSize(size));
        }
        let stride = size
            .checked_add(2 * BORDER)
            .ok_or(LifeError::InvalidSize(size))?;
        let len = stride
            .checked_mul(stride)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(LifeError::InvalidSize(size))?;
        Ok(Self {
            size,
            stride,
            cells: vec![false; len],
        })
    }

    /// Creates a grid with exactly the given cells alive.
    pub fn with_cells(size: usize, alive: &[Coord]) -> LifeResult<Self> {
        let mut grid = Self::new(size)?;
        for &(row, col) in alive {
            grid.set(row as isize, col as isize, true)?;
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: isize, col: isize) -> LifeResult<bool> {
        let idx = self.index_of(row, col)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, row: isize, col: isize, alive: bool) -> LifeResult<()> {
        let idx = self.index_of(row, col)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flips the cell and returns its new state.
    pub fn toggle(&mut self, row: isize, col: isize) -> LifeResult<bool> {
        let idx = self.index_of(row, col)?;
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, row by row.
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.rows().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, &alive)| alive)
                .map(move |(col, _)| (row, col))
        })
    }

    /// Active rows, top to bottom, without the border.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        (0..self.size).map(move |row| self.row(row))
    }

    /// Hash of the active area only.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for row in self.rows() {
            row.hash(&mut hasher);
        }
        hasher.finish()
    }

    pub(crate) fn row(&self, row: usize) -> &[bool] {
        let start = self.offset(row, 0);
        &self.cells[start..start + self.size]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [bool] {
        let start = self.offset(row, 0);
        let size = self.size;
        &mut self.cells[start..start + size]
    }

    pub(crate) fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[self.offset(row, col)]
    }

    /// Live neighbors of an active cell. Reads the border for edge cells.
    pub(crate) fn neighbors(&self, row: usize, col: usize) -> usize {
        let (r, c) = (row + BORDER, col + BORDER);
        let neighbors = [
            (r-1,c-1),(r-1,c),(r-1,c+1),(r,c-1),
            (r+1,c-1),(r+1,c),(r+1,c+1),(r,c+1)
        ];
        neighbors
            .iter()
            .filter(|&&(nr, nc)| self.cells[nr * self.stride + nc])
            .count()
    }

    pub(crate) fn border_is_dead(&self) -> bool {
        let last = self.stride - 1;
        (0..self.stride).all(|i| {
            !self.cells[i]
                && !self.cells[last * self.stride + i]
                && !self.cells[i * self.stride]
                && !self.cells[i * self.stride + last]
        })
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        (row + BORDER) * self.stride + col + BORDER
    }

    fn index_of(&self, row: isize, col: isize) -> LifeResult<usize> {
        let in_range = |v: isize| v >= 0 && (v as usize) < self.size;
        if !in_range(row) || !in_range(col) {
            return Err(LifeError::OutOfBounds { row, col, size: self.size });
        }
        Ok(self.offset(row as usize, col as usize))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(5).unwrap();
        assert_eq!(grid.size(), 5);
        assert_eq!(grid.live_count(), 0);
        assert!(grid.border_is_dead());
    }

    #[test]
    fn unrepresentable_sizes_are_rejected() {
        assert!(matches!(Grid::new(0), Err(LifeError::InvalidSize(0))));
        for size in [usize::MAX, usize::MAX - 1, 1 << (usize::BITS / 2)] {
            assert!(matches!(Grid::new(size), Err(LifeError::InvalidSize(s)) if s == size));
        }
    }

    #[test]
    fn out_of_bounds_coordinates_are_rejected() {
        let mut grid = Grid::new(4).unwrap();
        for (row, col) in [(4, 0), (0, 4), (-1, 0), (0, -1)] {
            assert!(matches!(
                grid.get(row, col),
                Err(LifeError::OutOfBounds { size: 4, .. })
            ));
            assert!(grid.set(row, col, true).is_err());
        }
        assert_eq!(grid.live_count(), 0);
        assert!(grid.border_is_dead());
    }

    #[test]
    fn corner_cells_see_only_in_bounds_neighbors() {
        let grid = Grid::with_cells(3, &[(0, 1), (1, 0), (1, 1), (2, 2)]).unwrap();
        assert_eq!(grid.neighbors(0, 0), 3);
        assert_eq!(grid.neighbors(2, 2), 1);
        assert_eq!(grid.neighbors(1, 1), 3);
    }

    #[test]
    fn live_cells_are_listed_row_major() {
        let grid = Grid::with_cells(4, &[(3, 0), (0, 2), (1, 1)]).unwrap();
        let cells: Vec<Coord> = grid.live_cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 1), (3, 0)]);
    }

    #[test]
    fn display_draws_active_area() {
        let grid = Grid::with_cells(3, &[(0, 0), (1, 1), (2, 2)]).unwrap();
        assert_eq!(grid.to_string(), "#..\n.#.\n..#\n");
    }

    #[test]
    fn fingerprint_tracks_contents() {
        let a = Grid::with_cells(6, &[(2, 2)]).unwrap();
        let b = Grid::with_cells(6, &[(2, 2)]).unwrap();
        let c = Grid::with_cells(6, &[(2, 3)]).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
