// patterns.rs - Built-in starting patterns and random seeding

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::automaton::GridAutomaton;
use crate::error::{LifeError, LifeResult};
use crate::grid::Coord;

/// Cells are offsets from the pattern's top-left corner.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [Coord],
}

impl Pattern {
    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0)
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

/// Looks a pattern up by name, ignoring case.
pub fn find(name: &str) -> LifeResult<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
}

/// Clears the grid and places `pattern` with its top-left corner at `origin`.
/// The grid is left untouched if the pattern does not fit.
pub fn apply_pattern(life: &mut GridAutomaton, pattern: &Pattern, origin: Coord) -> LifeResult<()> {
    let size = life.size();
    let (row, col) = origin;
    let fits = |start: usize, extent: usize| start.checked_add(extent).is_some_and(|end| end <= size);
    if !fits(row, pattern.height()) || !fits(col, pattern.width()) {
        return Err(LifeError::PatternTooLarge {
            name: pattern.name.to_string(),
            size,
        });
    }

    life.clear();
    for &(dr, dc) in pattern.cells {
        life.set((row + dr) as isize, (col + dc) as isize, true)?;
    }
    info!(pattern = pattern.name, row, col, "pattern applied");
    Ok(())
}

/// Places `pattern` in the middle of the grid.
pub fn apply_centered(life: &mut GridAutomaton, pattern: &Pattern) -> LifeResult<()> {
    let size = life.size();
    let origin = (
        size.saturating_sub(pattern.height()) / 2,
        size.saturating_sub(pattern.width()) / 2,
    );
    apply_pattern(life, pattern, origin)
}

/// Replaces the grid with random cells, each alive with probability
/// `density`. The same seed always produces the same grid.
pub fn apply_random(life: &mut GridAutomaton, seed: u64, density: f64) -> LifeResult<()> {
    if !(0.0..=1.0).contains(&density) {
        return Err(LifeError::InvalidConfig(format!(
            "random density must be within [0, 1], got {density}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let size = life.size() as isize;
    for row in 0..size {
        for col in 0..size {
            life.set(row, col, rng.gen_bool(density))?;
        }
    }
    info!(seed, density, live = life.grid().live_count(), "random pattern applied");
    Ok(())
}
