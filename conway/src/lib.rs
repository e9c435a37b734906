// lib.rs - Conway's Game of Life engine
//
// A fixed-size bounded grid (no wraparound) advanced by the standard
// B3/S23 rule, plus the headless pieces a front end needs: patterns,
// a run/stop controller with cycle detection, and statistics.

pub mod automaton;
pub mod config;
mod coro;        // Row coroutines used by `step_concurrent`
pub mod error;
pub mod grid;
pub mod patterns;
pub mod simulation;
pub mod stats;

pub use automaton::{GridAutomaton, next_state};
pub use config::LifeConfig;
pub use error::{LifeError, LifeResult};
pub use grid::{Coord, DEFAULT_GRID_SIZE, Grid, MAX_GRID_SIZE};
pub use patterns::{PATTERNS, Pattern};
pub use simulation::{CycleDetector, RunState, Simulation, TickOutcome};
pub use stats::{Population, SimulationStats};
