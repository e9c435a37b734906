// simulation.rs - Run/stop controller around the automaton
//
// Tracks the generation counter, halts on repeated configurations and
// collects statistics. No timers live here: whoever drives the simulation
// calls `tick` on its own schedule.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::automaton::GridAutomaton;
use crate::config::LifeConfig;
use crate::error::LifeResult;
use crate::grid::Grid;
use crate::patterns;
use crate::stats::SimulationStats;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stopped; nothing was computed.
    Idle,
    Advanced,
    /// The new generation repeats one still in the history window.
    CycleDetected,
}

/// Ring buffer of recent grid fingerprints.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    history: VecDeque<u64>,
    capacity: usize,
}

impl CycleDetector {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns true if `fingerprint` was already seen, otherwise records it.
    pub fn observe(&mut self, fingerprint: u64) -> bool {
        if self.history.contains(&fingerprint) {
            return true;
        }
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(fingerprint);
        false
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    life: GridAutomaton,
    run_state: RunState,
    generation: u64,
    history: CycleDetector,
    stop_on_cycle: bool,
    stats: SimulationStats,
}

impl Simulation {
    pub fn new(size: usize) -> LifeResult<Self> {
        Self::from_config(&LifeConfig {
            grid_size: size,
            ..LifeConfig::default()
        })
    }

    /// Builds an empty, stopped simulation. Pattern and seed fields of the
    /// config are left to the caller.
    pub fn from_config(config: &LifeConfig) -> LifeResult<Self> {
        config.validate()?;
        let mut simulation = Self {
            life: GridAutomaton::new(config.grid_size)?,
            run_state: RunState::Stopped,
            generation: 0,
            history: CycleDetector::new(config.history_len),
            stop_on_cycle: config.stop_on_cycle,
            stats: SimulationStats::default(),
        };
        simulation.reset_run();
        Ok(simulation)
    }

    pub fn grid(&self) -> &Grid {
        self.life.grid()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn start(&mut self) {
        if !self.is_running() {
            info!(generation = self.generation, "simulation started");
            self.run_state = RunState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            info!(generation = self.generation, "simulation stopped");
            self.run_state = RunState::Stopped;
        }
    }

    pub fn toggle_running(&mut self) -> RunState {
        match self.run_state {
            RunState::Stopped => self.start(),
            RunState::Running => self.stop(),
        }
        self.run_state
    }

    /// Flips one cell. The edited grid becomes the new reference for
    /// cycle detection.
    pub fn toggle_cell(&mut self, row: isize, col: isize) -> LifeResult<bool> {
        let alive = self.life.toggle(row, col)?;
        self.history.reset();
        self.history.observe(self.life.grid().fingerprint());
        Ok(alive)
    }

    pub fn clear(&mut self) {
        self.stop();
        self.life.clear();
        self.reset_run();
        info!("grid cleared");
    }

    /// Loads a built-in pattern in the middle of the grid and stops the run.
    /// On error the grid and run state are unchanged.
    pub fn apply_pattern(&mut self, name: &str) -> LifeResult<()> {
        let pattern = patterns::find(name)?;
        patterns::apply_centered(&mut self.life, pattern)?;
        self.stop();
        self.reset_run();
        Ok(())
    }

    /// Fills the grid randomly and stops the run. On error the grid and run
    /// state are unchanged.
    pub fn randomize(&mut self, seed: u64, density: f64) -> LifeResult<()> {
        patterns::apply_random(&mut self.life, seed, density)?;
        self.stop();
        self.reset_run();
        Ok(())
    }

    /// Advances one generation if running.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        self.advance()
    }

    /// Advances one generation regardless of the run state.
    pub fn advance(&mut self) -> TickOutcome {
        let before = self.life.grid().clone();
        self.life.step();
        self.finish_generation(&before)
    }

    pub async fn tick_concurrent(&mut self) -> LifeResult<TickOutcome> {
        if !self.is_running() {
            return Ok(TickOutcome::Idle);
        }
        self.advance_concurrent().await
    }

    pub async fn advance_concurrent(&mut self) -> LifeResult<TickOutcome> {
        let before = self.life.grid().clone();
        self.life.step_concurrent().await?;
        Ok(self.finish_generation(&before))
    }

    fn finish_generation(&mut self, before: &Grid) -> TickOutcome {
        self.generation += 1;
        self.stats.record(before, self.life.grid());
        debug!(generation = self.generation, "generation advanced");

        if !self.history.observe(self.life.grid().fingerprint()) {
            return TickOutcome::Advanced;
        }
        if self.stop_on_cycle && self.is_running() {
            warn!(generation = self.generation, "cycle detected, stopping");
            self.run_state = RunState::Stopped;
        }
        TickOutcome::CycleDetected
    }

    fn reset_run(&mut self) {
        self.generation = 0;
        self.history.reset();
        self.history.observe(self.life.grid().fingerprint());
        self.stats = SimulationStats::starting_at(self.life.grid());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;

    #[test]
    fn starts_stopped_and_idles() {
        let mut sim = Simulation::new(8).unwrap();
        assert_eq!(sim.run_state(), RunState::Stopped);
        sim.toggle_cell(3, 3).unwrap();
        assert_eq!(sim.tick(), TickOutcome::Idle);
        assert_eq!(sim.generation(), 0);
        assert!(sim.grid().get(3, 3).unwrap());
    }

    #[test]
    fn toggle_running_flips_state() {
        let mut sim = Simulation::new(8).unwrap();
        assert_eq!(sim.toggle_running(), RunState::Running);
        assert_eq!(sim.toggle_running(), RunState::Stopped);
    }

    #[test]
    fn glider_runs_without_cycle() {
        let mut sim = Simulation::new(20).unwrap();
        sim.apply_pattern("glider").unwrap();
        sim.start();
        for generation in 1..=8 {
            assert_eq!(sim.tick(), TickOutcome::Advanced);
            assert_eq!(sim.generation(), generation);
            assert_eq!(sim.grid().live_count(), 5);
        }
        assert!(sim.is_running());
    }

    #[test]
    fn still_life_halts_after_one_generation() {
        let mut sim = Simulation::new(10).unwrap();
        sim.apply_pattern("Block").unwrap();
        sim.start();
        assert_eq!(sim.tick(), TickOutcome::CycleDetected);
        assert_eq!(sim.run_state(), RunState::Stopped);
        assert_eq!(sim.tick(), TickOutcome::Idle);
    }

    #[test]
    fn blinker_halts_after_two_generations() {
        let mut sim = Simulation::new(10).unwrap();
        sim.apply_pattern("Blinker").unwrap();
        sim.start();
        assert_eq!(sim.tick(), TickOutcome::Advanced);
        assert_eq!(sim.tick(), TickOutcome::CycleDetected);
        assert!(!sim.is_running());
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn cycles_are_reported_but_not_enforced_when_disabled() {
        let mut sim = Simulation::from_config(&LifeConfig {
            grid_size: 10,
            stop_on_cycle: false,
            ..LifeConfig::default()
        })
        .unwrap();
        sim.start();
        assert_eq!(sim.tick(), TickOutcome::CycleDetected);
        assert!(sim.is_running());
    }

    #[test]
    fn clear_stops_and_resets() {
        let mut sim = Simulation::new(10).unwrap();
        sim.apply_pattern("Glider").unwrap();
        sim.start();
        sim.tick();
        sim.tick();
        sim.clear();
        assert_eq!(sim.run_state(), RunState::Stopped);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.grid().live_count(), 0);
        assert_eq!(sim.stats().population_history, vec![0]);
    }

    #[test]
    fn manual_advance_ignores_run_state() {
        let mut sim = Simulation::new(10).unwrap();
        sim.apply_pattern("Glider").unwrap();
        assert_eq!(sim.advance(), TickOutcome::Advanced);
        assert_eq!(sim.generation(), 1);
        assert!(!sim.is_running());
    }

    #[test]
    fn pattern_errors_leave_run_untouched() {
        let mut sim = Simulation::new(10).unwrap();
        sim.toggle_cell(4, 4).unwrap();
        sim.start();
        sim.tick();
        let grid = sim.grid().clone();

        assert!(matches!(sim.apply_pattern("nope"), Err(LifeError::UnknownPattern(_))));
        assert!(matches!(
            sim.apply_pattern("Gosper Glider Gun"),
            Err(LifeError::PatternTooLarge { size: 10, .. })
        ));
        assert!(matches!(sim.randomize(1, 2.0), Err(LifeError::InvalidConfig(_))));
        assert!(matches!(sim.randomize(1, -0.1), Err(LifeError::InvalidConfig(_))));

        assert!(sim.is_running());
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.grid(), &grid);
    }

    #[test]
    fn history_window_forgets_old_generations() {
        let mut detector = CycleDetector::new(2);
        assert!(!detector.observe(1));
        assert!(!detector.observe(2));
        assert!(detector.observe(1));
        assert!(!detector.observe(3));
        assert!(!detector.observe(1));
    }

    #[tokio::test]
    async fn concurrent_ticks_follow_the_same_history() {
        let mut sequential = Simulation::new(16).unwrap();
        sequential.randomize(11, 0.4).unwrap();
        let mut concurrent = sequential.clone();
        sequential.start();
        concurrent.start();
        for _ in 0..10 {
            let expected = sequential.tick();
            let actual = concurrent.tick_concurrent().await.unwrap();
            assert_eq!(expected, actual);
            assert_eq!(sequential.grid(), concurrent.grid());
        }
        assert_eq!(sequential.stats(), concurrent.stats());
    }
}
