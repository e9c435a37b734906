// stats.rs - Population counts and per-run statistics

use std::fmt;

use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Population {
    pub live: usize,
    pub dead: usize,
    pub total: usize,
}

impl Population {
    pub fn of(grid: &Grid) -> Self {
        let total = grid.size() * grid.size();
        let live = grid.live_count();
        Self { live, dead: total - live, total }
    }

    pub fn percent(&self) -> f64 {
        self.live as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Live cells: {}  Dead cells: {}  Population: {:.1}%",
            self.live,
            self.dead,
            self.percent()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub total_births: usize,
    pub total_deaths: usize,
    pub max_population: usize,
    pub population_history: Vec<usize>,
}

impl SimulationStats {
    /// Starts tracking from the given generation.
    pub fn starting_at(grid: &Grid) -> Self {
        let live = grid.live_count();
        Self {
            max_population: live,
            population_history: vec![live],
            ..Self::default()
        }
    }

    /// Records the transition `before` -> `after`.
    pub fn record(&mut self, before: &Grid, after: &Grid) {
        for (old, new) in before.rows().zip(after.rows()) {
            for (&was, &is) in old.iter().zip(new) {
                match (was, is) {
                    (false, true) => self.total_births += 1,
                    (true, false) => self.total_deaths += 1,
                    _ => {}
                }
            }
        }
        let live = after.live_count();
        self.max_population = self.max_population.max(live);
        self.population_history.push(live);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::GridAutomaton;

    #[test]
    fn population_of_grid() {
        let grid = Grid::with_cells(10, &[(0, 0), (5, 5), (9, 9)]).unwrap();
        let population = Population::of(&grid);
        assert_eq!(population, Population { live: 3, dead: 97, total: 100 });
        assert!((population.percent() - 3.0).abs() < 1e-9);
        assert_eq!(population.to_string(), "Live cells: 3  Dead cells: 97  Population: 3.0%");
    }

    #[test]
    fn blinker_births_and_deaths() {
        let mut life = GridAutomaton::new(5).unwrap();
        for col in 1..4 {
            life.set(2, col, true).unwrap();
        }
        let mut stats = SimulationStats::starting_at(life.grid());
        let before = life.grid().clone();
        life.step();
        stats.record(&before, life.grid());

        assert_eq!(stats.total_births, 2);
        assert_eq!(stats.total_deaths, 2);
        assert_eq!(stats.max_population, 3);
        assert_eq!(stats.population_history, vec![3, 3]);
    }
}
