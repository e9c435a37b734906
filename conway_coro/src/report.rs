// report.rs - Text output for the headless runner

use conway::{PATTERNS, Population, Simulation};

pub fn print_summary(simulation: &Simulation) {
    print!("{}", simulation.grid());
    println!();
    println!("Generation: {}", simulation.generation());
    println!("{}", Population::of(simulation.grid()));

    let stats = simulation.stats();
    println!(
        "Births: {}  Deaths: {}  Peak population: {}",
        stats.total_births, stats.total_deaths, stats.max_population
    );
}

pub fn print_patterns() {
    for pattern in PATTERNS {
        println!(
            "{:<20} {:>2}x{:<2} {} cells",
            pattern.name,
            pattern.height(),
            pattern.width(),
            pattern.cells.len()
        );
    }
}
