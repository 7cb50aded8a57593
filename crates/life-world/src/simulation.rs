//! Simulation engine: the Life rule and the generation loop.

use crate::grid::Grid;
use life_core::{CellState, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Classic Life rule: survive on 2 or 3, born on exactly 3, otherwise dead
pub fn next_state(current: CellState, alive_neighbors: usize) -> CellState {
    match (current, alive_neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive,
        (CellState::Dead, 3) => CellState::Alive,
        _ => CellState::Dead,
    }
}

/// Compute the generation after `snapshot`.
///
/// Every cell is read from `snapshot` and written to a separate buffer, so no
/// cell ever sees a neighbor that was already updated in this generation.
pub fn step(snapshot: &Grid) -> Result<Grid> {
    let mut next = Grid::new(snapshot.height(), snapshot.width())?;

    for row in 0..snapshot.height() {
        for col in 0..snapshot.width() {
            let neighbors = snapshot.count_alive_neighbors(row, col)?;
            let state = next_state(snapshot.get(row, col)?, neighbors);
            next.set(row, col, state)?;
        }
    }

    Ok(next)
}

/// Drives a grid through successive generations
pub struct Simulation {
    grid: Grid,
    generation: u64,
    progress_interval: u64,
}

impl Simulation {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
            progress_interval: 100,
        }
    }

    /// Log a progress line every `interval` generations during `run`
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Advance one generation, replacing the grid contents
    pub fn step(&mut self) -> Result<()> {
        self.grid = step(&self.grid)?;
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = self.grid.population(),
            "Generation computed"
        );
        Ok(())
    }

    /// Run `generations` steps, calling `observer` after each one
    #[instrument(skip(self, observer), fields(height = self.grid.height(), width = self.grid.width()))]
    pub fn run<F>(&mut self, generations: u64, mut observer: F) -> Result<SimulationResult>
    where
        F: FnMut(u64, &Grid) -> Result<()>,
    {
        info!("Starting simulation for {} generations", generations);

        let start_generation = self.generation;
        let mut peak_population = self.grid.population();
        let mut extinct_at = None;

        for _ in 0..generations {
            self.step()?;

            let population = self.grid.population();
            peak_population = peak_population.max(population);
            if population == 0 && extinct_at.is_none() {
                info!(generation = self.generation, "Population died out");
                extinct_at = Some(self.generation);
            }

            observer(self.generation, &self.grid)?;

            if self.generation % self.progress_interval == 0 {
                info!(
                    "Generation {}/{}: {} cells alive",
                    self.generation - start_generation,
                    generations,
                    population
                );
            }
        }

        let result = SimulationResult {
            generations: self.generation - start_generation,
            final_generation: self.generation,
            final_population: self.grid.population(),
            peak_population,
            extinct_at,
        };

        info!(
            event = "run_summary",
            generations = result.generations,
            final_population = result.final_population,
            peak_population = result.peak_population,
            extinct_at = ?result.extinct_at,
            "Simulation complete"
        );

        Ok(result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Generations computed by this run
    pub generations: u64,
    /// Generation counter after the run
    pub final_generation: u64,
    pub final_population: usize,
    /// Largest population seen, including the starting grid
    pub peak_population: usize,
    /// First generation of this run with no alive cells
    pub extinct_at: Option<u64>,
}
