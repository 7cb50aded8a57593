//! Game of Life simulation engine.
//!
//! This crate holds the bounded cell grid and the generation transition. It
//! performs no I/O; loading, saving and printing live in the callers.

pub mod grid;
pub mod simulation;

pub use grid::Grid;
pub use simulation::{next_state, step, Simulation, SimulationResult};
