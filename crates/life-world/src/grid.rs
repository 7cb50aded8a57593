//! 2D grid of cell states.

use life_core::{CellState, Error, Result, WorldConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// A bounded (non-toroidal) rectangular grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Allocate a `height x width` grid with every cell dead
    pub fn new(height: usize, width: usize) -> Result<Self> {
        let mut cells = allocate(height, width)?;
        cells.resize(height * width, CellState::Dead);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Wrap an existing row-major buffer
    pub fn from_cells(height: usize, width: usize, cells: Vec<CellState>) -> Result<Self> {
        let expected = height.checked_mul(width).ok_or_else(|| overflow(height, width))?;
        if cells.len() != expected {
            return Err(Error::Validation(format!(
                "{}x{} grid needs {} cells, got {}",
                height,
                width,
                expected,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Fill a grid at random, each cell alive with probability `density`
    pub fn random(height: usize, width: usize, density: f64, rng: &mut ChaCha8Rng) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::Validation(format!(
                "density must be between 0.0 and 1.0, got {}",
                density
            )));
        }

        let mut cells = allocate(height, width)?;
        let size = height * width;
        cells.extend((0..size).map(|_| CellState::from(rng.gen_bool(density))));

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a grid from world configuration
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::random(config.height, config.width, config.density, &mut rng)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell buffer
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<CellState> {
        self.cells
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState> {
        let index = self.index(row, col)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        let index = self.index(row, col)?;
        self.cells[index] = state;
        Ok(())
    }

    /// Count alive cells in the Moore neighborhood of `(row, col)`.
    ///
    /// Positions past the edge of the grid do not exist and contribute nothing,
    /// so corner cells have at most 3 candidates and edge cells at most 5.
    pub fn count_alive_neighbors(&self, row: usize, col: usize) -> Result<usize> {
        self.index(row, col)?;

        let rows = row.saturating_sub(1)..=(row + 1).min(self.height - 1);
        let cols = col.saturating_sub(1)..=(col + 1).min(self.width - 1);

        let mut count = 0;
        for r in rows {
            for c in cols.clone() {
                if r == row && c == col {
                    continue;
                }
                if self.cells[r * self.width + c].is_alive() {
                    count += 1;
                }
            }
        }

        Ok(count)
    }

    /// Render with the default markers: `0` alive, `.` dead
    pub fn render(&self) -> String {
        self.render_with('0', '.')
    }

    /// One line per row, cells separated by a single space
    pub fn render_with(&self, alive: char, dead: char) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2 + self.height);
        for row in 0..self.height {
            let start = row * self.width;
            for (col, cell) in self.cells[start..start + self.width].iter().enumerate() {
                if col > 0 {
                    out.push(' ');
                }
                out.push(if cell.is_alive() { alive } else { dead });
            }
            out.push('\n');
        }
        out
    }

    /// Get `(row, col)` from a buffer index; only valid for indices into `cells`
    fn index_to_pos(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.height || col >= self.width {
            return Err(Error::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(row * self.width + col)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Reserve room for a `height x width` buffer without aborting on failure
fn allocate(height: usize, width: usize) -> Result<Vec<CellState>> {
    let size = height.checked_mul(width).ok_or_else(|| overflow(height, width))?;
    let mut cells = Vec::new();
    cells.try_reserve_exact(size).map_err(|e| {
        Error::AllocationFailure(format!("{}x{} grid: {}", height, width, e))
    })?;
    Ok(cells)
}

fn overflow(height: usize, width: usize) -> Error {
    Error::AllocationFailure(format!("{}x{} grid is too large to address", height, width))
}
