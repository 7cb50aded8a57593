//! Loading and saving grids.
//!
//! Paths ending in `.bin` use the binary snapshot format; everything else is
//! read and written as plain text.

pub mod snapshot;
pub mod text;

pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

use life_core::{CellState, Error, Result};
use life_world::Grid;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Grid dimensions and row-major cells as stored on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridData {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellState>,
}

impl GridData {
    pub fn validate(&self) -> Result<()> {
        check_cell_count(self.height, self.width, self.cells.len())
    }

    pub fn into_grid(self) -> Result<Grid> {
        Grid::from_cells(self.height, self.width, self.cells)
    }
}

impl From<&Grid> for GridData {
    fn from(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFormat {
    Text,
    Binary,
}

impl GridFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => GridFormat::Binary,
            _ => GridFormat::Text,
        }
    }
}

/// Strip everything from the first line terminator on.
///
/// Destinations typed at a prompt or piped in tend to carry a trailing newline,
/// which is never part of a file name.
pub fn sanitize_destination(destination: &str) -> Result<PathBuf> {
    let end = destination
        .find(|c: char| c == '\n' || c == '\r')
        .unwrap_or(destination.len());
    let cleaned = &destination[..end];
    if cleaned.is_empty() {
        return Err(Error::Validation("destination is empty".to_string()));
    }
    Ok(PathBuf::from(cleaned))
}

/// Read a grid from `source`
#[instrument]
pub fn load_grid(source: &Path) -> Result<GridData> {
    let data = match GridFormat::for_path(source) {
        GridFormat::Text => text::decode(&fs::read_to_string(source)?)?,
        GridFormat::Binary => load_snapshot(source)?.into_data(),
    };

    info!(
        height = data.height,
        width = data.width,
        "Loaded grid from {}",
        source.display()
    );
    Ok(data)
}

/// Write a grid to `destination`, returning the number of bytes written
#[instrument(skip(cells))]
pub fn save_grid(destination: &str, width: usize, height: usize, cells: &[CellState]) -> Result<usize> {
    let path = sanitize_destination(destination)?;
    let data = GridData {
        width,
        height,
        cells: cells.to_vec(),
    };

    let bytes = match GridFormat::for_path(&path) {
        GridFormat::Text => text::encode(&data)?.into_bytes(),
        GridFormat::Binary => Snapshot::new(data, 0)?.to_bytes()?,
    };
    write(&path, &bytes)
}

/// Write a binary snapshot carrying the generation counter
#[instrument(skip(grid))]
pub fn save_snapshot(destination: &str, grid: &Grid, generation: u64) -> Result<usize> {
    let path = sanitize_destination(destination)?;
    let bytes = Snapshot::from_grid(grid, generation)?.to_bytes()?;
    write(&path, &bytes)
}

pub fn load_snapshot(source: &Path) -> Result<Snapshot> {
    let bytes = fs::read(source)?;
    let snapshot = Snapshot::from_bytes(&bytes)?;
    debug!(
        generation = snapshot.generation,
        timestamp = snapshot.timestamp,
        "Read snapshot from {}",
        source.display()
    );
    Ok(snapshot)
}

pub(crate) fn check_cell_count(height: usize, width: usize, len: usize) -> Result<()> {
    match height.checked_mul(width) {
        Some(expected) if expected == len => Ok(()),
        Some(expected) => Err(Error::Validation(format!(
            "{}x{} grid needs {} cells, got {}",
            height, width, expected, len
        ))),
        None => Err(Error::Validation(format!(
            "{}x{} grid is too large",
            height, width
        ))),
    }
}

fn write(path: &Path, bytes: &[u8]) -> Result<usize> {
    fs::write(path, bytes)?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}
