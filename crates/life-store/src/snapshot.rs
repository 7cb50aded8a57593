//! Binary grid snapshots.

use crate::GridData;
use life_core::{CellState, Error, Result};
use life_world::Grid;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// Unix seconds at creation
    pub timestamp: i64,
    pub generation: u64,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellState>,
}

impl Snapshot {
    pub fn new(data: GridData, generation: u64) -> Result<Self> {
        data.validate()?;
        Ok(Self {
            version: SNAPSHOT_VERSION,
            timestamp: chrono::Utc::now().timestamp(),
            generation,
            width: data.width,
            height: data.height,
            cells: data.cells,
        })
    }

    pub fn from_grid(grid: &Grid, generation: u64) -> Result<Self> {
        Self::new(GridData::from(grid), generation)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize snapshot: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Snapshot = bincode::deserialize(bytes)
            .map_err(|e| Error::Format(format!("Failed to deserialize snapshot: {}", e)))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::Format(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        crate::check_cell_count(snapshot.height, snapshot.width, snapshot.cells.len()).map_err(
            |_| {
                Error::Format(format!(
                    "snapshot holds {} cells for a {}x{} grid",
                    snapshot.cells.len(),
                    snapshot.height,
                    snapshot.width
                ))
            },
        )?;

        Ok(snapshot)
    }

    pub fn into_data(self) -> GridData {
        GridData {
            width: self.width,
            height: self.height,
            cells: self.cells,
        }
    }

    pub fn into_grid(self) -> Result<Grid> {
        self.into_data().into_grid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::CellState::{Alive, Dead};

    fn sample() -> GridData {
        GridData {
            width: 2,
            height: 2,
            cells: vec![Alive, Dead, Dead, Alive],
        }
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = Snapshot::new(sample(), 17).unwrap();
        let bytes = snapshot.to_bytes().unwrap();
        let deserialized = Snapshot::from_bytes(&bytes).unwrap();

        assert_eq!(deserialized, snapshot);
        assert_eq!(deserialized.generation, 17);
        assert_eq!(deserialized.into_data(), sample());
    }

    #[test]
    fn test_snapshot_rejects_bad_cell_count() {
        let mut snapshot = Snapshot::new(sample(), 0).unwrap();
        snapshot.cells.pop();
        let bytes = bincode::serialize(&snapshot).unwrap();
        assert!(matches!(Snapshot::from_bytes(&bytes), Err(Error::Format(_))));
    }

    #[test]
    fn test_snapshot_rejects_other_version() {
        let mut snapshot = Snapshot::new(sample(), 0).unwrap();
        snapshot.version = SNAPSHOT_VERSION + 1;
        let bytes = bincode::serialize(&snapshot).unwrap();
        let err = Snapshot::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("unsupported snapshot version"));
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(matches!(Snapshot::from_bytes(&[1, 2, 3]), Err(Error::Format(_))));
    }

    #[test]
    fn test_snapshot_from_grid() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(2, 1, Alive).unwrap();
        let snapshot = Snapshot::from_grid(&grid, 4).unwrap();
        assert_eq!(snapshot.height, 3);
        assert_eq!(snapshot.into_grid().unwrap(), grid);
    }
}
