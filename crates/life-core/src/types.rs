//! Core type definitions for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub fn is_alive(&self) -> bool {
        *self == CellState::Alive
    }

    /// Marker character used by the text file format
    pub fn to_char(&self) -> char {
        match self {
            CellState::Dead => '0',
            CellState::Alive => '1',
        }
    }

    /// Parse a text file marker; only `'0'` and `'1'` are accepted
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '0' => Ok(CellState::Dead),
            '1' => Ok(CellState::Alive),
            other => Err(Error::Format(format!("invalid cell marker {:?}", other))),
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CellState::Dead),
            1 => Ok(CellState::Alive),
            other => Err(Error::Format(format!("invalid cell value {}", other))),
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        state as u8
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Dead => write!(f, "dead"),
            CellState::Alive => write!(f, "alive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_conversion() {
        assert_eq!(CellState::try_from(0u8).unwrap(), CellState::Dead);
        assert_eq!(CellState::try_from(1u8).unwrap(), CellState::Alive);
        assert_eq!(u8::from(CellState::Alive), 1);
        assert_eq!(u8::from(CellState::Dead), 0);
    }

    #[test]
    fn test_rejects_other_bytes() {
        for value in [2u8, 48, 49, 255] {
            assert!(matches!(CellState::try_from(value), Err(Error::Format(_))));
        }
    }

    #[test]
    fn test_char_markers() {
        assert_eq!(CellState::from_char('1').unwrap(), CellState::Alive);
        assert_eq!(CellState::from_char('0').unwrap(), CellState::Dead);
        assert!(CellState::from_char('x').is_err());
        assert_eq!(CellState::Alive.to_char(), '1');
    }

    #[test]
    fn test_default_is_dead() {
        assert_eq!(CellState::default(), CellState::Dead);
        assert!(!CellState::default().is_alive());
        assert!(CellState::from(true).is_alive());
    }
}
