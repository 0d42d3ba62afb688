use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;

// Which way a shift rotates the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimensions {height}x{width}: both must be at least 1 and the cell count must fit in usize")]
    InvalidDimension { height: usize, width: usize },
    #[error("invalid {axis} shift {offset}: must lie in 0..={limit}")]
    InvalidShift { axis: Axis, offset: usize, limit: usize },
    #[error("persisted map {height}x{width} carries {points} points, expected {expected}")]
    MalformedPersistedState {
        height: usize,
        width: usize,
        points: usize,
        expected: usize,
    },
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
