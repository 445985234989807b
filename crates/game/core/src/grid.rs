//! Generic rectangular grid with bounds checking and cardinal ray traversal.
//!
//! Rows grow downwards and columns grow to the right, so [`Direction::Up`]
//! decrements the row index.

use std::fmt;

use crate::error::{ErrorSeverity, GameError};

/// Discrete grid position expressed as `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position one cell away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Sum of absolute row and column offsets.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Largest of the absolute row and column offsets.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four cardinal directions an actor can move, attack or look in.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed search order used whenever directions are scanned in turn.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` offset of a single step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction to walk from `from` to reach `to` in a straight line.
    ///
    /// Returns `None` when the two positions are equal or are not on the
    /// same row or column.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        if from == to {
            return None;
        }
        if from.row == to.row {
            Some(if from.col > to.col {
                Direction::Left
            } else {
                Direction::Right
            })
        } else if from.col == to.col {
            Some(if from.row > to.row {
                Direction::Up
            } else {
                Direction::Down
            })
        } else {
            None
        }
    }
}

/// Grid size in rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub rows: u32,
    pub cols: u32,
}

impl MapDimensions {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && (position.row as u32) < self.rows
            && (position.col as u32) < self.cols
    }

    pub fn area(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    #[error("position {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        position: Position,
        rows: u32,
        cols: u32,
    },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
        }
    }
}

/// Row-major rectangular storage addressed by [`Position`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    dimensions: MapDimensions,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `fill`.
    pub fn filled(dimensions: MapDimensions, fill: T) -> Self {
        Self {
            dimensions,
            cells: vec![fill; dimensions.area()],
        }
    }
}

impl<T> Grid<T> {
    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn rows(&self) -> u32 {
        self.dimensions.rows
    }

    pub fn cols(&self) -> u32 {
        self.dimensions.cols
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn index(&self, position: Position) -> Result<usize, GridError> {
        if !self.contains(position) {
            return Err(GridError::OutOfBounds {
                position,
                rows: self.dimensions.rows,
                cols: self.dimensions.cols,
            });
        }
        Ok(position.row as usize * self.dimensions.cols as usize + position.col as usize)
    }

    pub fn get(&self, position: Position) -> Result<&T, GridError> {
        let index = self.index(position)?;
        Ok(&self.cells[index])
    }

    pub fn get_mut(&mut self, position: Position) -> Result<&mut T, GridError> {
        let index = self.index(position)?;
        Ok(&mut self.cells[index])
    }

    /// Replaces the cell at `position`, returning the previous value.
    pub fn set(&mut self, position: Position, value: T) -> Result<T, GridError> {
        let slot = self.get_mut(position)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Positions visited when walking from `start` in `direction`, excluding
    /// `start` itself and stopping at the grid edge.
    pub fn ray(&self, start: Position, direction: Direction) -> Ray {
        Ray {
            dimensions: self.dimensions,
            cursor: start,
            direction,
            exhausted: false,
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let MapDimensions { rows, cols } = self.dimensions;
        (0..rows as i32).flat_map(move |row| (0..cols as i32).map(move |col| Position::new(row, col)))
    }

    /// Cells paired with their positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.positions().zip(self.cells.iter())
    }
}

/// Lazy walk along one cardinal direction.
///
/// A ray is consumed as it is read: once it reports the edge of the grid it
/// keeps returning `None`.
#[derive(Debug)]
pub struct Ray {
    dimensions: MapDimensions,
    cursor: Position,
    direction: Direction,
    exhausted: bool,
}

impl Ray {
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Iterator for Ray {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.exhausted {
            return None;
        }
        let next = self.cursor.step(self.direction);
        if self.dimensions.contains(next) {
            self.cursor = next;
            Some(next)
        } else {
            self.exhausted = true;
            None
        }
    }
}

impl std::iter::FusedIterator for Ray {}
