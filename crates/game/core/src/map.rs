//! Dungeon occupancy grid.

use crate::grid::{Direction, Grid, GridError, MapDimensions, Position, Ray};
use crate::state::{ActorId, ChestId};

/// Content of a single dungeon cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Walkable,
    Obstacle,
    Chest(ChestId),
    Actor(ActorId),
}

/// Grid of [`Cell`]s plus the optional gateway.
///
/// The gateway is a walkable cell; standing on it as the hero wins the level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonMap {
    grid: Grid<Cell>,
    gateway: Option<Position>,
}

impl DungeonMap {
    /// Creates a map where every cell is walkable and there is no gateway.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            grid: Grid::filled(MapDimensions::new(rows, cols), Cell::Walkable),
            gateway: None,
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.grid.dimensions()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.grid.contains(position)
    }

    pub fn get(&self, position: Position) -> Result<Cell, GridError> {
        self.grid.get(position).copied()
    }

    /// Replaces the cell at `position`, returning what was there.
    pub fn set(&mut self, position: Position, cell: Cell) -> Result<Cell, GridError> {
        self.grid.set(position, cell)
    }

    pub fn make_walkable(&mut self, position: Position) -> Result<(), GridError> {
        self.set(position, Cell::Walkable).map(|_| ())
    }

    pub fn is_walkable(&self, position: Position) -> Result<bool, GridError> {
        Ok(self.get(position)? == Cell::Walkable)
    }

    pub fn is_obstacle(&self, position: Position) -> Result<bool, GridError> {
        Ok(self.get(position)? == Cell::Obstacle)
    }

    /// True if an actor may step onto `position`: it is inside the map and
    /// either walkable or a chest waiting to be opened.
    pub fn can_enter(&self, position: Position) -> bool {
        matches!(self.get(position), Ok(Cell::Walkable | Cell::Chest(_)))
    }

    /// The actor standing at `position`, if any.
    pub fn occupant(&self, position: Position) -> Option<ActorId> {
        match self.get(position) {
            Ok(Cell::Actor(id)) => Some(id),
            _ => None,
        }
    }

    pub fn ray(&self, start: Position, direction: Direction) -> Ray {
        self.grid.ray(start, direction)
    }

    pub fn set_gateway(&mut self, position: Position) -> Result<(), GridError> {
        self.grid.get(position)?;
        self.gateway = Some(position);
        Ok(())
    }

    pub fn gateway(&self) -> Option<Position> {
        self.gateway
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.grid.iter().map(|(position, cell)| (position, *cell))
    }
}
