//! Coordinates, compass directions and the per cell state mutated by the maze carver.

use smallvec::SmallVec;
use std::convert::From;

use crate::units::{CellIndex, Width};
use crate::walls::WallPosition;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// The canonical probe order when visiting a cell's neighbours.
    /// Fixed so that a given RNG seed always reproduces the same maze.
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, width: Width) -> GridCoordinate {
        let Width(w) = width;
        GridCoordinate::new((index % w) as u32, (index / w) as u32)
    }

    #[inline]
    pub fn row_major_index(&self, width: Width) -> usize {
        let Width(w) = width;
        self.y as usize * w + self.x as usize
    }

    /// The coordinate one cell away in the given direction.
    /// Returns None if that coordinate is not representable (off the zero edge of the grid).
    /// The grid itself checks the far bounds.
    pub fn offset(&self, dir: Direction) -> Option<GridCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            Direction::North => {
                if y > 0 { Some(GridCoordinate::new(x, y - 1)) } else { None }
            }
            Direction::South => Some(GridCoordinate::new(x, y + 1)),
            Direction::East => Some(GridCoordinate::new(x + 1, y)),
            Direction::West => {
                if x > 0 { Some(GridCoordinate::new(x - 1, y)) } else { None }
            }
        }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// Mutable carver facing state of one maze cell.
///
/// The parent back reference is an arena index, not an owning edge, so the chain of
/// parents forms a tree that can be re-walked freely during backtracking.
#[derive(Debug, Clone)]
pub struct CellState {
    pub coord: GridCoordinate,
    pub visited: bool,
    pub parent: Option<CellIndex>,
    /// Keys into the maze's wall lookup for the walls still enclosing this cell.
    pub walls: SmallVec<[WallPosition; 4]>,
}

impl CellState {
    pub fn new(coord: GridCoordinate) -> CellState {
        CellState {
            coord,
            visited: false,
            parent: None,
            walls: SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets_respect_the_zero_edges() {
        let origin = GridCoordinate::new(0, 0);
        assert_eq!(origin.offset(Direction::North), None);
        assert_eq!(origin.offset(Direction::West), None);
        assert_eq!(origin.offset(Direction::South), Some(GridCoordinate::new(0, 1)));
        assert_eq!(origin.offset(Direction::East), Some(GridCoordinate::new(1, 0)));

        let inner = GridCoordinate::new(3, 2);
        assert_eq!(inner.offset(Direction::North), Some(GridCoordinate::new(3, 1)));
        assert_eq!(inner.offset(Direction::West), Some(GridCoordinate::new(2, 2)));
    }

    #[test]
    fn row_major_round_trip() {
        let w = Width(5);
        for index in 0..15 {
            let coord = GridCoordinate::from_row_major_index(index, w);
            assert_eq!(coord.row_major_index(w), index);
        }
        assert_eq!(GridCoordinate::from_row_major_index(7, w), GridCoordinate::new(2, 1));
    }
}
