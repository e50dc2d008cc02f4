//! Walls and their position keys.
//!
//! A wall sits midway between two adjacent cells, or on the outer boundary of a cell with
//! no neighbour on that side. Positions are stored in doubled grid coordinates, offset by
//! one, so the half step midpoints stay exact unsigned integers: cell `(x, y)` sits at
//! doubled `(2x + 1, 2y + 1)` and each of its walls is one doubled step away. Both cells
//! adjacent to a wall hold the same position key, which makes the key a natural
//! deduplication handle for the maze's wall lookup.

use smallvec::SmallVec;

use crate::cells::{Direction, GridCoordinate};

/// Doubled coordinate key of a wall. Exactly one of the components is even.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct WallPosition {
    pub x: u32,
    pub y: u32,
}

/// Which way a wall runs. A wall separating east/west neighbours runs north-south.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallOrientation {
    NorthSouth,
    EastWest,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Wall {
    pub position: WallPosition,
    pub orientation: WallOrientation,
}

impl WallPosition {
    pub fn new(x: u32, y: u32) -> WallPosition {
        WallPosition { x, y }
    }

    /// The position of the wall shared by two adjacent cells.
    pub fn between(a: GridCoordinate, b: GridCoordinate) -> WallPosition {
        WallPosition::new(a.x + b.x + 1, a.y + b.y + 1)
    }

    /// The position of the given cell's wall toward a direction, boundary sides included.
    pub fn toward(coord: GridCoordinate, dir: Direction) -> WallPosition {
        let (cx, cy) = (coord.x * 2 + 1, coord.y * 2 + 1);
        match dir {
            Direction::North => WallPosition::new(cx, cy - 1),
            Direction::South => WallPosition::new(cx, cy + 1),
            Direction::East => WallPosition::new(cx + 1, cy),
            Direction::West => WallPosition::new(cx - 1, cy),
        }
    }

    pub fn orientation(&self) -> WallOrientation {
        if self.x % 2 == 0 {
            WallOrientation::NorthSouth
        } else {
            WallOrientation::EastWest
        }
    }
}

impl Wall {
    pub fn at(position: WallPosition) -> Wall {
        Wall {
            position,
            orientation: position.orientation(),
        }
    }
}

/// The four candidate wall positions enclosing a cell, in canonical direction order,
/// perimeter sides included.
pub fn positions_around(coord: GridCoordinate) -> SmallVec<[WallPosition; 4]> {
    Direction::ALL
        .iter()
        .map(|&dir| WallPosition::toward(coord, dir))
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn shared_wall_is_the_midpoint() {
        let a = GridCoordinate::new(1, 2);
        let east = GridCoordinate::new(2, 2);
        let south = GridCoordinate::new(1, 3);

        // Cell (1, 2) sits at doubled (3, 5).
        assert_eq!(WallPosition::between(a, east), WallPosition::new(4, 5));
        assert_eq!(WallPosition::between(a, south), WallPosition::new(3, 6));

        // Shared walls are symmetric and match the directed lookup from either side.
        assert_eq!(WallPosition::between(east, a), WallPosition::between(a, east));
        assert_eq!(WallPosition::toward(a, Direction::East), WallPosition::between(a, east));
        assert_eq!(WallPosition::toward(east, Direction::West), WallPosition::between(a, east));
    }

    #[test]
    fn orientation_follows_the_separating_axis() {
        let a = GridCoordinate::new(1, 2);
        let east = GridCoordinate::new(2, 2);
        let south = GridCoordinate::new(1, 3);
        assert_eq!(WallPosition::between(a, east).orientation(), WallOrientation::NorthSouth);
        assert_eq!(WallPosition::between(a, south).orientation(), WallOrientation::EastWest);
    }

    #[test]
    fn corner_cell_has_four_distinct_walls() {
        let positions = positions_around(GridCoordinate::new(0, 0));
        assert_eq!(positions.len(), 4);
        assert_eq!(&*positions,
                   &[WallPosition::new(1, 0), // north boundary
                     WallPosition::new(1, 2),
                     WallPosition::new(2, 1),
                     WallPosition::new(0, 1)]); // west boundary
    }

    #[test]
    fn adjacent_cells_agree_on_one_wall() {
        let a = positions_around(GridCoordinate::new(4, 4));
        let b = positions_around(GridCoordinate::new(5, 4));
        let shared: Vec<&WallPosition> = a.iter().filter(|p| b.contains(p)).collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(*shared[0],
                   WallPosition::between(GridCoordinate::new(4, 4), GridCoordinate::new(5, 4)));
    }
}
