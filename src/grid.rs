//! The maze aggregate: a cell arena, the shared wall lookup and the carved passage graph.

use error_chain::bail;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use smallvec::SmallVec;
use std::fmt;

use crate::cells::{CellState, CoordinateSmallVec, Direction, GridCoordinate};
use crate::errors::*;
use crate::scene::SceneSink;
use crate::units::{CellIndex, Height, Width};
use crate::utils::{self, FnvHashMap, FnvHashSet};
use crate::walls::{self, Wall, WallPosition};

pub type CellIndexSmallVec = SmallVec<[CellIndex; 4]>;

/// A rectangular grid maze.
///
/// Cells live in a row major arena and reference their enclosing walls by position key
/// into the wall lookup, never by pointer, so a wall shared by two cells is one entry
/// removable in a single delete. Carved passages are edges of an undirected graph with
/// one node per cell; after carving that graph is a spanning tree of the grid.
pub struct Maze {
    width: Width,
    height: Height,
    cells: Vec<CellState>,
    walls: FnvHashMap<WallPosition, Wall>,
    passages: Graph<(), (), Undirected>,
    /// Cells the carver has not yet fully evaluated. Generation completes when empty.
    pending: FnvHashSet<CellIndex>,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Maze :: {:?} x {:?}, walls: {}, passages: {}, pending: {}",
               self.width,
               self.height,
               self.walls.len(),
               self.passages.edge_count(),
               self.pending.len())
    }
}

impl Maze {
    /// Build an uncarved maze: every cell enclosed by four walls, walls shared between
    /// adjacent cells created exactly once. Emits a spawn request per floor and per
    /// unique wall.
    ///
    /// The caller is trusted to have clamped the dimensions to its configured range,
    /// only zero is rejected here.
    pub fn build(width: Width, height: Height, scene: &mut dyn SceneSink) -> Result<Maze> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            bail!(ErrorKind::InvalidDimension(w, h));
        }

        let cells_count = w * h;
        let walls_count = 2 * cells_count + w + h;

        let mut cells = Vec::with_capacity(cells_count);
        let mut passages = Graph::with_capacity(cells_count, cells_count);
        let mut pending = utils::fnv_hashset(cells_count);
        for index in 0..cells_count {
            let coord = GridCoordinate::from_row_major_index(index, width);
            cells.push(CellState::new(coord));
            let _ = passages.add_node(());
            pending.insert(CellIndex(index));
            scene.floor_spawned(coord);
        }

        let mut wall_lookup = utils::fnv_hashmap(walls_count);
        for cell in &mut cells {
            for position in walls::positions_around(cell.coord) {
                if !wall_lookup.contains_key(&position) {
                    let wall = Wall::at(position);
                    wall_lookup.insert(position, wall);
                    scene.wall_spawned(&wall);
                }
                cell.walls.push(position);
            }
        }

        Ok(Maze {
            width,
            height,
            cells,
            walls: wall_lookup,
            passages,
            pending,
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn walls_count(&self) -> usize {
        self.walls.len()
    }

    /// Count of walls removed so far, which equals the count of carved passages.
    #[inline]
    pub fn passages_count(&self) -> usize {
        self.passages.edge_count()
    }

    /// The carved passage graph, one node per cell in row major order.
    #[inline]
    pub fn passages(&self) -> &Graph<(), (), Undirected> {
        &self.passages
    }

    #[inline]
    pub fn cell(&self, index: CellIndex) -> &CellState {
        &self.cells[index.0]
    }

    pub fn cell_index(&self, coord: GridCoordinate) -> Option<CellIndex> {
        if self.is_valid_coordinate(coord) {
            Some(CellIndex(coord.row_major_index(self.width)))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Cells orthogonally adjacent to a coordinate, probed in canonical direction order.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|&dir| coord.offset(dir))
            .filter(|&adjacent| self.is_valid_coordinate(adjacent))
            .collect()
    }

    pub fn neighbour_indices(&self, index: CellIndex) -> CellIndexSmallVec {
        let coord = self.cells[index.0].coord;
        self.neighbours(coord)
            .iter()
            .map(|&adjacent| CellIndex(adjacent.row_major_index(self.width)))
            .collect()
    }

    /// Iterate all cell coordinates in row major order.
    pub fn iter(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.cells.iter().map(|cell| cell.coord)
    }

    // ---- carver facing state -------------------------------------------------------

    #[inline]
    pub fn is_visited(&self, index: CellIndex) -> bool {
        self.cells[index.0].visited
    }

    #[inline]
    pub fn mark_visited(&mut self, index: CellIndex) {
        self.cells[index.0].visited = true;
    }

    #[inline]
    pub fn set_parent(&mut self, child: CellIndex, parent: CellIndex) {
        self.cells[child.0].parent = Some(parent);
    }

    #[inline]
    pub fn parent_of(&self, index: CellIndex) -> Option<CellIndex> {
        self.cells[index.0].parent
    }

    /// Drop a fully evaluated cell from the pending set.
    #[inline]
    pub fn retire(&mut self, index: CellIndex) {
        self.pending.remove(&index);
    }

    #[inline]
    pub fn pending_is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The one wall shared by two adjacent cells, found by intersecting their wall
    /// lists. None if the cells are not adjacent or the wall was already removed.
    pub fn shared_wall(&self, a: CellIndex, b: CellIndex) -> Option<WallPosition> {
        let b_walls = &self.cells[b.0].walls;
        self.cells[a.0]
            .walls
            .iter()
            .find(|position| b_walls.contains(position))
            .cloned()
    }

    /// Remove the wall between two adjacent cells, connecting them with a passage.
    /// The wall leaves the lookup and both cells' wall lists in one step and its
    /// disposal is requested from the scene.
    ///
    /// Panics if the cells share no wall: the carver only ever connects a freshly
    /// visited neighbour, so a missing shared wall is a corrupt grid.
    pub fn open_passage(&mut self, a: CellIndex, b: CellIndex, scene: &mut dyn SceneSink) {
        let position = self.shared_wall(a, b).expect("adjacent cells share no wall");
        let wall = self.walls
            .remove(&position)
            .expect("cell wall list references a wall missing from the lookup");

        for &cell_index in &[a, b] {
            let cell_walls = &mut self.cells[cell_index.0].walls;
            if let Some(list_index) = cell_walls.iter().position(|&p| p == position) {
                cell_walls.remove(list_index);
            }
        }

        let _ = self.passages.update_edge(NodeIndex::new(a.0), NodeIndex::new(b.0), ());
        scene.wall_disposed(&wall);
    }

    // ---- wall configuration queries ------------------------------------------------

    /// Is this cell still walled off toward the given direction?
    pub fn is_side_closed(&self, coord: GridCoordinate, dir: Direction) -> bool {
        self.walls.contains_key(&WallPosition::toward(coord, dir))
    }

    /// The final open/closed configuration of one cell, as the directions still closed.
    pub fn closed_sides(&self, coord: GridCoordinate) -> SmallVec<[Direction; 4]> {
        Direction::ALL
            .iter()
            .filter(|&&dir| self.is_side_closed(coord, dir))
            .cloned()
            .collect()
    }

    /// Are two cells connected by a carved passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        match (self.cell_index(a), self.cell_index(b)) {
            (Some(a_index), Some(b_index)) => {
                self.passages
                    .find_edge(NodeIndex::new(a_index.0), NodeIndex::new(b_index.0))
                    .is_some()
            }
            _ => false,
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (Width(w), Height(h)) = (self.width, self.height);

        for y in 0..h {
            for x in 0..w {
                let coord = GridCoordinate::new(x as u32, y as u32);
                let north = if self.is_side_closed(coord, Direction::North) { "---" } else { "   " };
                write!(f, "+{}", north)?;
            }
            writeln!(f, "+")?;

            for x in 0..w {
                let coord = GridCoordinate::new(x as u32, y as u32);
                let west = if self.is_side_closed(coord, Direction::West) { "|" } else { " " };
                write!(f, "{}   ", west)?;
            }
            writeln!(f, "|")?;
        }

        for _ in 0..w {
            write!(f, "+---")?;
        }
        writeln!(f, "+")
    }
}
