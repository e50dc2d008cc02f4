use rand::{Rng, XorShiftRng};

use crate::grid::Maze;
use crate::scene::SceneSink;
use crate::units::CellIndex;
use crate::cells::GridCoordinate;

/// Apply the recursive backtracker (randomized depth first search) maze generation
/// algorithm to an uncarved grid.
///
/// Starting from a random cell on the top row, the walk repeatedly picks a random
/// adjacent cell; a never visited pick has the shared wall between the two cells removed
/// and becomes the new walk head, remembering where it came from. When every adjacent
/// cell has been visited the walk retreats along the parent chain until it finds a cell
/// with an unvisited neighbour to resume from, retiring fully evaluated cells as it
/// goes. Generation completes when no cell is left pending.
///
/// A wall is only ever removed on the first visit of the far cell, so the carved
/// passages form a spanning tree: every cell reachable, no cycles, exactly
/// `width * height - 1` walls removed. Each cell becomes the walk head at most once per
/// passage and is retired exactly once, making the whole carve O(cells).
///
/// The grid is mutated in place and a disposal request is emitted to the scene for
/// every removed wall, in removal order. Given the same grid dimensions and rng seed
/// the same maze is carved every time.
pub fn recursive_backtracker(maze: &mut Maze, rng: &mut XorShiftRng, scene: &mut dyn SceneSink) {
    let start_x = (rng.gen::<usize>() % maze.width().0) as u32;
    let mut current = maze.cell_index(GridCoordinate::new(start_x, 0))
        .expect("start cell missing from the top row");

    while !maze.pending_is_empty() {
        maze.mark_visited(current);
        let mut candidates = maze.neighbour_indices(current);

        loop {
            if candidates.is_empty() {
                // Everything around the walk head is visited (or it never had
                // neighbours at all on a degenerate grid): retreat.
                if let Some(resume_from) = backtrack(maze, current) {
                    current = resume_from;
                }
                break;
            }

            let choice = rng.gen::<usize>() % candidates.len();
            let target = candidates[choice];

            if !maze.is_visited(target) {
                maze.open_passage(current, target, scene);
                maze.set_parent(target, current);
                maze.retire(current);
                current = target;
                break;
            }

            candidates.remove(choice);
        }
    }
}

/// Retreat from a dead end: walk up the parent chain, retiring every cell whose
/// neighbours are all visited, until reaching one that can still grow the walk.
/// Returns None when the pending set drains, which completes generation.
fn backtrack(maze: &mut Maze, from: CellIndex) -> Option<CellIndex> {
    let mut evaluated = from;
    loop {
        let any_unvisited = maze.neighbour_indices(evaluated)
            .iter()
            .any(|&neighbour| !maze.is_visited(neighbour));
        if any_unvisited {
            return Some(evaluated);
        }

        maze.retire(evaluated);
        if maze.pending_is_empty() {
            return None;
        }

        // The start cell is retired last on its chain, so a pending, fully evaluated
        // cell always has a parent to retreat to.
        evaluated = maze.parent_of(evaluated)
            .expect("fully evaluated cell without a parent while cells remain pending");
    }
}
