//! The full generate request: build the grid, carve the maze, batch the geometry.
//!
//! One call performs the whole run synchronously on the calling thread; nothing here is
//! reentrant and a second run must not start until the first returns. Regeneration is
//! teardown-then-rebuild: drop the previous `Generation`, let the scene clear what it
//! spawned, then call `generate` again. A failed run returns only the error, never a
//! partial maze.

use rand::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::clusters::{self, Cluster, ClusterCapacity, MergedUnit, PlacedItem, MAX_MESH_VERTICES};
use crate::errors::*;
use crate::generators;
use crate::grid::Maze;
use crate::scene::SceneSink;
use crate::units::{Height, ItemId, ItemsCount, MaterialId, TileLength, VertexCount, Width};

#[derive(Debug, Copy, Clone)]
pub struct GenerateOptions {
    pub width: Width,
    pub height: Height,
    /// Edge length of one packing tile; a tile's cell count is also the item cap of a
    /// cluster.
    pub cluster_edge: TileLength,
    /// Vertex count of the floor geometry placed on every cell. The floors are
    /// instances of one prefab, so one count and one material cover them all.
    pub floor_vertices: VertexCount,
    pub floor_material: MaterialId,
}

/// Everything a generate request produces. Dropping it is the teardown of the run.
#[derive(Debug)]
pub struct Generation {
    pub maze: Maze,
    pub clusters: Vec<Cluster>,
    pub merged: Vec<MergedUnit>,
}

/// Run a whole generation: grid build, depth first carve, tile ordered item
/// enumeration, capacity packing and per cluster merge. The scene receives the spawn,
/// dispose, hide and merge requests in that order as the run progresses.
pub fn generate(options: &GenerateOptions,
                rng: &mut XorShiftRng,
                scene: &mut dyn SceneSink)
                -> Result<Generation> {

    let mut maze = Maze::build(options.width, options.height, scene)?;
    generators::recursive_backtracker(&mut maze, rng, scene);

    let items = floor_items(&maze, options)?;
    let capacity = ClusterCapacity {
        items: ItemsCount(options.cluster_edge.0 * options.cluster_edge.0),
        vertices: VertexCount(MAX_MESH_VERTICES),
    };
    let clusters = clusters::pack(items, capacity)?;

    let mut merged = Vec::with_capacity(clusters.len());
    for cluster in &clusters {
        merged.push(clusters::finalize(cluster.clone(), scene)?);
    }

    Ok(Generation { maze, clusters, merged })
}

/// One placed floor item per cell, enumerated in the deterministic tile order and
/// identified by the cell's row major index.
fn floor_items(maze: &Maze, options: &GenerateOptions) -> Result<Vec<PlacedItem>> {
    let order = clusters::tile_order(maze.width(), maze.height(), options.cluster_edge)?;
    Ok(order.into_iter()
        .map(|coord: GridCoordinate| {
            PlacedItem {
                id: ItemId(coord.row_major_index(maze.width()) as u32),
                position: coord,
                vertex_count: options.floor_vertices,
                material: options.floor_material,
            }
        })
        .collect())
}
