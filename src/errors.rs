//! Crate wide error taxonomy.
//!
//! `InvalidDimension`, `InvalidCapacity` and `InvalidTileLength` are the user input
//! adjacent conditions; the remaining kinds are contract violations that abort the whole
//! generation run. A failed run leaves nothing partial behind: callers regenerate from
//! scratch or not at all.

use error_chain::*;

error_chain! {
    errors {
        /// Maze dimensions must both be positive.
        InvalidDimension(width: usize, height: usize) {
            description("invalid maze dimension")
            display("invalid maze dimensions {}x{}, both must be positive", width, height)
        }

        /// A single item's vertex count alone breaks the cluster vertex ceiling, so it can
        /// never be placed in any cluster.
        ItemExceedsCapacity(vertices: usize, capacity: usize) {
            description("item exceeds cluster vertex capacity")
            display("item with {} vertices can never fit the cluster ceiling of {}",
                    vertices, capacity)
        }

        /// A cluster with zero members reached finalization.
        EmptyCluster {
            description("cannot merge an empty cluster")
        }

        /// The same item was added twice to one cluster.
        DuplicateMember(item: u32) {
            description("duplicate cluster member")
            display("item {} is already a member of this cluster", item)
        }

        /// Cluster capacities must both be positive: a zero item or vertex cap makes
        /// every cluster unable to accept even one item.
        InvalidCapacity(items: usize, vertices: usize) {
            description("invalid cluster capacity")
            display("invalid cluster capacity of {} items / {} vertices, both must be positive",
                    items, vertices)
        }

        /// A packing tile of zero cells cannot tile the grid.
        InvalidTileLength {
            description("tile edge must be positive")
        }

        /// A configured cluster capacity exceeds the 16-bit mesh index limit.
        CapacityTooLarge(capacity: usize, limit: usize) {
            description("cluster capacity exceeds the mesh index limit")
            display("cluster capacity {} exceeds the mesh index limit of {}", capacity, limit)
        }
    }
}
