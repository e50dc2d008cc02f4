//! Batching of placed geometry items into merged draw units.
//!
//! Many small per cell meshes are grouped into few combined meshes. A combined mesh
//! addresses its vertices with 16 bit indices, so a cluster's summed vertex count must
//! never exceed `MAX_MESH_VERTICES`; a configurable item count cap bounds the cluster
//! size as well. The packing itself is greedy first-fit-sequential: one open cluster at
//! a time, sealed for good the moment the next item would not fit.

use error_chain::bail;
use std::u16;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::scene::SceneSink;
use crate::units::{ClusterIndex, ItemId, ItemsCount, MaterialId, TileLength, VertexCount,
                   Width, Height};
use crate::utils::{self, FnvHashSet};

/// The largest vertex count a combined mesh can address with 16 bit indices.
pub const MAX_MESH_VERTICES: usize = u16::MAX as usize;

/// One placed visual item awaiting batching. The geometry itself stays with the scene;
/// the packer only needs the vertex count and the duplicate guarding identity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlacedItem {
    pub id: ItemId,
    pub position: GridCoordinate,
    pub vertex_count: VertexCount,
    pub material: MaterialId,
}

#[derive(Debug, Copy, Clone)]
pub struct ClusterCapacity {
    pub items: ItemsCount,
    pub vertices: VertexCount,
}

/// An ordered group of placed items whose summed vertex count stays under the capacity
/// ceiling. Clusters are only ever mutated while open inside `pack`; finalization
/// consumes the cluster, so a merged cluster can never change again.
#[derive(Debug, Clone)]
pub struct Cluster {
    index: ClusterIndex,
    capacity: ClusterCapacity,
    members: Vec<PlacedItem>,
    member_ids: FnvHashSet<ItemId>,
    vertex_total: usize,
}

/// One combined draw unit, merged from a sealed cluster. The first member's material
/// stands in for the whole unit: members are assumed visually homogeneous.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedUnit {
    pub cluster: ClusterIndex,
    pub material: MaterialId,
    pub vertex_total: VertexCount,
    pub members: Vec<ItemId>,
}

impl Cluster {
    fn new(index: ClusterIndex, capacity: ClusterCapacity) -> Cluster {
        Cluster {
            index,
            capacity,
            members: Vec::with_capacity(capacity.items.0),
            member_ids: utils::fnv_hashset(capacity.items.0),
            vertex_total: 0,
        }
    }

    #[inline]
    pub fn index(&self) -> ClusterIndex {
        self.index
    }

    #[inline]
    pub fn members(&self) -> &[PlacedItem] {
        &self.members
    }

    #[inline]
    pub fn vertex_total(&self) -> usize {
        self.vertex_total
    }

    /// Would this item still fit under both capacity ceilings?
    pub fn can_accept(&self, item: &PlacedItem) -> bool {
        self.vertex_total + item.vertex_count.0 <= self.capacity.vertices.0
            && self.members.len() < self.capacity.items.0
    }

    fn push(&mut self, item: PlacedItem) -> Result<()> {
        if !self.member_ids.insert(item.id) {
            bail!(ErrorKind::DuplicateMember(item.id.0));
        }
        self.vertex_total += item.vertex_count.0;
        self.members.push(item);
        Ok(())
    }
}

fn validate_capacity(capacity: ClusterCapacity) -> Result<()> {
    if capacity.items.0 == 0 || capacity.vertices.0 == 0 {
        bail!(ErrorKind::InvalidCapacity(capacity.items.0, capacity.vertices.0));
    }
    if capacity.items.0 > MAX_MESH_VERTICES {
        bail!(ErrorKind::CapacityTooLarge(capacity.items.0, MAX_MESH_VERTICES));
    }
    if capacity.vertices.0 > MAX_MESH_VERTICES {
        bail!(ErrorKind::CapacityTooLarge(capacity.vertices.0, MAX_MESH_VERTICES));
    }
    Ok(())
}

/// Assign items, in input order, to a sequence of capacity respecting clusters.
///
/// Only one cluster is ever open: when the next item would break either the vertex or
/// the item count ceiling the open cluster is sealed onto the output and a fresh one
/// opened. Sealed clusters are never revisited, so the member sequence concatenated
/// over all clusters is exactly the input sequence. The final cluster is sealed however
/// full it is; an empty input yields no clusters at all.
///
/// An item whose own vertex count exceeds the ceiling can never be placed and fails the
/// whole run with `ItemExceedsCapacity` rather than silently truncating.
pub fn pack<I>(items: I, capacity: ClusterCapacity) -> Result<Vec<Cluster>>
    where I: IntoIterator<Item = PlacedItem>
{
    validate_capacity(capacity)?;

    let mut sealed: Vec<Cluster> = Vec::new();
    let mut open = Cluster::new(ClusterIndex(0), capacity);

    for item in items {
        if item.vertex_count.0 > capacity.vertices.0 {
            bail!(ErrorKind::ItemExceedsCapacity(item.vertex_count.0, capacity.vertices.0));
        }

        if !open.can_accept(&item) {
            sealed.push(open);
            open = Cluster::new(ClusterIndex(sealed.len()), capacity);
        }
        open.push(item)?;
    }

    if !open.members.is_empty() {
        sealed.push(open);
    }
    Ok(sealed)
}

/// Merge a sealed cluster into one draw unit.
///
/// Emits a hide request per member (their own visuals are deactivated, not destroyed)
/// followed by one merge request for the unit. Consumes the cluster: once merged it is
/// immutable.
pub fn finalize(cluster: Cluster, scene: &mut dyn SceneSink) -> Result<MergedUnit> {
    let representative = match cluster.members.first() {
        Some(member) => member.material,
        None => bail!(ErrorKind::EmptyCluster),
    };

    let unit = MergedUnit {
        cluster: cluster.index,
        material: representative,
        vertex_total: VertexCount(cluster.vertex_total),
        members: cluster.members.iter().map(|member| member.id).collect(),
    };

    for member in &cluster.members {
        scene.item_hidden(member.id);
    }
    scene.cluster_merged(&unit);
    Ok(unit)
}

/// The deterministic order in which the grid's cells are fed to the packer: square
/// tiles of `edge` cells laid over the grid, tile columns advancing before tile rows,
/// row major inside each tile. Positions falling off the grid edge are skipped, so
/// ragged boundary tiles simply hold fewer cells. A zero edge cannot tile anything and
/// is rejected with `InvalidTileLength`.
pub fn tile_order(width: Width, height: Height, edge: TileLength) -> Result<Vec<GridCoordinate>> {
    let (Width(w), Height(h), TileLength(tile)) = (width, height, edge);
    if tile == 0 {
        bail!(ErrorKind::InvalidTileLength);
    }
    let tiles_across = (w + tile - 1) / tile;
    let tiles_down = (h + tile - 1) / tile;

    let mut order = Vec::with_capacity(w * h);
    for tile_column in 0..tiles_across {
        for tile_row in 0..tiles_down {
            for local_y in 0..tile {
                for local_x in 0..tile {
                    let x = tile_column * tile + local_x;
                    let y = tile_row * tile + local_y;
                    if x < w && y < h {
                        order.push(GridCoordinate::new(x as u32, y as u32));
                    }
                }
            }
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::scene::{NullScene, RecordingScene, SceneEvent};

    fn item(id: u32, vertices: usize) -> PlacedItem {
        PlacedItem {
            id: ItemId(id),
            position: GridCoordinate::new(id % 3, id / 3),
            vertex_count: VertexCount(vertices),
            material: MaterialId(7),
        }
    }

    fn capacity(items: usize, vertices: usize) -> ClusterCapacity {
        ClusterCapacity {
            items: ItemsCount(items),
            vertices: VertexCount(vertices),
        }
    }

    #[test]
    fn item_cap_binds_before_vertex_cap() {
        // Nine 100 vertex items under caps (4 items, 1000 vertices): [4, 4, 1].
        let items: Vec<PlacedItem> = (0..9).map(|n| item(n, 100)).collect();
        let clusters = pack(items, capacity(4, 1000)).unwrap();

        let sizes: Vec<usize> = clusters.iter().map(|c| c.members().len()).collect();
        assert_eq!(sizes, vec![4, 4, 1]);
        assert_eq!(clusters[2].vertex_total(), 100);
    }

    #[test]
    fn vertex_cap_seals_the_open_cluster() {
        let items = vec![item(0, 400), item(1, 400), item(2, 400)];
        let clusters = pack(items, capacity(10, 1000)).unwrap();
        let sizes: Vec<usize> = clusters.iter().map(|c| c.members().len()).collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[test]
    fn packing_preserves_input_order_and_loses_nothing() {
        fn property(vertex_counts: Vec<u16>) -> bool {
            let items: Vec<PlacedItem> = vertex_counts.iter()
                .enumerate()
                .map(|(n, &v)| item(n as u32, v as usize % 500 + 1))
                .collect();
            let cap = capacity(7, 900);
            let clusters = pack(items.clone(), cap).unwrap();

            let repacked: Vec<ItemId> = clusters.iter()
                .flat_map(|c| c.members().iter().map(|m| m.id))
                .collect();
            let original: Vec<ItemId> = items.iter().map(|i| i.id).collect();

            let ceilings_hold = clusters.iter()
                .all(|c| c.vertex_total() <= 900 && c.members().len() <= 7);

            repacked == original && ceilings_hold
        }
        quickcheck(property as fn(Vec<u16>) -> bool);
    }

    #[test]
    fn cluster_indices_follow_creation_order() {
        let items: Vec<PlacedItem> = (0..5).map(|n| item(n, 10)).collect();
        let clusters = pack(items, capacity(2, 1000)).unwrap();
        let indices: Vec<ClusterIndex> = clusters.iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![ClusterIndex(0), ClusterIndex(1), ClusterIndex(2)]);
    }

    #[test]
    fn oversized_item_is_rejected() {
        let items = vec![item(0, 10), item(1, 2000)];
        match pack(items, capacity(10, 1000)) {
            Err(Error(ErrorKind::ItemExceedsCapacity(vertices, cap), _)) => {
                assert_eq!((vertices, cap), (2000, 1000));
            }
            _ => panic!("expected ItemExceedsCapacity"),
        }
    }

    #[test]
    fn duplicate_member_is_rejected() {
        let items = vec![item(3, 10), item(3, 10)];
        match pack(items, capacity(10, 1000)) {
            Err(Error(ErrorKind::DuplicateMember(id), _)) => assert_eq!(id, 3),
            _ => panic!("expected DuplicateMember"),
        }
    }

    #[test]
    fn capacity_above_the_index_limit_is_rejected() {
        match pack(vec![item(0, 1)], capacity(70_000, 1000)) {
            Err(Error(ErrorKind::CapacityTooLarge(cap, limit), _)) => {
                assert_eq!((cap, limit), (70_000, MAX_MESH_VERTICES));
            }
            _ => panic!("expected CapacityTooLarge"),
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        // A zero item cap would otherwise seal an empty cluster and then let every
        // later cluster hold one member against a cap of zero.
        for &(items, vertices) in &[(0, 1000), (4, 0), (0, 0)] {
            match pack(vec![item(0, 1)], capacity(items, vertices)) {
                Err(Error(ErrorKind::InvalidCapacity(i, v), _)) => {
                    assert_eq!((i, v), (items, vertices));
                }
                _ => panic!("expected InvalidCapacity for {} items / {} vertices",
                            items, vertices),
            }
        }
    }

    #[test]
    fn tile_order_rejects_a_zero_edge() {
        match tile_order(Width(4), Height(3), TileLength(0)) {
            Err(Error(ErrorKind::InvalidTileLength, _)) => {}
            _ => panic!("expected InvalidTileLength"),
        }
    }

    #[test]
    fn empty_input_packs_to_no_clusters() {
        let clusters = pack(Vec::new(), capacity(4, 1000)).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn finalize_takes_the_first_members_material() {
        let mut items = vec![item(0, 10), item(1, 20)];
        items[0].material = MaterialId(1);
        items[1].material = MaterialId(2);
        let clusters = pack(items, capacity(10, 1000)).unwrap();

        let mut scene = RecordingScene::new();
        let unit = finalize(clusters.into_iter().next().unwrap(), &mut scene).unwrap();

        assert_eq!(unit.material, MaterialId(1));
        assert_eq!(unit.vertex_total, VertexCount(30));
        assert_eq!(unit.members, vec![ItemId(0), ItemId(1)]);

        // Members hidden first, then one merge request.
        assert_eq!(scene.events,
                   vec![SceneEvent::ItemHidden(ItemId(0)),
                        SceneEvent::ItemHidden(ItemId(1)),
                        SceneEvent::ClusterMerged(unit)]);
    }

    #[test]
    fn finalizing_an_empty_cluster_fails() {
        let empty = Cluster::new(ClusterIndex(0), capacity(4, 1000));
        match finalize(empty, &mut NullScene) {
            Err(Error(ErrorKind::EmptyCluster, _)) => {}
            _ => panic!("expected EmptyCluster"),
        }
    }

    #[test]
    fn tile_order_walks_tile_columns_first() {
        // 4 x 3 grid with 2 cell tiles: tiles stack (0,0), (0,1), (1,0), (1,1) with the
        // bottom tiles ragged.
        let order = tile_order(Width(4), Height(3), TileLength(2)).unwrap();
        let expected: Vec<GridCoordinate> = [
            (0, 0), (1, 0), (0, 1), (1, 1), // tile column 0, tile row 0
            (0, 2), (1, 2),                 // tile column 0, tile row 1 (ragged)
            (2, 0), (3, 0), (2, 1), (3, 1), // tile column 1, tile row 0
            (2, 2), (3, 2),                 // tile column 1, tile row 1 (ragged)
        ].iter().map(|&(x, y)| GridCoordinate::new(x, y)).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn tile_order_covers_every_cell_once() {
        let order = tile_order(Width(7), Height(5), TileLength(3)).unwrap();
        assert_eq!(order.len(), 35);
        let mut seen = utils::fnv_hashset(35);
        for coord in order {
            assert!(seen.insert(coord));
        }
    }
}
