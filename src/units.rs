//! Single field wrapper types, which are more descriptive and type safe than raw numbers.

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Edge length in cells of one square packing tile.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct TileLength(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct VertexCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct ItemsCount(pub usize);

/// Row major index of a cell in the maze's cell arena.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellIndex(pub usize);

/// Creation order index of a cluster.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct ClusterIndex(pub usize);

/// Identity of one placed geometry item fed to the packer.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct ItemId(pub u32);

/// Opaque handle to the visual material of a placed item.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct MaterialId(pub u32);
