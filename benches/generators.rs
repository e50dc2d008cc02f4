use criterion::{criterion_group, criterion_main, Criterion};
use mazegen::{
    clusters::{self, ClusterCapacity, PlacedItem},
    generators,
    grid::Maze,
    scene::NullScene,
    units::{Height, ItemId, ItemsCount, MaterialId, VertexCount, Width},
};
use rand::{SeedableRng, XorShiftRng};

fn bench_recursive_backtracker_32(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_32", |b| {
        b.iter(|| {
            let mut maze = Maze::build(Width(32), Height(32), &mut NullScene).unwrap();
            let mut rng = XorShiftRng::from_seed([1, 2, 3, 4]);
            generators::recursive_backtracker(&mut maze, &mut rng, &mut NullScene)
        })
    });
}

fn bench_pack_1024_items(c: &mut Criterion) {
    let items: Vec<PlacedItem> = (0..1024)
        .map(|n| PlacedItem {
            id: ItemId(n),
            position: mazegen::cells::GridCoordinate::new(n % 32, n / 32),
            vertex_count: VertexCount(96),
            material: MaterialId(0),
        })
        .collect();
    let capacity = ClusterCapacity {
        items: ItemsCount(64),
        vertices: VertexCount(clusters::MAX_MESH_VERTICES),
    };

    c.bench_function("pack_1024_items", move |b| {
        b.iter(|| clusters::pack(items.clone(), capacity).unwrap())
    });
}

criterion_group!(benches, bench_recursive_backtracker_32, bench_pack_1024_items);
criterion_main!(benches);
