use docopt::Docopt;
use mazegen::{
    pipeline::{generate, GenerateOptions},
    scene::SceneSink,
    units::{Height, ItemId, MaterialId, TileLength, VertexCount, Width},
    walls::Wall,
};
use rand::{SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use std::{
    cmp,
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver -h | --help
    mazegen_driver [--grid-width=<w> --grid-height=<h>] [--cluster-edge=<n>] [--floor-vertices=<v>] [--seed=<s>] [--text-out=<path>] [--quiet]

Options:
    -h --help            Show this screen.
    --grid-width=<w>     The grid width in a w*h maze, clamped to 10..=250 [default: 10].
    --grid-height=<h>    The grid height in a w*h maze, clamped to 10..=250 [default: 10].
    --cluster-edge=<n>   Cell edge length of one packing tile, clamped to 8..=64. A tile's cell count is also the item cap of a mesh cluster [default: 8].
    --floor-vertices=<v> Vertex count of one floor mesh [default: 96].
    --seed=<s>           Seed the maze rng for a reproducible maze.
    --text-out=<path>    Also write the text rendering of the maze to a file.
    --quiet              Skip printing the maze itself, only report the run summary.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_cluster_edge: usize,
    flag_floor_vertices: usize,
    flag_seed: Option<u32>,
    flag_text_out: String,
    flag_quiet: bool,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Core(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }
        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

/// Counts the rendering requests a real host would act upon.
#[derive(Debug, Default)]
struct SummaryScene {
    floors_spawned: usize,
    walls_spawned: usize,
    walls_disposed: usize,
    items_hidden: usize,
    clusters_merged: usize,
}

impl SceneSink for SummaryScene {
    fn floor_spawned(&mut self, _: mazegen::cells::GridCoordinate) {
        self.floors_spawned += 1;
    }
    fn wall_spawned(&mut self, _: &Wall) {
        self.walls_spawned += 1;
    }
    fn wall_disposed(&mut self, _: &Wall) {
        self.walls_disposed += 1;
    }
    fn item_hidden(&mut self, _: ItemId) {
        self.items_hidden += 1;
    }
    fn cluster_merged(&mut self, _: &mazegen::clusters::MergedUnit) {
        self.clusters_merged += 1;
    }
}

fn main() -> Result<()> {

    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    // The core trusts its caller to range clamp raw input, which is this driver.
    let width = clamp(args.flag_grid_width, 10, 250);
    let height = clamp(args.flag_grid_height, 10, 250);
    let cluster_edge = clamp(args.flag_cluster_edge, 8, 64);

    let options = GenerateOptions {
        width: Width(width),
        height: Height(height),
        cluster_edge: TileLength(cluster_edge),
        floor_vertices: VertexCount(args.flag_floor_vertices),
        floor_material: MaterialId(0),
    };

    let mut rng = match args.flag_seed {
        Some(seed) => XorShiftRng::from_seed([seed, 0x9e37_79b9, 0x8f1b_bcdc, 0xca62_c1d6]),
        None => rand::weak_rng(),
    };

    let mut scene = SummaryScene::default();
    let generation = generate(&options, &mut rng, &mut scene)?;

    let maze_text = format!("{}", generation.maze);
    if !args.flag_quiet {
        println!("{}", maze_text);
    }

    if !args.flag_text_out.is_empty() {
        write_text_to_file(&maze_text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    println!("maze {}x{}: {} walls removed, {} remaining",
             width,
             height,
             scene.walls_disposed,
             generation.maze.walls_count());
    println!("{} floors packed into {} clusters (item cap {}, vertex ceiling {})",
             scene.floors_spawned,
             generation.merged.len(),
             cluster_edge * cluster_edge,
             mazegen::clusters::MAX_MESH_VERTICES);
    for unit in &generation.merged {
        println!("  cluster {:>3}: {:>4} items, {:>6} vertices",
                 unit.cluster.0,
                 unit.members.len(),
                 unit.vertex_total.0);
    }

    Ok(())
}

fn clamp(value: usize, min: usize, max: usize) -> usize {
    cmp::min(cmp::max(value, min), max)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
