//! **mazegen** generates perfect rectangular grid mazes and batches their geometry
//! into a bounded number of merged draw units.
//!
//! The carver is a randomized depth first spanning tree walk over a shared wall grid;
//! the batcher is a greedy first-fit-sequential packer under the 16 bit mesh index
//! ceiling. Rendering stays outside the crate: hosts implement [`scene::SceneSink`]
//! and receive spawn, dispose and merge requests as a generation runs.

pub mod cells;
pub mod clusters;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod pipeline;
pub mod scene;
pub mod units;
pub mod walls;
mod utils;
