//! The seam between the core and whatever renders it.
//!
//! The core never holds a handle to a renderable resource. Instead it emits spawn,
//! dispose and merge requests through a `SceneSink` owned by the caller. A live host
//! instantiates and tears down visual objects in response; a headless host can ignore
//! everything or record the stream.

use crate::cells::GridCoordinate;
use crate::clusters::MergedUnit;
use crate::units::ItemId;
use crate::walls::Wall;

/// Receiver for the core's rendering requests. All methods default to no-ops so hosts
/// implement only what they draw.
pub trait SceneSink {
    /// A floor should exist at this cell.
    fn floor_spawned(&mut self, _coord: GridCoordinate) {}

    /// A wall should exist at this position.
    fn wall_spawned(&mut self, _wall: &Wall) {}

    /// The carver removed this wall; its visual object should be destroyed or hidden.
    fn wall_disposed(&mut self, _wall: &Wall) {}

    /// A merged cluster supersedes this item; deactivate its own visual, do not destroy
    /// it, so a later regeneration can restore it without a full teardown.
    fn item_hidden(&mut self, _item: ItemId) {}

    /// Combine the unit's members into one drawable using its representative material.
    fn cluster_merged(&mut self, _unit: &MergedUnit) {}
}

/// Discards every request.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullScene;

impl SceneSink for NullScene {}

/// One recorded rendering request.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    FloorSpawned(GridCoordinate),
    WallSpawned(Wall),
    WallDisposed(Wall),
    ItemHidden(ItemId),
    ClusterMerged(MergedUnit),
}

/// Buffers the request stream in arrival order. Used by the tests and useful to any
/// host that replays the stream against its own scene graph.
#[derive(Debug, Default, Clone)]
pub struct RecordingScene {
    pub events: Vec<SceneEvent>,
}

impl RecordingScene {
    pub fn new() -> RecordingScene {
        RecordingScene { events: Vec::new() }
    }

    /// The positions of disposed walls in removal order.
    pub fn disposed_walls(&self) -> Vec<Wall> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                SceneEvent::WallDisposed(wall) => Some(wall),
                _ => None,
            })
            .collect()
    }
}

impl SceneSink for RecordingScene {
    fn floor_spawned(&mut self, coord: GridCoordinate) {
        self.events.push(SceneEvent::FloorSpawned(coord));
    }

    fn wall_spawned(&mut self, wall: &Wall) {
        self.events.push(SceneEvent::WallSpawned(*wall));
    }

    fn wall_disposed(&mut self, wall: &Wall) {
        self.events.push(SceneEvent::WallDisposed(*wall));
    }

    fn item_hidden(&mut self, item: ItemId) {
        self.events.push(SceneEvent::ItemHidden(item));
    }

    fn cluster_merged(&mut self, unit: &MergedUnit) {
        self.events.push(SceneEvent::ClusterMerged(unit.clone()));
    }
}
