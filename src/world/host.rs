//! Capabilities the engine consumes from the host simulation
//!
//! The engine never talks to a live physics scene, terrain or scene graph
//! directly. Each concern is a trait so the validator, ghost manager and
//! cluster finder can be driven by [`MemoryWorld`](super::MemoryWorld) in
//! tests and by the real host in game.

use crate::core::types::{BiomeMask, ColliderId, HandleId, HarvestableRef, LayerMask, Pose};
use crate::placement::placeable::Growable;
use glam::Vec3;

/// Terrain classification at a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainSample {
    pub cultivated: bool,
    pub biome: BiomeMask,
}

/// Terrain classification service
pub trait TerrainService {
    /// `None` when no terrain data exists at `position`
    fn classify_at(&self, position: Vec3) -> Option<TerrainSample>;
}

/// Physical overlap queries against the live world
pub trait PhysicsQuery {
    fn overlap_sphere(&self, position: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderId>;

    fn check_sphere(&self, position: Vec3, radius: f32, mask: LayerMask) -> bool {
        !self.overlap_sphere(position, radius, mask).is_empty()
    }
}

/// Overhead occlusion for growables
pub trait ShadeOracle {
    fn is_roofed(&self, position: Vec3, growable: &Growable) -> bool;
}

/// How a scene-graph clone participates in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstantiateMode {
    /// Full participant: collision, physics, networking
    Simulated,
    /// Visual only, created on the preview layer and never registered with physics
    Cosmetic,
}

/// Scene-graph instantiation and decoration
pub trait SceneGraph {
    fn clone_instance(&mut self, source: HandleId, mode: InstantiateMode) -> HandleId;
    fn destroy(&mut self, handle: HandleId);
    fn set_pose(&mut self, handle: HandleId, pose: &Pose);
    /// Toggle the "invalid placement" decoration
    fn set_highlight(&mut self, handle: HandleId, invalid: bool);
    /// Whether the instance carries the placeable-piece capability
    fn has_piece(&self, handle: HandleId) -> bool;
}

/// Lookup from colliders to the harvestables that own them
pub trait HarvestableIndex {
    /// Walk ownership upward from the collider to the first harvestable ancestor
    fn owning_harvestable(&self, collider: ColliderId) -> Option<HarvestableRef>;
    fn type_name(&self, harvestable: HarvestableRef) -> Option<&str>;
    fn root_position(&self, harvestable: HarvestableRef) -> Option<Vec3>;
}

/// Commits a harvest on a single target
pub trait Harvester {
    /// Returns false when the target was already gone
    fn harvest(&mut self, harvestable: HarvestableRef) -> bool;
}

/// Everything the placement validator queries
pub trait PlacementWorld: TerrainService + PhysicsQuery + ShadeOracle {}

impl<T: TerrainService + PhysicsQuery + ShadeOracle> PlacementWorld for T {}

/// Everything the harvest cluster finder queries
pub trait HarvestWorld: PhysicsQuery + HarvestableIndex {}

impl<T: PhysicsQuery + HarvestableIndex> HarvestWorld for T {}
