//! Host world boundary: capability traits, in-memory host and scenarios

pub mod host;
pub mod memory;
pub mod scenario;

pub use host::{
    HarvestWorld, HarvestableIndex, Harvester, InstantiateMode, PhysicsQuery, PlacementWorld,
    SceneGraph, ShadeOracle, TerrainSample, TerrainService,
};
pub use memory::MemoryWorld;
pub use scenario::{Scenario, ScenarioWorld};
