//! TOML scenario files
//!
//! A scenario describes a small world (terrain, objects, roofs), the
//! placement settings and the placeable being previewed. The CLI and
//! integration tests build a [`MemoryWorld`] from one.

use crate::core::config::PlacementConfig;
use crate::core::error::{Result, SowgridError};
use crate::core::types::{BiomeMask, HandleId, LayerMask, ObjectId, Pose};
use crate::placement::placeable::Placeable;
use crate::world::memory::MemoryWorld;
use ahash::AHashMap;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root structure of a scenario file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: PlacementConfig,
    /// Placeable to preview; optional for harvest-only scenarios
    #[serde(default)]
    pub placeable: Option<Placeable>,
    #[serde(default)]
    pub root: RootSpec,
    #[serde(default)]
    pub terrain: Vec<TerrainSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    #[serde(default)]
    pub roofs: Vec<RoofSpec>,
}

/// Pose of the root ghost
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RootSpec {
    #[serde(default)]
    pub position: [f32; 3],
    /// Rotation about the vertical axis in degrees
    #[serde(default)]
    pub yaw_deg: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Whether the root ghost carries the piece capability
    #[serde(default = "default_true")]
    pub has_piece: bool,
}

impl Default for RootSpec {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            yaw_deg: 0.0,
            scale: 1.0,
            has_piece: true,
        }
    }
}

impl RootSpec {
    pub fn pose(&self) -> Pose {
        Pose::new(
            Vec3::from_array(self.position),
            Quat::from_rotation_y(self.yaw_deg.to_radians()),
            Vec3::splat(self.scale),
        )
    }
}

/// Terrain rectangle, corners given as `[x, z]`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TerrainSpec {
    pub min: [f32; 2],
    pub max: [f32; 2],
    #[serde(default)]
    pub cultivated: bool,
    #[serde(default)]
    pub biome: BiomeMask,
}

/// Physics layer names usable in scenario files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerName {
    Default,
    StaticSolid,
    DefaultSmall,
    Piece,
    PieceNonsolid,
    Item,
}

impl LayerName {
    pub fn mask(self) -> LayerMask {
        match self {
            LayerName::Default => LayerMask::DEFAULT,
            LayerName::StaticSolid => LayerMask::STATIC_SOLID,
            LayerName::DefaultSmall => LayerMask::DEFAULT_SMALL,
            LayerName::Piece => LayerMask::PIECE,
            LayerName::PieceNonsolid => LayerMask::PIECE_NONSOLID,
            LayerName::Item => LayerMask::ITEM,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColliderSpec {
    /// Offset from the owning object's position
    #[serde(default)]
    pub offset: [f32; 3],
    pub radius: f32,
    pub layer: LayerName,
}

/// A world object, optionally parented to an earlier object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectSpec {
    /// Scenario-local key, referenced by `parent` and the CLI
    pub id: String,
    /// Type name; harvest clustering compares these
    pub name: String,
    pub position: [f32; 3],
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub harvestable: bool,
    #[serde(default)]
    pub colliders: Vec<ColliderSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoofSpec {
    pub center: [f32; 3],
    pub radius: f32,
}

/// A built scenario world plus the lookups the caller needs
#[derive(Debug)]
pub struct ScenarioWorld {
    pub world: MemoryWorld,
    pub root_handle: HandleId,
    pub root_pose: Pose,
    objects: AHashMap<String, ObjectId>,
}

impl ScenarioWorld {
    /// Object id for a scenario-local key
    pub fn object_id(&self, key: &str) -> Option<ObjectId> {
        self.objects.get(key).copied()
    }
}

fn default_scale() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario
            .config
            .validate()
            .map_err(SowgridError::InvalidConfig)?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Populate a [`MemoryWorld`] and spawn the root ghost
    pub fn build_world(&self) -> Result<ScenarioWorld> {
        let mut world = MemoryWorld::new();

        for patch in &self.terrain {
            world.add_terrain(
                Vec3::new(patch.min[0], 0.0, patch.min[1]),
                Vec3::new(patch.max[0], 0.0, patch.max[1]),
                patch.cultivated,
                patch.biome,
            );
        }

        let mut objects: AHashMap<String, ObjectId> = AHashMap::new();
        for spec in &self.objects {
            let parent = match &spec.parent {
                Some(key) => Some(
                    *objects
                        .get(key)
                        .ok_or_else(|| SowgridError::UnknownObject(key.clone()))?,
                ),
                None => None,
            };

            let position = Vec3::from_array(spec.position);
            let id = world.add_object(spec.name.clone(), position, parent, spec.harvestable);
            for collider in &spec.colliders {
                world.add_collider(
                    id,
                    position + Vec3::from_array(collider.offset),
                    collider.radius,
                    collider.layer.mask(),
                );
            }
            objects.insert(spec.id.clone(), id);
        }

        for roof in &self.roofs {
            world.add_roof(Vec3::from_array(roof.center), roof.radius);
        }

        let root_pose = self.root.pose();
        let root_handle = world.spawn_instance(root_pose, self.root.has_piece);

        tracing::debug!(
            objects = objects.len(),
            terrain = self.terrain.len(),
            roofs = self.roofs.len(),
            "built scenario world"
        );

        Ok(ScenarioWorld {
            world,
            root_handle,
            root_pose,
            objects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::host::{HarvestableIndex, TerrainService};

    const SAMPLE_TOML: &str = r#"
        [config]
        rows = 2
        columns = 3

        [placeable]
        name = "sapling_carrot"

        [placeable.growable]
        grow_radius = 0.5
        needs_cultivated_ground = true
        biome = 17

        [root]
        position = [1.0, 0.0, 2.0]
        yaw_deg = 90.0

        [[terrain]]
        min = [-10.0, -10.0]
        max = [10.0, 10.0]
        cultivated = true
        biome = 1

        [[objects]]
        id = "bush"
        name = "RaspberryBush"
        position = [4.0, 0.0, 4.0]
        harvestable = true

        [[objects]]
        id = "bush_leaves"
        name = "leaves"
        position = [4.0, 0.5, 4.0]
        parent = "bush"
        colliders = [{ radius = 0.4, layer = "default" }]
    "#;

    #[test]
    fn test_parse_and_build() {
        let scenario = Scenario::from_toml_str(SAMPLE_TOML).unwrap();
        assert_eq!(scenario.config.rows, 2);
        assert_eq!(scenario.config.columns, 3);
        let placeable = scenario.placeable.as_ref().unwrap();
        assert!(placeable.requires_cultivated_ground());
        assert_eq!(placeable.allowed_biomes(), BiomeMask(17));

        let built = scenario.build_world().unwrap();
        assert_eq!(built.world.object_count(), 2);
        assert_eq!(built.world.collider_count(), 1);
        assert_eq!(built.world.live_instances(), 1);
        assert_eq!(built.root_pose.position, Vec3::new(1.0, 0.0, 2.0));

        let bush = built.object_id("bush").unwrap();
        assert_eq!(built.world.type_name(bush), Some("RaspberryBush"));
        assert!(built.world.classify_at(Vec3::ZERO).unwrap().cultivated);
    }

    #[test]
    fn test_unknown_parent_is_an_error() {
        let toml = r#"
            [[objects]]
            id = "leaf"
            name = "leaf"
            position = [0.0, 0.0, 0.0]
            parent = "missing"
        "#;
        let scenario = Scenario::from_toml_str(toml).unwrap();
        let err = scenario.build_world().unwrap_err();
        assert!(matches!(err, SowgridError::UnknownObject(ref key) if key == "missing"));
    }

    #[test]
    fn test_empty_scenario_defaults() {
        let scenario = Scenario::from_toml_str("").unwrap();
        assert!(scenario.placeable.is_none());
        assert_eq!(scenario.config, PlacementConfig::default());
        assert!(scenario.root.has_piece);
    }
}
