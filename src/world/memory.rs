//! In-memory host world
//!
//! Implements every host capability over plain collections so the engine can
//! run headless: terrain patches, sphere colliders owned by world objects,
//! roofs, and a scene graph that tracks live preview instances.

use crate::core::types::{BiomeMask, ColliderId, HandleId, HarvestableRef, LayerMask, ObjectId, Pose};
use crate::placement::placeable::Growable;
use crate::world::host::{
    HarvestableIndex, Harvester, InstantiateMode, PhysicsQuery, SceneGraph, ShadeOracle,
    TerrainSample, TerrainService,
};
use ahash::AHashMap;
use glam::{Vec2, Vec3};

/// Axis-aligned terrain rectangle on the XZ plane
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainPatch {
    pub min: Vec2,
    pub max: Vec2,
    pub cultivated: bool,
    pub biome: BiomeMask,
}

impl TerrainPatch {
    fn contains(&self, position: Vec3) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.z >= self.min.y
            && position.z <= self.max.y
    }
}

/// Something in the world that can own colliders
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    pub id: ObjectId,
    pub name: String,
    pub position: Vec3,
    pub parent: Option<ObjectId>,
    pub harvestable: bool,
    pub harvested: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SphereCollider {
    pub id: ColliderId,
    pub owner: ObjectId,
    pub center: Vec3,
    pub radius: f32,
    pub layer: LayerMask,
}

/// Roof that shades everything within `radius` of `center` on the XZ plane
#[derive(Debug, Clone, PartialEq)]
pub struct Roof {
    pub center: Vec3,
    pub radius: f32,
}

/// A scene-graph instance
#[derive(Debug, Clone, PartialEq)]
pub struct SceneInstance {
    pub pose: Pose,
    pub mode: InstantiateMode,
    pub highlighted: bool,
    pub has_piece: bool,
}

/// Headless world implementing all host capabilities
#[derive(Debug, Default)]
pub struct MemoryWorld {
    terrain: Vec<TerrainPatch>,
    objects: AHashMap<ObjectId, WorldObject>,
    colliders: AHashMap<ColliderId, SphereCollider>,
    roofs: Vec<Roof>,
    instances: AHashMap<HandleId, SceneInstance>,
    next_object: u64,
    next_collider: u64,
    next_handle: u64,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a terrain patch covering `min..=max` on the XZ plane
    ///
    /// Later patches take precedence where they overlap earlier ones.
    pub fn add_terrain(&mut self, min: Vec3, max: Vec3, cultivated: bool, biome: BiomeMask) {
        self.terrain.push(TerrainPatch {
            min: Vec2::new(min.x.min(max.x), min.z.min(max.z)),
            max: Vec2::new(min.x.max(max.x), min.z.max(max.z)),
            cultivated,
            biome,
        });
    }

    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        position: Vec3,
        parent: Option<ObjectId>,
        harvestable: bool,
    ) -> ObjectId {
        self.next_object += 1;
        let id = ObjectId(self.next_object);
        self.objects.insert(
            id,
            WorldObject {
                id,
                name: name.into(),
                position,
                parent,
                harvestable,
                harvested: false,
            },
        );
        id
    }

    pub fn add_collider(&mut self, owner: ObjectId, center: Vec3, radius: f32, layer: LayerMask) -> ColliderId {
        self.next_collider += 1;
        let id = ColliderId(self.next_collider);
        self.colliders.insert(
            id,
            SphereCollider {
                id,
                owner,
                center,
                radius,
                layer,
            },
        );
        id
    }

    pub fn add_roof(&mut self, center: Vec3, radius: f32) {
        self.roofs.push(Roof { center, radius });
    }

    /// Spawn a simulated scene instance, e.g. the placement tool's root ghost
    pub fn spawn_instance(&mut self, pose: Pose, has_piece: bool) -> HandleId {
        self.insert_instance(SceneInstance {
            pose,
            mode: InstantiateMode::Simulated,
            highlighted: false,
            has_piece,
        })
    }

    fn insert_instance(&mut self, instance: SceneInstance) -> HandleId {
        self.next_handle += 1;
        let handle = HandleId(self.next_handle);
        self.instances.insert(handle, instance);
        handle
    }

    pub fn instance(&self, handle: HandleId) -> Option<&SceneInstance> {
        self.instances.get(&handle)
    }

    /// Number of scene instances that have not been destroyed
    pub fn live_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(&id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Harvestables that have not been harvested yet, sorted by id
    pub fn remaining_harvestables(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self
            .objects
            .values()
            .filter(|obj| obj.harvestable && !obj.harvested)
            .map(|obj| obj.id)
            .collect();
        ids.sort();
        ids
    }

    fn is_descendant_of(&self, mut id: ObjectId, ancestor: ObjectId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.objects.get(&id).and_then(|obj| obj.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }
}

impl TerrainService for MemoryWorld {
    fn classify_at(&self, position: Vec3) -> Option<TerrainSample> {
        self.terrain
            .iter()
            .rev()
            .find(|patch| patch.contains(position))
            .map(|patch| TerrainSample {
                cultivated: patch.cultivated,
                biome: patch.biome,
            })
    }
}

impl PhysicsQuery for MemoryWorld {
    fn overlap_sphere(&self, position: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderId> {
        let mut hits: Vec<ColliderId> = self
            .colliders
            .values()
            .filter(|collider| collider.layer.intersects(mask))
            .filter(|collider| collider.center.distance(position) <= radius + collider.radius)
            .map(|collider| collider.id)
            .collect();
        hits.sort();
        hits
    }
}

impl ShadeOracle for MemoryWorld {
    fn is_roofed(&self, position: Vec3, _growable: &Growable) -> bool {
        self.roofs.iter().any(|roof| {
            let offset = Vec2::new(position.x - roof.center.x, position.z - roof.center.z);
            offset.length() <= roof.radius
        })
    }
}

impl SceneGraph for MemoryWorld {
    fn clone_instance(&mut self, source: HandleId, mode: InstantiateMode) -> HandleId {
        let (pose, has_piece) = self
            .instances
            .get(&source)
            .map(|instance| (instance.pose, instance.has_piece))
            .unwrap_or((Pose::default(), false));

        self.insert_instance(SceneInstance {
            pose,
            mode,
            highlighted: false,
            has_piece,
        })
    }

    fn destroy(&mut self, handle: HandleId) {
        self.instances.remove(&handle);
    }

    fn set_pose(&mut self, handle: HandleId, pose: &Pose) {
        if let Some(instance) = self.instances.get_mut(&handle) {
            instance.pose = *pose;
        }
    }

    fn set_highlight(&mut self, handle: HandleId, invalid: bool) {
        if let Some(instance) = self.instances.get_mut(&handle) {
            instance.highlighted = invalid;
        }
    }

    fn has_piece(&self, handle: HandleId) -> bool {
        self.instances
            .get(&handle)
            .map(|instance| instance.has_piece)
            .unwrap_or(false)
    }
}

impl HarvestableIndex for MemoryWorld {
    fn owning_harvestable(&self, collider: ColliderId) -> Option<HarvestableRef> {
        let mut current = self.colliders.get(&collider).map(|c| c.owner);
        while let Some(id) = current {
            let obj = self.objects.get(&id)?;
            if obj.harvestable {
                return (!obj.harvested).then_some(id);
            }
            current = obj.parent;
        }
        None
    }

    fn type_name(&self, harvestable: HarvestableRef) -> Option<&str> {
        self.objects.get(&harvestable).map(|obj| obj.name.as_str())
    }

    fn root_position(&self, harvestable: HarvestableRef) -> Option<Vec3> {
        let mut obj = self.objects.get(&harvestable)?;
        while let Some(parent) = obj.parent.and_then(|id| self.objects.get(&id)) {
            obj = parent;
        }
        Some(obj.position)
    }
}

impl Harvester for MemoryWorld {
    fn harvest(&mut self, harvestable: HarvestableRef) -> bool {
        match self.objects.get_mut(&harvestable) {
            Some(obj) if obj.harvestable && !obj.harvested => obj.harvested = true,
            _ => return false,
        }

        let owned: Vec<ColliderId> = self
            .colliders
            .values()
            .filter(|collider| self.is_descendant_of(collider.owner, harvestable))
            .map(|collider| collider.id)
            .collect();
        for id in owned {
            self.colliders.remove(&id);
        }

        true
    }
}
