//! Per-cell placement legality
//!
//! Predicates run in a fixed order and the first failure wins. Terrain checks
//! come first because they are cheap and make the physics queries pointless
//! when they fail.

use crate::core::config::PlacementConfig;
use crate::placement::placeable::Placeable;
use crate::placement::status::Status;
use crate::world::host::PlacementWorld;
use glam::Vec3;

/// Probe radius for overlap prevention on non-growables
pub const OVERLAP_PROBE_RADIUS: f32 = 0.025;

pub struct PlacementValidator<'a> {
    config: &'a PlacementConfig,
}

impl<'a> PlacementValidator<'a> {
    pub fn new(config: &'a PlacementConfig) -> Self {
        Self { config }
    }

    /// Status of placing `placeable` at `position`
    pub fn evaluate<W: PlacementWorld + ?Sized>(
        &self,
        position: Vec3,
        placeable: &Placeable,
        world: &W,
    ) -> Status {
        let terrain = world.classify_at(position);
        if terrain.is_none() {
            tracing::trace!(?position, "no terrain data, terrain checks pass");
        }

        if placeable.requires_cultivated_ground() {
            if let Some(sample) = terrain {
                if !sample.cultivated {
                    return Status::NotCultivated;
                }
            }
        }

        let allowed = placeable.allowed_biomes();
        if allowed.is_restricted() {
            if let Some(sample) = terrain {
                if !sample.biome.overlaps(allowed) {
                    return Status::WrongBiome;
                }
            }
        }

        match &placeable.growable {
            Some(growable) => {
                if world.check_sphere(position, growable.grow_radius, self.config.grow_collision_mask)
                {
                    return Status::NoSpace;
                }
                if world.is_roofed(position, growable) {
                    return Status::NoSun;
                }
            }
            None => {
                if self.config.prevent_overlapping_placements
                    && world.check_sphere(
                        position,
                        OVERLAP_PROBE_RADIUS,
                        self.config.snap_collision_mask,
                    )
                {
                    return Status::NoSpace;
                }
            }
        }

        Status::Healthy
    }
}
