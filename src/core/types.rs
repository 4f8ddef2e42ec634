//! Core type definitions used throughout the codebase

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Handle to a scene-graph instance owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandleId(pub u64);

/// Identifier for a physics collider reported by overlap queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u64);

/// Identifier for a world object (harvestables and their owners)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// Harvestable targets are world objects that carry the harvest capability
pub type HarvestableRef = ObjectId;

/// Position, rotation and scale of a placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Unrotated, unit-scale pose at a position
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Bitset of physics layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const DEFAULT: LayerMask = LayerMask(1 << 0);
    pub const STATIC_SOLID: LayerMask = LayerMask(1 << 15);
    pub const DEFAULT_SMALL: LayerMask = LayerMask(1 << 13);
    pub const PIECE: LayerMask = LayerMask(1 << 10);
    pub const PIECE_NONSOLID: LayerMask = LayerMask(1 << 16);
    pub const ITEM: LayerMask = LayerMask(1 << 12);

    /// Layers a growable needs clear within its grow radius
    pub const GROW_SPACE: LayerMask = LayerMask(
        Self::DEFAULT.0
            | Self::STATIC_SOLID.0
            | Self::DEFAULT_SMALL.0
            | Self::PIECE.0
            | Self::PIECE_NONSOLID.0,
    );

    /// Layers checked by overlap prevention and harvest clustering
    pub const SNAP: LayerMask = LayerMask(Self::GROW_SPACE.0 | Self::ITEM.0);

    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

/// Bitset of terrain biomes; zero means "no restriction"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiomeMask(pub u32);

impl BiomeMask {
    pub const ANY: BiomeMask = BiomeMask(0);
    pub const MEADOWS: BiomeMask = BiomeMask(1);
    pub const SWAMP: BiomeMask = BiomeMask(2);
    pub const MOUNTAIN: BiomeMask = BiomeMask(4);
    pub const BLACK_FOREST: BiomeMask = BiomeMask(8);
    pub const PLAINS: BiomeMask = BiomeMask(16);
    pub const ASH_LANDS: BiomeMask = BiomeMask(32);
    pub const DEEP_NORTH: BiomeMask = BiomeMask(64);
    pub const OCEAN: BiomeMask = BiomeMask(256);
    pub const MISTLANDS: BiomeMask = BiomeMask(512);

    #[inline]
    pub fn is_restricted(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn overlaps(self, other: BiomeMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn union(self, other: BiomeMask) -> BiomeMask {
        BiomeMask(self.0 | other.0)
    }
}
