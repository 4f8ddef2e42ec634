//! Placeable definitions as the engine sees them
//!
//! A placeable is either a growable (seeds, saplings, crops) or a plain
//! piece such as a replanted pickable. Only the data the spacing resolver and
//! validator need is modelled here.

use crate::core::types::BiomeMask;
use serde::{Deserialize, Serialize};

/// Collision geometry of one prefab shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shape {
    /// Radii of every capsule collider in the shape hierarchy
    pub capsule_radii: Vec<f32>,
    /// Shape is a tree (its mature collider does not describe a sapling's footprint)
    pub tree_class: bool,
}

impl Shape {
    pub fn max_capsule_radius(&self) -> f32 {
        self.capsule_radii.iter().copied().fold(0.0, f32::max)
    }
}

/// Growth data for placeables that grow into something else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Growable {
    /// Mature footprint radius, also used for the grow-space check
    pub grow_radius: f32,
    #[serde(default)]
    pub needs_cultivated_ground: bool,
    #[serde(default)]
    pub biome: BiomeMask,
    /// Shapes the growable can turn into
    #[serde(default)]
    pub grown_stages: Vec<Shape>,
}

/// Spacing category for non-growable placeables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapCategory {
    BerryBush,
    Mushroom,
    Flower,
    Pickable,
}

impl SnapCategory {
    /// Legacy classification for definitions without a category tag
    pub fn from_name(name: &str) -> SnapCategory {
        if name.ends_with("berryBush") {
            SnapCategory::BerryBush
        } else if name.starts_with("Pickable_Mushroom") {
            SnapCategory::Mushroom
        } else if name.contains("Dandelion") || name.contains("Thistle") {
            SnapCategory::Flower
        } else {
            SnapCategory::Pickable
        }
    }
}

/// A placeable prefab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeable {
    pub name: String,
    /// Explicit spacing category; falls back to name matching when absent
    #[serde(default)]
    pub category: Option<SnapCategory>,
    #[serde(default)]
    pub shape: Shape,
    /// Piece-level cultivated ground requirement (ignored for growables)
    #[serde(default)]
    pub cultivated_ground_only: bool,
    /// Piece-level biome restriction (ignored for growables)
    #[serde(default)]
    pub only_in_biome: BiomeMask,
    #[serde(default)]
    pub growable: Option<Growable>,
}

impl Placeable {
    /// Plain, non-growable piece
    pub fn piece(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            shape: Shape::default(),
            cultivated_ground_only: false,
            only_in_biome: BiomeMask::ANY,
            growable: None,
        }
    }

    /// Growable with the given grow radius
    pub fn growable(name: impl Into<String>, grow_radius: f32) -> Self {
        Self {
            growable: Some(Growable {
                grow_radius,
                needs_cultivated_ground: false,
                biome: BiomeMask::ANY,
                grown_stages: Vec::new(),
            }),
            ..Self::piece(name)
        }
    }

    pub fn is_growable(&self) -> bool {
        self.growable.is_some()
    }

    /// Own shape followed by every growth-stage shape
    pub fn collider_roots(&self) -> impl Iterator<Item = &Shape> {
        std::iter::once(&self.shape).chain(
            self.growable
                .iter()
                .flat_map(|growable| growable.grown_stages.iter()),
        )
    }

    /// A growable with any tree-class shape among its collider roots
    pub fn is_sapling(&self) -> bool {
        self.is_growable() && self.collider_roots().any(|shape| shape.tree_class)
    }

    pub fn requires_cultivated_ground(&self) -> bool {
        match &self.growable {
            Some(growable) => growable.needs_cultivated_ground,
            None => self.cultivated_ground_only,
        }
    }

    pub fn allowed_biomes(&self) -> BiomeMask {
        match &self.growable {
            Some(growable) => growable.biome,
            None => self.only_in_biome,
        }
    }

    pub fn snap_category(&self) -> SnapCategory {
        self.category
            .unwrap_or_else(|| SnapCategory::from_name(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_name_categories() {
        assert_eq!(SnapCategory::from_name("RaspberryBush"), SnapCategory::BerryBush);
        assert_eq!(SnapCategory::from_name("BlueberryBush"), SnapCategory::BerryBush);
        assert_eq!(SnapCategory::from_name("CloudberryBush"), SnapCategory::BerryBush);
        assert_eq!(SnapCategory::from_name("Pickable_Berries"), SnapCategory::Pickable);
        assert_eq!(SnapCategory::from_name("Pickable_Mushroom_yellow"), SnapCategory::Mushroom);
        assert_eq!(SnapCategory::from_name("Pickable_Dandelion"), SnapCategory::Flower);
        assert_eq!(SnapCategory::from_name("Pickable_Thistle"), SnapCategory::Flower);
        assert_eq!(SnapCategory::from_name("Pickable_Flint"), SnapCategory::Pickable);
    }

    #[test]
    fn test_explicit_category_overrides_name() {
        let mut piece = Placeable::piece("Pickable_Dandelion");
        piece.category = Some(SnapCategory::Mushroom);
        assert_eq!(piece.snap_category(), SnapCategory::Mushroom);
    }

    #[test]
    fn test_growable_requirements_shadow_piece_requirements() {
        let mut seed = Placeable::growable("sapling_carrot", 0.5);
        seed.cultivated_ground_only = false;
        seed.only_in_biome = BiomeMask::SWAMP;
        if let Some(growable) = seed.growable.as_mut() {
            growable.needs_cultivated_ground = true;
            growable.biome = BiomeMask::MEADOWS;
        }

        assert!(seed.requires_cultivated_ground());
        assert_eq!(seed.allowed_biomes(), BiomeMask::MEADOWS);
    }

    #[test]
    fn test_sapling_detection_covers_growth_stages() {
        let mut beech = Placeable::growable("Beech_Sapling", 2.0);
        assert!(!beech.is_sapling());

        if let Some(growable) = beech.growable.as_mut() {
            growable.grown_stages.push(Shape {
                capsule_radii: vec![0.8],
                tree_class: true,
            });
        }
        assert!(beech.is_sapling());

        let mut rock = Placeable::piece("rock");
        rock.shape.tree_class = true;
        assert!(!rock.is_sapling());
    }
}
