//! Minimum centre-to-centre spacing between grid cells

use crate::core::config::PlacementConfig;
use crate::placement::placeable::{Placeable, SnapCategory};

/// Resolves how far apart grid cells must be for a placeable
pub struct SpacingResolver<'a> {
    config: &'a PlacementConfig,
}

impl<'a> SpacingResolver<'a> {
    pub fn new(config: &'a PlacementConfig) -> Self {
        Self { config }
    }

    /// Spacing radius for `placeable`
    ///
    /// Growables reserve their mature footprint plus present-day collider
    /// geometry. Saplings skip the collider (their grown tree collider would
    /// over-space the grid) and double the grow radius instead.
    pub fn resolve(&self, placeable: &Placeable) -> f32 {
        let sapling = placeable.is_sapling();

        let collider_radius = match &placeable.growable {
            Some(_) if sapling => self.config.extra_plant_spacing,
            Some(_) => {
                placeable
                    .collider_roots()
                    .map(|shape| shape.max_capsule_radius())
                    .fold(0.0, f32::max)
                    + self.config.extra_plant_spacing
            }
            // Pickables get their snap radius only
            None => 0.0,
        };

        let grow_radius = match &placeable.growable {
            Some(growable) if sapling => growable.grow_radius * 2.0,
            Some(growable) => growable.grow_radius * 1.1,
            None => self.snap_radius(placeable.snap_category()),
        };

        let spacing = grow_radius + collider_radius;
        tracing::debug!(
            placeable = %placeable.name,
            sapling,
            grow_radius,
            collider_radius,
            spacing,
            "resolved cell spacing"
        );
        spacing
    }

    pub fn snap_radius(&self, category: SnapCategory) -> f32 {
        match category {
            SnapCategory::BerryBush => self.config.berry_bush_snap_radius,
            SnapCategory::Mushroom => self.config.mushroom_snap_radius,
            SnapCategory::Flower => self.config.flower_snap_radius,
            SnapCategory::Pickable => self.config.pickable_snap_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::placeable::Shape;

    fn config_with_margin(margin: f32) -> PlacementConfig {
        PlacementConfig {
            extra_plant_spacing: margin,
            ..Default::default()
        }
    }

    #[test]
    fn test_sapling_doubles_grow_radius_and_ignores_colliders() {
        let mut sapling = Placeable::growable("Oak_Sapling", 2.0);
        sapling.shape.capsule_radii = vec![0.4];
        if let Some(growable) = sapling.growable.as_mut() {
            growable.grown_stages.push(Shape {
                capsule_radii: vec![1.5],
                tree_class: true,
            });
        }

        let config = config_with_margin(0.0);
        let spacing = SpacingResolver::new(&config).resolve(&sapling);
        assert!((spacing - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_crop_uses_grow_radius_and_widest_collider() {
        let mut crop = Placeable::growable("sapling_turnip", 1.0);
        crop.shape.capsule_radii = vec![0.1];
        if let Some(growable) = crop.growable.as_mut() {
            growable.grown_stages.push(Shape {
                capsule_radii: vec![0.2, 0.3],
                tree_class: false,
            });
        }

        let config = config_with_margin(0.2);
        let spacing = SpacingResolver::new(&config).resolve(&crop);
        assert!((spacing - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_crop_without_colliders_is_grow_radius_only() {
        let crop = Placeable::growable("sapling_onion", 0.5);
        let config = config_with_margin(0.0);
        let spacing = SpacingResolver::new(&config).resolve(&crop);
        assert!((spacing - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_pickables_use_category_snap_radius() {
        let config = PlacementConfig {
            berry_bush_snap_radius: 1.5,
            mushroom_snap_radius: 0.5,
            flower_snap_radius: 1.0,
            pickable_snap_radius: 0.75,
            extra_plant_spacing: 0.0,
            ..Default::default()
        };
        let resolver = SpacingResolver::new(&config);

        assert_eq!(resolver.resolve(&Placeable::piece("BlueberryBush")), 1.5);
        assert_eq!(resolver.resolve(&Placeable::piece("Pickable_Mushroom")), 0.5);
        assert_eq!(resolver.resolve(&Placeable::piece("Pickable_Thistle")), 1.0);
        assert_eq!(resolver.resolve(&Placeable::piece("Pickable_Flint")), 0.75);
    }

    #[test]
    fn test_margin_only_widens_growables() {
        let config = PlacementConfig {
            pickable_snap_radius: 1.0,
            extra_plant_spacing: 0.25,
            ..Default::default()
        };
        let resolver = SpacingResolver::new(&config);

        let flint = resolver.resolve(&Placeable::piece("Pickable_Flint"));
        assert!((flint - 1.0).abs() < 1e-6);

        let onion = resolver.resolve(&Placeable::growable("sapling_onion", 0.5));
        assert!((onion - 0.8).abs() < 1e-6);
    }
}
