//! Placement and harvest configuration
//!
//! Everything the engine reads from the user's settings lives here. The
//! engine treats this as read-only; the placement tool swaps in a new copy
//! when settings change.

use crate::core::error::{Result, SowgridError};
use crate::core::types::LayerMask;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which neighbours a harvest action pulls into its cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarvestStyle {
    /// Only harvestables with the same type name as the origin
    #[default]
    LikeResources,
    /// Every harvestable within range
    AllResources,
}

/// Configuration for grid placement and clustered harvesting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    // === GRID ===
    /// Number of rows in the placement grid (clamped to at least 1)
    pub rows: u32,

    /// Number of columns in the placement grid (clamped to at least 1)
    pub columns: u32,

    // === SPACING ===
    /// Extra clearance added on top of collider geometry (world units)
    ///
    /// Applied to every placeable before the grow/snap radius is added, so a
    /// value of 0.2 pushes neighbouring cells 0.2 further apart.
    pub extra_plant_spacing: f32,

    /// Spacing for berry bushes and other bush-type pickables
    pub berry_bush_snap_radius: f32,

    /// Spacing for mushroom pickables
    pub mushroom_snap_radius: f32,

    /// Spacing for flower pickables (dandelion, thistle)
    pub flower_snap_radius: f32,

    /// Spacing for any other non-growable pickable
    pub pickable_snap_radius: f32,

    // === HARVEST ===
    /// Radius around the harvest origin searched for extra targets
    pub harvest_radius: f32,

    /// Which neighbours join the harvest cluster
    pub harvest_style: HarvestStyle,

    // === VALIDATION ===
    /// Reject non-growable placements whose centre already touches something
    pub prevent_overlapping_placements: bool,

    /// Layers probed by overlap prevention and harvest clustering
    pub snap_collision_mask: LayerMask,

    /// Layers that must be clear within a growable's grow radius
    pub grow_collision_mask: LayerMask,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 5,

            extra_plant_spacing: 0.0,
            berry_bush_snap_radius: 1.5,
            mushroom_snap_radius: 0.5,
            flower_snap_radius: 1.0,
            pickable_snap_radius: 1.0,

            harvest_radius: 5.0,
            harvest_style: HarvestStyle::LikeResources,

            prevent_overlapping_placements: true,
            snap_collision_mask: LayerMask::SNAP,
            grow_collision_mask: LayerMask::GROW_SPACE,
        }
    }
}

impl PlacementConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PlacementConfig = toml::from_str(content)?;
        config.validate().map_err(SowgridError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Grid dimensions with degenerate values clamped to a 1-wide grid
    ///
    /// A zero row or column count is a valid request for single placement,
    /// not an error.
    pub fn grid_dimensions(&self) -> (u32, u32) {
        if self.rows == 0 || self.columns == 0 {
            tracing::warn!(
                rows = self.rows,
                columns = self.columns,
                "grid dimension below 1, clamping"
            );
        }
        (self.rows.max(1), self.columns.max(1))
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let radii = [
            ("extra_plant_spacing", self.extra_plant_spacing),
            ("berry_bush_snap_radius", self.berry_bush_snap_radius),
            ("mushroom_snap_radius", self.mushroom_snap_radius),
            ("flower_snap_radius", self.flower_snap_radius),
            ("pickable_snap_radius", self.pickable_snap_radius),
            ("harvest_radius", self.harvest_radius),
        ];

        for (name, value) in radii {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, value));
            }
        }

        Ok(())
    }

    /// True when switching from `self` to `other` changes the grid shape
    pub fn grid_shape_differs(&self, other: &PlacementConfig) -> bool {
        self.grid_dimensions() != other.grid_dimensions()
    }

    /// True when switching from `self` to `other` changes how cells are spaced
    pub fn spacing_differs(&self, other: &PlacementConfig) -> bool {
        self.extra_plant_spacing != other.extra_plant_spacing
            || self.berry_bush_snap_radius != other.berry_bush_snap_radius
            || self.mushroom_snap_radius != other.mushroom_snap_radius
            || self.flower_snap_radius != other.flower_snap_radius
            || self.pickable_snap_radius != other.pickable_snap_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PlacementConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PlacementConfig::from_toml_str(
            r#"
            rows = 3
            harvest_style = "all_resources"
            "#,
        )
        .unwrap();

        assert_eq!(config.rows, 3);
        assert_eq!(config.columns, 5);
        assert_eq!(config.harvest_style, HarvestStyle::AllResources);
        assert_eq!(config.snap_collision_mask, LayerMask::SNAP);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let err = PlacementConfig::from_toml_str("harvest_radius = -1.0").unwrap_err();
        assert!(matches!(err, SowgridError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_dimensions_clamp_to_one() {
        let config = PlacementConfig {
            rows: 0,
            columns: 4,
            ..Default::default()
        };
        assert_eq!(config.grid_dimensions(), (1, 4));
    }

    #[test]
    fn test_shape_and_spacing_change_detection() {
        let base = PlacementConfig::default();
        let wider = PlacementConfig {
            columns: 7,
            ..Default::default()
        };
        let roomier = PlacementConfig {
            extra_plant_spacing: 0.5,
            ..Default::default()
        };

        assert!(base.grid_shape_differs(&wider));
        assert!(!base.spacing_differs(&wider));
        assert!(base.spacing_differs(&roomier));
        assert!(!base.grid_shape_differs(&roomier));
    }
}
