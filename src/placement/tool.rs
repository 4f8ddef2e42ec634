//! Grid placement tool session
//!
//! Ties spacing, layout, ghosts and validation together for one active
//! placeable. The host calls `select` when the player picks a placeable,
//! `update` once per tick while the preview is visible, `commit` when the
//! player places, and `deselect` when the tool is put away.

use crate::core::config::PlacementConfig;
use crate::core::types::{HandleId, Pose};
use crate::placement::ghosts::{GhostManager, PlacementGrid};
use crate::placement::layout::{layout, CellSpacing};
use crate::placement::placeable::Placeable;
use crate::placement::spacing::SpacingResolver;
use crate::placement::status::Status;
use crate::placement::validator::PlacementValidator;
use crate::world::host::{PlacementWorld, SceneGraph};

#[derive(Debug, Clone)]
struct ActivePlacement {
    placeable: Placeable,
    root_handle: HandleId,
    spacing: f32,
}

/// One placement tool session
#[derive(Debug)]
pub struct GridPlacementTool {
    config: PlacementConfig,
    ghosts: GhostManager,
    active: Option<ActivePlacement>,
    placement_blocked: bool,
}

impl GridPlacementTool {
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            ghosts: GhostManager::new(),
            active: None,
            placement_blocked: false,
        }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn ghosts(&self) -> &GhostManager {
        &self.ghosts
    }

    pub fn grid(&self) -> Option<&PlacementGrid> {
        self.ghosts.grid()
    }

    pub fn placeable(&self) -> Option<&Placeable> {
        self.active.as_ref().map(|active| &active.placeable)
    }

    /// Spacing radius resolved for the selected placeable
    pub fn spacing(&self) -> Option<f32> {
        self.active.as_ref().map(|active| active.spacing)
    }

    pub fn is_placement_blocked(&self) -> bool {
        self.placement_blocked
    }

    /// Host-side failure (missing resources, invalid target) for this tick
    ///
    /// Call after `update`; a healthy root cell clears the flag again.
    pub fn block_placement(&mut self) {
        self.placement_blocked = true;
    }

    /// Start previewing `placeable` with `root_handle` as the root ghost
    pub fn select<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        root_handle: HandleId,
        root_pose: Pose,
        placeable: Placeable,
    ) {
        self.ghosts.destroy_all(scene);

        let spacing = SpacingResolver::new(&self.config).resolve(&placeable);
        let (rows, columns) = self.config.grid_dimensions();
        self.ghosts.regenerate(
            scene,
            root_handle,
            root_pose,
            rows,
            columns,
            CellSpacing::uniform(spacing),
        );

        tracing::debug!(placeable = %placeable.name, spacing, "placement tool selected");
        self.active = Some(ActivePlacement {
            placeable,
            root_handle,
            spacing,
        });
        self.placement_blocked = true;
    }

    /// Put the tool away, releasing every clone
    pub fn deselect<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) {
        self.ghosts.destroy_all(scene);
        self.active = None;
        self.placement_blocked = false;
    }

    /// Swap in new settings
    ///
    /// A change of grid shape or spacing destroys the current ghosts; the next
    /// `update` rebuilds them.
    pub fn apply_config<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, config: PlacementConfig) {
        let reshaped = self.config.grid_shape_differs(&config);
        let respaced = self.config.spacing_differs(&config);
        self.config = config;

        if reshaped || respaced {
            tracing::debug!(reshaped, respaced, "grid settings changed");
            self.ghosts.destroy_all(scene);
        }

        if respaced {
            if let Some(active) = self.active.as_mut() {
                active.spacing = SpacingResolver::new(&self.config).resolve(&active.placeable);
            }
        }
    }

    /// Re-layout around the root and validate every cell
    ///
    /// Cells whose instance lacks the piece capability are skipped and left
    /// without a status. Returns the status of every cell in row-major order.
    pub fn update<H: PlacementWorld + SceneGraph>(
        &mut self,
        host: &mut H,
        root_pose: Pose,
    ) -> Vec<Option<Status>> {
        let Some(active) = self.active.as_ref() else {
            return Vec::new();
        };
        let spacing = CellSpacing::uniform(active.spacing);

        if !self.ghosts.is_active() {
            let (rows, columns) = self.config.grid_dimensions();
            self.ghosts
                .regenerate(host, active.root_handle, root_pose, rows, columns, spacing);
        }

        let (rows, columns) = match self.ghosts.grid() {
            Some(grid) => (grid.rows, grid.columns),
            None => return Vec::new(),
        };
        let poses = layout(&root_pose, rows, columns, spacing);
        self.ghosts.apply_layout(host, &poses);

        // Only a healthy root on this tick unblocks placement
        self.placement_blocked = true;

        let validator = PlacementValidator::new(&self.config);
        for (index, pose) in poses.iter().enumerate() {
            let handle = match self.ghosts.grid().and_then(|grid| grid.cells.get(index)) {
                Some(cell) => cell.handle,
                None => break,
            };

            if !host.has_piece(handle) {
                tracing::trace!(index, "ghost has no piece, skipping evaluation");
                self.ghosts.clear_status(index);
                continue;
            }

            let status = validator.evaluate(pose.position, &active.placeable, &*host);
            tracing::trace!(index, %status, "evaluated ghost cell");
            self.ghosts
                .set_status(host, index, status, &mut self.placement_blocked);
        }

        self.ghosts.statuses()
    }

    /// Poses to place now: the root plus every other healthy cell
    ///
    /// `None` while placement is blocked.
    pub fn commit(&self) -> Option<Vec<Pose>> {
        if self.placement_blocked {
            return None;
        }
        let grid = self.ghosts.grid()?;

        let poses: Vec<Pose> = grid
            .cells
            .iter()
            .filter(|cell| cell.index == 0 || cell.status == Some(Status::Healthy))
            .map(|cell| cell.pose)
            .collect();

        tracing::debug!(cells = poses.len(), "committing grid placement");
        Some(poses)
    }

    /// Message for the root cell's status, if it is not healthy
    pub fn root_message_key(&self) -> Option<&'static str> {
        self.ghosts.status(0).and_then(Status::message_key)
    }
}
