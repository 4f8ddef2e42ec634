//! Preview ghosts for every cell of the placement grid
//!
//! Cell 0 is the placement tool's own ghost and is only borrowed. Every other
//! cell owns a cosmetic clone that must be destroyed before the grid goes
//! away; `regenerate` and `destroy_all` are the only places handles are
//! created or released.

use crate::core::types::{HandleId, Pose};
use crate::placement::layout::{layout, CellSpacing};
use crate::placement::status::Status;
use crate::world::host::{InstantiateMode, SceneGraph};

/// One preview cell
#[derive(Debug, Clone, PartialEq)]
pub struct GhostCell {
    /// Row-major index into the grid
    pub index: usize,
    pub pose: Pose,
    /// `None` when the cell was skipped by evaluation
    pub status: Option<Status>,
    pub handle: HandleId,
}

/// The live grid of preview cells
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementGrid {
    pub rows: u32,
    pub columns: u32,
    pub root_pose: Pose,
    pub cell_spacing: CellSpacing,
    pub cells: Vec<GhostCell>,
}

impl PlacementGrid {
    pub fn root(&self) -> &GhostCell {
        &self.cells[0]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Owns the preview clones and their status slots
#[derive(Debug, Default)]
pub struct GhostManager {
    grid: Option<PlacementGrid>,
}

impl GhostManager {
    pub fn new() -> Self {
        Self { grid: None }
    }

    pub fn grid(&self) -> Option<&PlacementGrid> {
        self.grid.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.grid.is_some()
    }

    /// Number of clones this manager currently owns (root excluded)
    pub fn owned_handles(&self) -> usize {
        self.grid
            .as_ref()
            .map(|grid| grid.cells.len().saturating_sub(1))
            .unwrap_or(0)
    }

    /// Rebuild the grid around `root_handle`
    ///
    /// Previous clones are always destroyed before any new clone is made.
    pub fn regenerate<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        root_handle: HandleId,
        root_pose: Pose,
        rows: u32,
        columns: u32,
        spacing: CellSpacing,
    ) {
        self.destroy_all(scene);

        let rows = rows.max(1);
        let columns = columns.max(1);
        let poses = layout(&root_pose, rows, columns, spacing);
        let mut cells = Vec::with_capacity(poses.len());

        for (index, pose) in poses.into_iter().enumerate() {
            let handle = if index == 0 {
                root_handle
            } else {
                let clone = scene.clone_instance(root_handle, InstantiateMode::Cosmetic);
                scene.set_pose(clone, &pose);
                clone
            };

            cells.push(GhostCell {
                index,
                pose,
                status: Some(Status::Healthy),
                handle,
            });
        }

        tracing::debug!(
            rows,
            columns,
            clones = cells.len() - 1,
            "regenerated placement ghosts"
        );

        self.grid = Some(PlacementGrid {
            rows,
            columns,
            root_pose,
            cell_spacing: spacing,
            cells,
        });
    }

    /// Release every owned clone and clear all status slots
    pub fn destroy_all<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) {
        let Some(grid) = self.grid.take() else {
            return;
        };

        for cell in grid.cells.iter().skip(1) {
            scene.destroy(cell.handle);
        }

        tracing::debug!(destroyed = grid.cells.len() - 1, "destroyed placement ghosts");
    }

    /// Move existing clones to follow a new root pose
    ///
    /// `poses` must come from the same grid shape; extra or missing poses are
    /// ignored.
    pub fn apply_layout<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, poses: &[Pose]) {
        let Some(grid) = self.grid.as_mut() else {
            return;
        };

        if let Some(root) = poses.first() {
            grid.root_pose = *root;
        }

        for (cell, pose) in grid.cells.iter_mut().zip(poses) {
            cell.pose = *pose;
            if cell.index != 0 {
                scene.set_pose(cell.handle, pose);
            }
        }
    }

    /// Record `status` for a cell and update its highlight
    ///
    /// A healthy root cell clears the tool's `placement_blocked` flag.
    pub fn set_status<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        index: usize,
        status: Status,
        placement_blocked: &mut bool,
    ) {
        let Some(cell) = self.grid.as_mut().and_then(|grid| grid.cells.get_mut(index)) else {
            tracing::debug!(index, "status for unknown ghost cell ignored");
            return;
        };

        scene.set_highlight(cell.handle, !status.is_healthy());
        cell.status = Some(status);

        if index == 0 && status.is_healthy() {
            *placement_blocked = false;
        }
    }

    /// Mark a cell as having no recorded status
    pub fn clear_status(&mut self, index: usize) {
        if let Some(cell) = self.grid.as_mut().and_then(|grid| grid.cells.get_mut(index)) {
            cell.status = None;
        }
    }

    pub fn status(&self, index: usize) -> Option<Status> {
        self.grid
            .as_ref()
            .and_then(|grid| grid.cells.get(index))
            .and_then(|cell| cell.status)
    }

    pub fn statuses(&self) -> Vec<Option<Status>> {
        self.grid
            .as_ref()
            .map(|grid| grid.cells.iter().map(|cell| cell.status).collect())
            .unwrap_or_default()
    }
}
