//! Grid layout: cell poses from a root pose

use crate::core::types::Pose;
use glam::Vec3;

/// Offset between neighbouring cells along columns (`dx`) and rows (`dy`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpacing {
    pub dx: f32,
    pub dy: f32,
}

impl CellSpacing {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Same spacing on both axes
    pub fn uniform(radius: f32) -> Self {
        Self { dx: radius, dy: radius }
    }
}

/// Cell poses in row-major order
///
/// Columns advance along the root's local X axis and rows along its local Z
/// axis, so the grid turns with the root. Cell 0 is `root` itself, untouched.
pub fn layout(root: &Pose, rows: u32, columns: u32, spacing: CellSpacing) -> Vec<Pose> {
    let rows = rows.max(1);
    let columns = columns.max(1);
    let mut poses = Vec::with_capacity(rows as usize * columns as usize);

    for row in 0..rows {
        for column in 0..columns {
            if row == 0 && column == 0 {
                poses.push(*root);
                continue;
            }

            let local = Vec3::new(column as f32 * spacing.dx, 0.0, row as f32 * spacing.dy);
            poses.push(Pose {
                position: root.position + root.rotation * local,
                rotation: root.rotation,
                scale: root.scale,
            });
        }
    }

    poses
}

/// Row-major linear index of a cell
#[inline]
pub fn cell_index(row: u32, column: u32, columns: u32) -> usize {
    row as usize * columns.max(1) as usize + column as usize
}
