//! Grid placement: spacing, layout, preview ghosts and validation

pub mod ghosts;
pub mod layout;
pub mod placeable;
pub mod spacing;
pub mod status;
pub mod tool;
pub mod validator;

pub use ghosts::{GhostCell, GhostManager, PlacementGrid};
pub use layout::{cell_index, layout, CellSpacing};
pub use placeable::{Growable, Placeable, Shape, SnapCategory};
pub use spacing::SpacingResolver;
pub use status::Status;
pub use tool::GridPlacementTool;
pub use validator::{PlacementValidator, OVERLAP_PROBE_RADIUS};
