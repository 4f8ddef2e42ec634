//! Sowgrid - grid placement previews and clustered harvesting

pub mod core;
pub mod harvest;
pub mod placement;
pub mod world;
