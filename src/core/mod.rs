pub mod config;
pub mod error;
pub mod types;

pub use config::{HarvestStyle, PlacementConfig};
pub use error::{Result, SowgridError};
