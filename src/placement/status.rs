//! Placement status and its user-facing message keys

use serde::{Deserialize, Serialize};

/// Result of validating a single cell
///
/// Variants are ordered by the priority in which predicates are checked.
/// `LackResources` and `Invalid` come from the host tool's own checks; the
/// validator produces the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Healthy = 0,
    LackResources = 1,
    NotCultivated = 2,
    WrongBiome = 3,
    NoSpace = 4,
    NoSun = 5,
    Invalid = 6,
}

impl Status {
    pub fn is_healthy(self) -> bool {
        self == Status::Healthy
    }

    /// Localization key shown to the player, `None` when nothing is wrong
    pub fn message_key(self) -> Option<&'static str> {
        match self {
            Status::Healthy => None,
            Status::LackResources => Some("$msg_missingrequirement"),
            Status::NotCultivated => Some("$piece_plant_notcultivated"),
            Status::WrongBiome => Some("$piece_plant_wrongbiome"),
            Status::NoSpace => Some("$piece_plant_nospace"),
            Status::NoSun => Some("$piece_plant_nosun"),
            Status::Invalid => Some("$msg_invalidplacement"),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Healthy => "healthy",
            Status::LackResources => "lack_resources",
            Status::NotCultivated => "not_cultivated",
            Status::WrongBiome => "wrong_biome",
            Status::NoSpace => "no_space",
            Status::NoSun => "no_sun",
            Status::Invalid => "invalid",
        };
        f.write_str(label)
    }
}
