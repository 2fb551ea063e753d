use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::geometry::GridDimensions;

/// Fleet of the 10x10 game.
pub const LARGE_FLEET: [usize; 10] = [1, 1, 1, 1, 2, 2, 2, 4, 4, 5];
/// Fleet of the 8x8 game.
pub const MEDIUM_FLEET: [usize; 6] = [1, 1, 2, 2, 4, 5];
/// Fleet of the 6x6 game.
pub const SMALL_FLEET: [usize; 4] = [1, 1, 2, 4];

/// Environment variable selecting the preset used by [`GameConfig::from_env`].
pub const PRESET_ENV: &str = "ARMADA_PRESET";

/// Named grid/fleet combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum Preset {
    #[default]
    Large,
    Medium,
    Small,
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large" | "10x10" => Ok(Preset::Large),
            "medium" | "8x8" => Ok(Preset::Medium),
            "small" | "6x6" => Ok(Preset::Small),
            _ => Err(UnknownPreset),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Preset::Large => "large",
            Preset::Medium => "medium",
            Preset::Small => "small",
        };
        f.write_str(name)
    }
}

/// Returned when a preset name is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset, expected one of: large, medium, small")]
pub struct UnknownPreset;

/// Grid size and fleet shared by both players of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub dimensions: GridDimensions,
    pub lengths: Vec<usize>,
}

impl GameConfig {
    pub fn preset(preset: Preset) -> Self {
        let (side, lengths): (i32, &[usize]) = match preset {
            Preset::Large => (10, &LARGE_FLEET),
            Preset::Medium => (8, &MEDIUM_FLEET),
            Preset::Small => (6, &SMALL_FLEET),
        };
        GameConfig {
            dimensions: GridDimensions::square(side),
            lengths: lengths.to_vec(),
        }
    }

    /// Preset named by `ARMADA_PRESET`, falling back to the large game.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        let preset = std::env::var(PRESET_ENV)
            .ok()
            .and_then(|name| name.parse().ok())
            .unwrap_or_default();
        Self::preset(preset)
    }

    /// Total number of ship cells in the fleet.
    pub fn ship_cells(&self) -> usize {
        self.lengths.iter().sum()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_grid_sizes() {
        let small = GameConfig::preset(Preset::Small);
        assert_eq!(small.dimensions.rows(), 6);
        assert_eq!(small.ship_cells(), 8);
        assert_eq!(GameConfig::default().lengths.len(), 10);
    }

    #[test]
    fn parses_preset_names() {
        assert_eq!("Medium".parse::<Preset>(), Ok(Preset::Medium));
        assert_eq!("6x6".parse::<Preset>(), Ok(Preset::Small));
        assert_eq!("huge".parse::<Preset>(), Err(UnknownPreset));
    }
}
