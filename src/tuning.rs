//! Data-driven game balance
//!
//! Characters, difficulty levels and missions, plus the per-run
//! configuration derived from them. Ids match the values stored in
//! LocalStorage and used by the shell's pickers.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Spawn pacing and entity speeds for a difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyConfig {
    pub token_interval: f32,
    pub hazard_interval: f32,
    pub token_speed_factor: f32,
    pub hazard_speed_factor: f32,
}

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Calm,
    #[default]
    Current,
    Storm,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Calm, Difficulty::Current, Difficulty::Storm];

    pub fn id(&self) -> &'static str {
        match self {
            Difficulty::Calm => "calm",
            Difficulty::Current => "current",
            Difficulty::Storm => "storm",
        }
    }

    /// Parse a stored id. Unknown ids fall back to `Current`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "calm" => Difficulty::Calm,
            "storm" => Difficulty::Storm,
            _ => Difficulty::Current,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Calm => "Calm Waters",
            Difficulty::Current => "Steady Current",
            Difficulty::Storm => "Storm Surge",
        }
    }

    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Calm => DifficultyConfig {
                token_interval: BASE_TOKEN_INTERVAL * 1.1,
                hazard_interval: BASE_HAZARD_INTERVAL * 1.35,
                token_speed_factor: 0.9,
                hazard_speed_factor: 0.85,
            },
            Difficulty::Current => DifficultyConfig {
                token_interval: BASE_TOKEN_INTERVAL,
                hazard_interval: BASE_HAZARD_INTERVAL,
                token_speed_factor: 1.0,
                hazard_speed_factor: 1.0,
            },
            Difficulty::Storm => DifficultyConfig {
                token_interval: BASE_TOKEN_INTERVAL * 0.85,
                hazard_interval: BASE_HAZARD_INTERVAL * 0.75,
                token_speed_factor: 1.15,
                hazard_speed_factor: 1.2,
            },
        }
    }
}

/// Colours used to draw a character's fish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterPalette {
    pub body_stops: [&'static str; 3],
    pub tail: &'static str,
}

/// Playable fish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Character {
    /// +1 bonus point whenever the streak reaches a multiple of 5
    #[default]
    NeonComet,
    /// First hazard hit of a run is shielded
    StarTetra,
    /// Softer hazard penalty
    GhostKoi,
}

impl Character {
    pub const ALL: [Character; 3] = [Character::NeonComet, Character::StarTetra, Character::GhostKoi];

    pub fn id(&self) -> &'static str {
        match self {
            Character::NeonComet => "neon-comet",
            Character::StarTetra => "star-tetra",
            Character::GhostKoi => "ghost-koi",
        }
    }

    /// Parse a stored id. Unknown ids fall back to `NeonComet`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "star-tetra" => Character::StarTetra,
            "ghost-koi" => Character::GhostKoi,
            _ => Character::NeonComet,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Character::NeonComet => "Neon Comet",
            Character::StarTetra => "Star Tetra",
            Character::GhostKoi => "Ghost Koi",
        }
    }

    pub fn perk(&self) -> &'static str {
        match self {
            Character::NeonComet => "+1 bonus every 5-token streak",
            Character::StarTetra => "First hazard hit is shielded",
            Character::GhostKoi => "Hazards cost 3 instead of 5",
        }
    }

    pub fn palette(&self) -> CharacterPalette {
        match self {
            Character::NeonComet => CharacterPalette {
                body_stops: ["#ff2fd0", "#ff7ae0", "#ffffff"],
                tail: "#ff2fd0",
            },
            Character::StarTetra => CharacterPalette {
                body_stops: ["#5efff8", "#4be5ff", "#ffffff"],
                tail: "#4be5ff",
            },
            Character::GhostKoi => CharacterPalette {
                body_stops: ["#ffe9b0", "#ffb37a", "#ffffff"],
                tail: "#ffda9b",
            },
        }
    }
}

/// Declared run goals, checked when the run is reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mission {
    #[default]
    Collect20,
    Survive45,
    NoHazard,
}

impl Mission {
    pub const ALL: [Mission; 3] = [Mission::Collect20, Mission::Survive45, Mission::NoHazard];

    pub fn id(&self) -> &'static str {
        match self {
            Mission::Collect20 => "collect20",
            Mission::Survive45 => "survive45",
            Mission::NoHazard => "noHazard",
        }
    }

    /// Parse a stored id. Unknown ids fall back to `Collect20`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "survive45" => Mission::Survive45,
            "noHazard" => Mission::NoHazard,
            _ => Mission::Collect20,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mission::Collect20 => "Collect 20 tokens",
            Mission::Survive45 => "Survive 45 seconds",
            Mission::NoHazard => "Avoid all hazards this run",
        }
    }
}

/// Everything that shapes a run. Changing any field restarts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub character: Character,
    pub difficulty: Difficulty,
    pub mission: Mission,
    pub safe_mode: bool,
}

impl RunConfig {
    /// Score lost on an unshielded hazard hit
    pub fn hazard_penalty(&self) -> u32 {
        if self.safe_mode {
            0
        } else if self.character == Character::GhostKoi {
            3
        } else {
            5
        }
    }

    /// Shield charges at the start of a run
    pub fn starting_shields(&self) -> u8 {
        if self.character == Character::StarTetra { 1 } else { 0 }
    }

    pub fn difficulty_config(&self) -> DifficultyConfig {
        self.difficulty.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_id(d.id()), d);
        }
        for c in Character::ALL {
            assert_eq!(Character::from_id(c.id()), c);
        }
        for m in Mission::ALL {
            assert_eq!(Mission::from_id(m.id()), m);
        }
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        assert_eq!(Difficulty::from_id("hurricane"), Difficulty::Current);
        assert_eq!(Character::from_id(""), Character::NeonComet);
        assert_eq!(Mission::from_id("collect100"), Mission::Collect20);
    }

    #[test]
    fn test_storm_is_faster_than_calm() {
        let calm = Difficulty::Calm.config();
        let storm = Difficulty::Storm.config();
        assert!(storm.hazard_interval < calm.hazard_interval);
        assert!(storm.token_interval < calm.token_interval);
        assert!(storm.hazard_speed_factor > calm.hazard_speed_factor);
    }

    #[test]
    fn test_hazard_penalty() {
        let mut config = RunConfig::default();
        assert_eq!(config.hazard_penalty(), 5);

        config.character = Character::GhostKoi;
        assert_eq!(config.hazard_penalty(), 3);

        config.safe_mode = true;
        assert_eq!(config.hazard_penalty(), 0);
    }

    #[test]
    fn test_starting_shields() {
        let tetra = RunConfig {
            character: Character::StarTetra,
            ..Default::default()
        };
        assert_eq!(tetra.starting_shields(), 1);
        assert_eq!(RunConfig::default().starting_shields(), 0);
    }
}
