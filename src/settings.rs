//! Player preferences
//!
//! Persisted as one JSON blob, separately from scores and missions.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage};
use crate::theme::Theme;
use crate::tuning::{Character, Difficulty, Mission, RunConfig};

/// Background music choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MusicTrack {
    #[default]
    Off,
    Tidepool,
    Abyss,
}

impl MusicTrack {
    pub const ALL: [MusicTrack; 3] = [MusicTrack::Off, MusicTrack::Tidepool, MusicTrack::Abyss];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicTrack::Off => "Off",
            MusicTrack::Tidepool => "Tidepool",
            MusicTrack::Abyss => "Abyss",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Some(MusicTrack::Off),
            "tidepool" => Some(MusicTrack::Tidepool),
            "abyss" => Some(MusicTrack::Abyss),
            _ => None,
        }
    }

    /// Audio file served next to the wasm bundle
    pub fn source(&self) -> Option<&'static str> {
        match self {
            MusicTrack::Off => None,
            MusicTrack::Tidepool => Some("assets/music/tidepool.mp3"),
            MusicTrack::Abyss => Some("assets/music/abyss.mp3"),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Run ===
    pub character: Character,
    pub difficulty: Difficulty,
    pub mission: Mission,
    /// Safe Reef: hazards never cost score
    pub safe_mode: bool,

    // === Audio ===
    pub music: MusicTrack,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub sfx_enabled: bool,

    // === Presentation ===
    pub theme: Theme,

    // === Gates ===
    /// Legal notice accepted
    pub legal_accepted: bool,
    /// Onboarding overlay dismissed
    pub onboarding_seen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            character: Character::default(),
            difficulty: Difficulty::default(),
            mission: Mission::default(),
            safe_mode: false,

            music: MusicTrack::Off,
            music_volume: 0.6,
            sfx_enabled: true,

            theme: Theme::default(),

            legal_accepted: false,
            onboarding_seen: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "undersea_runner_settings";

    /// Configuration for the next run
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            character: self.character,
            difficulty: self.difficulty,
            mission: self.mission,
            safe_mode: self.safe_mode,
        }
    }

    /// Clamp into 0..=1. Non-finite values leave the volume unchanged.
    pub fn set_music_volume(&mut self, vol: f32) {
        if vol.is_finite() {
            self.music_volume = vol.clamp(0.0, 1.0);
        }
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<Settings>(storage, Self::STORAGE_KEY) {
            Ok(Some(mut settings)) => {
                settings.set_music_volume(settings.music_volume);
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Discarding unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save(&self, storage: &mut dyn Storage) {
        match persistence::save_json(storage, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
