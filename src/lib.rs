//! Undersea Runner - a side-scrolling swim-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, spawners, collisions, scoring)
//! - `tuning`: Data-driven balance (characters, difficulties, missions)
//! - `persistence`: Key-value storage (LocalStorage on web, memory natively)
//! - `progress`: Best scores, completed missions, Daily Tide bonus
//! - `settings`: Player preferences
//! - `session`: A run tied to saved settings and progress
//! - `shell`: Pickers, overlays and HUD model around the canvas
//! - `theme`: Colour palettes for the renderer
//! - `renderer`: Canvas 2D drawing (drawing calls are wasm only)
//! - `audio`: Web Audio effects and music (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod persistence;
pub mod progress;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod shell;
pub mod sim;
pub mod theme;
pub mod tuning;

pub use progress::Progress;
pub use session::Session;
pub use settings::{MusicTrack, Settings};
pub use theme::Theme;
pub use tuning::{Character, Difficulty, Mission, RunConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field size in canvas pixels
    pub const CANVAS_WIDTH: f32 = 900.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Downward acceleration on the player (pixels/s²)
    pub const GRAVITY: f32 = 420.0;
    /// Vertical speed set by a single swim input
    pub const SWIM_SPEED: f32 = 260.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 26.0;
    pub const PLAYER_X_FRACTION: f32 = 0.25;

    /// Lane bounds
    pub const LANE_TOP: f32 = 30.0;
    pub const LANE_BOTTOM_MARGIN: f32 = 40.0;

    /// Spawn intervals (seconds) before difficulty scaling
    pub const BASE_TOKEN_INTERVAL: f32 = 1.1;
    pub const BASE_BUBBLE_INTERVAL: f32 = 0.35;
    pub const BASE_HAZARD_INTERVAL: f32 = 2.8;
    pub const BASE_POWERUP_INTERVAL: f32 = 9.0;

    /// Entity radii
    pub const TOKEN_RADIUS: f32 = 16.0;
    pub const POWERUP_RADIUS: f32 = 18.0;
    pub const JELLYFISH_RADIUS: f32 = 28.0;
    pub const SHARK_RADIUS: f32 = 32.0;

    /// Contact slack: overlap needed before a touch counts
    pub const TOKEN_CONTACT_SLACK: f32 = 4.0;
    pub const HAZARD_CONTACT_SLACK: f32 = 6.0;

    /// Damage flash duration (seconds)
    pub const HIT_FLASH_SECS: f32 = 0.35;

    /// Largest frame delta fed to the simulation (tab switches, stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Starting score granted by the Daily Tide bonus
    pub const DAILY_BONUS: u32 = 5;

    /// Power-up effects
    pub const MAGNET_SECS: f32 = 6.0;
    pub const MAGNET_RADIUS_BONUS: f32 = 70.0;
    pub const MAGNET_PULL_SPEED: f32 = 240.0;
    pub const COMBO_BOOST_SECS: f32 = 8.0;
    pub const MAX_SHIELDS: u8 = 3;
}

/// Distance between two circle centres minus their combined radius.
///
/// Negative when the circles overlap.
#[inline]
pub fn circle_gap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> f32 {
    a.distance(b) - (ra + rb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_gap() {
        let gap = circle_gap(Vec2::ZERO, 10.0, Vec2::new(30.0, 0.0), 10.0);
        assert!((gap - 10.0).abs() < 1e-5);

        let overlap = circle_gap(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0);
        assert!(overlap < 0.0);
    }
}
