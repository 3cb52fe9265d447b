//! Per-frame simulation module
//!
//! All gameplay logic lives here, free of rendering and platform code:
//! - Variable timestep, clamped per frame
//! - Seeded RNG per run
//! - Events queued for the driver (sound, HUD)

pub mod collision;
pub mod mission;
pub mod state;
pub mod tick;

pub use collision::{circles_touch, pull_toward};
pub use state::{
    ActiveEffects, Bubble, GameEvent, GameState, Hazard, HazardKind, Player, PowerUp, PowerUpKind,
    RunStats, RunSummary, SpawnTimers, Token,
};
pub use tick::{MILESTONES, SwimInput, TickInput, combo_for_streak, tick};
