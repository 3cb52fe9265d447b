//! Game state and core simulation types
//!
//! Everything the update step mutates and the renderer reads lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::{Mission, RunConfig};

/// The player's fish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity (positive is down, canvas coordinates)
    pub vy: f32,
    pub radius: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CANVAS_WIDTH * PLAYER_X_FRACTION, CANVAS_HEIGHT * 0.5),
            vy: 0.0,
            radius: PLAYER_RADIUS,
        }
    }
}

impl Player {
    /// Highest allowed centre (smallest y)
    pub fn min_y(&self) -> f32 {
        LANE_TOP + self.radius
    }

    /// Lowest allowed centre (largest y)
    pub fn max_y(&self) -> f32 {
        CANVAS_HEIGHT - LANE_BOTTOM_MARGIN - self.radius
    }

    /// Integrate gravity and clamp to the lane, stopping at either bound
    pub fn integrate(&mut self, dt: f32) {
        self.vy += GRAVITY * dt;
        self.pos.y += self.vy * dt;

        if self.pos.y < self.min_y() {
            self.pos.y = self.min_y();
            self.vy = 0.0;
        }
        if self.pos.y > self.max_y() {
            self.pos.y = self.max_y();
            self.vy = 0.0;
        }
    }

    /// Put the fish back in the middle of the lane at rest
    pub fn recenter(&mut self) {
        self.pos.y = CANVAS_HEIGHT * 0.5;
        self.vy = 0.0;
    }
}

/// A collectible token drifting right-to-left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

/// Decorative bubble. Never collides with anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bubble {
    pub pos: Vec2,
    pub radius: f32,
    /// Upward speed (pixels/s)
    pub rise_speed: f32,
    /// Horizontal drift (pixels/s)
    pub drift: f32,
}

/// Hazard species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Jellyfish,
    Shark,
}

impl HazardKind {
    pub fn radius(&self) -> f32 {
        match self {
            HazardKind::Jellyfish => JELLYFISH_RADIUS,
            HazardKind::Shark => SHARK_RADIUS,
        }
    }
}

/// A hazard entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub kind: HazardKind,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Wider token collection radius, tokens drift toward the fish
    Magnet,
    /// One extra absorbed hazard hit
    Shield,
    /// +1 combo multiplier for a while
    ComboBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Magnet, PowerUpKind::Shield, PowerUpKind::ComboBoost];

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Magnet => "Magnet",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::ComboBoost => "Combo Boost",
        }
    }
}

/// A power-up entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub kind: PowerUpKind,
}

/// Active power-up effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub magnet_secs: f32,
    pub combo_boost_secs: f32,
    pub shields: u8,
}

impl ActiveEffects {
    pub fn magnet_active(&self) -> bool {
        self.magnet_secs > 0.0
    }

    pub fn combo_boost_active(&self) -> bool {
        self.combo_boost_secs > 0.0
    }

    /// Count down timed effects
    pub fn decay(&mut self, dt: f32) {
        self.magnet_secs = (self.magnet_secs - dt).max(0.0);
        self.combo_boost_secs = (self.combo_boost_secs - dt).max(0.0);
    }
}

/// Seconds accumulated toward each spawner's next spawn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub token: f32,
    pub bubble: f32,
    pub hazard: f32,
    pub powerup: f32,
}

/// Per-run statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub tokens_collected: u32,
    pub hazards_hit: u32,
    pub powerups_collected: u32,
    pub streak: u32,
    pub longest_streak: u32,
    /// Seconds in the water
    pub elapsed: f32,
}

/// Something the driver should react to (sound, HUD message)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    TokenCollected { gain: u32 },
    ComboChanged { level: u32 },
    HazardHit { kind: HazardKind, penalty: u32, shielded: bool },
    PowerUpCollected { kind: PowerUpKind },
    Milestone { stage: u8, message: &'static str },
    MissionComplete { mission: Mission },
}

/// End-of-run report shown in the session strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub tokens: u32,
    pub longest_streak: u32,
    pub hazards: u32,
    /// Whole seconds in the water
    pub elapsed_secs: u32,
    pub score: u32,
    /// True when this reset completed the mission
    pub mission_completed: bool,
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: RunConfig,
    pub rng: Pcg32,
    pub player: Player,
    pub tokens: Vec<Token>,
    pub bubbles: Vec<Bubble>,
    pub hazards: Vec<Hazard>,
    pub powerups: Vec<PowerUp>,
    pub timers: SpawnTimers,
    pub effects: ActiveEffects,
    pub stats: RunStats,
    pub score: u32,
    /// Combo multiplier tier (1..=3)
    pub combo_level: u32,
    /// Damage flash time remaining (seconds)
    pub hit_flash: f32,
    /// Highest token milestone announced this run (0..=3)
    pub milestone_stage: u8,
    /// Mission already completed by this state; later resets skip the check
    pub mission_completed: bool,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a fresh run
    pub fn new(config: RunConfig, seed: u64, initial_score: u32) -> Self {
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::default(),
            tokens: Vec::new(),
            bubbles: Vec::new(),
            hazards: Vec::new(),
            powerups: Vec::new(),
            timers: SpawnTimers::default(),
            effects: ActiveEffects {
                shields: config.starting_shields(),
                ..Default::default()
            },
            stats: RunStats::default(),
            score: initial_score,
            combo_level: 1,
            hit_flash: 0.0,
            milestone_stage: 0,
            mission_completed: false,
            events: Vec::new(),
        }
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Score multiplier applied to each collected token
    pub fn multiplier(&self) -> u32 {
        if self.effects.combo_boost_active() {
            self.combo_level + 1
        } else {
            self.combo_level
        }
    }

    /// Summarize the run, check the mission, and start over.
    ///
    /// The mission is only evaluated if this state has not completed it
    /// already. Remaining shield charges are kept; only a fresh run grants
    /// the character's starting shield.
    pub fn reset(&mut self, initial_score: u32) -> RunSummary {
        let mut summary = RunSummary {
            tokens: self.stats.tokens_collected,
            longest_streak: self.stats.longest_streak,
            hazards: self.stats.hazards_hit,
            elapsed_secs: self.stats.elapsed.round() as u32,
            score: self.score,
            mission_completed: false,
        };

        if !self.mission_completed && self.config.mission.is_met(&self.stats) {
            self.mission_completed = true;
            summary.mission_completed = true;
            self.events.push(GameEvent::MissionComplete {
                mission: self.config.mission,
            });
            log::info!("Mission complete: {}", self.config.mission.label());
        }

        self.tokens.clear();
        self.bubbles.clear();
        self.hazards.clear();
        self.powerups.clear();
        self.timers = SpawnTimers::default();
        // Timed effects end; shield charges carry over
        self.effects = ActiveEffects {
            shields: self.effects.shields,
            ..Default::default()
        };
        self.stats = RunStats::default();
        self.score = initial_score;
        self.combo_level = 1;
        self.hit_flash = 0.0;
        self.milestone_stage = 0;
        self.player.recenter();

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Character;

    #[test]
    fn test_player_clamps_to_floor() {
        let mut player = Player::default();
        for _ in 0..200 {
            player.integrate(1.0 / 60.0);
        }
        assert_eq!(player.pos.y, player.max_y());
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn test_player_clamps_to_ceiling() {
        let mut player = Player::default();
        player.vy = -5000.0;
        player.integrate(0.1);
        assert_eq!(player.pos.y, player.min_y());
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn test_new_state_shields_follow_character() {
        let config = RunConfig {
            character: Character::StarTetra,
            ..Default::default()
        };
        let state = GameState::new(config, 1, 0);
        assert_eq!(state.effects.shields, 1);

        let state = GameState::new(RunConfig::default(), 1, 0);
        assert_eq!(state.effects.shields, 0);
    }

    #[test]
    fn test_multiplier_with_combo_boost() {
        let mut state = GameState::new(RunConfig::default(), 1, 0);
        state.combo_level = 2;
        assert_eq!(state.multiplier(), 2);

        state.effects.combo_boost_secs = 1.0;
        assert_eq!(state.multiplier(), 3);
    }

    #[test]
    fn test_reset_summarizes_and_clears() {
        let mut state = GameState::new(RunConfig::default(), 7, 5);
        state.stats.tokens_collected = 12;
        state.stats.longest_streak = 6;
        state.stats.hazards_hit = 2;
        state.stats.elapsed = 30.6;
        state.score = 40;
        state.combo_level = 2;
        state.hit_flash = 0.2;
        state.player.pos.y = 100.0;
        state.tokens.push(Token {
            pos: Vec2::ZERO,
            radius: TOKEN_RADIUS,
            speed: 200.0,
        });

        let summary = state.reset(0);
        assert_eq!(summary.tokens, 12);
        assert_eq!(summary.longest_streak, 6);
        assert_eq!(summary.hazards, 2);
        assert_eq!(summary.elapsed_secs, 31);
        assert_eq!(summary.score, 40);
        assert!(!summary.mission_completed);

        assert_eq!(state.score, 0);
        assert_eq!(state.combo_level, 1);
        assert_eq!(state.hit_flash, 0.0);
        assert!(state.tokens.is_empty());
        assert_eq!(state.stats.tokens_collected, 0);
        assert_eq!(state.player.pos.y, CANVAS_HEIGHT * 0.5);
    }

    #[test]
    fn test_reset_completes_mission_once() {
        let mut state = GameState::new(RunConfig::default(), 7, 0);
        state.stats.tokens_collected = 20;
        let summary = state.reset(0);
        assert!(summary.mission_completed);
        assert!(state
            .drain_events()
            .contains(&GameEvent::MissionComplete {
                mission: Mission::Collect20
            }));

        state.stats.tokens_collected = 25;
        let summary = state.reset(0);
        assert!(!summary.mission_completed);
    }

    #[test]
    fn test_reset_keeps_spent_shield() {
        let config = RunConfig {
            character: Character::StarTetra,
            ..Default::default()
        };
        let mut state = GameState::new(config, 3, 0);
        state.effects.shields = 0;
        state.effects.magnet_secs = 2.0;
        state.reset(0);
        assert_eq!(state.effects.shields, 0);
        assert!(!state.effects.magnet_active());

        state.effects.shields = 2;
        state.reset(0);
        assert_eq!(state.effects.shields, 2);
    }
}
