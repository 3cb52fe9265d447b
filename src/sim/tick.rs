//! Per-frame simulation step
//!
//! Advances the run by one display frame of variable length: player
//! physics, spawners, entity motion, collisions, scoring and power-ups.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_touch, pull_toward};
use super::state::{
    Bubble, GameEvent, GameState, Hazard, HazardKind, PowerUp, PowerUpKind, Token,
};
use crate::consts::*;

/// Token milestones: (tokens collected, announcement)
pub const MILESTONES: [(u32, &str); 3] = [
    (10, "10 tokens reached!"),
    (30, "30 tokens – Deep Diver!"),
    (60, "60 tokens – Abyss Runner!"),
];

/// Vertical swim command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwimInput {
    Up,
    Down,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Swim command issued since the last frame (last one wins)
    pub swim: Option<SwimInput>,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    if state.hit_flash > 0.0 {
        state.hit_flash = (state.hit_flash - dt).max(0.0);
    }
    state.effects.decay(dt);
    state.stats.elapsed += dt;

    match input.swim {
        Some(SwimInput::Up) => state.player.vy = -SWIM_SPEED,
        Some(SwimInput::Down) => state.player.vy = SWIM_SPEED,
        None => {}
    }
    state.player.integrate(dt);

    run_spawners(state, dt);
    update_tokens(state, dt);
    update_bubbles(state, dt);
    update_hazards(state, dt);
    update_powerups(state, dt);
}

/// Advance every spawn timer and spawn when an interval elapses
fn run_spawners(state: &mut GameState, dt: f32) {
    let tuning = state.config.difficulty_config();

    state.timers.token += dt;
    if state.timers.token >= tuning.token_interval {
        state.timers.token = 0.0;
        spawn_token(state);
    }

    state.timers.bubble += dt;
    if state.timers.bubble >= BASE_BUBBLE_INTERVAL {
        state.timers.bubble = 0.0;
        spawn_bubble(state);
    }

    state.timers.hazard += dt;
    if state.timers.hazard >= tuning.hazard_interval {
        state.timers.hazard = 0.0;
        spawn_hazard(state);
    }

    state.timers.powerup += dt;
    if state.timers.powerup >= BASE_POWERUP_INTERVAL {
        state.timers.powerup = 0.0;
        spawn_powerup(state);
    }
}

/// Random y inside the lane, keeping `margin` clear of both edges
fn lane_y(state: &mut GameState, margin: f32) -> f32 {
    let span = (CANVAS_HEIGHT - margin * 2.0 - state.player.radius * 2.0).max(0.0);
    margin + state.rng.random::<f32>() * span
}

pub fn spawn_token(state: &mut GameState) {
    let y = lane_y(state, 90.0);
    let factor = state.config.difficulty_config().token_speed_factor;
    let speed = (210.0 + state.rng.random::<f32>() * 60.0) * factor;
    state.tokens.push(Token {
        pos: Vec2::new(CANVAS_WIDTH + 40.0, y),
        radius: TOKEN_RADIUS,
        speed,
    });
}

pub fn spawn_bubble(state: &mut GameState) {
    let rng = &mut state.rng;
    let x = 40.0 + rng.random::<f32>() * (CANVAS_WIDTH - 80.0);
    let radius = 4.0 + rng.random::<f32>() * 7.0;
    let rise_speed = 35.0 + rng.random::<f32>() * 25.0;
    // Up to ±2/3 px per 60 Hz frame
    let drift = (rng.random::<f32>() * 40.0 - 20.0) / 30.0 * 60.0;
    state.bubbles.push(Bubble {
        pos: Vec2::new(x, CANVAS_HEIGHT + 20.0),
        radius,
        rise_speed,
        drift,
    });
}

pub fn spawn_hazard(state: &mut GameState) {
    let y = lane_y(state, 80.0);
    let kind = if state.rng.random_bool(0.6) {
        HazardKind::Jellyfish
    } else {
        HazardKind::Shark
    };
    let factor = state.config.difficulty_config().hazard_speed_factor;
    let speed = (230.0 + state.rng.random::<f32>() * 70.0) * factor;
    state.hazards.push(Hazard {
        pos: Vec2::new(CANVAS_WIDTH + 80.0, y),
        radius: kind.radius(),
        speed,
        kind,
    });
}

pub fn spawn_powerup(state: &mut GameState) {
    let y = lane_y(state, 90.0);
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let speed = 180.0 + state.rng.random::<f32>() * 40.0;
    state.powerups.push(PowerUp {
        pos: Vec2::new(CANVAS_WIDTH + 60.0, y),
        radius: POWERUP_RADIUS,
        speed,
        kind,
    });
}

/// Combo tier for a streak length
pub fn combo_for_streak(streak: u32) -> u32 {
    if streak >= 10 {
        3
    } else if streak >= 5 {
        2
    } else {
        1
    }
}

fn update_tokens(state: &mut GameState, dt: f32) {
    let player_pos = state.player.pos;
    let magnet = state.effects.magnet_active();
    let reach = if magnet {
        state.player.radius + MAGNET_RADIUS_BONUS
    } else {
        state.player.radius
    };

    let mut collected = 0;
    state.tokens.retain_mut(|token| {
        token.pos.x -= token.speed * dt;
        if token.pos.x < -token.radius - 20.0 {
            return false;
        }

        if magnet && token.pos.distance(player_pos) < reach * 2.0 {
            token.pos = pull_toward(token.pos, player_pos, MAGNET_PULL_SPEED * dt);
        }

        if circles_touch(token.pos, token.radius, player_pos, reach, TOKEN_CONTACT_SLACK) {
            collected += 1;
            return false;
        }
        true
    });

    for _ in 0..collected {
        collect_token(state);
    }
}

/// Apply streak, combo, score and milestone rules for one token
fn collect_token(state: &mut GameState) {
    let stats = &mut state.stats;
    stats.streak += 1;
    stats.tokens_collected += 1;
    stats.longest_streak = stats.longest_streak.max(stats.streak);

    let combo = combo_for_streak(stats.streak);
    if combo != state.combo_level {
        state.combo_level = combo;
        state.events.push(GameEvent::ComboChanged { level: combo });
    }

    let mut gain = state.multiplier();
    if state.config.character == crate::tuning::Character::NeonComet
        && state.stats.streak % 5 == 0
    {
        gain += 1;
    }
    state.score += gain;
    state.events.push(GameEvent::TokenCollected { gain });

    // At most one milestone per collection
    if let Some(&(threshold, message)) = MILESTONES.get(state.milestone_stage as usize) {
        if state.stats.tokens_collected >= threshold {
            state.milestone_stage += 1;
            state.events.push(GameEvent::Milestone {
                stage: state.milestone_stage,
                message,
            });
            log::debug!("Milestone {}: {}", state.milestone_stage, message);
        }
    }
}

fn update_bubbles(state: &mut GameState, dt: f32) {
    state.bubbles.retain_mut(|bubble| {
        bubble.pos.y -= bubble.rise_speed * dt;
        bubble.pos.x += bubble.drift * dt;
        bubble.pos.y >= -bubble.radius - 10.0
    });
}

fn update_hazards(state: &mut GameState, dt: f32) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let mut hits = Vec::new();
    state.hazards.retain_mut(|hazard| {
        hazard.pos.x -= hazard.speed * dt;
        if hazard.pos.x < -hazard.radius - 40.0 {
            return false;
        }
        if circles_touch(hazard.pos, hazard.radius, player_pos, player_radius, HAZARD_CONTACT_SLACK) {
            hits.push(hazard.kind);
            return false;
        }
        true
    });

    for kind in hits {
        hit_hazard(state, kind);
    }
}

/// Apply a hazard collision: safe mode, then shields, then the penalty
fn hit_hazard(state: &mut GameState, kind: HazardKind) {
    state.hit_flash = HIT_FLASH_SECS;
    state.stats.hazards_hit += 1;
    state.stats.streak = 0;
    if state.combo_level != 1 {
        state.combo_level = 1;
        state.events.push(GameEvent::ComboChanged { level: 1 });
    }

    if state.config.safe_mode {
        state.events.push(GameEvent::HazardHit {
            kind,
            penalty: 0,
            shielded: false,
        });
        return;
    }

    if state.effects.shields > 0 {
        state.effects.shields -= 1;
        state.events.push(GameEvent::HazardHit {
            kind,
            penalty: 0,
            shielded: true,
        });
        log::debug!("Shield absorbed {:?} hit, {} left", kind, state.effects.shields);
        return;
    }

    let penalty = state.config.hazard_penalty();
    state.score = state.score.saturating_sub(penalty);
    state.events.push(GameEvent::HazardHit {
        kind,
        penalty,
        shielded: false,
    });
}

fn update_powerups(state: &mut GameState, dt: f32) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let mut picked = Vec::new();
    state.powerups.retain_mut(|powerup| {
        powerup.pos.x -= powerup.speed * dt;
        if powerup.pos.x < -powerup.radius - 20.0 {
            return false;
        }
        if circles_touch(powerup.pos, powerup.radius, player_pos, player_radius, TOKEN_CONTACT_SLACK) {
            picked.push(powerup.kind);
            return false;
        }
        true
    });

    for kind in picked {
        apply_powerup(state, kind);
    }
}

/// Start a power-up's effect
pub fn apply_powerup(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Magnet => state.effects.magnet_secs = MAGNET_SECS,
        PowerUpKind::Shield => {
            state.effects.shields = (state.effects.shields + 1).min(MAX_SHIELDS);
        }
        PowerUpKind::ComboBoost => state.effects.combo_boost_secs = COMBO_BOOST_SECS,
    }
    state.stats.powerups_collected += 1;
    state.events.push(GameEvent::PowerUpCollected { kind });
    log::debug!("Power-up collected: {}", kind.label());
}
