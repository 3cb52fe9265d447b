//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects plus a looping music track played
//! through an `<audio>` element.

use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::settings::{MusicTrack, Settings};
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Token collected
    TokenCollect,
    /// Combo tier went up
    ComboUp,
    /// Unshielded hazard hit
    HazardHit,
    /// Hit absorbed by a shield or Safe Reef
    SoftHit,
    /// Power-up collected
    PowerUp,
    /// Token milestone reached
    Milestone,
    /// Mission completed on reset
    MissionComplete,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::TokenCollected { .. } => Some(SoundEffect::TokenCollect),
            GameEvent::ComboChanged { level } if *level > 1 => Some(SoundEffect::ComboUp),
            GameEvent::ComboChanged { .. } => None,
            GameEvent::HazardHit { penalty, .. } if *penalty > 0 => Some(SoundEffect::HazardHit),
            GameEvent::HazardHit { .. } => Some(SoundEffect::SoftHit),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUp),
            GameEvent::Milestone { .. } => Some(SoundEffect::Milestone),
            GameEvent::MissionComplete { .. } => Some(SoundEffect::MissionComplete),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    sfx_enabled: bool,
    music: Option<HtmlAudioElement>,
    music_track: MusicTrack,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }
        Self {
            ctx,
            sfx_volume: 0.8,
            sfx_enabled: true,
            music: None,
            music_track: MusicTrack::Off,
        }
    }

    /// Resume audio (required after a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
        if let Some(music) = &self.music {
            if music.paused() {
                let _ = music.play();
            }
        }
    }

    /// Follow the current audio preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_enabled = settings.sfx_enabled;
        self.set_music(settings.music, settings.music_volume);
    }

    /// Switch music track (or stop it) and set its volume
    pub fn set_music(&mut self, track: MusicTrack, volume: f32) {
        if track != self.music_track {
            if let Some(old) = self.music.take() {
                let _ = old.pause();
            }
            self.music_track = track;

            if let Some(src) = track.source() {
                match HtmlAudioElement::new_with_src(src) {
                    Ok(el) => {
                        el.set_loop(true);
                        // Autoplay may be refused until the first gesture; resume() retries
                        let _ = el.play();
                        self.music = Some(el);
                        log::info!("Music: {}", track.as_str());
                    }
                    Err(e) => log::warn!("Could not create audio element: {:?}", e),
                }
            }
        }

        if let Some(music) = &self.music {
            music.set_volume(volume.clamp(0.0, 1.0) as f64);
        }
    }

    /// Play the sounds for a batch of simulation events
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if !self.sfx_enabled {
            return;
        }
        let vol = self.sfx_volume;
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::TokenCollect => self.play_token(ctx, vol),
            SoundEffect::ComboUp => self.play_arpeggio(ctx, vol, &[600.0, 800.0, 1000.0], 0.06),
            SoundEffect::HazardHit => self.play_hazard_hit(ctx, vol),
            SoundEffect::SoftHit => self.play_soft_hit(ctx, vol),
            SoundEffect::PowerUp => self.play_powerup(ctx, vol),
            SoundEffect::Milestone => {
                self.play_arpeggio(ctx, vol, &[400.0, 500.0, 600.0, 800.0], 0.1)
            }
            SoundEffect::MissionComplete => {
                self.play_arpeggio(ctx, vol, &[500.0, 600.0, 700.0, 800.0, 1000.0], 0.08)
            }
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Token - short bright blip
    fn play_token(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.09)
            .ok();
        osc.frequency().set_value_at_time(880.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1320.0, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Hazard - low sting with a buzzing edge
    fn play_hazard_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(55.0, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        // Bass thump
        if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }

    /// Shielded or Safe Reef hit - muffled bump
    fn play_soft_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Power-up - rising whoosh
    fn play_powerup(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.01, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.3, t + 0.05)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Rising notes, `step` seconds apart
    fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], step: f64) {
        for (i, freq) in freqs.iter().enumerate() {
            let delay = i as f64 * step;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}
