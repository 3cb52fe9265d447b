//! Game session
//!
//! Ties a run to the saved preferences and progress: starts runs (with the
//! Daily Tide bonus on the first one), feeds frames to the simulation
//! while no overlay is up, keeps the HUD and best score current, and
//! handles Reset and shell actions.

use rand::Rng;

use crate::persistence::Storage;
use crate::progress::Progress;
use crate::settings::Settings;
use crate::shell::{self, ActionOutcome, Hud, Overlay, ShellAction};
use crate::sim::{GameEvent, GameState, RunSummary, TickInput, tick};

/// One browser session of the game
pub struct Session<S: Storage> {
    pub storage: S,
    pub settings: Settings,
    pub progress: Progress,
    pub state: GameState,
    pub hud: Hud,
}

impl<S: Storage> Session<S> {
    /// Load saved data and start the first run.
    ///
    /// `today` is the `YYYY-MM-DD` date used for the Daily Tide bonus.
    pub fn new(mut storage: S, seed: u64, today: &str) -> Self {
        let settings = Settings::load(&storage);
        let mut progress = Progress::load(&storage);
        let bonus = progress.claim_daily(&mut storage, today);

        let config = settings.run_config();
        let state = GameState::new(config, seed, bonus);
        let mut hud = Hud::default();
        hud.score = state.score;
        hud.best = progress.best(config.safe_mode);
        hud.safe_mode = config.safe_mode;
        hud.combo_level = 1;
        hud.shields = state.effects.shields;
        hud.daily_active = bonus > 0;
        hud.mission = config.mission;
        hud.mission_label = progress.missions_label();

        let mut session = Self {
            storage,
            settings,
            progress,
            state,
            hud,
        };
        // The bonus may already beat a fresh best score
        session.sync_score();
        session
    }

    pub fn overlay(&self) -> Option<Overlay> {
        shell::current_overlay(&self.settings)
    }

    /// Advance one display frame. Returns the events it produced.
    ///
    /// Nothing moves while an overlay is showing.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        self.hud.advance(dt);
        if self.overlay().is_some() {
            return Vec::new();
        }

        tick(&mut self.state, input, dt);
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::Milestone { message, .. } = event {
                self.hud.show_milestone(message);
            }
        }
        self.sync_score();
        events
    }

    /// Mirror score and combo into the HUD and keep the best score current
    fn sync_score(&mut self) {
        let safe = self.state.config.safe_mode;
        if self
            .progress
            .record_score(&mut self.storage, safe, self.state.score)
        {
            log::debug!("New best score: {}", self.state.score);
        }
        self.hud.score = self.state.score;
        self.hud.best = self.progress.best(safe);
        self.hud.combo_level = self.state.combo_level;
        self.hud.shields = self.state.effects.shields;
    }

    /// The Reset button: summarize, record a completed mission, start over
    pub fn reset(&mut self) -> (RunSummary, Vec<GameEvent>) {
        let summary = self.state.reset(0);
        if summary.mission_completed {
            self.progress
                .complete_mission(&mut self.storage, self.state.config.mission);
            self.hud.mission_label = Some("Mission complete!".to_string());
        }
        log::info!(
            "Run reset: {} tokens, {} hazards, {}s",
            summary.tokens,
            summary.hazards,
            summary.elapsed_secs
        );

        self.hud.summary = Some(summary.clone());
        self.hud.daily_active = false;
        self.hud.clear_milestone();
        self.sync_score();
        (summary, self.state.drain_events())
    }

    /// Apply a shell action, persist settings, and restart the run if needed
    pub fn apply(&mut self, action: ShellAction) -> ActionOutcome {
        let outcome = shell::apply_action(&mut self.settings, action);
        self.settings.save(&mut self.storage);
        if outcome.restart_run {
            self.restart_run();
        }
        outcome
    }

    /// Fresh run with the current settings (no Daily Tide bonus)
    fn restart_run(&mut self) {
        let config = self.settings.run_config();
        let seed = self.state.rng.random::<u64>();
        self.state = GameState::new(config, seed, 0);

        self.hud.safe_mode = config.safe_mode;
        self.hud.mission = config.mission;
        self.hud.summary = None;
        self.hud.daily_active = false;
        self.hud.clear_milestone();
        self.sync_score();
        log::info!(
            "New run: {} / {} / {}{}",
            config.character.label(),
            config.difficulty.label(),
            config.mission.label(),
            if config.safe_mode { " (Safe Reef)" } else { "" }
        );
    }
}
