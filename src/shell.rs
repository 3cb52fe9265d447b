//! Presentation shell model
//!
//! The DOM around the canvas (pickers, overlays, HUD pills, run summary)
//! is driven from the plain state in this module so it can be tested
//! without a browser.

use crate::settings::{MusicTrack, Settings};
use crate::sim::RunSummary;
use crate::theme::Theme;
use crate::tuning::{Character, Difficulty, Mission};

/// How long a milestone message stays up (seconds)
pub const MILESTONE_SECS: f32 = 2.2;

/// Full-screen overlays that block play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Legal notice, must be accepted before anything else
    Legal,
    /// First-run how-to-play card
    Onboarding,
}

/// Which overlay is showing, if any
pub fn current_overlay(settings: &Settings) -> Option<Overlay> {
    if !settings.legal_accepted {
        Some(Overlay::Legal)
    } else if !settings.onboarding_seen {
        Some(Overlay::Onboarding)
    } else {
        None
    }
}

/// A user change made through the shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShellAction {
    SelectCharacter(Character),
    SelectDifficulty(Difficulty),
    SelectMission(Mission),
    SetSafeMode(bool),
    SelectMusic(MusicTrack),
    SetMusicVolume(f32),
    SetSfx(bool),
    SelectTheme(Theme),
    AcceptLegal,
    DismissOnboarding,
}

impl ShellAction {
    /// Map a DOM control id and its value to an action.
    ///
    /// Checkbox values arrive as `"true"` / `"false"`.
    pub fn from_control(control_id: &str, value: &str) -> Option<Self> {
        let checked = value == "true";
        match control_id {
            "character-select" => Some(ShellAction::SelectCharacter(Character::from_id(value))),
            "difficulty-select" => Some(ShellAction::SelectDifficulty(Difficulty::from_id(value))),
            "mission-select" => Some(ShellAction::SelectMission(Mission::from_id(value))),
            "safe-mode-toggle" => Some(ShellAction::SetSafeMode(checked)),
            "music-select" => MusicTrack::from_str(value).map(ShellAction::SelectMusic),
            "music-volume" => value
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ShellAction::SetMusicVolume),
            "sfx-toggle" => Some(ShellAction::SetSfx(checked)),
            "theme-select" => Theme::from_str(value).map(ShellAction::SelectTheme),
            "legal-accept" => Some(ShellAction::AcceptLegal),
            "onboarding-dismiss" => Some(ShellAction::DismissOnboarding),
            _ => None,
        }
    }
}

/// What the driver must do after an action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Run configuration changed; start a fresh run
    pub restart_run: bool,
    pub music_changed: bool,
    pub theme_changed: bool,
    pub overlay_changed: bool,
}

/// Apply an action to the settings. The caller persists them.
pub fn apply_action(settings: &mut Settings, action: ShellAction) -> ActionOutcome {
    let before = settings.clone();
    match action {
        ShellAction::SelectCharacter(c) => settings.character = c,
        ShellAction::SelectDifficulty(d) => settings.difficulty = d,
        ShellAction::SelectMission(m) => settings.mission = m,
        ShellAction::SetSafeMode(on) => settings.safe_mode = on,
        ShellAction::SelectMusic(track) => settings.music = track,
        ShellAction::SetMusicVolume(vol) => settings.set_music_volume(vol),
        ShellAction::SetSfx(on) => settings.sfx_enabled = on,
        ShellAction::SelectTheme(theme) => settings.theme = theme,
        ShellAction::AcceptLegal => settings.legal_accepted = true,
        ShellAction::DismissOnboarding => settings.onboarding_seen = true,
    }

    ActionOutcome {
        restart_run: before.run_config() != settings.run_config(),
        music_changed: before.music != settings.music || before.music_volume != settings.music_volume,
        theme_changed: before.theme != settings.theme,
        overlay_changed: current_overlay(&before) != current_overlay(settings),
    }
}

/// Everything the HUD shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub best: u32,
    pub safe_mode: bool,
    pub combo_level: u32,
    pub shields: u8,
    /// Daily Tide bonus applied to the current run
    pub daily_active: bool,
    pub mission: Mission,
    /// "Missions: N done" or "Mission complete!"
    pub mission_label: Option<String>,
    milestone: Option<(String, f32)>,
    pub summary: Option<RunSummary>,
}

impl Hud {
    pub fn best_label(&self) -> &'static str {
        if self.safe_mode { "Best (Safe)" } else { "Best" }
    }

    /// "Combo xN" while a combo is running
    pub fn combo_pill(&self) -> Option<String> {
        (self.combo_level > 1).then(|| format!("Combo x{}", self.combo_level))
    }

    pub fn daily_pill(&self) -> Option<&'static str> {
        self.daily_active.then_some("Daily Tide +5")
    }

    pub fn mission_line(&self) -> String {
        format!("Mission: {}", self.mission.label())
    }

    /// Show a milestone, replacing any message still up
    pub fn show_milestone(&mut self, message: &str) {
        self.milestone = Some((message.to_string(), MILESTONE_SECS));
    }

    pub fn clear_milestone(&mut self) {
        self.milestone = None;
    }

    pub fn milestone(&self) -> Option<&str> {
        self.milestone.as_ref().map(|(msg, _)| msg.as_str())
    }

    /// Count down the milestone timer
    pub fn advance(&mut self, dt: f32) {
        if let Some((_, remaining)) = &mut self.milestone {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.milestone = None;
            }
        }
    }

    /// Text for the run summary strip
    pub fn summary_text(&self) -> Option<String> {
        self.summary.as_ref().map(|s| {
            format!(
                "Run summary: {} tokens · {} max streak · {} hazard hits · {}s in water",
                s.tokens, s.longest_streak, s.hazards, s.elapsed_secs
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_order() {
        let mut settings = Settings::default();
        assert_eq!(current_overlay(&settings), Some(Overlay::Legal));

        let outcome = apply_action(&mut settings, ShellAction::AcceptLegal);
        assert!(outcome.overlay_changed);
        assert_eq!(current_overlay(&settings), Some(Overlay::Onboarding));

        apply_action(&mut settings, ShellAction::DismissOnboarding);
        assert_eq!(current_overlay(&settings), None);
    }

    #[test]
    fn test_run_changes_restart() {
        let mut settings = Settings::default();
        let outcome = apply_action(&mut settings, ShellAction::SelectDifficulty(Difficulty::Storm));
        assert!(outcome.restart_run);

        let outcome = apply_action(&mut settings, ShellAction::SetSafeMode(true));
        assert!(outcome.restart_run);

        // Selecting the same value again changes nothing
        let outcome = apply_action(&mut settings, ShellAction::SetSafeMode(true));
        assert_eq!(outcome, ActionOutcome::default());
    }

    #[test]
    fn test_presentation_changes_do_not_restart() {
        let mut settings = Settings::default();
        let outcome = apply_action(&mut settings, ShellAction::SelectTheme(Theme::Reef));
        assert!(outcome.theme_changed);
        assert!(!outcome.restart_run);

        let outcome = apply_action(&mut settings, ShellAction::SelectMusic(MusicTrack::Abyss));
        assert!(outcome.music_changed);
        assert!(!outcome.restart_run);
    }

    #[test]
    fn test_from_control() {
        assert_eq!(
            ShellAction::from_control("character-select", "ghost-koi"),
            Some(ShellAction::SelectCharacter(Character::GhostKoi))
        );
        assert_eq!(
            ShellAction::from_control("safe-mode-toggle", "true"),
            Some(ShellAction::SetSafeMode(true))
        );
        assert_eq!(
            ShellAction::from_control("music-volume", "0.25"),
            Some(ShellAction::SetMusicVolume(0.25))
        );
        assert_eq!(ShellAction::from_control("theme-select", "plaid"), None);
        assert_eq!(ShellAction::from_control("unknown", "x"), None);
    }

    #[test]
    fn test_non_finite_volume_ignored() {
        assert_eq!(ShellAction::from_control("music-volume", "NaN"), None);
        assert_eq!(ShellAction::from_control("music-volume", "inf"), None);
        assert_eq!(
            ShellAction::from_control("music-volume", "0.25"),
            Some(ShellAction::SetMusicVolume(0.25))
        );
    }

    #[test]
    fn test_hud_labels() {
        let mut hud = Hud {
            combo_level: 1,
            ..Default::default()
        };
        assert_eq!(hud.best_label(), "Best");
        assert!(hud.combo_pill().is_none());

        hud.safe_mode = true;
        hud.combo_level = 3;
        hud.daily_active = true;
        assert_eq!(hud.best_label(), "Best (Safe)");
        assert_eq!(hud.combo_pill().as_deref(), Some("Combo x3"));
        assert_eq!(hud.daily_pill(), Some("Daily Tide +5"));
        assert_eq!(hud.mission_line(), "Mission: Collect 20 tokens");
    }

    #[test]
    fn test_milestone_expires() {
        let mut hud = Hud::default();
        hud.show_milestone("10 tokens reached!");
        hud.advance(1.0);
        assert_eq!(hud.milestone(), Some("10 tokens reached!"));
        hud.advance(1.3);
        assert!(hud.milestone().is_none());
    }

    #[test]
    fn test_summary_text() {
        let hud = Hud {
            summary: Some(RunSummary {
                tokens: 14,
                longest_streak: 6,
                hazards: 2,
                elapsed_secs: 41,
                score: 30,
                mission_completed: false,
            }),
            ..Default::default()
        };
        let text = hud.summary_text().unwrap();
        assert!(text.contains("14 tokens"));
        assert!(text.contains("41s in water"));
    }
}
