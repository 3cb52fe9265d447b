//! Saved progress
//!
//! Best score (separately for Safe Mode), completed missions and the
//! Daily Tide bonus date. Each lives under its own storage key.

use serde_json::{Map, Value};

use crate::consts::DAILY_BONUS;
use crate::persistence::{self, Storage};
use crate::tuning::Mission;

pub const BEST_SCORE_KEY: &str = "undersea_runner_bestScore";
pub const BEST_SCORE_SAFE_KEY: &str = "undersea_runner_bestScore_safe";
pub const DAILY_DATE_KEY: &str = "undersea_runner_dailyDate";
pub const COMPLETED_MISSIONS_KEY: &str = "undersea_runner_completedMissions";

/// Today's date as `YYYY-MM-DD` (UTC)
pub fn today_iso() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Progress saved between sessions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    pub best_score: u32,
    pub best_score_safe: u32,
    /// Mission id -> completed flag, kept as stored so unknown entries survive
    pub completed_missions: Map<String, Value>,
    /// Date the Daily Tide bonus was last claimed
    pub daily_date: Option<String>,
}

impl Progress {
    /// Load everything, treating unreadable values as absent
    pub fn load(storage: &dyn Storage) -> Self {
        let mut progress = Self {
            best_score: read_score(storage, BEST_SCORE_KEY),
            best_score_safe: read_score(storage, BEST_SCORE_SAFE_KEY),
            ..Default::default()
        };

        match persistence::load_json::<Value>(storage, COMPLETED_MISSIONS_KEY) {
            Ok(Some(Value::Object(missions))) => progress.completed_missions = missions,
            Ok(Some(other)) => log::warn!("Ignoring completed missions: not an object ({})", other),
            Ok(None) => {}
            Err(e) => log::warn!("Ignoring completed missions: {}", e),
        }

        match storage.get(DAILY_DATE_KEY) {
            Ok(date) => progress.daily_date = date,
            Err(e) => log::warn!("Could not read Daily Tide date: {}", e),
        }

        log::info!(
            "Loaded progress: best {} / safe {}, {} missions done",
            progress.best_score,
            progress.best_score_safe,
            progress.completed_count()
        );
        progress
    }

    /// Best score for the given mode
    pub fn best(&self, safe_mode: bool) -> u32 {
        if safe_mode {
            self.best_score_safe
        } else {
            self.best_score
        }
    }

    /// Record a live score. Returns true when it beat the stored best.
    pub fn record_score(&mut self, storage: &mut dyn Storage, safe_mode: bool, score: u32) -> bool {
        let (best, key) = if safe_mode {
            (&mut self.best_score_safe, BEST_SCORE_SAFE_KEY)
        } else {
            (&mut self.best_score, BEST_SCORE_KEY)
        };
        if score <= *best {
            return false;
        }
        *best = score;
        if let Err(e) = storage.set(key, &score.to_string()) {
            log::warn!("Failed to save best score: {}", e);
        }
        true
    }

    /// Claim the Daily Tide bonus if it has not been claimed on `today`.
    ///
    /// Returns the starting score for the next run.
    pub fn claim_daily(&mut self, storage: &mut dyn Storage, today: &str) -> u32 {
        if self.daily_date.as_deref() == Some(today) {
            return 0;
        }
        self.daily_date = Some(today.to_string());
        if let Err(e) = storage.set(DAILY_DATE_KEY, today) {
            log::warn!("Failed to save Daily Tide date: {}", e);
        }
        log::info!("Daily Tide bonus claimed for {}", today);
        DAILY_BONUS
    }

    pub fn is_completed(&self, mission: Mission) -> bool {
        self.completed_missions.get(mission.id()).is_some_and(truthy)
    }

    /// Mark a mission complete and persist the mission map, other entries included
    pub fn complete_mission(&mut self, storage: &mut dyn Storage, mission: Mission) {
        self.completed_missions
            .insert(mission.id().to_string(), Value::Bool(true));
        if let Err(e) = persistence::save_json(storage, COMPLETED_MISSIONS_KEY, &self.completed_missions) {
            log::warn!("Failed to save completed missions: {}", e);
        }
    }

    pub fn completed_count(&self) -> usize {
        self.completed_missions.values().filter(|done| truthy(done)).count()
    }

    /// "Missions: N done", or `None` before the first completion
    pub fn missions_label(&self) -> Option<String> {
        match self.completed_count() {
            0 => None,
            n => Some(format!("Missions: {} done", n)),
        }
    }
}

/// Whether a stored flag counts as set: `true`, non-zero numbers, non-empty
/// strings, arrays and objects
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Stored scores are plain decimal strings; anything else reads as 0
fn read_score(storage: &dyn Storage, key: &str) -> u32 {
    match storage.get(key) {
        Ok(Some(raw)) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u32)
            .unwrap_or(0),
        Ok(None) => 0,
        Err(e) => {
            log::warn!("Could not read {}: {}", key, e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_load_empty() {
        let storage = MemoryStorage::new();
        let progress = Progress::load(&storage);
        assert_eq!(progress, Progress::default());
        assert!(progress.missions_label().is_none());
    }

    #[test]
    fn test_best_score_per_mode() {
        let mut storage = MemoryStorage::new();
        let mut progress = Progress::load(&storage);

        assert!(progress.record_score(&mut storage, false, 12));
        assert!(!progress.record_score(&mut storage, false, 12));
        assert!(progress.record_score(&mut storage, true, 4));

        let reloaded = Progress::load(&storage);
        assert_eq!(reloaded.best(false), 12);
        assert_eq!(reloaded.best(true), 4);
    }

    #[test]
    fn test_garbage_score_reads_zero() {
        let mut storage = MemoryStorage::new();
        storage.set(BEST_SCORE_KEY, "abc").unwrap();
        storage.set(BEST_SCORE_SAFE_KEY, "17").unwrap();
        let progress = Progress::load(&storage);
        assert_eq!(progress.best_score, 0);
        assert_eq!(progress.best_score_safe, 17);
    }

    #[test]
    fn test_daily_bonus_once_per_day() {
        let mut storage = MemoryStorage::new();
        let mut progress = Progress::load(&storage);

        assert_eq!(progress.claim_daily(&mut storage, "2026-10-18"), DAILY_BONUS);
        assert_eq!(progress.claim_daily(&mut storage, "2026-10-18"), 0);

        let mut reloaded = Progress::load(&storage);
        assert_eq!(reloaded.claim_daily(&mut storage, "2026-10-18"), 0);
        assert_eq!(reloaded.claim_daily(&mut storage, "2026-10-19"), DAILY_BONUS);
    }

    #[test]
    fn test_complete_mission_persists() {
        let mut storage = MemoryStorage::new();
        let mut progress = Progress::load(&storage);
        progress.complete_mission(&mut storage, Mission::Survive45);

        let reloaded = Progress::load(&storage);
        assert!(reloaded.is_completed(Mission::Survive45));
        assert!(!reloaded.is_completed(Mission::Collect20));
        assert_eq!(reloaded.missions_label().as_deref(), Some("Missions: 1 done"));
    }

    #[test]
    fn test_false_entries_not_counted() {
        let mut storage = MemoryStorage::new();
        storage
            .set(COMPLETED_MISSIONS_KEY, r#"{"collect20":true,"noHazard":false}"#)
            .unwrap();
        let progress = Progress::load(&storage);
        assert_eq!(progress.completed_count(), 1);
    }

    #[test]
    fn test_non_bool_flags_count_and_survive_save() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                COMPLETED_MISSIONS_KEY,
                r#"{"collect20":1,"survive45":0,"legacy":"yes","noHazard":null}"#,
            )
            .unwrap();
        let mut progress = Progress::load(&storage);
        assert_eq!(progress.completed_count(), 2);
        assert!(progress.is_completed(Mission::Collect20));
        assert!(!progress.is_completed(Mission::Survive45));
        assert!(!progress.is_completed(Mission::NoHazard));

        progress.complete_mission(&mut storage, Mission::NoHazard);
        let reloaded = Progress::load(&storage);
        assert_eq!(reloaded.completed_count(), 3);
        assert!(reloaded.is_completed(Mission::Collect20));
        assert!(reloaded.completed_missions.contains_key("legacy"));
        assert_eq!(reloaded.missions_label().as_deref(), Some("Missions: 3 done"));
    }

    #[test]
    fn test_malformed_missions_read_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(COMPLETED_MISSIONS_KEY, "[broken").unwrap();
        let progress = Progress::load(&storage);
        assert!(progress.completed_missions.is_empty());
    }

    #[test]
    fn test_keys_share_prefix() {
        for key in [
            BEST_SCORE_KEY,
            BEST_SCORE_SAFE_KEY,
            DAILY_DATE_KEY,
            COMPLETED_MISSIONS_KEY,
            crate::settings::Settings::STORAGE_KEY,
        ] {
            assert!(key.starts_with(persistence::KEY_PREFIX), "{key}");
        }
    }

    #[test]
    fn test_today_iso_shape() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
        assert_eq!(&today[7..8], "-");
    }
}
