//! Mission goals
//!
//! Missions are only judged when a run is reset, never mid-run.

use super::state::RunStats;
use crate::tuning::Mission;

/// Tokens needed for `Collect20`
pub const COLLECT_TARGET: u32 = 20;
/// Seconds needed for `Survive45`
pub const SURVIVE_SECS: f32 = 45.0;
/// Seconds a hazard-free run must last for `NoHazard`
pub const NO_HAZARD_SECS: f32 = 35.0;

impl Mission {
    /// Whether a run with these stats meets the mission goal
    pub fn is_met(&self, stats: &RunStats) -> bool {
        match self {
            Mission::Collect20 => stats.tokens_collected >= COLLECT_TARGET,
            Mission::Survive45 => stats.elapsed >= SURVIVE_SECS,
            Mission::NoHazard => stats.elapsed >= NO_HAZARD_SECS && stats.hazards_hit == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(tokens: u32, hazards: u32, elapsed: f32) -> RunStats {
        RunStats {
            tokens_collected: tokens,
            hazards_hit: hazards,
            elapsed,
            ..Default::default()
        }
    }

    #[test]
    fn test_collect20() {
        assert!(!Mission::Collect20.is_met(&stats(19, 0, 100.0)));
        assert!(Mission::Collect20.is_met(&stats(20, 4, 10.0)));
    }

    #[test]
    fn test_survive45() {
        assert!(!Mission::Survive45.is_met(&stats(50, 0, 44.9)));
        assert!(Mission::Survive45.is_met(&stats(0, 9, 45.0)));
    }

    #[test]
    fn test_no_hazard_needs_time_and_clean_run() {
        assert!(!Mission::NoHazard.is_met(&stats(0, 0, 34.0)));
        assert!(!Mission::NoHazard.is_met(&stats(0, 1, 60.0)));
        assert!(Mission::NoHazard.is_met(&stats(0, 0, 35.0)));
    }
}
