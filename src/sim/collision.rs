//! Circle contact tests between the player and entities
//!
//! Every entity is a circle. A touch only counts once the circles overlap by
//! more than a small slack, so grazing passes are forgiven.

use glam::Vec2;

use crate::circle_gap;

/// True when two circles overlap by more than `slack` pixels
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32, slack: f32) -> bool {
    circle_gap(a, ra, b, rb) < -slack
}

/// Step `pos` toward `target` by at most `max_step` pixels
pub fn pull_toward(pos: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let to_target = target - pos;
    let dist = to_target.length();
    if dist <= max_step || dist == 0.0 {
        target
    } else {
        pos + to_target / dist * max_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_needs_overlap_beyond_slack() {
        let player = Vec2::new(200.0, 240.0);
        // Radii 26 + 16 = 42, slack 4: contact below 38
        assert!(!circles_touch(player, 26.0, Vec2::new(239.0, 240.0), 16.0, 4.0));
        assert!(!circles_touch(player, 26.0, Vec2::new(238.0, 240.0), 16.0, 4.0));
        assert!(circles_touch(player, 26.0, Vec2::new(237.9, 240.0), 16.0, 4.0));
    }

    #[test]
    fn test_touch_is_symmetric() {
        let a = Vec2::new(10.0, 10.0);
        let b = Vec2::new(30.0, 25.0);
        assert_eq!(
            circles_touch(a, 20.0, b, 12.0, 6.0),
            circles_touch(b, 12.0, a, 20.0, 6.0)
        );
    }

    #[test]
    fn test_pull_toward_stops_at_target() {
        let target = Vec2::new(100.0, 0.0);
        let moved = pull_toward(Vec2::ZERO, target, 30.0);
        assert!((moved.x - 30.0).abs() < 1e-5);

        let arrived = pull_toward(Vec2::new(95.0, 0.0), target, 30.0);
        assert_eq!(arrived, target);
    }
}
