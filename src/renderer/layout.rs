//! Scene layout math shared by the drawing code

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, HIT_FLASH_SECS};

/// Number of light beams across the water
pub const BEAM_COUNT: usize = 4;
/// Height of the seafloor band
pub const FLOOR_HEIGHT: f32 = 60.0;
/// Horizontal spacing between seaweed stalks
pub const SEAWEED_SPACING: f32 = 80.0;

/// Offsets of the three water gradient stops, top to bottom
pub const WATER_STOPS: [f32; 3] = [0.0, 0.45, 1.0];

/// Maximum opacity of the damage flash
const MAX_FLASH_ALPHA: f32 = 0.45;

/// Top edge of the seafloor
pub fn floor_y() -> f32 {
    CANVAS_HEIGHT - FLOOR_HEIGHT
}

/// Centre x of each light beam
pub fn beam_xs() -> impl Iterator<Item = f32> {
    (0..BEAM_COUNT).map(|i| CANVAS_WIDTH / BEAM_COUNT as f32 * i as f32 + 80.0)
}

/// Root x of each seaweed stalk
pub fn seaweed_xs() -> impl Iterator<Item = f32> {
    (0..)
        .map(|i| 40.0 + i as f32 * SEAWEED_SPACING)
        .take_while(|x| *x < CANVAS_WIDTH)
}

/// Stalk height at `time_ms`. Sways between 40 and 90 pixels.
pub fn seaweed_height(x: f32, time_ms: f64) -> f32 {
    let phase = time_ms / 900.0 + x as f64 * 0.07;
    40.0 + ((phase.sin() + 1.0) * 25.0) as f32
}

/// Opacity of the damage flash overlay
pub fn flash_alpha(hit_flash: f32) -> f32 {
    (hit_flash / HIT_FLASH_SECS).clamp(0.0, 1.0) * MAX_FLASH_ALPHA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seaweed_height_range() {
        for t in [0.0, 450.0, 1234.5, 99_999.0] {
            for x in seaweed_xs() {
                let h = seaweed_height(x, t);
                assert!((40.0..=90.0).contains(&h));
            }
        }
    }

    #[test]
    fn test_seaweed_covers_width() {
        let xs: Vec<f32> = seaweed_xs().collect();
        assert_eq!(xs.first(), Some(&40.0));
        assert!(*xs.last().unwrap() < CANVAS_WIDTH);
        assert_eq!(xs.len(), 11);
    }

    #[test]
    fn test_flash_alpha() {
        assert_eq!(flash_alpha(0.0), 0.0);
        assert!((flash_alpha(HIT_FLASH_SECS) - MAX_FLASH_ALPHA).abs() < 1e-6);
        assert!(flash_alpha(HIT_FLASH_SECS / 2.0) < MAX_FLASH_ALPHA);
    }

    #[test]
    fn test_water_stops_match_palette() {
        assert_eq!(WATER_STOPS, [0.0, 0.45, 1.0]);
        assert!(WATER_STOPS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_beams() {
        assert_eq!(beam_xs().count(), BEAM_COUNT);
    }
}
