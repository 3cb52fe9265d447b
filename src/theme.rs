//! Colour themes
//!
//! The theme only changes how the scene is painted and which CSS class the
//! page root carries. Gameplay never reads it.

use serde::{Deserialize, Serialize};

/// Selectable themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Deep,
    Reef,
    Midnight,
}

/// Colours the renderer needs for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Background gradient, top to bottom (offsets 0, 0.45, 1)
    pub water: [&'static str; 3],
    /// Light beam start colour
    pub beam: &'static str,
    pub beam_alpha: f64,
    /// Seafloor gradient, top to bottom
    pub floor: [&'static str; 2],
    pub seaweed: &'static str,
    pub bubble_fill: &'static str,
    pub bubble_stroke: &'static str,
    /// Token radial gradient stops and rim
    pub token: [&'static str; 3],
    pub token_rim: &'static str,
    /// Damage flash overlay
    pub flash: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Deep, Theme::Reef, Theme::Midnight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Deep => "Deep",
            Theme::Reef => "Reef",
            Theme::Midnight => "Midnight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deep" => Some(Theme::Deep),
            "reef" => Some(Theme::Reef),
            "midnight" => Some(Theme::Midnight),
            _ => None,
        }
    }

    /// CSS class applied to the page root
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Deep => "theme-deep",
            Theme::Reef => "theme-reef",
            Theme::Midnight => "theme-midnight",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Deep => Palette {
                water: ["#020318", "#031834", "#020811"],
                beam: "rgba(255,255,255,0.08)",
                beam_alpha: 0.35,
                floor: ["#050813", "#010308"],
                seaweed: "rgba(19, 219, 142, 0.85)",
                bubble_fill: "rgba(255,255,255,0.25)",
                bubble_stroke: "rgba(255,255,255,0.5)",
                token: ["#ffe9ff", "#ffb7f2", "rgba(255,47,208,0.08)"],
                token_rim: "#ff2fd0",
                flash: "rgba(255, 47, 208, 0.85)",
            },
            Theme::Reef => Palette {
                water: ["#0a4a6e", "#0b6d8f", "#06344d"],
                beam: "rgba(255,250,220,0.14)",
                beam_alpha: 0.45,
                floor: ["#c2a36b", "#8a6d3b"],
                seaweed: "rgba(46, 204, 113, 0.9)",
                bubble_fill: "rgba(255,255,255,0.3)",
                bubble_stroke: "rgba(255,255,255,0.65)",
                token: ["#fffbe0", "#ffe36e", "rgba(255,170,0,0.1)"],
                token_rim: "#ffaa00",
                flash: "rgba(255, 90, 60, 0.85)",
            },
            Theme::Midnight => Palette {
                water: ["#000000", "#050514", "#000000"],
                beam: "rgba(140,160,255,0.05)",
                beam_alpha: 0.25,
                floor: ["#03030a", "#000000"],
                seaweed: "rgba(90, 120, 255, 0.7)",
                bubble_fill: "rgba(180,200,255,0.18)",
                bubble_stroke: "rgba(180,200,255,0.4)",
                token: ["#e9f3ff", "#8fd3ff", "rgba(47,160,255,0.08)"],
                token_rim: "#2fa0ff",
                flash: "rgba(120, 80, 255, 0.85)",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parsing() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_str(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::from_str("neon"), None);
    }

    #[test]
    fn test_css_classes_distinct() {
        let classes: Vec<_> = Theme::ALL.iter().map(|t| t.css_class()).collect();
        assert_ne!(classes[0], classes[1]);
        assert_ne!(classes[1], classes[2]);
    }
}
