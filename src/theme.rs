//! Cosmetic themes
//!
//! A closed set of themes, each with its own obstacle sprite table. The
//! engine picks a sprite index at spawn time purely for looks; theme choice
//! never affects gameplay.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Classic,
    Space,
    Garden,
}

impl Theme {
    pub const ALL: [Self; 3] = [Self::Classic, Self::Space, Self::Garden];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Space => "Space",
            Theme::Garden => "Garden",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Theme::Classic),
            "space" => Some(Theme::Space),
            "garden" => Some(Theme::Garden),
            _ => None,
        }
    }

    /// Obstacle sprite table; always non-empty
    pub fn sprites(&self) -> &'static [char] {
        match self {
            Theme::Classic => &['#'],
            Theme::Space => &['*', 'o', '@'],
            Theme::Garden => &['&', '%', 'v'],
        }
    }

    /// Glyph for a sprite index chosen at spawn
    pub fn sprite(&self, index: u8) -> char {
        let sprites = self.sprites();
        sprites[index as usize % sprites.len()]
    }

    pub fn next(&self) -> Self {
        match self {
            Theme::Classic => Theme::Space,
            Theme::Space => Theme::Garden,
            Theme::Garden => Theme::Classic,
        }
    }
}
