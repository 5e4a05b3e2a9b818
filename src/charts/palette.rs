use serde::{Deserialize, Serialize};

use crate::core::TournamentEntry;
use crate::render::Color;

pub const OTHERS_KEY: &str = "Others";

pub const GRID_COLOR: Color = Color::from_rgb8(0xe0, 0xe0, 0xe0);
pub const OTHERS_COLOR: Color = Color::from_rgb8(0xbf, 0xe6, 0xef);
pub const INTERNATIONAL_WIN_COLOR: Color = Color::from_rgb8(0xee, 0xbd, 0x6b);
pub const SEGMENT_COLOR: Color = Color::from_rgb8(0x44, 0x76, 0x95);

/// Badge colors use the rank color at this alpha.
pub const BADGE_ALPHA: f64 = 0.5;

/// Color bucket for a numeric start placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementRank {
    First,
    Second,
    Third,
    Fourth,
    TopEight,
    Rest,
}

impl PlacementRank {
    #[must_use]
    pub fn from_start_placement(start_placement: u32) -> Self {
        match start_placement {
            1 => Self::First,
            2 => Self::Second,
            3 => Self::Third,
            4 => Self::Fourth,
            p if p <= 8 => Self::TopEight,
            _ => Self::Rest,
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::First => Color::from_rgb8(0xff, 0xdd, 0x3c),
            Self::Second => Color::from_rgb8(0x9a, 0x9a, 0x9a),
            Self::Third => Color::from_rgb8(0xb1, 0x84, 0x2a),
            Self::Fourth => Color::from_rgb8(0xf8, 0x99, 0x6b),
            Self::TopEight => Color::from_rgb8(0x00, 0x7f, 0x99),
            Self::Rest => Color::from_rgb8(0x16, 0x6f, 0x82),
        }
    }

    #[must_use]
    pub const fn badge_color(self) -> Color {
        self.color().with_alpha(BADGE_ALPHA)
    }
}

/// Fill for one stacked-bar segment.
///
/// `entry` is the player's result at `tournament`, when one was recorded.
#[must_use]
pub fn segment_color(tournament: &str, entry: Option<&TournamentEntry>) -> Color {
    if tournament == OTHERS_KEY {
        return OTHERS_COLOR;
    }
    match entry {
        Some(entry) if tournament.contains("International") && entry.start_placement == 1 => {
            INTERNATIONAL_WIN_COLOR
        }
        _ => SEGMENT_COLOR,
    }
}
