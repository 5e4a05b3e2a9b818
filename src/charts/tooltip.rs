use serde::{Deserialize, Serialize};

use crate::charts::format::{format_money, format_month_year};
use crate::charts::palette::PlacementRank;
use crate::core::TournamentEntry;
use crate::render::Color;

/// Placement label drawn on a colored chip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementBadge {
    pub text: String,
    /// `None` draws the chip without background.
    pub background: Option<Color>,
}

impl PlacementBadge {
    #[must_use]
    pub fn for_entry(entry: &TournamentEntry) -> Self {
        Self {
            text: entry.placement.clone(),
            background: Some(PlacementRank::from_start_placement(entry.start_placement).badge_color()),
        }
    }

    #[must_use]
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            background: None,
        }
    }
}

/// Text shown inside a tooltip box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub title: String,
    pub date_label: Option<String>,
    pub team: Option<String>,
    pub badge: PlacementBadge,
    pub value_label: String,
}

impl TooltipContent {
    /// Full detail card for one tournament entry.
    #[must_use]
    pub fn for_entry(entry: &TournamentEntry) -> Self {
        Self {
            title: entry.tournament_name.clone(),
            date_label: Some(format_month_year(entry.date)),
            team: Some(entry.team.clone()),
            badge: PlacementBadge::for_entry(entry),
            value_label: format_money(entry.earnings),
        }
    }
}

/// Top-left corner of the tooltip box relative to the chart container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    pub left: f64,
    pub top: f64,
    /// True when the box was moved to the left of its anchor.
    pub flipped: bool,
}

impl TooltipPosition {
    #[must_use]
    pub fn at(left: f64, top: f64) -> Self {
        Self {
            left,
            top,
            flipped: false,
        }
    }

    /// Anchors the box at `(anchor_x, anchor_y)` and moves it left by its own
    /// width once the pointer passes `flip_after_x`.
    #[must_use]
    pub fn beside(
        anchor_x: f64,
        anchor_y: f64,
        pointer_x: f64,
        flip_after_x: f64,
        box_width: f64,
    ) -> Self {
        let flipped = pointer_x > flip_after_x;
        Self {
            left: if flipped { anchor_x - box_width } else { anchor_x },
            top: anchor_y,
            flipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub content: TooltipContent,
    pub position: TooltipPosition,
}
