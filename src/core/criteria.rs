use serde::{Deserialize, Serialize};

use crate::core::TournamentEntry;
use crate::core::scenes::SCENE_TITLES;

/// Which dot-strip entries stay emphasized in the current scene.
///
/// Criteria never remove entries. Failing entries are drawn faded so the
/// bound dataset keeps its identity across criteria changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub max_start_placement: u32,
    #[serde(default)]
    pub premier_only: bool,
    #[serde(default)]
    pub international_only: bool,
    pub title: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            max_start_placement: 100,
            premier_only: false,
            international_only: false,
            title: SCENE_TITLES[0].to_owned(),
        }
    }
}

impl FilterCriteria {
    #[must_use]
    pub fn new(max_start_placement: u32, title: impl Into<String>) -> Self {
        Self {
            max_start_placement,
            premier_only: false,
            international_only: false,
            title: title.into(),
        }
    }

    #[must_use]
    pub fn with_premier_only(mut self, premier_only: bool) -> Self {
        self.premier_only = premier_only;
        self
    }

    #[must_use]
    pub fn with_international_only(mut self, international_only: bool) -> Self {
        self.international_only = international_only;
        self
    }

    /// True when `entry` fails any active restriction.
    #[must_use]
    pub fn is_deemphasized(&self, entry: &TournamentEntry) -> bool {
        entry.start_placement > self.max_start_placement
            || (self.premier_only && !entry.tier.is_premier())
            || (self.international_only && !entry.is_international())
    }

    #[must_use]
    pub fn is_emphasized(&self, entry: &TournamentEntry) -> bool {
        !self.is_deemphasized(entry)
    }
}
