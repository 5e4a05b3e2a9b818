use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Player id → count shown next to that player's strip.
///
/// Insertion order is kept so a scene can be listed the way it was curated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerCounts(IndexMap<String, u32>);

impl PlayerCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[must_use]
    pub fn contains(&self, player_id: &str) -> bool {
        self.0.contains_key(player_id)
    }

    #[must_use]
    pub fn get(&self, player_id: &str) -> Option<u32> {
        self.0.get(player_id).copied()
    }

    pub fn insert(&mut self, player_id: impl Into<String>, count: u32) {
        self.0.insert(player_id.into(), count);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub const SCENE_TITLES: [&str; 4] = [
    "Number of Tournaments Participated",
    "Number of Premier Tournaments Participated",
    "Number of Premier Top 4 Placements",
    "Number of Premier Tournament Wins",
];

/// The four curated player scenes of the narrative, in scroll order.
#[must_use]
pub fn curated_scenes() -> Vec<PlayerCounts> {
    vec![
        PlayerCounts::from_pairs([
            ("Fly", 114),
            ("KuroKy", 111),
            ("N0tail", 111),
            ("Mag", 110),
            ("Trixi", 109),
            ("ALWAYSWANNAFLY", 109),
            ("Puppey", 108),
        ]),
        PlayerCounts::from_pairs([
            ("Puppey", 84),
            ("KuroKy", 75),
            ("N0tail", 74),
            ("s4", 73),
            ("Dendi", 72),
            ("UNiVeRsE", 68),
            ("Fly", 68),
        ]),
        PlayerCounts::from_pairs([
            ("Puppey", 50),
            ("KuroKy", 45),
            ("UNiVeRsE", 42),
            ("N0tail", 42),
            ("s4", 41),
            ("Dendi", 39),
            ("Fly", 38),
        ]),
        PlayerCounts::from_pairs([
            ("Puppey", 29),
            ("XBOCT", 22),
            ("Dendi", 22),
            ("KuroKy", 21),
            ("s4", 19),
            ("Funn1k", 16),
            ("Arteezy", 13),
        ]),
    ]
}
