use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerCounts, TournamentEntry};

/// Two-level grouping: outer key → inner key → matching values.
pub type NestedGroups<T> = IndexMap<String, IndexMap<String, Vec<T>>>;

/// One keyed group produced by [`nest_and_sort`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group<T> {
    pub key: String,
    pub values: Vec<T>,
}

/// Keeps entries whose player id is a key of `ids`, in input order.
#[must_use]
pub fn filter_by_ids(data: &[TournamentEntry], ids: &PlayerCounts) -> Vec<TournamentEntry> {
    data.iter()
        .filter(|entry| ids.contains(&entry.player_id))
        .cloned()
        .collect()
}

/// Groups `data` by `outer` then `inner` key.
///
/// Keys appear in first-seen order and values keep input order. Keys with no
/// values never appear.
#[must_use]
pub fn group_by_keys<T, O, I>(data: &[T], outer: O, inner: I) -> NestedGroups<T>
where
    T: Clone,
    O: Fn(&T) -> &str,
    I: Fn(&T) -> &str,
{
    let mut groups: NestedGroups<T> = IndexMap::new();
    for item in data {
        groups
            .entry(outer(item).to_owned())
            .or_default()
            .entry(inner(item).to_owned())
            .or_default()
            .push(item.clone());
    }
    groups
}

/// Groups `data` by `key`, then orders groups with `group_order` and each
/// group's values with `value_order`.
///
/// Both sorts are stable, so ties keep first-seen order.
#[must_use]
pub fn nest_and_sort<T, K, G, V>(
    data: &[T],
    key: K,
    mut group_order: G,
    mut value_order: V,
) -> Vec<Group<T>>
where
    T: Clone,
    K: Fn(&T) -> &str,
    G: FnMut(&str, &str) -> Ordering,
    V: FnMut(&T, &T) -> Ordering,
{
    let mut buckets: IndexMap<String, Vec<T>> = IndexMap::new();
    for item in data {
        buckets
            .entry(key(item).to_owned())
            .or_default()
            .push(item.clone());
    }

    let mut groups: Vec<Group<T>> = buckets
        .into_iter()
        .map(|(key, mut values)| {
            values.sort_by(&mut value_order);
            Group { key, values }
        })
        .collect();
    groups.sort_by(|a, b| group_order(&a.key, &b.key));
    groups
}

/// Orders keys by their count, highest first. Unknown keys sort last.
pub fn by_count_descending(counts: &PlayerCounts) -> impl FnMut(&str, &str) -> Ordering + '_ {
    move |a: &str, b: &str| counts.get(b).cmp(&counts.get(a))
}

pub fn by_date_ascending(a: &TournamentEntry, b: &TournamentEntry) -> Ordering {
    a.date.cmp(&b.date)
}

/// Player → tournament lookup over the full entry set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryIndex {
    groups: NestedGroups<TournamentEntry>,
}

impl EntryIndex {
    #[must_use]
    pub fn new(entries: &[TournamentEntry]) -> Self {
        Self {
            groups: group_by_keys(
                entries,
                |e| e.player_id.as_str(),
                |e| e.tournament_name.as_str(),
            ),
        }
    }

    /// First entry recorded for `player_id` at `tournament`.
    #[must_use]
    pub fn lookup(&self, player_id: &str, tournament: &str) -> Option<&TournamentEntry> {
        self.groups
            .get(player_id)
            .and_then(|by_tournament| by_tournament.get(tournament))
            .and_then(|entries| entries.first())
    }

    #[must_use]
    pub fn groups(&self) -> &NestedGroups<TournamentEntry> {
        &self.groups
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.groups.len()
    }
}
