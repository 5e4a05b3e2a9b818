use chrono::NaiveDate;
use rust_decimal::Decimal;
use scrolly_charts::core::{
    EntryIndex, PlayerCounts, Tier, TournamentEntry, by_count_descending, by_date_ascending,
    curated_scenes, filter_by_ids, group_by_keys, nest_and_sort,
};

fn entry(player: &str, tournament: &str, ymd: (i32, u32, u32)) -> TournamentEntry {
    TournamentEntry {
        player_id: player.to_owned(),
        tournament_name: tournament.to_owned(),
        date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).expect("valid date"),
        placement: "1st".to_owned(),
        start_placement: 1,
        tier: Tier::Premier,
        earnings: Decimal::from(1_000),
        team: "OG".to_owned(),
    }
}

fn sample() -> Vec<TournamentEntry> {
    vec![
        entry("Puppey", "The International 2016", (2016, 8, 13)),
        entry("Fly", "The Boston Major 2016", (2016, 12, 10)),
        entry("Ghost", "Some Cup", (2015, 1, 1)),
        entry("Fly", "The International 2016", (2016, 8, 13)),
        entry("Puppey", "The International 2011", (2011, 8, 21)),
    ]
}

#[test]
fn filter_by_ids_keeps_only_listed_players_in_order() {
    let counts = PlayerCounts::from_pairs([("Fly", 114), ("Puppey", 108)]);
    let filtered = filter_by_ids(&sample(), &counts);

    let players: Vec<&str> = filtered.iter().map(|e| e.player_id.as_str()).collect();
    assert_eq!(players, vec!["Puppey", "Fly", "Fly", "Puppey"]);
}

#[test]
fn filter_by_ids_with_empty_counts_is_empty() {
    assert!(filter_by_ids(&sample(), &PlayerCounts::new()).is_empty());
}

#[test]
fn nest_and_sort_orders_players_by_count_descending() {
    let counts = PlayerCounts::from_pairs([("Fly", 114), ("Puppey", 108)]);
    let filtered = filter_by_ids(&sample(), &counts);

    let groups = nest_and_sort(
        &filtered,
        |e| e.player_id.as_str(),
        by_count_descending(&counts),
        by_date_ascending,
    );

    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["Fly", "Puppey"]);

    let puppey_dates: Vec<NaiveDate> = groups[1].values.iter().map(|e| e.date).collect();
    assert!(puppey_dates.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn nest_and_sort_puts_uncounted_players_last() {
    let counts = PlayerCounts::from_pairs([("Fly", 10)]);
    let groups = nest_and_sort(
        &sample(),
        |e| e.player_id.as_str(),
        by_count_descending(&counts),
        by_date_ascending,
    );
    assert_eq!(groups.first().map(|g| g.key.as_str()), Some("Fly"));
    // Equal (unknown) counts keep first-seen order.
    let rest: Vec<&str> = groups[1..].iter().map(|g| g.key.as_str()).collect();
    assert_eq!(rest, vec!["Puppey", "Ghost"]);
}

#[test]
fn group_by_keys_buckets_every_entry_once() {
    let data = sample();
    let groups = group_by_keys(
        &data,
        |e| e.player_id.as_str(),
        |e| e.tournament_name.as_str(),
    );

    let outer: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(outer, vec!["Puppey", "Fly", "Ghost"]);

    let bucketed: usize = groups
        .values()
        .flat_map(|inner| inner.values())
        .map(Vec::len)
        .sum();
    assert_eq!(bucketed, data.len());
}

#[test]
fn entry_index_finds_player_tournament_pairs() {
    let index = EntryIndex::new(&sample());

    let found = index
        .lookup("Fly", "The International 2016")
        .expect("Fly played TI 2016");
    assert_eq!(found.date, NaiveDate::from_ymd_opt(2016, 8, 13).expect("date"));
    assert!(index.lookup("Fly", "The International 2011").is_none());
    assert!(index.lookup("Nobody", "The International 2016").is_none());
    assert_eq!(index.player_count(), 3);
}

#[test]
fn curated_scenes_keep_insertion_order() {
    let scenes = curated_scenes();
    assert_eq!(scenes.len(), 4);

    let first: Vec<&str> = scenes[0].ids().collect();
    assert_eq!(
        first,
        vec!["Fly", "KuroKy", "N0tail", "Mag", "Trixi", "ALWAYSWANNAFLY", "Puppey"]
    );
    assert_eq!(scenes[3].get("Puppey"), Some(29));
    assert_eq!(scenes[3].get("Fly"), None);
}
