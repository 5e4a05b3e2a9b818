use approx::assert_relative_eq;
use chrono::NaiveDate;
use scrolly_charts::charts::{
    DotStripChart, DotStripConfig, DotStripStyle, JoinKind, RadiusMode, TransitionTiming,
};
use scrolly_charts::core::{
    FilterCriteria, PlayerCounts, SCENE_TITLES, TournamentEntry, curated_scenes, filter_by_ids,
};
use scrolly_charts::data::load_tournament_entries;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn entries() -> Vec<TournamentEntry> {
    load_tournament_entries(fixture("tournament_entries.csv")).expect("entries")
}

fn scene(index: usize) -> PlayerCounts {
    curated_scenes().swap_remove(index)
}

fn chart() -> DotStripChart {
    let counts = scene(0);
    let data = filter_by_ids(&entries(), &counts);
    DotStripChart::new(data, counts, 1200.0, DotStripConfig::default()).expect("chart init")
}

fn show_last_scene(chart: &mut DotStripChart) -> scrolly_charts::charts::TransitionPlan {
    let counts = scene(3);
    let data = filter_by_ids(&entries(), &counts);
    let criteria = FilterCriteria::new(1, SCENE_TITLES[3]).with_premier_only(true);
    chart.set_data(data, counts, criteria).expect("set data")
}

#[test]
fn strips_follow_count_order_with_stable_ties() {
    let chart = chart();
    assert_eq!(
        chart.strip_keys(),
        vec!["Fly", "KuroKy", "N0tail", "Mag", "Puppey"]
    );
    let puppey = &chart.groups()[4];
    assert!(puppey.values.windows(2).all(|w| w[0].date <= w[1].date));
}

#[test]
fn settled_frame_draws_axis_strips_and_dots() {
    let chart = chart();
    let frame = chart.build_render_frame().expect("frame");
    frame.validate().expect("valid frame");

    // Years 2012..=2018 as grid lines, plus one track per strip.
    assert_eq!(frame.lines.len(), 7 + 5);
    assert_eq!(frame.circles.len(), 12);
    // Year labels, strip labels and counts.
    assert_eq!(frame.texts.len(), 7 + 5 + 5);
    assert!(frame.texts.iter().any(|t| t.text == "114"));
}

#[test]
fn radius_scale_is_clamped_to_range() {
    let chart = chart();
    assert_relative_eq!(chart.radius_for_earnings(0.0).expect("radius"), 5.0);
    assert_relative_eq!(chart.radius_for_earnings(500_000.0).expect("radius"), 25.0);
    assert_relative_eq!(chart.radius_for_earnings(1_000_000.0).expect("radius"), 45.0);
    assert_relative_eq!(chart.radius_for_earnings(10_862_683.0).expect("radius"), 45.0);
}

#[test]
fn missing_groups_exit_instead_of_erroring() {
    let mut chart = chart();
    let plan = show_last_scene(&mut chart);

    assert_eq!(plan.exiting_keys(), vec!["Fly", "N0tail", "Mag"]);
    assert_eq!(plan.entering_keys(), vec!["Dendi", "XBOCT", "s4"]);
    assert_eq!(plan.exit_phase_ms, 1000);
    assert_eq!(
        chart.strip_keys(),
        vec!["Puppey", "Dendi", "XBOCT", "KuroKy", "s4"]
    );
    assert_eq!(chart.title(), SCENE_TITLES[3]);

    for exit in plan.strips_of(JoinKind::Exit) {
        assert_eq!(exit.delay_ms, 0);
        assert_relative_eq!(exit.to.opacity, 0.0);
    }
}

#[test]
fn repositioning_waits_for_exits_and_staggers() {
    let mut chart = chart();
    let plan = show_last_scene(&mut chart);

    let puppey = plan.strip("Puppey").expect("puppey moves");
    assert_eq!(puppey.kind, JoinKind::Update);
    assert_eq!(puppey.delay_ms, 1000);

    let kuroky = plan.strip("KuroKy").expect("kuroky moves");
    assert_eq!(kuroky.delay_ms, 1000 + 3 * 200);

    let dendi = plan.strip("Dendi").expect("dendi enters");
    assert_eq!(dendi.kind, JoinKind::Enter);
    assert_relative_eq!(dendi.from.y, 650.0);
    assert_eq!(plan.total_duration_ms(), 1000 + 4 * 200 + 1000);
}

#[test]
fn criteria_change_fades_only_affected_dots() {
    let mut chart = chart();
    let plan = show_last_scene(&mut chart);

    // Puppey: TI 2016 and DreamLeague; KuroKy: ESL One Hamburg.
    assert_eq!(plan.dots.len(), 3);
    for dot in &plan.dots {
        assert_relative_eq!(dot.from.opacity, 0.5);
        assert_relative_eq!(dot.to.opacity, 0.05);
    }
}

#[test]
fn transition_frame_keeps_exiting_strips_until_faded() {
    let mut chart = chart();
    let plan = show_last_scene(&mut chart);

    let mid_exit = chart.build_transition_frame(&plan, 500.0).expect("frame");
    // Six retired dots plus eleven current ones.
    assert_eq!(mid_exit.circles.len(), 17);

    let settled = chart.build_render_frame().expect("frame");
    assert_eq!(settled.circles.len(), 11);
}

#[test]
fn hiding_style_reveals_nothing_and_uses_fixed_radius() {
    let mut chart = chart();
    let plan = chart.set_style(DotStripStyle::hidden()).expect("style");

    assert_eq!(plan.strips.len(), 5);
    assert_eq!(plan.strips[1].delay_ms, 100);
    assert_eq!(plan.exit_phase_ms, 0);
    assert!(plan.dots.iter().all(|dot| dot.to.opacity == 0.0 && dot.to.radius == 5.0));

    let frame = chart.build_render_frame().expect("frame");
    assert!(frame.circles.iter().all(|c| c.fill.alpha == 0.0));

    let unchanged = chart.set_style(DotStripStyle::hidden()).expect("style");
    assert!(unchanged.is_empty());
}

#[test]
fn hiding_dots_fades_together_over_hide_timing() {
    let mut chart = chart();
    let plan = chart
        .set_style(DotStripStyle {
            dots_visible: false,
            ..DotStripStyle::default()
        })
        .expect("style");

    assert!(plan.strips.is_empty());
    assert!(!plan.dots.is_empty());
    assert!(
        plan.dots
            .iter()
            .all(|dot| dot.delay_ms == 0 && dot.duration_ms == 1000 && dot.to.opacity == 0.0)
    );
}

#[test]
fn huge_staggers_saturate_delays() {
    let timing = TransitionTiming {
        strip_reveal_stagger_ms: u64::MAX,
        ..TransitionTiming::default()
    };
    let counts = scene(0);
    let data = filter_by_ids(&entries(), &counts);
    let mut chart = DotStripChart::new(
        data,
        counts,
        1200.0,
        DotStripConfig::default().with_timing(timing),
    )
    .expect("chart init");

    let plan = chart.set_style(DotStripStyle::hidden()).expect("style");
    assert_eq!(plan.strips[0].delay_ms, 0);
    assert_eq!(plan.strips[1].delay_ms, u64::MAX);
    assert_eq!(plan.total_duration_ms(), u64::MAX);
}

#[test]
fn config_rejects_band_padding_outside_unit_interval() {
    let config = DotStripConfig {
        band_padding: 1.5,
        ..DotStripConfig::default()
    };
    assert!(config.validate().is_err());

    let config = DotStripConfig {
        tooltip_box_width: f64::NAN,
        ..DotStripConfig::default()
    };
    assert!(config.validate().is_err());

    let config = DotStripConfig {
        enter_offset_px: -1.0,
        ..DotStripConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(DotStripConfig::default().validate().is_ok());
}

#[test]
fn radius_mode_switch_staggers_dots() {
    let mut chart = chart();
    let plan = chart
        .set_style(DotStripStyle {
            radius: RadiusMode::Fixed,
            ..DotStripStyle::default()
        })
        .expect("style");

    assert!(plan.strips.is_empty());
    let second = plan
        .dots
        .iter()
        .find(|dot| dot.index == 1)
        .expect("second dot of some strip");
    assert_eq!(second.delay_ms, 15);
    assert_eq!(second.duration_ms, 500);
}

#[test]
fn tooltip_snaps_to_nearest_emphasized_entry() {
    let mut chart = chart();
    show_last_scene(&mut chart);

    let ti_2016 = NaiveDate::from_ymd_opt(2016, 8, 13).expect("date");
    let pointer_x = chart.time_scale().date_to_pixel(ti_2016).expect("pixel");
    let tooltip = chart
        .tooltip_for_strip("Puppey", pointer_x)
        .expect("tooltip query")
        .expect("puppey has an emphasized win");

    // TI 2016 is faded under the current criteria, so the 2011 win is used.
    assert_eq!(tooltip.content.title, "The International 2011");
    assert_eq!(tooltip.content.date_label.as_deref(), Some("8/2011"));
    assert_eq!(tooltip.content.value_label, "$1,000,000");
    assert!(tooltip.position.flipped);
}

#[test]
fn tooltip_is_empty_without_emphasized_entries() {
    let mut chart = chart();
    show_last_scene(&mut chart);

    assert!(
        chart
            .tooltip_for_strip("XBOCT", 100.0)
            .expect("tooltip query")
            .is_none()
    );
    assert!(
        chart
            .tooltip_for_strip("Nobody", 100.0)
            .expect("tooltip query")
            .is_none()
    );
}

#[test]
fn empty_dataset_is_rejected() {
    let err = DotStripChart::new(Vec::new(), PlayerCounts::new(), 1200.0, DotStripConfig::default());
    assert!(err.is_err());
}
