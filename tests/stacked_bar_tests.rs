use scrolly_charts::charts::palette::{INTERNATIONAL_WIN_COLOR, OTHERS_COLOR, SEGMENT_COLOR};
use scrolly_charts::charts::{StackedBarChart, StackedBarConfig, default_row_icons};
use scrolly_charts::core::EntryIndex;
use scrolly_charts::data::{load_top_earners, load_tournament_entries};
use scrolly_charts::render::NullRenderer;
use scrolly_charts::render::Renderer;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn chart(config: StackedBarConfig) -> StackedBarChart {
    let entries = load_tournament_entries(fixture("tournament_entries.csv")).expect("entries");
    let table = load_top_earners(fixture("top_earners.csv")).expect("top earners");
    StackedBarChart::new(table, EntryIndex::new(&entries), 1000.0, config).expect("chart init")
}

#[test]
fn zero_values_produce_no_segments() {
    let chart = chart(StackedBarConfig::default());
    let segments = chart.segments().expect("segments");

    assert_eq!(segments.len(), 8);
    assert!(segments.iter().all(|s| s.width > 0.0));
    assert_eq!(chart.labels(), vec!["N0tail", "KuroKy", "Puppey"]);
}

#[test]
fn segment_colors_follow_results() {
    let chart = chart(StackedBarConfig::default());
    let segments = chart.segments().expect("segments");
    let color_of = |row: &str, key: &str| {
        segments
            .iter()
            .find(|s| s.row_label == row && s.key == key)
            .map(|s| s.color)
            .expect("segment present")
    };

    assert_eq!(color_of("N0tail", "The International 2018"), INTERNATIONAL_WIN_COLOR);
    assert_eq!(color_of("Puppey", "The International 2016"), SEGMENT_COLOR);
    // No recorded entry: default color.
    assert_eq!(color_of("KuroKy", "The International 2016"), SEGMENT_COLOR);
    assert_eq!(color_of("KuroKy", "Others"), OTHERS_COLOR);
}

#[test]
fn segments_of_one_row_share_a_band_and_abut() {
    let chart = chart(StackedBarConfig::default());
    let segments = chart.segments().expect("segments");
    let kuroky: Vec<_> = segments.iter().filter(|s| s.row_label == "KuroKy").collect();

    assert_eq!(kuroky.len(), 3);
    assert!(kuroky.iter().all(|s| s.y == kuroky[0].y));
    let mut sorted = kuroky.clone();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
    for pair in sorted.windows(2) {
        assert!((pair[0].x + pair[0].width - pair[1].x).abs() < 1e-9);
    }
}

#[test]
fn frame_contains_bars_axis_labels_and_icons() {
    let chart = chart(StackedBarConfig::default().with_row_icons(default_row_icons()));
    let frame = chart.build_render_frame().expect("frame");
    frame.validate().expect("valid frame");

    assert_eq!(frame.rects.len(), 8);
    // 10 grid lines (first tick has none), 8 separators, 1 baseline.
    assert_eq!(frame.lines.len(), 19);
    // 11 tick labels plus 3 player labels.
    assert_eq!(frame.texts.len(), 14);
    assert!(frame.texts.iter().any(|t| t.text == "500k"));
    assert!(frame.texts.iter().any(|t| t.text == "5.0M"));
    assert_eq!(frame.images.len(), 3);
    assert_eq!(frame.images[0].href, "./img/ti7_icon.png");

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_rect_count, 8);
}

#[test]
fn tooltip_reports_tournament_badge_and_amount() {
    let chart = chart(StackedBarConfig::default());
    let segment = chart
        .segments()
        .expect("segments")
        .into_iter()
        .find(|s| s.row_label == "KuroKy" && s.key == "The International 2017")
        .expect("segment");

    let tooltip = chart
        .tooltip_at(segment.x + segment.width / 2.0, segment.y + segment.height / 2.0)
        .expect("tooltip query")
        .expect("tooltip over segment");

    assert_eq!(tooltip.content.title, "The International 2017");
    assert_eq!(tooltip.content.badge.text, "1st");
    assert!(tooltip.content.badge.background.is_some());
    assert_eq!(tooltip.content.value_label, "$2,172,536");
    assert!(tooltip.content.date_label.is_none());
}

#[test]
fn others_tooltip_has_blank_badge() {
    let chart = chart(StackedBarConfig::default());
    let segment = chart
        .segments()
        .expect("segments")
        .into_iter()
        .find(|s| s.row_label == "Puppey" && s.key == "Others")
        .expect("segment");

    let tooltip = chart
        .tooltip_at(segment.x + 1.0, segment.y + 1.0)
        .expect("tooltip query")
        .expect("tooltip over segment");

    assert_eq!(tooltip.content.badge.text, "");
    assert!(tooltip.content.badge.background.is_none());
    assert_eq!(tooltip.content.value_label, "$1,400,000");
}

#[test]
fn pointer_between_bands_has_no_tooltip() {
    let chart = chart(StackedBarConfig::default());
    assert!(chart.tooltip_at(10.0, 1.0).expect("tooltip query").is_none());
    assert!(chart.tooltip_at(-5.0, 100.0).expect("tooltip query").is_none());
}
