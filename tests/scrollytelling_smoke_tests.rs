use scrolly_charts::core::{FilterCriteria, curated_scenes};
use scrolly_charts::data::{load_top_earners, load_tournament_entries};
use scrolly_charts::render::{NullRenderer, SvgRenderer};
use scrolly_charts::scroll::{ScrollDirection, StepEvent};
use scrolly_charts::story::{ScrollStep, StoryAction, default_storyboard};
use scrolly_charts::{ChartError, Scrollytelling, StoryConfig};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn story() -> Scrollytelling<NullRenderer> {
    let config = StoryConfig::from_path(fixture("story.json")).expect("config");
    Scrollytelling::load(NullRenderer::default(), config).expect("mount story")
}

/// Scroll offset that puts the trigger line just inside `step`.
fn scroll_to_step(story: &Scrollytelling<NullRenderer>, step: usize) -> f64 {
    let layout = story.layout();
    let offset = story.config().trigger_offset * layout.graphic_height;
    layout.step_extents(story.storyboard().len())[step].top - offset + 1.0
}

#[test]
fn config_paths_resolve_next_to_config_file() {
    let config = StoryConfig::from_path(fixture("story.json")).expect("config");
    assert!(config.entries_path.ends_with("fixtures/tournament_entries.csv"));
    assert_eq!(config.viewport.height, 500);
    assert_eq!(config.trigger_offset, 0.8);
}

#[test]
fn mounts_hidden_on_first_scene() {
    let mut story = story();
    assert_eq!(story.layout().chart_width, 1200.0);
    assert_eq!(
        story.dot_strip().strip_keys(),
        vec!["Fly", "KuroKy", "N0tail", "Mag", "Puppey"]
    );
    assert_eq!(story.active_step(), None);

    story.render_dot_strip().expect("render");
    assert_eq!(story.renderer().frames_rendered, 1);
    assert_eq!(story.renderer().last_circle_count, 12);

    let frame = story.dot_strip().build_render_frame().expect("frame");
    assert!(frame.circles.iter().all(|c| c.fill.alpha == 0.0));
}

#[test]
fn first_scroll_reveals_strips() {
    let mut story = story();
    let updates = story.on_scroll(0.0).expect("scroll");

    assert_eq!(updates.len(), 1);
    assert_eq!(
        updates[0].event,
        StepEvent {
            index: 0,
            direction: ScrollDirection::Down
        }
    );
    assert_eq!(updates[0].plan.strips.len(), 5);
    assert!(story.story_state().style.strips_visible);
    assert_eq!(story.active_step(), Some(0));
}

#[test]
fn jumping_to_scene_two_applies_every_crossed_step() {
    let mut story = story();
    let target = scroll_to_step(&story, 4);
    let updates = story.on_scroll(target).expect("scroll");

    let indices: Vec<usize> = updates.iter().map(|u| u.event.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(story.story_state().scene, 1);

    let scene_change = &updates[4].plan;
    assert_eq!(scene_change.exiting_keys(), vec!["Mag"]);
    assert_eq!(scene_change.entering_keys(), vec!["s4", "Dendi"]);
    assert_eq!(story.dot_strip().title(), "Number of Premier Tournaments Participated");

    story
        .render_dot_strip_at(scene_change, 500.0)
        .expect("render mid transition");
    story.render_dot_strip().expect("render settled");
    assert_eq!(story.renderer().frames_rendered, 2);
}

#[test]
fn scrolling_back_to_top_restores_first_scene() {
    let mut story = story();
    let bottom = scroll_to_step(&story, 7);
    story.on_scroll(bottom).expect("scroll down");
    assert_eq!(story.story_state().scene, 3);

    story.on_scroll(0.0).expect("scroll up");
    assert_eq!(story.story_state().scene, 0);
    assert!(!story.story_state().style.dots_visible);
    assert_eq!(
        story.dot_strip().strip_keys(),
        vec!["Fly", "KuroKy", "N0tail", "Mag", "Puppey"]
    );
}

#[test]
fn reset_returns_to_initial_state() {
    let mut story = story();
    let target = scroll_to_step(&story, 6);
    story.on_scroll(target).expect("scroll");
    story.reset().expect("reset");

    assert_eq!(story.story_state().scene, 0);
    assert_eq!(story.active_step(), None);
    assert_eq!(story.on_scroll(0.0).expect("scroll").len(), 1);
}

#[test]
fn bar_chart_renders_and_answers_tooltips() {
    let mut story = story();
    story.render_stacked_bar().expect("render bar");
    assert_eq!(story.renderer().last_rect_count, 8);

    let segment = story
        .stacked_bar()
        .segments()
        .expect("segments")
        .into_iter()
        .find(|s| s.row_label == "N0tail")
        .expect("segment");
    let tooltip = story
        .stacked_bar_tooltip(segment.x + 1.0, segment.y + 1.0)
        .expect("tooltip query")
        .expect("tooltip");
    assert_eq!(tooltip.content.title, "The International 2018");
}

#[test]
fn svg_renderer_receives_story_frames() {
    let config = StoryConfig::from_path(fixture("story.json")).expect("config");
    let mut story = Scrollytelling::load(SvgRenderer::new(), config).expect("mount story");
    story.on_scroll(0.0).expect("scroll");
    story.render_dot_strip().expect("render");

    let svg = story.into_renderer().into_output();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">Fly</text>"));
}

#[test]
fn missing_data_file_fails_to_mount() {
    let config = StoryConfig::default().with_data_paths(fixture("nope.csv"), fixture("nope.csv"));
    let err = Scrollytelling::load(NullRenderer::default(), config)
        .err()
        .expect("mount fails");
    assert!(matches!(err, ChartError::Io { .. }));
}

fn mount_with(storyboard: Vec<ScrollStep>) -> Result<Scrollytelling<NullRenderer>, ChartError> {
    let config = StoryConfig::from_path(fixture("story.json")).expect("config");
    let entries = load_tournament_entries(&config.entries_path).expect("entries");
    let top_earners = load_top_earners(&config.top_earners_path).expect("top earners");
    Scrollytelling::with_storyboard(
        NullRenderer::default(),
        config,
        entries,
        top_earners,
        curated_scenes(),
        storyboard,
    )
}

#[test]
fn storyboard_with_unknown_scene_fails_to_mount() {
    let mut storyboard = default_storyboard();
    storyboard[1] = ScrollStep::new(1).on_down(StoryAction::ShowScene {
        scene: 9,
        criteria: FilterCriteria::default(),
    });
    let err = mount_with(storyboard).err().expect("mount fails");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn storyboard_with_misplaced_step_fails_to_mount() {
    let mut storyboard = default_storyboard();
    storyboard.swap(2, 3);
    let err = mount_with(storyboard).err().expect("mount fails");
    assert!(matches!(err, ChartError::InvalidData(_)));

    assert!(mount_with(default_storyboard()).is_ok());
}
