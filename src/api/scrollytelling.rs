use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::charts::{DotStripChart, StackedBarChart, Tooltip, TransitionPlan};
use crate::config::StoryConfig;
use crate::core::{
    EntryIndex, PlayerCounts, TopEarnerTable, TournamentEntry, curated_scenes, filter_by_ids,
};
use crate::data::{load_top_earners, load_tournament_entries};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;
use crate::scroll::{ScrollController, ScrollLayout, StepEvent};
use crate::story::{
    ScrollStep, StoryState, default_storyboard, reduce, validate_storyboard,
};

/// Chart changes caused by one entered step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryUpdate {
    pub event: StepEvent,
    pub plan: TransitionPlan,
}

/// Both charts wired to the scroll-driven narrative.
///
/// Hosts forward scroll offsets to [`Scrollytelling::on_scroll`] and pointer
/// positions to the tooltip queries, then draw with the owned renderer.
pub struct Scrollytelling<R: Renderer> {
    renderer: R,
    config: StoryConfig,
    layout: ScrollLayout,
    entries: Vec<TournamentEntry>,
    scenes: Vec<PlayerCounts>,
    storyboard: Vec<ScrollStep>,
    story: StoryState,
    controller: ScrollController,
    dot_strip: DotStripChart,
    stacked_bar: StackedBarChart,
}

impl<R: Renderer> Scrollytelling<R> {
    /// Loads both datasets named in `config` and mounts the charts.
    pub fn load(renderer: R, config: StoryConfig) -> ChartResult<Self> {
        let entries = load_tournament_entries(&config.entries_path)?;
        let top_earners = load_top_earners(&config.top_earners_path)?;
        Self::from_parts(renderer, config, entries, top_earners)
    }

    /// Mounts the charts over already loaded data with the default
    /// storyboard and curated scenes.
    pub fn from_parts(
        renderer: R,
        config: StoryConfig,
        entries: Vec<TournamentEntry>,
        top_earners: TopEarnerTable,
    ) -> ChartResult<Self> {
        Self::with_storyboard(
            renderer,
            config,
            entries,
            top_earners,
            curated_scenes(),
            default_storyboard(),
        )
    }

    pub fn with_storyboard(
        renderer: R,
        config: StoryConfig,
        entries: Vec<TournamentEntry>,
        top_earners: TopEarnerTable,
        scenes: Vec<PlayerCounts>,
        storyboard: Vec<ScrollStep>,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        validate_storyboard(&storyboard, scenes.len())?;
        let layout = ScrollLayout::from_viewport(
            config.viewport,
            config.step_height_ratio,
            config.side_padding,
        )?;
        let controller =
            ScrollController::from_layout(&layout, storyboard.len(), config.trigger_offset)?;

        let story = StoryState::default();
        let counts = scenes
            .get(story.scene)
            .cloned()
            .ok_or_else(|| ChartError::InvalidData("story needs at least one scene".to_owned()))?;
        let scene_entries = filter_by_ids(&entries, &counts);
        let mut dot_strip =
            DotStripChart::new(scene_entries, counts, layout.chart_width, config.dot_strip)?;
        // Initial draw is settled, so the reveal plan is not needed.
        let _ = dot_strip.set_style(story.style)?;

        let index = EntryIndex::new(&entries);
        let stacked_bar = StackedBarChart::new(
            top_earners,
            index,
            layout.chart_width,
            config.stacked_bar.clone(),
        )?;

        debug!(
            entries = entries.len(),
            scenes = scenes.len(),
            steps = storyboard.len(),
            chart_width = layout.chart_width,
            "scrollytelling mounted"
        );

        Ok(Self {
            renderer,
            config,
            layout,
            entries,
            scenes,
            storyboard,
            story,
            controller,
            dot_strip,
            stacked_bar,
        })
    }

    #[must_use]
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> ScrollLayout {
        self.layout
    }

    #[must_use]
    pub fn entries(&self) -> &[TournamentEntry] {
        &self.entries
    }

    #[must_use]
    pub fn scenes(&self) -> &[PlayerCounts] {
        &self.scenes
    }

    #[must_use]
    pub fn storyboard(&self) -> &[ScrollStep] {
        &self.storyboard
    }

    #[must_use]
    pub fn story_state(&self) -> &StoryState {
        &self.story
    }

    #[must_use]
    pub fn active_step(&self) -> Option<usize> {
        self.controller.active()
    }

    #[must_use]
    pub fn dot_strip(&self) -> &DotStripChart {
        &self.dot_strip
    }

    #[must_use]
    pub fn stacked_bar(&self) -> &StackedBarChart {
        &self.stacked_bar
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Feeds a scroll offset and applies every step it enters, in order.
    ///
    /// Either every entered step is applied or none is: on error the scroll
    /// position, story state and chart stay as they were, so the same offset
    /// replays the whole batch.
    pub fn on_scroll(&mut self, scroll_top: f64) -> ChartResult<Vec<StoryUpdate>> {
        let mut controller = self.controller.clone();
        let events = controller.on_scroll(scroll_top);
        if events.is_empty() {
            self.controller = controller;
            return Ok(Vec::new());
        }

        let story = self.story.clone();
        let dot_strip = self.dot_strip.clone();
        let updates = events
            .into_iter()
            .map(|event| {
                let plan = self.apply_step(event)?;
                Ok(StoryUpdate { event, plan })
            })
            .collect::<ChartResult<Vec<_>>>();

        match updates {
            Ok(updates) => {
                self.controller = controller;
                Ok(updates)
            }
            Err(err) => {
                warn!(scroll_top, error = %err, "scroll batch rolled back");
                self.story = story;
                self.dot_strip = dot_strip;
                Err(err)
            }
        }
    }

    /// Runs the actions bound to `event` and returns the resulting animation.
    pub fn apply_step(&mut self, event: StepEvent) -> ChartResult<TransitionPlan> {
        let next = reduce(&self.story, event, &self.storyboard)?;
        self.apply_story(next)
    }

    fn apply_story(&mut self, next: StoryState) -> ChartResult<TransitionPlan> {
        let mut plan = TransitionPlan::default();

        if self.story.data_changed(&next) {
            let counts = self.scenes.get(next.scene).cloned().ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "scene {} is out of range (scene count: {})",
                    next.scene,
                    self.scenes.len()
                ))
            })?;
            let scene_entries = filter_by_ids(&self.entries, &counts);
            plan.merge(
                self.dot_strip
                    .set_data(scene_entries, counts, next.criteria.clone())?,
            );
        }
        if next.style != self.story.style {
            plan.merge(self.dot_strip.set_style(next.style)?);
        }

        self.story = next;
        Ok(plan)
    }

    /// Returns to the top of the story without animating.
    pub fn reset(&mut self) -> ChartResult<()> {
        self.controller.reset();
        let _ = self.apply_story(StoryState::default())?;
        Ok(())
    }

    pub fn render_dot_strip(&mut self) -> ChartResult<()> {
        let frame = self.dot_strip.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the dot strip `elapsed_ms` into `plan`.
    pub fn render_dot_strip_at(&mut self, plan: &TransitionPlan, elapsed_ms: f64) -> ChartResult<()> {
        let frame = self.dot_strip.build_transition_frame(plan, elapsed_ms)?;
        self.renderer.render(&frame)
    }

    pub fn render_stacked_bar(&mut self) -> ChartResult<()> {
        let frame = self.stacked_bar.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Dot-strip tooltip for a pointer in plot coordinates.
    pub fn dot_strip_tooltip(&self, pointer_x: f64, pointer_y: f64) -> ChartResult<Option<Tooltip>> {
        trace!(pointer_x, pointer_y, "dot strip pointer");
        self.dot_strip.tooltip_at(pointer_x, pointer_y)
    }

    /// Bar tooltip for a pointer in plot coordinates.
    pub fn stacked_bar_tooltip(
        &self,
        pointer_x: f64,
        pointer_y: f64,
    ) -> ChartResult<Option<Tooltip>> {
        trace!(pointer_x, pointer_y, "stacked bar pointer");
        self.stacked_bar.tooltip_at(pointer_x, pointer_y)
    }
}
