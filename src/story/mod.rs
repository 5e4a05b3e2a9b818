//! Narrative steps as data, and the reducer that turns step events into
//! dot-strip state.

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::charts::{DotStripStyle, RadiusMode};
use crate::core::{FilterCriteria, SCENE_TITLES};
use crate::error::{ChartError, ChartResult};
use crate::scroll::{ScrollDirection, StepEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoryAction {
    ShowStrips,
    HideDots,
    ShowDots,
    FixedRadius,
    RadiusByEarnings,
    /// Switch to curated scene `scene` with its emphasis criteria.
    ShowScene {
        scene: usize,
        criteria: FilterCriteria,
    },
}

pub type StepActions = SmallVec<[StoryAction; 2]>;

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollStep {
    pub index: usize,
    pub down: StepActions,
    pub up: StepActions,
}

impl ScrollStep {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            down: SmallVec::new(),
            up: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn on_down(mut self, action: StoryAction) -> Self {
        self.down.push(action);
        self
    }

    #[must_use]
    pub fn on_up(mut self, action: StoryAction) -> Self {
        self.up.push(action);
        self
    }

    #[must_use]
    pub fn actions(&self, direction: ScrollDirection) -> &[StoryAction] {
        match direction {
            ScrollDirection::Down => &self.down,
            ScrollDirection::Up => &self.up,
        }
    }
}

fn scene_action(scene: usize, max_start_placement: u32, premier_only: bool) -> StoryAction {
    StoryAction::ShowScene {
        scene,
        criteria: FilterCriteria::new(max_start_placement, SCENE_TITLES[scene])
            .with_premier_only(premier_only),
    }
}

/// The eight-step narrative over the four curated scenes.
#[must_use]
pub fn default_storyboard() -> Vec<ScrollStep> {
    vec![
        ScrollStep::new(0)
            .on_down(StoryAction::ShowStrips)
            .on_up(StoryAction::HideDots),
        ScrollStep::new(1)
            .on_down(StoryAction::ShowDots)
            .on_up(StoryAction::FixedRadius),
        ScrollStep::new(2).on_down(StoryAction::RadiusByEarnings),
        ScrollStep::new(3).on_up(scene_action(0, 100, false)),
        ScrollStep::new(4).on_down(scene_action(1, 100, true)),
        ScrollStep::new(5).on_up(scene_action(1, 100, true)),
        ScrollStep {
            index: 6,
            down: smallvec![scene_action(2, 4, true)],
            up: smallvec![scene_action(2, 4, true)],
        },
        ScrollStep::new(7).on_down(scene_action(3, 1, true)),
    ]
}

/// What the dot strip should show after the events seen so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryState {
    pub scene: usize,
    pub criteria: FilterCriteria,
    pub style: DotStripStyle,
}

impl Default for StoryState {
    fn default() -> Self {
        Self {
            scene: 0,
            criteria: FilterCriteria::default(),
            style: DotStripStyle::hidden(),
        }
    }
}

impl StoryState {
    #[must_use]
    pub fn apply(mut self, action: &StoryAction) -> Self {
        match action {
            StoryAction::ShowStrips => self.style.strips_visible = true,
            StoryAction::HideDots => self.style.dots_visible = false,
            StoryAction::ShowDots => self.style.dots_visible = true,
            StoryAction::FixedRadius => self.style.radius = RadiusMode::Fixed,
            StoryAction::RadiusByEarnings => self.style.radius = RadiusMode::ByEarnings,
            StoryAction::ShowScene { scene, criteria } => {
                self.scene = *scene;
                self.criteria = criteria.clone();
            }
        }
        self
    }

    /// True when switching from `self` to `next` needs new dot-strip data.
    #[must_use]
    pub fn data_changed(&self, next: &StoryState) -> bool {
        self.scene != next.scene || self.criteria != next.criteria
    }
}

/// Checks that step `i` sits at position `i` and that every scene switch
/// names one of `scene_count` scenes.
pub fn validate_storyboard(storyboard: &[ScrollStep], scene_count: usize) -> ChartResult<()> {
    for (position, step) in storyboard.iter().enumerate() {
        if step.index != position {
            return Err(ChartError::InvalidData(format!(
                "storyboard step at position {position} has index {}",
                step.index
            )));
        }
        let scenes = step.down.iter().chain(&step.up).filter_map(|action| match action {
            StoryAction::ShowScene { scene, .. } => Some(*scene),
            _ => None,
        });
        for scene in scenes {
            if scene >= scene_count {
                return Err(ChartError::InvalidData(format!(
                    "step {position} shows scene {scene} (scene count: {scene_count})"
                )));
            }
        }
    }
    Ok(())
}

/// Applies the actions `storyboard` binds to `event`.
pub fn reduce(
    state: &StoryState,
    event: StepEvent,
    storyboard: &[ScrollStep],
) -> ChartResult<StoryState> {
    let step = storyboard
        .iter()
        .find(|step| step.index == event.index)
        .ok_or(ChartError::UnknownStep {
            index: event.index,
            len: storyboard.len(),
        })?;

    let actions = step.actions(event.direction);
    debug!(
        step = event.index,
        direction = ?event.direction,
        actions = actions.len(),
        "story step"
    );
    Ok(actions
        .iter()
        .fold(state.clone(), |state, action| state.apply(action)))
}
