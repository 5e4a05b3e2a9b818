//! Scroll position to step-event state machine.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollDirection {
    /// Forward through the narrative.
    Down,
    /// Backward through the narrative.
    Up,
}

/// Emitted when the trigger line enters a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    pub index: usize,
    pub direction: ScrollDirection,
}

/// Vertical extent `[top, bottom)` of one step, in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepExtent {
    pub top: f64,
    pub bottom: f64,
}

impl StepExtent {
    #[must_use]
    pub fn contains(self, y: f64) -> bool {
        y >= self.top && y < self.bottom
    }
}

/// Page geometry derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollLayout {
    pub viewport: Viewport,
    pub step_height: f64,
    pub graphic_height: f64,
    pub chart_width: f64,
}

impl ScrollLayout {
    /// Steps are `floor(height) * step_height_ratio` tall; charts span the
    /// viewport width minus `side_padding`.
    pub fn from_viewport(
        viewport: Viewport,
        step_height_ratio: f64,
        side_padding: f64,
    ) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        if !step_height_ratio.is_finite() || step_height_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "step height ratio must be finite and > 0".to_owned(),
            ));
        }
        let chart_width = f64::from(viewport.width) - side_padding;
        if !chart_width.is_finite() || chart_width <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let height = f64::from(viewport.height);
        Ok(Self {
            viewport,
            step_height: height.floor() * step_height_ratio,
            graphic_height: height,
            chart_width,
        })
    }

    /// `count` back-to-back steps starting at document offset 0.
    #[must_use]
    pub fn step_extents(&self, count: usize) -> Vec<StepExtent> {
        (0..count)
            .map(|i| StepExtent {
                top: i as f64 * self.step_height,
                bottom: (i + 1) as f64 * self.step_height,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollController {
    steps: Vec<StepExtent>,
    offset: f64,
    viewport_height: f64,
    last_trigger: Option<f64>,
    active: Option<usize>,
}

impl ScrollController {
    /// `offset` is the trigger line as a fraction of the viewport height.
    pub fn new(steps: Vec<StepExtent>, offset: f64, viewport_height: f64) -> ChartResult<Self> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(ChartError::InvalidData(
                "trigger offset must be in [0, 1]".to_owned(),
            ));
        }
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return Err(ChartError::InvalidData(
                "viewport height must be finite and > 0".to_owned(),
            ));
        }
        if steps
            .iter()
            .any(|s| !s.top.is_finite() || !s.bottom.is_finite() || s.bottom < s.top)
        {
            return Err(ChartError::InvalidData(
                "step extents must be finite with top <= bottom".to_owned(),
            ));
        }
        if steps.windows(2).any(|pair| pair[1].top < pair[0].bottom) {
            return Err(ChartError::InvalidData(
                "step extents must be ordered and non-overlapping".to_owned(),
            ));
        }

        Ok(Self {
            steps,
            offset,
            viewport_height,
            last_trigger: None,
            active: None,
        })
    }

    pub fn from_layout(layout: &ScrollLayout, step_count: usize, offset: f64) -> ChartResult<Self> {
        Self::new(
            layout.step_extents(step_count),
            offset,
            layout.graphic_height,
        )
    }

    #[must_use]
    pub fn steps(&self) -> &[StepExtent] {
        &self.steps
    }

    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn trigger_line(&self, scroll_top: f64) -> f64 {
        scroll_top + self.offset * self.viewport_height
    }

    /// Advances to `scroll_top` and returns the entered steps in traversal order.
    ///
    /// Scrolling down enters a step when the trigger line passes its top;
    /// scrolling up, when it passes back above its bottom. The first call
    /// treats the previous position as above the document.
    pub fn on_scroll(&mut self, scroll_top: f64) -> Vec<StepEvent> {
        if !scroll_top.is_finite() {
            return Vec::new();
        }
        let trigger = self.trigger_line(scroll_top);
        let previous = self.last_trigger.unwrap_or(f64::NEG_INFINITY);
        self.last_trigger = Some(trigger);

        let events: Vec<StepEvent> = if trigger > previous {
            self.steps
                .iter()
                .enumerate()
                .filter(|(_, step)| previous < step.top && step.top <= trigger)
                .map(|(index, _)| StepEvent {
                    index,
                    direction: ScrollDirection::Down,
                })
                .collect()
        } else if trigger < previous {
            self.steps
                .iter()
                .enumerate()
                .rev()
                .filter(|(_, step)| trigger < step.bottom && step.bottom <= previous)
                .map(|(index, _)| StepEvent {
                    index,
                    direction: ScrollDirection::Up,
                })
                .collect()
        } else {
            Vec::new()
        };

        self.active = self.steps.iter().position(|step| step.contains(trigger));
        if !events.is_empty() {
            trace!(scroll_top, trigger, events = events.len(), active = ?self.active, "scroll steps entered");
        }
        events
    }

    /// Forgets the scroll position so the next update replays from the top.
    pub fn reset(&mut self) {
        self.last_trigger = None;
        self.active = None;
    }
}
