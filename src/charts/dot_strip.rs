//! Dot-strip ("bubble timeline") chart: one horizontal strip per player,
//! one circle per tournament entry positioned by date.

use std::collections::HashMap;

use chrono::Datelike;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::charts::axis::year_ticks;
use crate::charts::palette::{GRID_COLOR, PlacementRank};
use crate::charts::tooltip::{Tooltip, TooltipContent, TooltipPosition};
use crate::charts::transition::{
    DotPose, DotTransition, JoinKind, StripPose, StripSlot, StripTransition, TransitionPlan,
    TransitionTiming, plan_strip_join, staggered_delay,
};
use crate::core::{
    BandScale, ChartDimensions, FilterCriteria, Group, LinearScale, Margins, PlayerCounts,
    TimeScale, TournamentEntry, by_count_descending, by_date_ascending, nearest_by,
    nest_and_sort,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

const LABEL_FONT_PX: f64 = 15.0;
const TICK_FONT_PX: f64 = 15.0;
const MAX_TIME_TICKS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotStripConfig {
    pub height: f64,
    pub margins: Margins,
    /// Minimum number of bands; more are added when a scene has more players.
    pub band_count: usize,
    pub band_padding: f64,
    pub radius_range: (f64, f64),
    /// Earnings at and above this value get the largest radius.
    pub radius_domain_max: f64,
    pub fixed_radius: f64,
    pub emphasized_opacity: f64,
    pub deemphasized_opacity: f64,
    /// Entering strips start this far below the chart.
    pub enter_offset_px: f64,
    /// Width assumed for the tooltip box when flipping it left.
    pub tooltip_box_width: f64,
    pub timing: TransitionTiming,
}

impl Default for DotStripConfig {
    fn default() -> Self {
        Self {
            height: 600.0,
            margins: Margins::new(150.0, 40.0, 20.0, 20.0),
            band_count: 7,
            band_padding: 0.4,
            radius_range: (5.0, 45.0),
            radius_domain_max: 1_000_000.0,
            fixed_radius: 5.0,
            emphasized_opacity: 0.5,
            deemphasized_opacity: 0.05,
            enter_offset_px: 50.0,
            tooltip_box_width: 260.0,
            timing: TransitionTiming::default(),
        }
    }
}

impl DotStripConfig {
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TransitionTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.band_count == 0 {
            return Err(ChartError::InvalidData(
                "dot strip needs at least one band".to_owned(),
            ));
        }
        let (r_min, r_max) = self.radius_range;
        if !r_min.is_finite() || !r_max.is_finite() || r_min < 0.0 || r_max < r_min {
            return Err(ChartError::InvalidData(
                "radius range must be finite, >= 0 and ascending".to_owned(),
            ));
        }
        if !self.fixed_radius.is_finite() || self.fixed_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "fixed radius must be finite and >= 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("emphasized_opacity", self.emphasized_opacity),
            ("deemphasized_opacity", self.deemphasized_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be in [0, 1]"
                )));
            }
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(ChartError::InvalidData(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            )));
        }
        for (name, value) in [
            ("enter_offset_px", self.enter_offset_px),
            ("tooltip_box_width", self.tooltip_box_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadiusMode {
    Fixed,
    ByEarnings,
}

/// Presentation switches driven by the narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotStripStyle {
    pub strips_visible: bool,
    pub dots_visible: bool,
    pub radius: RadiusMode,
}

impl Default for DotStripStyle {
    fn default() -> Self {
        Self {
            strips_visible: true,
            dots_visible: true,
            radius: RadiusMode::ByEarnings,
        }
    }
}

impl DotStripStyle {
    /// Everything hidden, dots at the fixed radius.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            strips_visible: false,
            dots_visible: false,
            radius: RadiusMode::Fixed,
        }
    }
}

/// Immutable input of one dot-strip render.
#[derive(Debug, Clone, PartialEq)]
pub struct DotStripState {
    pub entries: Vec<TournamentEntry>,
    pub counts: PlayerCounts,
    pub criteria: FilterCriteria,
    pub style: DotStripStyle,
}

impl DotStripState {
    /// Entries per player, players by count descending, entries by date.
    #[must_use]
    pub fn groups(&self) -> Vec<Group<TournamentEntry>> {
        nest_and_sort(
            &self.entries,
            |entry| entry.player_id.as_str(),
            by_count_descending(&self.counts),
            by_date_ascending,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RetiredStrip {
    group: Group<TournamentEntry>,
    dots: Vec<DotPose>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DotStripChart {
    config: DotStripConfig,
    dims: ChartDimensions,
    time_scale: TimeScale,
    radius_scale: LinearScale,
    state: DotStripState,
    groups: Vec<Group<TournamentEntry>>,
    retired: Vec<RetiredStrip>,
}

impl DotStripChart {
    /// Builds the chart for `width` pixels.
    ///
    /// The time and radius domains come from `entries` and stay fixed for
    /// later `set_data` calls so dots do not drift between scenes.
    pub fn new(
        entries: Vec<TournamentEntry>,
        counts: PlayerCounts,
        width: f64,
        config: DotStripConfig,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let dims = ChartDimensions::new(width, config.height, config.margins)?;

        let start = entries.iter().map(|e| e.date).min();
        let end = entries.iter().map(|e| e.date).max();
        let (Some(start), Some(end)) = (start, end) else {
            return Err(ChartError::InvalidData(
                "dot strip needs at least one entry".to_owned(),
            ));
        };
        let time_scale = TimeScale::new(start, end, (0.0, dims.inner_width()))?;

        let min_earnings = entries
            .iter()
            .map(|e| e.earnings_f64().map(OrderedFloat))
            .collect::<ChartResult<Vec<_>>>()?
            .into_iter()
            .min()
            .map_or(0.0, |value| value.0);
        let radius_scale = LinearScale::new(
            (min_earnings, config.radius_domain_max),
            config.radius_range,
        )?
        .clamped();

        let state = DotStripState {
            entries,
            counts,
            criteria: FilterCriteria::default(),
            style: DotStripStyle::default(),
        };
        let groups = state.groups();
        debug!(
            strips = groups.len(),
            entries = state.entries.len(),
            "dot strip initialized"
        );

        Ok(Self {
            config,
            dims,
            time_scale,
            radius_scale,
            state,
            groups,
            retired: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> DotStripConfig {
        self.config
    }

    #[must_use]
    pub fn dimensions(&self) -> ChartDimensions {
        self.dims
    }

    #[must_use]
    pub fn state(&self) -> &DotStripState {
        &self.state
    }

    #[must_use]
    pub fn groups(&self) -> &[Group<TournamentEntry>] {
        &self.groups
    }

    #[must_use]
    pub fn strip_keys(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.key.as_str()).collect()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.state.criteria.title
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    /// Radius for `earnings` under the earnings scale, clamped to the range.
    pub fn radius_for_earnings(&self, earnings: f64) -> ChartResult<f64> {
        self.radius_scale.map(earnings)
    }

    /// Swaps in a new dataset, counts and criteria.
    ///
    /// Strips missing from the new data exit, new ones enter from below, and
    /// the rest move to their new bands.
    pub fn set_data(
        &mut self,
        entries: Vec<TournamentEntry>,
        counts: PlayerCounts,
        criteria: FilterCriteria,
    ) -> ChartResult<TransitionPlan> {
        debug!(
            entries = entries.len(),
            players = counts.len(),
            title = %criteria.title,
            "dot strip set_data"
        );
        let next = DotStripState {
            entries,
            counts,
            criteria,
            style: self.state.style,
        };
        self.transition_data(next)
    }

    /// Applies a new presentation style with staggered reveal timings.
    pub fn set_style(&mut self, style: DotStripStyle) -> ChartResult<TransitionPlan> {
        if style == self.state.style {
            return Ok(TransitionPlan::default());
        }
        trace!(?style, "dot strip set_style");
        let next = DotStripState {
            style,
            ..self.state.clone()
        };
        self.transition_style(next)
    }

    fn band_scale(&self, strip_count: usize) -> ChartResult<BandScale> {
        BandScale::new(
            strip_count.max(self.config.band_count),
            (0.0, self.dims.inner_height()),
            self.config.band_padding,
        )
    }

    fn strip_opacity(style: DotStripStyle) -> f64 {
        if style.strips_visible { 1.0 } else { 0.0 }
    }

    fn slots(
        &self,
        state: &DotStripState,
        groups: &[Group<TournamentEntry>],
    ) -> ChartResult<Vec<StripSlot>> {
        let band = self.band_scale(groups.len())?;
        groups
            .iter()
            .enumerate()
            .map(|(index, group)| -> ChartResult<StripSlot> {
                let y = band.center(index).ok_or_else(|| {
                    ChartError::InvalidData(format!("no band for strip {index}"))
                })?;
                Ok(StripSlot {
                    key: group.key.clone(),
                    pose: StripPose {
                        y,
                        opacity: Self::strip_opacity(state.style),
                    },
                })
            })
            .collect()
    }

    fn dot_pose(&self, state: &DotStripState, entry: &TournamentEntry) -> ChartResult<DotPose> {
        let radius = match state.style.radius {
            RadiusMode::Fixed => self.config.fixed_radius,
            RadiusMode::ByEarnings => self.radius_scale.map(entry.earnings_f64()?)?,
        };
        let opacity = if !state.style.dots_visible {
            0.0
        } else if state.criteria.is_deemphasized(entry) {
            self.config.deemphasized_opacity
        } else {
            self.config.emphasized_opacity
        };
        Ok(DotPose { radius, opacity })
    }

    fn dot_poses(
        &self,
        state: &DotStripState,
        group: &Group<TournamentEntry>,
    ) -> ChartResult<Vec<DotPose>> {
        group
            .values
            .iter()
            .map(|entry| self.dot_pose(state, entry))
            .collect()
    }

    fn transition_data(&mut self, next: DotStripState) -> ChartResult<TransitionPlan> {
        let timing = self.config.timing;
        let next_groups = next.groups();
        let old_slots = self.slots(&self.state, &self.groups)?;
        let new_slots = self.slots(&next, &next_groups)?;
        let enter_from_y = self.dims.height + self.config.enter_offset_px;
        let (strips, exit_phase_ms) =
            plan_strip_join(&old_slots, &new_slots, enter_from_y, timing);

        let mut dots = Vec::new();
        for group in &next_groups {
            let Some(previous) = self.groups.iter().find(|g| g.key == group.key) else {
                continue;
            };
            for (index, entry) in group.values.iter().enumerate() {
                let Some(old_entry) = previous.values.get(index) else {
                    continue;
                };
                if old_entry.tournament_name != entry.tournament_name || old_entry.date != entry.date
                {
                    continue;
                }
                let from = self.dot_pose(&self.state, old_entry)?;
                let to = self.dot_pose(&next, entry)?;
                if from != to {
                    dots.push(DotTransition {
                        strip_key: group.key.clone(),
                        index,
                        from,
                        to,
                        delay_ms: 0,
                        duration_ms: timing.criteria_fade_ms,
                    });
                }
            }
        }

        let mut retired = Vec::new();
        for group in &self.groups {
            if !next_groups.iter().any(|g| g.key == group.key) {
                retired.push(RetiredStrip {
                    group: group.clone(),
                    dots: self.dot_poses(&self.state, group)?,
                });
            }
        }

        let plan = TransitionPlan {
            strips,
            dots,
            exit_phase_ms,
        };
        debug!(
            entering = plan.entering_keys().len(),
            exiting = retired.len(),
            "dot strip data transition planned"
        );

        self.state = next;
        self.groups = next_groups;
        self.retired = retired;
        Ok(plan)
    }

    fn transition_style(&mut self, next: DotStripState) -> ChartResult<TransitionPlan> {
        let timing = self.config.timing;
        let old_opacity = Self::strip_opacity(self.state.style);
        let new_opacity = Self::strip_opacity(next.style);
        let slots = self.slots(&next, &self.groups)?;

        let mut strips = Vec::new();
        if old_opacity != new_opacity {
            for (index, slot) in slots.iter().enumerate() {
                strips.push(StripTransition {
                    key: slot.key.clone(),
                    kind: JoinKind::Update,
                    from: StripPose {
                        y: slot.pose.y,
                        opacity: old_opacity,
                    },
                    to: slot.pose,
                    delay_ms: staggered_delay(0, index, timing.strip_reveal_stagger_ms),
                    duration_ms: timing.strip_reveal_ms,
                });
            }
        }

        let hiding_dots = self.state.style.dots_visible && !next.style.dots_visible;
        let (dot_ms, dot_stagger_ms) = if hiding_dots {
            (timing.hide_dots_ms, timing.hide_dots_stagger_ms)
        } else {
            (timing.dot_style_ms, timing.dot_style_stagger_ms)
        };
        let mut dots = Vec::new();
        for group in &self.groups {
            for (index, entry) in group.values.iter().enumerate() {
                let from = self.dot_pose(&self.state, entry)?;
                let to = self.dot_pose(&next, entry)?;
                if from != to {
                    dots.push(DotTransition {
                        strip_key: group.key.clone(),
                        index,
                        from,
                        to,
                        delay_ms: staggered_delay(0, index, dot_stagger_ms),
                        duration_ms: dot_ms,
                    });
                }
            }
        }

        self.state = next;
        Ok(TransitionPlan {
            strips,
            dots,
            exit_phase_ms: 0,
        })
    }

    /// Frame of the settled state.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.dims.viewport());
        self.push_time_axis(&mut frame)?;

        let slots = self.slots(&self.state, &self.groups)?;
        for (group, slot) in self.groups.iter().zip(&slots) {
            let dots = self.dot_poses(&self.state, group)?;
            self.push_strip(&mut frame, group, slot.pose, &dots)?;
        }
        Ok(frame)
    }

    /// Frame `elapsed_ms` into `plan`, including strips that are still fading out.
    pub fn build_transition_frame(
        &self,
        plan: &TransitionPlan,
        elapsed_ms: f64,
    ) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.dims.viewport());
        self.push_time_axis(&mut frame)?;

        let dot_lookup: HashMap<(&str, usize), &DotTransition> = plan
            .dots
            .iter()
            .map(|dot| ((dot.strip_key.as_str(), dot.index), dot))
            .collect();

        for retired in &self.retired {
            let Some(exit) = plan.strip(&retired.group.key) else {
                continue;
            };
            let pose = exit.pose_at(elapsed_ms);
            self.push_strip(&mut frame, &retired.group, pose, &retired.dots)?;
        }

        let slots = self.slots(&self.state, &self.groups)?;
        for (group, slot) in self.groups.iter().zip(&slots) {
            let pose = plan
                .strip(&group.key)
                .map_or(slot.pose, |strip| strip.pose_at(elapsed_ms));
            let dots = self
                .dot_poses(&self.state, group)?
                .into_iter()
                .enumerate()
                .map(|(index, settled)| {
                    dot_lookup
                        .get(&(group.key.as_str(), index))
                        .map_or(settled, |dot| dot.pose_at(elapsed_ms))
                })
                .collect::<Vec<_>>();
            self.push_strip(&mut frame, group, pose, &dots)?;
        }
        Ok(frame)
    }

    fn push_time_axis(&self, frame: &mut RenderFrame) -> ChartResult<()> {
        let margins = self.dims.margins;
        let inner_height = self.dims.inner_height();
        let (start, end) = self.time_scale.domain_dates()?;

        for tick in year_ticks(start, end, MAX_TIME_TICKS) {
            let x = margins.left + self.time_scale.date_to_pixel(tick)?;
            frame.lines.push(
                LinePrimitive::new(
                    x,
                    margins.top,
                    x,
                    margins.top + inner_height,
                    2.0,
                    GRID_COLOR,
                )
                .dashed(6.0),
            );
            frame.texts.push(TextPrimitive::new(
                tick.year().to_string(),
                x,
                margins.top + inner_height + 18.0,
                TICK_FONT_PX,
                Color::BLACK,
                TextHAlign::Center,
            ));
        }
        Ok(())
    }

    fn push_strip(
        &self,
        frame: &mut RenderFrame,
        group: &Group<TournamentEntry>,
        pose: StripPose,
        dots: &[DotPose],
    ) -> ChartResult<()> {
        let margins = self.dims.margins;
        let inner_width = self.dims.inner_width();
        let y = margins.top + pose.y;
        let ink = Color::BLACK.faded(pose.opacity);

        frame.lines.push(LinePrimitive::new(
            margins.left,
            y,
            margins.left + inner_width,
            y,
            1.0,
            ink,
        ));
        if !group.key.is_empty() {
            frame.texts.push(
                TextPrimitive::new(
                    group.key.clone(),
                    margins.left - 20.0,
                    y + 5.0,
                    LABEL_FONT_PX,
                    ink,
                    TextHAlign::Right,
                )
                .bold(),
            );
        }
        if let Some(count) = self.state.counts.get(&group.key) {
            frame.texts.push(
                TextPrimitive::new(
                    count.to_string(),
                    margins.left + inner_width + 40.0,
                    y + 5.0,
                    LABEL_FONT_PX,
                    ink,
                    TextHAlign::Right,
                )
                .bold(),
            );
        }

        for (entry, dot) in group.values.iter().zip(dots) {
            let cx = margins.left + self.time_scale.date_to_pixel(entry.date)?;
            let fill = PlacementRank::from_start_placement(entry.start_placement)
                .color()
                .with_alpha((dot.opacity * pose.opacity).clamp(0.0, 1.0));
            frame
                .circles
                .push(CirclePrimitive::new(cx, y, dot.radius.max(0.0), fill));
        }
        Ok(())
    }

    /// Strip index under a pointer given in plot coordinates.
    #[must_use]
    pub fn strip_at(&self, pointer_x: f64, pointer_y: f64) -> Option<usize> {
        if pointer_x < 0.0 || pointer_x > self.dims.inner_width() {
            return None;
        }
        let band = self.band_scale(self.groups.len()).ok()?;
        band.band_at(pointer_y).filter(|&index| index < self.groups.len())
    }

    /// Tooltip for the pointer at plot coordinates, if it is over a strip.
    pub fn tooltip_at(&self, pointer_x: f64, pointer_y: f64) -> ChartResult<Option<Tooltip>> {
        match self.strip_at(pointer_x, pointer_y) {
            Some(index) => self.tooltip_for_strip(&self.groups[index].key, pointer_x),
            None => Ok(None),
        }
    }

    /// Tooltip for the emphasized entry of `strip_key` nearest in time to
    /// `pointer_x` (plot coordinates).
    pub fn tooltip_for_strip(
        &self,
        strip_key: &str,
        pointer_x: f64,
    ) -> ChartResult<Option<Tooltip>> {
        let Some(index) = self.groups.iter().position(|g| g.key == strip_key) else {
            warn!(strip_key, "tooltip requested for unknown strip");
            return Ok(None);
        };
        let group = &self.groups[index];
        let candidates: Vec<&TournamentEntry> = group
            .values
            .iter()
            .filter(|entry| self.state.criteria.is_emphasized(entry))
            .collect();

        let query = self.time_scale.pixel_to_time(pointer_x)?;
        let Some(entry) = nearest_by(&candidates, query, |entry| entry.time()) else {
            trace!(strip_key, "no emphasized entries under pointer");
            return Ok(None);
        };

        let band = self.band_scale(self.groups.len())?;
        let band_top = band
            .position(index)
            .ok_or_else(|| ChartError::InvalidData(format!("no band for strip {index}")))?;
        let anchor_x = self.time_scale.date_to_pixel(entry.date)? + self.dims.margins.left;
        let position = TooltipPosition::beside(
            anchor_x,
            band_top - 10.0,
            pointer_x,
            self.dims.inner_width() / 2.0,
            self.config.tooltip_box_width,
        );

        Ok(Some(Tooltip {
            content: TooltipContent::for_entry(entry),
            position,
        }))
    }
}
