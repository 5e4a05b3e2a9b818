use serde::{Deserialize, Serialize};

/// Animation timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTiming {
    pub exit_ms: u64,
    pub reposition_ms: u64,
    pub reposition_stagger_ms: u64,
    pub criteria_fade_ms: u64,
    pub strip_reveal_ms: u64,
    pub strip_reveal_stagger_ms: u64,
    pub dot_style_ms: u64,
    pub dot_style_stagger_ms: u64,
    /// Fade used when dots are hidden again.
    pub hide_dots_ms: u64,
    pub hide_dots_stagger_ms: u64,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            exit_ms: 1000,
            reposition_ms: 1000,
            reposition_stagger_ms: 200,
            criteria_fade_ms: 1000,
            strip_reveal_ms: 500,
            strip_reveal_stagger_ms: 100,
            dot_style_ms: 500,
            dot_style_stagger_ms: 15,
            hide_dots_ms: 1000,
            hide_dots_stagger_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Enter,
    Update,
    Exit,
}

/// Cubic ease-in-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// `base + index * stagger`, saturating at `u64::MAX`.
#[must_use]
pub fn staggered_delay(base_ms: u64, index: usize, stagger_ms: u64) -> u64 {
    let index = u64::try_from(index).unwrap_or(u64::MAX);
    base_ms.saturating_add(index.saturating_mul(stagger_ms))
}

fn progress(elapsed_ms: f64, delay_ms: u64, duration_ms: u64) -> f64 {
    let local = elapsed_ms - delay_ms as f64;
    if duration_ms == 0 {
        return if local >= 0.0 { 1.0 } else { 0.0 };
    }
    ease_cubic_in_out(local / duration_ms as f64)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Vertical offset and group opacity of one strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StripPose {
    pub y: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripTransition {
    pub key: String,
    pub kind: JoinKind,
    pub from: StripPose,
    pub to: StripPose,
    pub delay_ms: u64,
    pub duration_ms: u64,
}

impl StripTransition {
    #[must_use]
    pub fn pose_at(&self, elapsed_ms: f64) -> StripPose {
        let t = progress(elapsed_ms, self.delay_ms, self.duration_ms);
        StripPose {
            y: lerp(self.from.y, self.to.y, t),
            opacity: lerp(self.from.opacity, self.to.opacity, t),
        }
    }

    #[must_use]
    pub fn end_ms(&self) -> u64 {
        self.delay_ms.saturating_add(self.duration_ms)
    }
}

/// Radius and fill opacity of one dot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotPose {
    pub radius: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotTransition {
    pub strip_key: String,
    /// Position of the dot inside its strip, in date order.
    pub index: usize,
    pub from: DotPose,
    pub to: DotPose,
    pub delay_ms: u64,
    pub duration_ms: u64,
}

impl DotTransition {
    #[must_use]
    pub fn pose_at(&self, elapsed_ms: f64) -> DotPose {
        let t = progress(elapsed_ms, self.delay_ms, self.duration_ms);
        DotPose {
            radius: lerp(self.from.radius, self.to.radius, t),
            opacity: lerp(self.from.opacity, self.to.opacity, t),
        }
    }

    #[must_use]
    pub fn end_ms(&self) -> u64 {
        self.delay_ms.saturating_add(self.duration_ms)
    }
}

/// Everything a host needs to animate one chart update.
///
/// Times are relative to the moment the update was applied. A later plan
/// replaces an in-flight one; its `from` poses are the previous targets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransitionPlan {
    pub strips: Vec<StripTransition>,
    pub dots: Vec<DotTransition>,
    /// Length of the exit phase that precedes repositioning, 0 when nothing exits.
    pub exit_phase_ms: u64,
}

impl TransitionPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strips.is_empty() && self.dots.is_empty()
    }

    pub fn strips_of(&self, kind: JoinKind) -> impl Iterator<Item = &StripTransition> {
        self.strips.iter().filter(move |strip| strip.kind == kind)
    }

    #[must_use]
    pub fn exiting_keys(&self) -> Vec<&str> {
        self.strips_of(JoinKind::Exit)
            .map(|strip| strip.key.as_str())
            .collect()
    }

    #[must_use]
    pub fn entering_keys(&self) -> Vec<&str> {
        self.strips_of(JoinKind::Enter)
            .map(|strip| strip.key.as_str())
            .collect()
    }

    #[must_use]
    pub fn strip(&self, key: &str) -> Option<&StripTransition> {
        self.strips.iter().find(|strip| strip.key == key)
    }

    #[must_use]
    pub fn total_duration_ms(&self) -> u64 {
        let strips = self.strips.iter().map(StripTransition::end_ms);
        let dots = self.dots.iter().map(DotTransition::end_ms);
        strips.chain(dots).max().unwrap_or(0)
    }

    /// Strip poses `elapsed_ms` after the plan started.
    #[must_use]
    pub fn sample_strips(&self, elapsed_ms: f64) -> Vec<(&str, StripPose)> {
        self.strips
            .iter()
            .map(|strip| (strip.key.as_str(), strip.pose_at(elapsed_ms)))
            .collect()
    }

    /// Appends `other` so both animate from the same start.
    pub fn merge(&mut self, other: TransitionPlan) {
        self.exit_phase_ms = self.exit_phase_ms.max(other.exit_phase_ms);
        self.strips.extend(other.strips);
        self.dots.extend(other.dots);
    }
}

/// Placement of one strip before or after an update.
#[derive(Debug, Clone, PartialEq)]
pub struct StripSlot {
    pub key: String,
    pub pose: StripPose,
}

/// Enter/update/exit join of strips keyed by player id.
///
/// Exits fade out first when there are any; repositioning (entering strips
/// rise from `enter_from_y`) follows, staggered by new index.
#[must_use]
pub fn plan_strip_join(
    old: &[StripSlot],
    new: &[StripSlot],
    enter_from_y: f64,
    timing: TransitionTiming,
) -> (Vec<StripTransition>, u64) {
    let exits: Vec<StripTransition> = old
        .iter()
        .filter(|slot| !new.iter().any(|n| n.key == slot.key))
        .map(|slot| StripTransition {
            key: slot.key.clone(),
            kind: JoinKind::Exit,
            from: slot.pose,
            to: StripPose {
                y: slot.pose.y,
                opacity: 0.0,
            },
            delay_ms: 0,
            duration_ms: timing.exit_ms,
        })
        .collect();

    let exit_phase_ms = if exits.is_empty() { 0 } else { timing.exit_ms };

    let moves = new.iter().enumerate().map(|(index, slot)| {
        let previous = old.iter().find(|o| o.key == slot.key);
        let (kind, from) = match previous {
            Some(previous) => (JoinKind::Update, previous.pose),
            None => (
                JoinKind::Enter,
                StripPose {
                    y: enter_from_y,
                    opacity: slot.pose.opacity,
                },
            ),
        };
        StripTransition {
            key: slot.key.clone(),
            kind,
            from,
            to: slot.pose,
            delay_ms: staggered_delay(exit_phase_ms, index, timing.reposition_stagger_ms),
            duration_ms: timing.reposition_ms,
        }
    });

    let mut transitions = exits;
    transitions.extend(moves);
    (transitions, exit_phase_ms)
}
