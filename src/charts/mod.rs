//! Chart models: the stacked earnings bar and the dot-strip timeline.
//!
//! Charts own their scales and state and turn it into `RenderFrame`s; they
//! never draw directly.

pub mod axis;
pub mod dot_strip;
pub mod format;
pub mod palette;
pub mod stacked_bar;
pub mod tooltip;
pub mod transition;

pub use axis::{linear_ticks, year_ticks};
pub use dot_strip::{DotStripChart, DotStripConfig, DotStripState, DotStripStyle, RadiusMode};
pub use format::{format_money, format_month_year, format_si};
pub use palette::{OTHERS_KEY, PlacementRank, segment_color};
pub use stacked_bar::{
    BarSegment, DEFAULT_ROW_ICON_SEQUENCE, StackedBarChart, StackedBarConfig, default_row_icons,
};
pub use tooltip::{PlacementBadge, Tooltip, TooltipContent, TooltipPosition};
pub use transition::{
    DotPose, DotTransition, JoinKind, StripPose, StripSlot, StripTransition, TransitionPlan,
    TransitionTiming, ease_cubic_in_out, plan_strip_join, staggered_delay,
};
