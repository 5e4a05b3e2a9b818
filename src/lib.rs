//! scrolly-charts: headless models for a scroll-driven esports story.
//!
//! Two charts (a stacked bar of top earners and a dot-strip timeline of
//! tournament results) are shaped in `core`, laid out in `charts`, drawn
//! through `render` and driven by `scroll` events reduced in `story`.

pub mod api;
pub mod charts;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod render;
pub mod scroll;
pub mod story;
pub mod telemetry;

pub use api::{Scrollytelling, StoryUpdate};
pub use config::StoryConfig;
pub use error::{ChartError, ChartResult};
