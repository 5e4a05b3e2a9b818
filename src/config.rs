use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::charts::{DotStripConfig, StackedBarConfig, default_row_icons};
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Everything needed to mount the story: data locations, page geometry and
/// per-chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub entries_path: PathBuf,
    pub top_earners_path: PathBuf,
    pub viewport: Viewport,
    /// Trigger line as a fraction of the viewport height.
    pub trigger_offset: f64,
    pub step_height_ratio: f64,
    /// Horizontal space not given to the charts.
    pub side_padding: f64,
    pub dot_strip: DotStripConfig,
    pub stacked_bar: StackedBarConfig,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            entries_path: PathBuf::from("data/tournament_entries.csv"),
            top_earners_path: PathBuf::from("data/top_earners.csv"),
            viewport: Viewport::new(1280, 800),
            trigger_offset: 0.8,
            step_height_ratio: 1.2,
            side_padding: 80.0,
            dot_strip: DotStripConfig::default(),
            stacked_bar: StackedBarConfig::default().with_row_icons(default_row_icons()),
        }
    }
}

impl StoryConfig {
    #[must_use]
    pub fn with_data_paths(
        mut self,
        entries_path: impl Into<PathBuf>,
        top_earners_path: impl Into<PathBuf>,
    ) -> Self {
        self.entries_path = entries_path.into();
        self.top_earners_path = top_earners_path.into();
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_dot_strip(mut self, dot_strip: DotStripConfig) -> Self {
        self.dot_strip = dot_strip;
        self
    }

    #[must_use]
    pub fn with_stacked_bar(mut self, stacked_bar: StackedBarConfig) -> Self {
        self.stacked_bar = stacked_bar;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.viewport.ensure_valid()?;
        if !(0.0..=1.0).contains(&self.trigger_offset) {
            return Err(ChartError::InvalidData(format!(
                "trigger_offset must be in [0, 1], got {}",
                self.trigger_offset
            )));
        }
        if !self.step_height_ratio.is_finite() || self.step_height_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "step_height_ratio must be finite and > 0".to_owned(),
            ));
        }
        if !self.side_padding.is_finite()
            || self.side_padding < 0.0
            || self.side_padding >= f64::from(self.viewport.width)
        {
            return Err(ChartError::InvalidData(
                "side_padding must be >= 0 and narrower than the viewport".to_owned(),
            ));
        }
        self.dot_strip.validate()?;
        self.stacked_bar.margins.validate()?;
        Ok(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON; absent fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }

    /// Reads a JSON config file. Relative data paths resolve against the
    /// file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&input)?;
        if let Some(base) = path.parent() {
            config.entries_path = resolve(base, &config.entries_path);
            config.top_earners_path = resolve(base, &config.top_earners_path);
        }
        Ok(config)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
