use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn ensure_valid(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Pixel margins around the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Outer size of a chart plus the inner plotting area left by its margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64, margins: Margins) -> ChartResult<Self> {
        let margins = margins.validate()?;
        let dims = Self {
            width,
            height,
            margins,
        };
        if !width.is_finite()
            || !height.is_finite()
            || dims.inner_width() <= 0.0
            || dims.inner_height() <= 0.0
        {
            return Err(ChartError::InvalidData(format!(
                "chart {width}x{height} leaves no plotting area inside its margins"
            )));
        }
        Ok(dims)
    }

    #[must_use]
    pub fn inner_width(self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    #[must_use]
    pub fn inner_height(self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Viewport covering the whole chart, rounded up to whole pixels.
    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.width.ceil() as u32, self.height.ceil() as u32)
    }
}
