use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{date_to_unix_seconds, unix_seconds_to_date};
use crate::error::{ChartError, ChartResult};

/// Continuous domain → pixel range mapping.
///
/// A collapsed domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
            clamp: false,
        })
    }

    /// Restricts output to the range bounds instead of extrapolating.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_clamped(self) -> bool {
        self.clamp
    }

    pub fn map(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let mut normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.range_end - self.range_start;
        let mut normalized = if span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / span
        };
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

/// Calendar dates → pixels, backed by unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, range: (f64, f64)) -> ChartResult<Self> {
        let inner = LinearScale::new(
            (date_to_unix_seconds(start), date_to_unix_seconds(end)),
            range,
        )?;
        Ok(Self {
            inner: inner.clamped(),
        })
    }

    pub fn date_to_pixel(self, date: NaiveDate) -> ChartResult<f64> {
        self.inner.map(date_to_unix_seconds(date))
    }

    pub fn time_to_pixel(self, seconds: f64) -> ChartResult<f64> {
        self.inner.map(seconds)
    }

    /// Unix seconds under `pixel`.
    pub fn pixel_to_time(self, pixel: f64) -> ChartResult<f64> {
        self.inner.invert(pixel)
    }

    pub fn pixel_to_date(self, pixel: f64) -> ChartResult<NaiveDate> {
        unix_seconds_to_date(self.pixel_to_time(pixel)?)
    }

    pub fn domain_dates(self) -> ChartResult<(NaiveDate, NaiveDate)> {
        let (start, end) = self.inner.domain();
        Ok((unix_seconds_to_date(start)?, unix_seconds_to_date(end)?))
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.inner.range()
    }
}

/// Discrete slots laid out as equal bands with inner/outer padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    count: usize,
    range_start: f64,
    step: f64,
    bandwidth: f64,
    first_band: f64,
}

impl BandScale {
    /// Centers `count` bands in `range` using the same padding inside and
    /// outside the bands.
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> ChartResult<Self> {
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "band range must be finite".to_owned(),
            ));
        }

        let extent = range.1 - range.0;
        let n = count as f64;
        let step = extent / (n - padding + 2.0 * padding).max(1.0);
        let first_band = range.0 + (extent - step * (n - padding)) * 0.5;
        Ok(Self {
            count,
            range_start: range.0,
            step,
            bandwidth: step * (1.0 - padding),
            first_band,
        })
    }

    /// Top edge of band `index`, or `None` past the last band.
    #[must_use]
    pub fn position(self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.first_band + self.step * index as f64)
    }

    #[must_use]
    pub fn center(self, index: usize) -> Option<f64> {
        self.position(index).map(|top| top + self.bandwidth / 2.0)
    }

    /// Band whose extent contains `pixel`.
    #[must_use]
    pub fn band_at(self, pixel: f64) -> Option<usize> {
        (0..self.count).find(|&index| {
            let top = self.first_band + self.step * index as f64;
            pixel >= top && pixel < top + self.bandwidth
        })
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn range_start(self) -> f64 {
        self.range_start
    }
}
