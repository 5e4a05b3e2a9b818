use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Midnight UTC of `date` as unix seconds.
#[must_use]
pub fn date_to_unix_seconds(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(0.0, |dt| dt.and_utc().timestamp() as f64)
}

/// Calendar date (UTC) containing the unix timestamp `seconds`.
pub fn unix_seconds_to_date(seconds: f64) -> ChartResult<NaiveDate> {
    if !seconds.is_finite() {
        return Err(ChartError::InvalidData(
            "timestamp must be finite".to_owned(),
        ));
    }
    DateTime::from_timestamp(seconds.floor() as i64, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ChartError::InvalidData(format!("timestamp {seconds} is out of range")))
}
