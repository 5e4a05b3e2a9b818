use serde::{Deserialize, Serialize};

use crate::core::TopEarnerRow;
use crate::core::primitives::decimal_to_f64;
use crate::error::ChartResult;

/// One row's slice of a stacked series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSegment {
    pub row_label: String,
    pub start: f64,
    pub end: f64,
    pub value: f64,
}

impl StackSegment {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value == 0.0
    }
}

/// Cumulative intervals for one key, one segment per row in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedSeries {
    pub key: String,
    pub segments: Vec<StackSegment>,
}

impl StackedSeries {
    /// Segments that carry a value; zero segments are not drawn.
    pub fn visible_segments(&self) -> impl Iterator<Item = &StackSegment> {
        self.segments.iter().filter(|segment| !segment.is_empty())
    }
}

/// Stacks each row's values in `keys` order starting from zero.
///
/// Series come out in `keys` order; a key missing from a row counts as 0.
pub fn stack_series(rows: &[TopEarnerRow], keys: &[String]) -> ChartResult<Vec<StackedSeries>> {
    let mut series: Vec<StackedSeries> = keys
        .iter()
        .map(|key| StackedSeries {
            key: key.clone(),
            segments: Vec::with_capacity(rows.len()),
        })
        .collect();

    for row in rows {
        let mut offset = 0.0;
        for (key, target) in keys.iter().zip(series.iter_mut()) {
            let value = decimal_to_f64(row.value(key), key)?;
            let end = offset + value;
            target.segments.push(StackSegment {
                row_label: row.player_id.clone(),
                start: offset,
                end,
                value,
            });
            offset = end;
        }
    }

    Ok(series)
}

/// Smallest start and largest end across all series.
#[must_use]
pub fn stack_extent(series: &[StackedSeries]) -> Option<(f64, f64)> {
    let mut segments = series.iter().flat_map(|s| s.segments.iter());
    let first = segments.next()?;
    let init = (first.start.min(first.end), first.start.max(first.end));
    Some(segments.fold(init, |(lo, hi), segment| {
        (
            lo.min(segment.start).min(segment.end),
            hi.max(segment.start).max(segment.end),
        )
    }))
}
