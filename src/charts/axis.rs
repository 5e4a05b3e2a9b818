use chrono::{Datelike, NaiveDate};

/// Evenly spaced "nice" values (multiples of 1, 2 or 5 × 10ⁿ) inside
/// `[start, stop]`, aiming for roughly `count` ticks.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let step = tick_step(lo, hi, count);
    if step <= 0.0 || !step.is_finite() {
        return Vec::new();
    }

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    let mut ticks: Vec<f64> = (first..=last).map(|i| i as f64 * step).collect();
    if start > stop {
        ticks.reverse();
    }
    ticks
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// January 1st of every `n`th year inside `[start, end]`, with `n` chosen
/// from 1, 2, 5, 10... so at most `max_count` ticks come out.
#[must_use]
pub fn year_ticks(start: NaiveDate, end: NaiveDate, max_count: usize) -> Vec<NaiveDate> {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let first_year = if start.ordinal() == 1 {
        start.year()
    } else {
        start.year() + 1
    };
    let last_year = end.year();
    if first_year > last_year || max_count == 0 {
        return Vec::new();
    }

    const FACTORS: [usize; 3] = [1, 2, 5];
    let years = (last_year - first_year + 1) as usize;
    let mut factor_index = 0;
    let mut magnitude = 1usize;
    let mut stride = 1usize;
    while years.div_ceil(stride) > max_count {
        factor_index += 1;
        if factor_index == FACTORS.len() {
            factor_index = 0;
            magnitude *= 10;
        }
        stride = FACTORS[factor_index] * magnitude;
    }

    (first_year..=last_year)
        .filter(|year| (year - first_year) as usize % stride == 0)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .collect()
}
