// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::ops::Range;

/// Fraction of the data span, in decades, added beyond each end of an axis.
const MARGIN: f64 = 0.05;

/// Axes spanning more decades than this only get grid lines on the decades.
const MAX_MINOR_DECADES: i32 = 8;

/// Bounds of a base-10 logarithmic axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LogBounds {
    lower: f64,
    upper: f64,
}

impl LogBounds {
    /// Bounds which contain `[min, max]` with a margin on each side. Both
    /// inputs must be strictly positive. When `min == max` the axis spans one
    /// decade centred on the value.
    pub fn covering(min: f64, max: f64) -> Self {
        debug_assert!(min > 0.0 && max >= min);
        let lo = min.log10();
        let hi = max.log10();
        let (lo, hi) = if hi - lo <= f64::EPSILON {
            (lo - 0.5, hi + 0.5)
        } else {
            let pad = (hi - lo) * MARGIN;
            (lo - pad, hi + pad)
        };
        Self {
            lower: 10_f64.powf(lo),
            upper: 10_f64.powf(hi),
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn range(&self) -> Range<f64> {
        self.lower..self.upper
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Values which get a grid line: every decade and, unless the axis spans
    /// more than `MAX_MINOR_DECADES`, each integer multiple within a decade.
    pub fn grid_lines(&self) -> Vec<f64> {
        let first = self.lower.log10().floor() as i32;
        let last = self.upper.log10().ceil() as i32;
        let minor = last - first <= MAX_MINOR_DECADES;
        let mut lines = Vec::new();
        for exponent in first..=last {
            let decade = 10_f64.powi(exponent);
            for multiple in 1..10 {
                if multiple > 1 && !minor {
                    break;
                }
                let value = decade * multiple as f64;
                if self.contains(value) {
                    lines.push(value);
                }
            }
        }
        lines
    }
}

/// Tick label for a log axis. Exact powers of ten render as `10ⁿ`, anything
/// else as a plain decimal.
pub fn format_tick(value: f64) -> String {
    if value <= 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let exponent = value.log10().round();
    if ((10_f64.powf(exponent) - value) / value).abs() < 1e-9 {
        return format!("10{}", superscript(exponent as i32));
    }
    if !(1e-3..1e6).contains(&value) {
        return format!("{:.1e}", value);
    }
    let text = format!("{:.3}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn superscript(exponent: i32) -> String {
    exponent
        .to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}
