// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for labels and attribute values.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a value for display in a scale label.
///
/// Integral values print without a fractional part (`20`, not `20.0`); other values keep at most
/// six decimals with trailing zeros trimmed, which hides accumulated binary rounding such as
/// `0.30000000000000004`.
pub fn format_number(value: f64) -> String {
    format_rounded(value, 1.0e6)
}

/// Formats a coordinate or transform parameter for an attribute value (three decimals).
pub fn format_coordinate(value: f64) -> String {
    format_rounded(value, 1.0e3)
}

fn format_rounded(value: f64, scale: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let rounded = (value * scale).round() / scale;
    if rounded.abs() < 1.0e15 && rounded == rounded.round() {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "integral and bounded well inside the i64 range"
        )]
        let whole = rounded as i64;
        return whole.to_string();
    }
    format!("{rounded}")
}
