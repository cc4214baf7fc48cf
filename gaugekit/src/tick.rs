// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested tick subdivision.
//!
//! A range carries an ordered list of scale levels, coarsest first. Each level subdivides every
//! interval of the level above it into `divisions` parts, so the total number of tick intervals
//! is the product of all divisions. Every tick index belongs to exactly one level: the coarsest
//! one whose grid it lies on. That gives a major/minor/sub-minor hierarchy without any per-tick
//! configuration.

extern crate alloc;

use alloc::string::String;

use peniko::Color;
use smallvec::SmallVec;

use crate::error::RangeError;
use crate::label::ScaleLabelSpec;
use crate::skip::SkipRules;

/// Upper bound on the number of tick intervals in one range.
pub const MAX_TICKS: u64 = 100_000;

/// One level of tick marks within a range.
#[derive(Clone, Debug)]
pub struct ScaleLevelSpec {
    /// Element class; defaults to `scale scale-level-{i}`.
    pub class: Option<String>,
    /// Number of parts each interval of the enclosing level is split into.
    pub divisions: u32,
    /// Radius offset of the tick's first endpoint, relative to the range offset.
    pub offset: f64,
    /// Radius offset of the tick's second endpoint, relative to the range offset.
    pub extent: f64,
    /// Values whose tick (and label) are suppressed.
    pub skip: SkipRules,
    /// Optional stroke color.
    pub color: Option<Color>,
    /// Optional labels at this level's ticks.
    pub label: Option<ScaleLabelSpec>,
}

impl Default for ScaleLevelSpec {
    fn default() -> Self {
        Self {
            class: None,
            divisions: 5,
            offset: 0.0,
            extent: -20.0,
            skip: SkipRules::new(),
            color: None,
            label: None,
        }
    }
}

impl ScaleLevelSpec {
    /// Creates a level with the given subdivision count and default radii.
    pub fn new(divisions: u32) -> Self {
        Self {
            divisions,
            ..Self::default()
        }
    }

    /// Sets the class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets the first endpoint radius offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the second endpoint radius offset.
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    /// Sets the skip rules.
    pub fn with_skip(mut self, skip: impl Into<SkipRules>) -> Self {
        self.skip = skip.into();
        self
    }

    /// Sets the stroke color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Adds labels to this level.
    pub fn with_label(mut self, label: ScaleLabelSpec) -> Self {
        self.label = Some(label);
        self
    }

    /// Returns the class used for level `index`.
    pub fn class_for(&self, index: usize) -> String {
        match &self.class {
            Some(class) => class.clone(),
            None => alloc::format!("scale scale-level-{index}"),
        }
    }
}

/// A single tick position produced by [`TickLayout::ticks`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Position index in `0..=tick_count`.
    pub index: u64,
    /// Owning level (0 = coarsest).
    pub level: usize,
    /// Value at this tick.
    pub value: f64,
    /// Fraction of the range covered up to this tick, in `0..=1`.
    pub fraction: f64,
}

/// The resolved subdivision of one range.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLayout {
    strides: SmallVec<[u64; 4]>,
    count: u64,
    from: f64,
    value_range: f64,
    wraps: bool,
}

impl TickLayout {
    /// Lays out ticks for levels with the given divisions (coarsest first).
    ///
    /// Ticks span `from..=from + value_range`. A wrapping layout (clock-style gauges) omits the
    /// last tick, which would coincide with the first.
    pub fn new(
        divisions: &[u32],
        from: f64,
        value_range: f64,
        wraps: bool,
    ) -> Result<Self, RangeError> {
        let mut strides: SmallVec<[u64; 4]> = SmallVec::with_capacity(divisions.len());
        let mut count = 1_u64;
        for (level, &d) in divisions.iter().enumerate().rev() {
            if d == 0 {
                return Err(RangeError::ZeroDivisions { level });
            }
            strides.push(count);
            count = count.saturating_mul(u64::from(d));
            if count > MAX_TICKS {
                return Err(RangeError::TooManyTicks {
                    count,
                    limit: MAX_TICKS,
                });
            }
        }
        strides.reverse();
        Ok(Self {
            strides,
            count,
            from,
            value_range,
            wraps,
        })
    }

    /// Returns the number of tick intervals (the product of all divisions).
    pub fn tick_count(&self) -> u64 {
        self.count
    }

    /// Returns the number of levels.
    pub fn levels(&self) -> usize {
        self.strides.len()
    }

    /// Returns the index of the last emitted tick.
    pub fn last_index(&self) -> u64 {
        if self.wraps {
            self.count - 1
        } else {
            self.count
        }
    }

    /// Returns the coarsest level whose grid contains tick `index`.
    pub fn level_of(&self, index: u64) -> usize {
        self.strides
            .iter()
            .position(|&stride| index % stride == 0)
            .unwrap_or(self.strides.len().saturating_sub(1))
    }

    /// Returns the fraction of the range covered at tick `index`.
    pub fn fraction_at(&self, index: u64) -> f64 {
        index as f64 / self.count as f64
    }

    /// Returns the value at tick `index`.
    pub fn value_at(&self, index: u64) -> f64 {
        self.from + self.value_range * index as f64 / self.count as f64
    }

    /// Iterates over every tick position in order.
    pub fn ticks(&self) -> impl Iterator<Item = Tick> + '_ {
        let end = if self.strides.is_empty() {
            0
        } else {
            self.last_index() + 1
        };
        (0..end).map(move |index| Tick {
            index,
            level: self.level_of(index),
            value: self.value_at(index),
            fraction: self.fraction_at(index),
        })
    }
}
