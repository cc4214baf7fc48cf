// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polar projection and circular-arc path construction.
//!
//! Angles are in degrees and follow screen conventions: `0°` points along `+x` and angles grow
//! clockwise because `y` grows downward. Projected points are rounded to whole device units.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, Point, SvgArc, Vec2};

use crate::format::format_coordinate;

/// Flattening tolerance used when arcs are converted to cubic Béziers.
const ARC_TOLERANCE: f64 = 0.01;
/// Accuracy for arc-length queries.
const ARCLEN_ACCURACY: f64 = 1.0e-4;

/// Projects `radius` along `angle_degrees` from `origin`, rounded to integer units.
pub fn vector_to_point(origin: Point, angle_degrees: f64, radius: f64) -> Point {
    let theta = angle_degrees.to_radians();
    Point::new(
        (origin.x + radius * theta.cos()).round(),
        (origin.y + radius * theta.sin()).round(),
    )
}

/// Builds a circular arc from `angle_start` to `angle_end` around `origin`.
///
/// Spans wider than a half turn are split into two segments through `angle_start ± 180°`, since
/// a single SVG arc segment cannot describe them unambiguously. The span is clamped to a full
/// turn.
///
/// With `arc_back` set the arc runs from the end angle back to the start angle with the sweep
/// reversed, and no initial `MoveTo` is emitted: the fragment continues from the current point
/// of whatever path it is appended to. This is how the inner edge of a wedge is closed.
pub fn arc_path(
    origin: Point,
    radius: f64,
    angle_start: f64,
    angle_end: f64,
    arc_back: bool,
) -> PathData {
    let delta = (angle_end - angle_start).clamp(-360.0, 360.0);
    let angle_end = angle_start + delta;
    let forward = delta >= 0.0;
    let sweep = forward != arc_back;

    let (from, to) = if arc_back {
        (angle_end, angle_start)
    } else {
        (angle_start, angle_end)
    };
    let p_to = vector_to_point(origin, to, radius);

    let mut path = PathData::new();
    if !arc_back {
        path.move_to(vector_to_point(origin, from, radius));
    }
    if delta.abs() <= 180.0 {
        path.arc_to(radius, false, sweep, p_to);
    } else {
        let half = if forward { 180.0 } else { -180.0 };
        let mid = vector_to_point(origin, angle_start + half, radius);
        path.arc_to(radius, false, sweep, mid);
        path.arc_to(radius, false, sweep, p_to);
    }
    path
}

/// A single command of a [`PathData`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Starts a new subpath.
    MoveTo(Point),
    /// Straight segment to a point.
    LineTo(Point),
    /// Circular arc segment (SVG `A` command with equal radii and no rotation).
    Arc {
        /// Arc radius.
        radius: f64,
        /// SVG large-arc flag.
        large_arc: bool,
        /// SVG sweep flag (`true` for increasing screen angles).
        sweep: bool,
        /// End point.
        to: Point,
    },
    /// Closes the current subpath.
    Close,
}

/// A path description made of lines and circular arcs.
///
/// This is what gets written into a path element's `d` attribute, and it can be converted to a
/// kurbo [`BezPath`] for length measurement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `MoveTo` command.
    pub fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    /// Appends a `LineTo` command.
    pub fn line_to(&mut self, p: Point) {
        self.commands.push(PathCommand::LineTo(p));
    }

    /// Appends an arc segment.
    pub fn arc_to(&mut self, radius: f64, large_arc: bool, sweep: bool, to: Point) {
        self.commands.push(PathCommand::Arc {
            radius,
            large_arc,
            sweep,
            to,
        });
    }

    /// Closes the current subpath.
    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Appends all commands of `other`.
    pub fn extend(&mut self, other: &Self) {
        self.commands.extend_from_slice(&other.commands);
    }

    /// Returns the commands in order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns the number of arc segments.
    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::Arc { .. }))
            .count()
    }

    /// Returns the point the path ends at, if any.
    pub fn end_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(|c| match c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Arc { to, .. } => Some(*to),
            PathCommand::Close => None,
        })
    }

    /// Serializes the path in SVG path syntax.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a `String` cannot fail.
            let _ = match command {
                PathCommand::MoveTo(p) => write!(out, "M{}", point_pair(*p)),
                PathCommand::LineTo(p) => write!(out, "L{}", point_pair(*p)),
                PathCommand::Arc {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let r = format_coordinate(radius.abs());
                    write!(
                        out,
                        "A{r},{r} 0 {},{} {}",
                        u8::from(*large_arc),
                        u8::from(*sweep),
                        point_pair(*to)
                    )
                }
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }

    /// Converts the path to a kurbo [`BezPath`], flattening arcs into cubic segments.
    ///
    /// A fragment that does not start with a `MoveTo` begins at the end point of its first
    /// command.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bez = BezPath::new();
        let mut current: Option<Point> = None;
        let mut start = Point::ORIGIN;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    bez.move_to(p);
                    current = Some(p);
                    start = p;
                }
                PathCommand::LineTo(p) => {
                    if current.is_none() {
                        bez.move_to(p);
                        start = p;
                    } else {
                        bez.line_to(p);
                    }
                    current = Some(p);
                }
                PathCommand::Arc {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let Some(from) = current else {
                        bez.move_to(to);
                        current = Some(to);
                        start = to;
                        continue;
                    };
                    let svg_arc = SvgArc {
                        from,
                        to,
                        radii: Vec2::new(radius.abs(), radius.abs()),
                        x_rotation: 0.0,
                        large_arc,
                        sweep,
                    };
                    match kurbo::Arc::from_svg_arc(&svg_arc) {
                        Some(arc) => {
                            for el in arc.append_iter(ARC_TOLERANCE) {
                                bez.push(el);
                            }
                        }
                        None => bez.line_to(to),
                    }
                    current = Some(to);
                }
                PathCommand::Close => {
                    if current.is_some() {
                        bez.close_path();
                        current = Some(start);
                    }
                }
            }
        }
        bez
    }

    /// Returns the total length of the path.
    pub fn length(&self) -> f64 {
        self.to_bez_path()
            .segments()
            .map(|seg| seg.arclen(ARCLEN_ACCURACY))
            .sum()
    }

    /// Returns the point `length` units along the path.
    ///
    /// Lengths are clamped to the path; an empty path yields the origin.
    pub fn point_at_length(&self, length: f64) -> Point {
        let bez = self.to_bez_path();
        let mut remaining = length.max(0.0);
        let mut last = None;
        for seg in bez.segments() {
            let seg_len = seg.arclen(ARCLEN_ACCURACY);
            // Zero-length segments have no arclength parameterization.
            if seg_len.is_nan() || seg_len <= 0.0 {
                last = Some(seg.end());
                continue;
            }
            if remaining <= seg_len {
                let t = seg.inv_arclen(remaining, ARCLEN_ACCURACY);
                return seg.eval(t);
            }
            remaining -= seg_len;
            last = Some(seg.end());
        }
        last.or_else(|| self.end_point()).unwrap_or(Point::ORIGIN)
    }
}

fn point_pair(p: Point) -> String {
    let mut s = format_coordinate(p.x);
    s.push(',');
    s.push_str(&format_coordinate(p.y));
    s
}
