// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas dimensions and transform attribute strings.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, Point, Vec2};

use crate::format::format_coordinate;

/// The instrument canvas, in user units.
///
/// All geometry is laid out in this coordinate space and rotations pivot on its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    /// Width in user units.
    pub width: f64,
    /// Height in user units.
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(400.0, 400.0)
    }
}

impl Canvas {
    /// Creates a canvas of the given size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the canvas center.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Returns the `viewBox` attribute value.
    pub fn view_box(&self) -> String {
        format!(
            "0 0 {} {}",
            format_coordinate(self.width),
            format_coordinate(self.height)
        )
    }
}

/// A transform applied to an indicator element by a mechanics listener.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementTransform {
    /// Rotation in degrees about a pivot.
    Rotate {
        /// Clockwise rotation in degrees.
        degrees: f64,
        /// Pivot point.
        center: Point,
    },
    /// Translation.
    Translate(Vec2),
}

impl ElementTransform {
    /// Formats the transform as an SVG `transform` attribute value.
    pub fn to_attribute(&self) -> String {
        match self {
            Self::Rotate { degrees, center } => format!(
                "rotate({} {} {})",
                format_coordinate(*degrees),
                format_coordinate(center.x),
                format_coordinate(center.y)
            ),
            Self::Translate(d) => format!(
                "translate({} {})",
                format_coordinate(d.x),
                format_coordinate(d.y)
            ),
        }
    }

    /// Returns the equivalent affine map.
    pub fn to_affine(&self) -> Affine {
        match self {
            Self::Rotate { degrees, center } => {
                Affine::rotate_about(degrees.to_radians(), *center)
            }
            Self::Translate(d) => Affine::translate(*d),
        }
    }
}

/// The placement of a whole gauge group within the instrument canvas.
///
/// Composed as translate, then rotate about the canvas center, then scale. A scale other than
/// one is re-centered by adding `(size - size·scale) / 2` to the offset, so a scaled gauge
/// stays centered on the canvas unless explicitly offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupTransform {
    /// Translation, before scale re-centering.
    pub offset: Vec2,
    /// Rotation in degrees about the canvas center.
    pub rotate: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            rotate: 0.0,
            scale: 1.0,
        }
    }
}

impl GroupTransform {
    /// Returns `true` if every parameter is finite.
    pub fn is_finite(&self) -> bool {
        self.offset.is_finite() && self.rotate.is_finite() && self.scale.is_finite()
    }

    /// Returns the translation after scale re-centering.
    pub fn effective_offset(&self, canvas: Canvas) -> Vec2 {
        if self.scale == 1.0 {
            self.offset
        } else {
            self.offset
                + Vec2::new(
                    (canvas.width - canvas.width * self.scale) / 2.0,
                    (canvas.height - canvas.height * self.scale) / 2.0,
                )
        }
    }

    /// Formats the transform as an SVG `transform` attribute value, or `None` for the identity.
    pub fn to_attribute(&self, canvas: Canvas) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        let offset = self.effective_offset(canvas);
        if offset != Vec2::ZERO {
            parts.push(format!(
                "translate({} {})",
                format_coordinate(offset.x),
                format_coordinate(offset.y)
            ));
        }
        if self.rotate != 0.0 {
            let center = canvas.center();
            parts.push(format!(
                "rotate({} {} {})",
                format_coordinate(self.rotate),
                format_coordinate(center.x),
                format_coordinate(center.y)
            ));
        }
        if self.scale != 1.0 {
            let s = format_coordinate(self.scale);
            parts.push(format!("scale({s} {s})"));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Returns the equivalent affine map (applied to points in gauge space).
    pub fn to_affine(&self, canvas: Canvas) -> Affine {
        Affine::translate(self.effective_offset(canvas))
            * Affine::rotate_about(self.rotate.to_radians(), canvas.center())
            * Affine::scale(self.scale)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn identity_has_no_attribute() {
        assert_eq!(GroupTransform::default().to_attribute(Canvas::default()), None);
    }

    #[test]
    fn scaled_groups_stay_centered() {
        let canvas = Canvas::default();
        let t = GroupTransform {
            scale: 0.5,
            ..GroupTransform::default()
        };
        assert_eq!(t.to_attribute(canvas).as_deref(), Some("translate(100 100) scale(0.5 0.5)"));
        let center = t.to_affine(canvas) * canvas.center();
        assert!((center - canvas.center()).hypot() < 1e-9);
    }

    #[test]
    fn parts_compose_in_order() {
        let t = GroupTransform {
            offset: Vec2::new(10.0, -5.0),
            rotate: 45.0,
            scale: 2.0,
        };
        assert_eq!(
            t.to_attribute(Canvas::default()).as_deref(),
            Some("translate(-190 -205) rotate(45 200 200) scale(2 2)")
        );
    }

    #[test]
    fn element_transforms_format_like_svg() {
        let rotate = ElementTransform::Rotate {
            degrees: 250.0,
            center: Point::new(200.0, 200.0),
        };
        assert_eq!(rotate.to_attribute(), "rotate(250 200 200)");
        assert_eq!(
            ElementTransform::Translate(Vec2::new(0.0, 27.0)).to_attribute(),
            "translate(0 27)"
        );
        let p = rotate.to_affine() * Point::new(200.0, 100.0);
        assert!(p.distance(Point::new(200.0, 100.0)) > 1.0);
    }

    #[test]
    fn view_box_covers_the_canvas() {
        assert_eq!(Canvas::default().view_box(), "0 0 400 400");
        assert_eq!(Canvas::new(320.0, 240.5).view_box(), "0 0 320 240.5");
    }
}
