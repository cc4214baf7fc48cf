// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range bands: a filled wedge plus its tick marks and scale labels.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Color;
use smallvec::SmallVec;

use crate::error::RangeError;
use crate::geometry::{PathData, arc_path, vector_to_point};
use crate::mechanics::GaugeGeometry;
use crate::surface::{Attributes, ElementKind, NodeId, Surface, push_number, push_paint};
use crate::tick::{ScaleLevelSpec, TickLayout};

/// Screen angle (degrees) an indicator's art points at when its rotation is zero.
///
/// Needle art points toward `-x`.
pub const REST_ANGLE: f64 = 180.0;

/// Affine map from register values to screen angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularMapping {
    /// Angle of the gauge's minimum value.
    pub origin: f64,
    /// Signed degrees per value unit.
    pub degrees_per_value: f64,
    /// The gauge's minimum value.
    pub min: f64,
}

impl AngularMapping {
    /// Mapping for ranges on the fixed gauge face.
    ///
    /// A value's mark sits where the indicator points when the register holds that value.
    pub fn face(geometry: &GaugeGeometry) -> Self {
        Self {
            origin: REST_ANGLE + geometry.start,
            degrees_per_value: geometry.signed_degrees_per_value(),
            min: geometry.min,
        }
    }

    /// Mapping for ranges on a rotating dial read against a fixed pointer at `pointer_angle`.
    ///
    /// Once the dial is rotated for a value, that value's mark sits under the pointer.
    pub fn dial(geometry: &GaugeGeometry, pointer_angle: f64) -> Self {
        Self {
            origin: pointer_angle - geometry.start,
            degrees_per_value: -geometry.signed_degrees_per_value(),
            min: geometry.min,
        }
    }

    /// Returns the screen angle of `value`.
    pub fn angle(&self, value: f64) -> f64 {
        self.origin + (value - self.min) * self.degrees_per_value
    }
}

/// A wedge band over a value interval, with optional nested tick levels.
#[derive(Clone, Debug)]
pub struct RangeSpec {
    /// Element class of the band.
    pub class: String,
    /// Lower value; defaults to the primary register's minimum.
    pub from: Option<f64>,
    /// Upper value; defaults to the primary register's maximum.
    pub to: Option<f64>,
    /// Radius of the band's outer edge.
    pub offset: f64,
    /// Radial thickness (negative grows inward).
    pub extent: f64,
    /// Band fill.
    pub fill: Option<Color>,
    /// Band stroke.
    pub stroke: Option<Color>,
    /// Tick levels, coarsest first.
    pub scales: SmallVec<[ScaleLevelSpec; 3]>,
}

impl Default for RangeSpec {
    fn default() -> Self {
        Self {
            class: String::from("range"),
            from: None,
            to: None,
            offset: 134.0,
            extent: -4.0,
            fill: None,
            stroke: None,
            scales: SmallVec::new(),
        }
    }
}

impl RangeSpec {
    /// Creates a range with default radii covering the whole register domain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Restricts the band to `from..=to`.
    pub fn with_values(mut self, from: f64, to: f64) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Sets the outer radius.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the radial thickness.
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    /// Sets the band fill.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Sets the band stroke.
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    /// Appends a tick level (finer than the ones already added).
    pub fn with_scale(mut self, level: ScaleLevelSpec) -> Self {
        self.scales.push(level);
        self
    }

    /// Resolves the band's bounds against the primary register's domain.
    pub fn bounds(&self, domain: (f64, f64)) -> Result<(f64, f64), RangeError> {
        let from = self.from.unwrap_or(domain.0);
        let to = self.to.unwrap_or(domain.1);
        if !from.is_finite() || !to.is_finite() || from > to {
            return Err(RangeError::InvalidBounds { from, to });
        }
        Ok((from, to))
    }

    /// Validates the tick levels and returns their layout, if any.
    ///
    /// Ticks cover `modulo` for wrapping gauges and `from..=to` otherwise.
    pub fn tick_layout(
        &self,
        from: f64,
        to: f64,
        modulo: Option<f64>,
    ) -> Result<Option<TickLayout>, RangeError> {
        if self.scales.is_empty() {
            return Ok(None);
        }
        for (level, scale) in self.scales.iter().enumerate() {
            let label_skip = scale.label.iter().flat_map(|l| l.skip.rules());
            if !scale.skip.rules().iter().chain(label_skip).all(|r| r.is_valid()) {
                return Err(RangeError::InvalidSkipRule { level });
            }
        }
        let divisions: SmallVec<[u32; 4]> = self.scales.iter().map(|s| s.divisions).collect();
        let value_range = modulo.unwrap_or(to - from);
        TickLayout::new(&divisions, from, value_range, modulo.is_some()).map(Some)
    }

    /// Renders the band, then its ticks, then its labels into `parent`.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        parent: NodeId,
        center: Point,
        mapping: AngularMapping,
        domain: (f64, f64),
        modulo: Option<f64>,
    ) -> Result<RangeSummary, RangeError> {
        let (from, to) = self.bounds(domain)?;
        let layout = self.tick_layout(from, to, modulo)?;

        let a0 = mapping.angle(from);
        let a1 = mapping.angle(to);
        surface.create_element(
            parent,
            ElementKind::Path,
            self.band_attributes(center, a0, a1),
            None,
        );

        let mut summary = RangeSummary::default();
        let Some(layout) = layout else {
            return Ok(summary);
        };

        let value_range = modulo.unwrap_or(to - from);
        let span = (value_range * mapping.degrees_per_value).clamp(-360.0, 360.0);
        let guides: Vec<LevelGuides> = self
            .scales
            .iter()
            .map(|scale| LevelGuides::new(&*surface, center, self.offset, scale, a0, a0 + span))
            .collect();

        let mut labels: Vec<(usize, f64, f64)> = Vec::new();
        for tick in layout.ticks() {
            let scale = &self.scales[tick.level];
            if !scale.skip.admits(tick.value) {
                summary.skipped += 1;
                continue;
            }
            let guide = &guides[tick.level];
            let p1 = guide.outer.point_at(&*surface, tick.fraction);
            let p2 = guide.inner.point_at(&*surface, tick.fraction);

            let mut attributes = Attributes::new();
            if let Some(color) = scale.color {
                push_paint(&mut attributes, "stroke", color);
            }
            attributes.push(("class", scale.class_for(tick.level)));
            push_number(&mut attributes, "x1", p1.x);
            push_number(&mut attributes, "y1", p1.y);
            push_number(&mut attributes, "x2", p2.x);
            push_number(&mut attributes, "y2", p2.y);
            surface.create_element(parent, ElementKind::Line, attributes, None);
            summary.ticks += 1;

            if let Some(label) = &scale.label {
                if label.skip.admits(tick.value) {
                    labels.push((tick.level, tick.value, tick.fraction));
                }
            }
        }

        for (level, value, fraction) in labels {
            let (Some(label), Some(guide)) = (&self.scales[level].label, &guides[level].label)
            else {
                continue;
            };
            let position = guide.point_at(&*surface, fraction);
            label.render(surface, parent, value, position, a0 + span * fraction);
            summary.labels += 1;
        }
        Ok(summary)
    }

    fn band_attributes(&self, center: Point, a0: f64, a1: f64) -> Attributes {
        let inner = self.offset + self.extent;
        let mut d = arc_path(center, self.offset, a0, a1, false);
        d.line_to(vector_to_point(center, a1, inner));
        d.extend(&arc_path(center, inner, a0, a1, true));
        d.close();

        let mut attributes = Attributes::new();
        if let Some(fill) = self.fill {
            push_paint(&mut attributes, "fill", fill);
        }
        if let Some(stroke) = self.stroke {
            push_paint(&mut attributes, "stroke", stroke);
        }
        attributes.push(("class", self.class.clone()));
        attributes.push(("d", d.to_svg()));
        attributes
    }
}

/// Counts of what a range emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeSummary {
    /// Tick lines drawn.
    pub ticks: usize,
    /// Ticks suppressed by skip rules.
    pub skipped: usize,
    /// Scale labels drawn.
    pub labels: usize,
}

/// An arc that tick endpoints are placed along, with its measured length.
struct Guide {
    path: PathData,
    length: f64,
}

impl Guide {
    fn new<S: Surface + ?Sized>(surface: &S, center: Point, radius: f64, a0: f64, a1: f64) -> Self {
        let path = arc_path(center, radius, a0, a1, false);
        let length = surface.path_length(&path);
        Self { path, length }
    }

    fn point_at<S: Surface + ?Sized>(&self, surface: &S, fraction: f64) -> Point {
        surface.point_at_length(&self.path, self.length * fraction)
    }
}

struct LevelGuides {
    outer: Guide,
    inner: Guide,
    label: Option<Guide>,
}

impl LevelGuides {
    fn new<S: Surface + ?Sized>(
        surface: &S,
        center: Point,
        offset: f64,
        scale: &ScaleLevelSpec,
        a0: f64,
        a1: f64,
    ) -> Self {
        Self {
            outer: Guide::new(surface, center, offset + scale.offset, a0, a1),
            inner: Guide::new(surface, center, offset + scale.extent, a0, a1),
            label: scale
                .label
                .as_ref()
                .map(|label| Guide::new(surface, center, offset + label.offset, a0, a1)),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::label::ScaleLabelSpec;
    use crate::skip::SkipRule;
    use crate::test_surface::Recorder;

    const CENTER: Point = Point::new(200.0, 200.0);

    fn airspeed_geometry() -> GaugeGeometry {
        GaugeGeometry {
            start: 90.0,
            range: 320.0,
            clockwise: true,
            degrees_per_value: 2.0,
            min: 0.0,
            max: 160.0,
            modulo: None,
            center: CENTER,
        }
    }

    #[test]
    fn face_mapping_matches_needle_rotation() {
        let geometry = airspeed_geometry();
        let mapping = AngularMapping::face(&geometry);
        // The needle rests pointing left; its rotation at 80 is 250°.
        let expected = REST_ANGLE + geometry.rotation(80.0);
        assert_eq!(mapping.angle(80.0), expected);
        assert_eq!(mapping.angle(0.0), 270.0);
    }

    #[test]
    fn dial_mapping_keeps_the_value_under_the_pointer() {
        let geometry = GaugeGeometry {
            start: 0.0,
            range: 360.0,
            clockwise: false,
            degrees_per_value: 1.0,
            min: 0.0,
            max: 360.0,
            modulo: Some(360.0),
            center: CENTER,
        };
        let mapping = AngularMapping::dial(&geometry, -90.0);
        for heading in [0.0, 45.0, 90.0, 270.0] {
            let on_screen = mapping.angle(heading) + geometry.rotation(heading);
            assert!((on_screen + 90.0).abs() < 1e-9, "{heading}");
        }
    }

    #[test]
    fn band_is_a_closed_wedge() {
        let range = RangeSpec::new()
            .with_values(30.0, 100.0)
            .with_offset(150.0)
            .with_extent(-10.0)
            .with_fill(Color::from_rgba8(0, 0x75, 0x11, 0xff));
        let mut surface = Recorder::default();
        let root = surface.root();
        let mapping = AngularMapping::face(&airspeed_geometry());
        let summary = range
            .render(&mut surface, root, CENTER, mapping, (0.0, 160.0), None)
            .unwrap();
        assert_eq!(summary, RangeSummary::default());

        let band = &surface.nodes[1];
        assert_eq!(band.kind, ElementKind::Path);
        assert_eq!(band.attribute("fill"), Some("#007511"));
        assert_eq!(band.attribute("class"), Some("range"));
        let d = band.attribute("d").unwrap();
        assert!(d.starts_with('M') && d.ends_with('Z'), "{d}");
        // 140° fits in one segment per edge.
        assert_eq!(d.matches('A').count(), 2, "{d}");
        assert_eq!(d.matches('L').count(), 1, "{d}");
    }

    #[test]
    fn ticks_precede_labels() {
        let range = RangeSpec::new()
            .with_class("hidden")
            .with_offset(150.0)
            .with_scale(
                ScaleLevelSpec::new(16)
                    .with_label(ScaleLabelSpec::new().with_skip([SkipRule::NotModulo(20.0)])),
            )
            .with_scale(ScaleLevelSpec::new(2).with_extent(-16.0));
        let mut surface = Recorder::default();
        let root = surface.root();
        let mapping = AngularMapping::face(&airspeed_geometry());
        let summary = range
            .render(&mut surface, root, CENTER, mapping, (0.0, 160.0), None)
            .unwrap();
        assert_eq!(summary.ticks, 33);
        assert_eq!(summary.labels, 9);

        let kinds: Vec<ElementKind> = surface.nodes[1..].iter().map(|n| n.kind).collect();
        assert_eq!(kinds[0], ElementKind::Path);
        assert!(kinds[1..34].iter().all(|k| *k == ElementKind::Line));
        assert!(kinds[34..].iter().all(|k| *k == ElementKind::Text));
        let captions: Vec<&str> = surface.nodes[35..]
            .iter()
            .filter_map(|n| n.text.as_deref())
            .collect();
        assert_eq!(
            captions,
            vec!["0", "20", "40", "60", "80", "100", "120", "140", "160"]
        );
        assert_eq!(surface.nodes[2].attribute("class"), Some("scale scale-level-0"));
        assert_eq!(surface.nodes[3].attribute("class"), Some("scale scale-level-1"));
    }

    #[test]
    fn tick_endpoints_follow_the_angular_mapping() {
        let range = RangeSpec::new()
            .with_offset(150.0)
            .with_scale(ScaleLevelSpec::new(4));
        let mut surface = Recorder::default();
        let root = surface.root();
        let mapping = AngularMapping::face(&airspeed_geometry());
        range
            .render(&mut surface, root, CENTER, mapping, (0.0, 160.0), None)
            .unwrap();
        // Value 40 at 270° + 80° = 350°.
        let tick = &surface.nodes[3];
        let x1: f64 = tick.attribute("x1").unwrap().parse().unwrap();
        let y1: f64 = tick.attribute("y1").unwrap().parse().unwrap();
        let expected = vector_to_point(CENTER, 350.0, 150.0);
        assert!(Point::new(x1, y1).distance(expected) < 1.5, "({x1}, {y1})");
    }

    #[test]
    fn zero_width_range_places_ticks_at_its_value() {
        let range = RangeSpec::new()
            .with_values(50.0, 50.0)
            .with_offset(150.0)
            .with_scale(ScaleLevelSpec::new(2));
        let mut surface = Recorder::default();
        let root = surface.root();
        let mapping = AngularMapping::face(&airspeed_geometry());
        let summary = range
            .render(&mut surface, root, CENTER, mapping, (0.0, 160.0), None)
            .unwrap();
        assert_eq!(summary.ticks, 3);

        let expected = vector_to_point(CENTER, mapping.angle(50.0), 150.0);
        let lines = surface.nodes.iter().filter(|n| n.kind == ElementKind::Line);
        for line in lines {
            let x1: f64 = line.attribute("x1").unwrap().parse().unwrap();
            let y1: f64 = line.attribute("y1").unwrap().parse().unwrap();
            assert!(x1.is_finite() && y1.is_finite(), "({x1}, {y1})");
            assert!(Point::new(x1, y1).distance(expected) < 1.5, "({x1}, {y1})");
        }
    }

    #[test]
    fn wrapping_ticks_cover_the_modulo() {
        let geometry = GaugeGeometry {
            start: 90.0,
            range: 360.0,
            clockwise: true,
            degrees_per_value: 0.036,
            min: 0.0,
            max: 30_000.0,
            modulo: Some(10_000.0),
            center: CENTER,
        };
        let range = RangeSpec::new()
            .with_scale(ScaleLevelSpec::new(10))
            .with_scale(ScaleLevelSpec::new(5));
        let mut surface = Recorder::default();
        let root = surface.root();
        let summary = range
            .render(
                &mut surface,
                root,
                CENTER,
                AngularMapping::face(&geometry),
                (0.0, 30_000.0),
                geometry.modulo,
            )
            .unwrap();
        assert_eq!(summary.ticks, 50);
    }

    #[test]
    fn invalid_configurations_are_reported() {
        let mut surface = Recorder::default();
        let root = surface.root();
        let mapping = AngularMapping::face(&airspeed_geometry());
        let reversed = RangeSpec::new().with_values(100.0, 30.0);
        assert!(matches!(
            reversed.render(&mut surface, root, CENTER, mapping, (0.0, 160.0), None),
            Err(RangeError::InvalidBounds { .. })
        ));
        let bad_skip = RangeSpec::new()
            .with_scale(ScaleLevelSpec::new(4).with_skip([SkipRule::Modulo(0.0)]));
        assert_eq!(
            bad_skip.render(&mut surface, root, CENTER, mapping, (0.0, 160.0), None),
            Err(RangeError::InvalidSkipRule { level: 0 })
        );
    }
}
