// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static artwork: instrument boxes, faces, bezels and needles.
//!
//! Art is plain data, a class plus a list of shapes, rendered into its own group. The shapes
//! here are deliberately simple; hosts with real artwork can build their own [`Art`] values.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Color;

use crate::format::format_coordinate;
use crate::geometry::{PathData, arc_path};
use crate::surface::{Attributes, ElementKind, NodeId, Surface, push_number, push_paint};
use crate::transform::Canvas;

/// One shape of an [`Art`] group.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtElement {
    /// Shape kind.
    pub kind: ElementKind,
    /// Attributes in insertion order.
    pub attributes: Attributes,
    /// Text content for [`ElementKind::Text`].
    pub text: Option<String>,
}

impl ArtElement {
    /// Creates a shape with no attributes.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            text: None,
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Adds a numeric attribute.
    pub fn with_number(mut self, name: &'static str, value: f64) -> Self {
        push_number(&mut self.attributes, name, value);
        self
    }

    /// Adds a `fill` attribute (plus `fill-opacity` when translucent).
    pub fn with_fill(mut self, color: Color) -> Self {
        push_paint(&mut self.attributes, "fill", color);
        self
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// A path element.
    pub fn path(class: &str, d: &PathData) -> Self {
        Self::new(ElementKind::Path)
            .with_attribute("class", class)
            .with_attribute("d", d.to_svg())
    }

    /// A circle element.
    pub fn circle(class: &str, center: Point, radius: f64) -> Self {
        Self::new(ElementKind::Circle)
            .with_attribute("class", class)
            .with_number("cx", center.x)
            .with_number("cy", center.y)
            .with_number("r", radius)
    }

    /// A line element.
    pub fn line(class: &str, from: Point, to: Point) -> Self {
        Self::new(ElementKind::Line)
            .with_attribute("class", class)
            .with_number("x1", from.x)
            .with_number("y1", from.y)
            .with_number("x2", to.x)
            .with_number("y2", to.y)
    }

    /// A closed polygon element.
    pub fn polygon(class: &str, points: &[Point]) -> Self {
        Self::new(ElementKind::Polygon)
            .with_attribute("class", class)
            .with_attribute("points", points_attribute(points))
    }

    /// A rectangle element with rounded corners.
    pub fn rect(class: &str, origin: Point, width: f64, height: f64, corner: f64) -> Self {
        let mut element = Self::new(ElementKind::Rect)
            .with_attribute("class", class)
            .with_number("x", origin.x)
            .with_number("y", origin.y)
            .with_number("width", width)
            .with_number("height", height);
        if corner > 0.0 {
            element = element.with_number("rx", corner).with_number("ry", corner);
        }
        element
    }

    /// A text element anchored at `position`.
    pub fn text(class: &str, position: Point, text: impl Into<String>) -> Self {
        Self::new(ElementKind::Text)
            .with_attribute("class", class)
            .with_number("x", position.x)
            .with_number("y", position.y)
            .with_text(text)
    }
}

/// A group of static shapes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Art {
    /// Group class.
    pub class: Option<String>,
    /// Shapes in paint order.
    pub elements: Vec<ArtElement>,
}

impl Art {
    /// Creates an empty art group with a class.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            elements: Vec::new(),
        }
    }

    /// Appends a shape.
    pub fn with(mut self, element: ArtElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Renders the art as a new group under `parent` and returns the group.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, parent: NodeId) -> NodeId {
        let group = surface.create_group(parent, self.class.as_deref());
        self.render_into(surface, group);
        group
    }

    /// Renders the shapes directly into an existing group.
    pub fn render_into<S: Surface + ?Sized>(&self, surface: &mut S, group: NodeId) {
        for element in &self.elements {
            surface.create_element(
                group,
                element.kind,
                element.attributes.clone(),
                element.text.clone(),
            );
        }
    }

    /// The rounded instrument box behind everything.
    pub fn instrument_box(canvas: Canvas) -> Self {
        let inset = 13.0;
        Self::new("instrument-box").with(ArtElement::rect(
            "instrument-box",
            Point::new(inset, inset),
            canvas.width - 2.0 * inset,
            canvas.height - 2.0 * inset,
            12.0,
        ))
    }

    /// The circular gauge face.
    pub fn face(canvas: Canvas) -> Self {
        Self::new("instrument-face").with(ArtElement::circle(
            "instrument-face",
            canvas.center(),
            153.0,
        ))
    }

    /// The ring-shaped bezel drawn over the gauges.
    pub fn bezel(canvas: Canvas) -> Self {
        let center = canvas.center();
        let mut ring = ring_path(center, 166.5);
        ring.extend(&ring_path(center, 150.0));
        Self::new("bezel").with(
            ArtElement::path("bezel", &ring).with_attribute("fill-rule", "evenodd"),
        )
    }
}

/// Built-in needle artwork. All needles point toward `-x` at zero rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NeedleShape {
    /// A long needle with a hub.
    #[default]
    Standard,
    /// A short, wide needle (for example the altimeter's ten-thousands hand).
    Small,
    /// A small marker riding on the rim.
    SmallReverse,
}

impl NeedleShape {
    /// Builds the needle art for a canvas.
    pub fn art(self, canvas: Canvas) -> Art {
        let c = canvas.center();
        let p = |dx: f64, dy: f64| Point::new(c.x + dx, c.y + dy);
        match self {
            Self::Standard => Art::new("needle needle-standard")
                .with(ArtElement::polygon(
                    "needle",
                    &[
                        p(-124.0, -3.6),
                        p(-132.0, 0.0),
                        p(-124.0, 3.6),
                        p(-16.0, 3.6),
                        p(-16.0, -3.6),
                    ],
                ))
                .with(ArtElement::circle("needle-hub", c, 10.0)),
            Self::Small => Art::new("needle needle-small").with(ArtElement::polygon(
                "needle",
                &[p(-68.0, 0.0), p(-40.0, -11.5), p(7.0, 0.0), p(-40.0, 11.5)],
            )),
            Self::SmallReverse => Art::new("needle needle-small-reverse").with(
                ArtElement::polygon(
                    "needle",
                    &[
                        p(-141.0, -3.6),
                        p(-132.0, 0.0),
                        p(-141.0, 3.6),
                        p(-148.0, 3.6),
                        p(-148.0, -3.6),
                    ],
                ),
            ),
        }
    }
}

/// Formats a `points` attribute (`x,y x,y ...`).
pub fn points_attribute(points: &[Point]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format_coordinate(p.x));
        out.push(',');
        out.push_str(&format_coordinate(p.y));
    }
    out
}

/// A full circle as a closed path.
pub fn ring_path(center: Point, radius: f64) -> PathData {
    let mut path = arc_path(center, radius, 180.0, 540.0, false);
    path.close();
    path
}
