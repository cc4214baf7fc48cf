// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing-surface contract instruments render into.
//!
//! Gaugekit does not own a scene graph. A host provides a [`Surface`]: something that can create
//! nested groups and leaf elements carrying string attributes, and update attributes later.
//! Everything the engine draws goes through this trait, so the same instrument can target an SVG
//! document, a retained GUI scene, or a test recorder.

extern crate alloc;

use alloc::string::String;

use kurbo::Point;
use peniko::Color;
use smallvec::SmallVec;

use crate::format::format_coordinate;
use crate::geometry::PathData;

/// Opaque handle to a node created by a [`Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// The closed set of node kinds the engine creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A container node.
    Group,
    /// A path with a `d` attribute.
    Path,
    /// A straight line (`x1`, `y1`, `x2`, `y2`).
    Line,
    /// An open polyline (`points`).
    Polyline,
    /// A closed polygon (`points`).
    Polygon,
    /// A circle (`cx`, `cy`, `r`).
    Circle,
    /// A rectangle (`x`, `y`, `width`, `height`).
    Rect,
    /// A text run; the content is passed separately from the attributes.
    Text,
}

impl ElementKind {
    /// Returns the SVG tag name for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Group => "g",
            Self::Path => "path",
            Self::Line => "line",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Circle => "circle",
            Self::Rect => "rect",
            Self::Text => "text",
        }
    }
}

/// Attribute list for a new element, in insertion order.
pub type Attributes = SmallVec<[(&'static str, String); 8]>;

/// A host drawing surface.
///
/// Nodes are appended to their parent on creation, so creation order is paint order.
pub trait Surface {
    /// Returns the root node instruments attach to.
    fn root(&self) -> NodeId;

    /// Creates a leaf or container node under `parent`.
    fn create_element(
        &mut self,
        parent: NodeId,
        kind: ElementKind,
        attributes: Attributes,
        text: Option<String>,
    ) -> NodeId;

    /// Sets (or replaces) an attribute on an existing node.
    fn set_attribute(&mut self, node: NodeId, name: &'static str, value: String);

    /// Removes an attribute from an existing node.
    fn remove_attribute(&mut self, node: NodeId, name: &'static str);

    /// Creates a group under `parent`, optionally tagged with a class.
    fn create_group(&mut self, parent: NodeId, class: Option<&str>) -> NodeId {
        let mut attributes = Attributes::new();
        if let Some(class) = class {
            attributes.push(("class", class.into()));
        }
        self.create_element(parent, ElementKind::Group, attributes, None)
    }

    /// Returns the total length of `path`.
    fn path_length(&self, path: &PathData) -> f64 {
        path.length()
    }

    /// Returns the point `length` units along `path`.
    fn point_at_length(&self, path: &PathData, length: f64) -> Point {
        path.point_at_length(length)
    }
}

/// Pushes a coordinate-valued attribute.
pub(crate) fn push_number(attributes: &mut Attributes, name: &'static str, value: f64) {
    attributes.push((name, format_coordinate(value)));
}

/// Pushes a paint attribute (`fill` or `stroke`) plus its opacity when not fully opaque.
pub(crate) fn push_paint(attributes: &mut Attributes, name: &'static str, color: Color) {
    let rgba = color.to_rgba8();
    attributes.push((
        name,
        alloc::format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
    ));
    if rgba.a != 255 {
        let opacity_name = match name {
            "stroke" => "stroke-opacity",
            _ => "fill-opacity",
        };
        attributes.push((
            opacity_name,
            format_coordinate(f64::from(rgba.a) / 255.0),
        ));
    }
}
