// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static captions and tick-anchored scale labels.

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;

use kurbo::Point;
use peniko::Color;

use crate::format::{format_coordinate, format_number};
use crate::skip::SkipRules;
use crate::surface::{Attributes, ElementKind, NodeId, Surface, push_number, push_paint};

/// Formats a tick value into label text.
pub type Formatter = Rc<dyn Fn(f64) -> String>;

/// Optional presentation attributes for a text element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelStyle {
    /// `font-family`.
    pub font_family: Option<String>,
    /// `font-size`.
    pub font_size: Option<f64>,
    /// Used for both `fill` and `stroke`.
    pub color: Option<Color>,
    /// `stroke-width`.
    pub stroke_width: Option<f64>,
    /// `stroke-miterlimit`.
    pub stroke_miterlimit: Option<f64>,
}

impl LabelStyle {
    /// Sets the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Sets the text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the stroke width and miter limit.
    pub fn with_stroke(mut self, width: f64, miterlimit: f64) -> Self {
        self.stroke_width = Some(width);
        self.stroke_miterlimit = Some(miterlimit);
        self
    }

    fn push_attributes(&self, attributes: &mut Attributes) {
        if let Some(family) = &self.font_family {
            attributes.push(("font-family", family.clone()));
        }
        if let Some(size) = self.font_size {
            push_number(attributes, "font-size", size);
        }
        if let Some(color) = self.color {
            push_paint(attributes, "fill", color);
            push_paint(attributes, "stroke", color);
        }
        if let Some(width) = self.stroke_width {
            push_number(attributes, "stroke-width", width);
        }
        if let Some(limit) = self.stroke_miterlimit {
            push_number(attributes, "stroke-miterlimit", limit);
        }
    }
}

/// How a scale label is rotated about its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelRotation {
    /// Upright text.
    #[default]
    None,
    /// Baseline along the radius (rotated by the tick angle).
    Radial,
    /// Baseline along the arc (rotated by the tick angle plus a quarter turn), tops pointing
    /// outward.
    Tangential,
}

impl LabelRotation {
    /// Returns the text rotation for a tick at `angle` degrees.
    pub fn degrees(self, angle: f64) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Radial => Some(angle),
            Self::Tangential => Some(angle + 90.0),
        }
    }
}

/// Labels drawn at the ticks of one scale level.
#[derive(Clone)]
pub struct ScaleLabelSpec {
    /// Element class.
    pub class: String,
    /// Radius offset of the label anchor, relative to the range offset.
    pub offset: f64,
    /// Turns a tick value into text.
    pub formatter: Formatter,
    /// Values whose labels are suppressed (the tick is still drawn).
    pub skip: SkipRules,
    /// Text rotation.
    pub rotation: LabelRotation,
    /// Presentation attributes.
    pub style: LabelStyle,
}

impl core::fmt::Debug for ScaleLabelSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScaleLabelSpec")
            .field("class", &self.class)
            .field("offset", &self.offset)
            .field("formatter", &"<fn>")
            .field("skip", &self.skip)
            .field("rotation", &self.rotation)
            .field("style", &self.style)
            .finish()
    }
}

impl Default for ScaleLabelSpec {
    fn default() -> Self {
        Self {
            class: String::from("label scale-label"),
            offset: -44.0,
            formatter: Rc::new(format_number),
            skip: SkipRules::new(),
            rotation: LabelRotation::None,
            style: LabelStyle::default(),
        }
    }
}

impl ScaleLabelSpec {
    /// Creates a label spec with the default class, offset and number formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Sets the anchor radius offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the value formatter.
    pub fn with_formatter(mut self, f: impl Fn(f64) -> String + 'static) -> Self {
        self.formatter = Rc::new(f);
        self
    }

    /// Sets the label skip rules.
    pub fn with_skip(mut self, skip: impl Into<SkipRules>) -> Self {
        self.skip = skip.into();
        self
    }

    /// Sets the text rotation.
    pub fn with_rotation(mut self, rotation: LabelRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets presentation attributes.
    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        parent: NodeId,
        value: f64,
        position: Point,
        angle: f64,
    ) -> NodeId {
        let caption = (self.formatter)(value);
        let mut attributes = text_attributes(&self.class, position, &self.style);
        if let Some(degrees) = self.rotation.degrees(angle) {
            attributes.push((
                "transform",
                format!(
                    "rotate({} {},{})",
                    format_coordinate(degrees),
                    format_coordinate(position.x),
                    format_coordinate(position.y)
                ),
            ));
        }
        surface.create_element(parent, ElementKind::Text, attributes, Some(caption))
    }
}

/// A fixed caption on the gauge face ("AIR SPEED", "KNOTS", ...).
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSpec {
    /// Text content.
    pub caption: String,
    /// Anchor position in canvas units.
    pub position: Point,
    /// Element class.
    pub class: String,
    /// Presentation attributes.
    pub style: LabelStyle,
}

impl LabelSpec {
    /// Creates a caption with the default `label` class.
    pub fn new(caption: impl Into<String>, position: Point) -> Self {
        Self {
            caption: caption.into(),
            position,
            class: String::from("label"),
            style: LabelStyle::default(),
        }
    }

    /// Sets the class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Sets presentation attributes.
    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn render<S: Surface + ?Sized>(&self, surface: &mut S, parent: NodeId) -> NodeId {
        let attributes = text_attributes(&self.class, self.position, &self.style);
        surface.create_element(
            parent,
            ElementKind::Text,
            attributes,
            Some(self.caption.clone()),
        )
    }
}

fn text_attributes(class: &str, position: Point, style: &LabelStyle) -> Attributes {
    let mut attributes = Attributes::new();
    push_number(&mut attributes, "x", position.x);
    push_number(&mut attributes, "y", position.y);
    attributes.push(("class", class.into()));
    style.push_attributes(&mut attributes);
    attributes
}
