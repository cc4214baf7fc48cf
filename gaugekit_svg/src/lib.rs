// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory SVG document for `gaugekit` instruments.
//!
//! [`SvgDocument`] implements [`gaugekit::Surface`] as a flat node arena. Instruments build into it
//! and keep updating transforms through their registers; [`SvgDocument::to_svg_string`] dumps the
//! current state at any time.
//!
//! ```
//! use gaugekit::presets;
//! use gaugekit_svg::SvgDocument;
//!
//! let airspeed = presets::airspeed().build(SvgDocument::new()).unwrap();
//! airspeed.set("setAirspeed", 80.0).unwrap();
//! let svg = airspeed.surface().unwrap().to_svg_string();
//! assert!(svg.contains("rotate(250 200 200)"));
//! ```

use std::fmt::Write as _;

use gaugekit::{Attributes, ElementKind, NodeId, Surface};

/// Styles for the classes the engine and the presets emit.
pub const DEFAULT_STYLESHEET: &str = "\
.instrument-box { fill: #222; }
.instrument-face { fill: #111; }
.instrument-bezel { fill: #333; stroke: #000; }
.scale, .heading-lines, .attitude-marking-scale { stroke: #fff; stroke-width: 2; fill: none; }
.scale-level-0 { stroke-width: 3; }
.scale-level-2 { stroke-width: 1.5; }
.label { fill: #fff; font-family: sans-serif; font-size: 16px; text-anchor: middle; dominant-baseline: middle; }
.label.large { font-size: 24px; }
.label.small { font-size: 11px; }
.label.tiny { font-size: 9px; }
.label.left { text-anchor: start; }
.scale-label { font-size: 24px; }
.pressure-scale-label { font-size: 10px; }
.hidden { fill: none; stroke: none; }
.needle, .scale-glyph { fill: #eee; stroke: #000; }
.pressure-dial-face { fill: #111; }
.heading-aircraft, .heading-arrows-cardinal { fill: #f90; }
.heading-beacon-one-marker, .heading-beacon-two-marker { fill: #0c0; stroke: #0c0; }
.attitude-roll-indicator { fill: #3a7bd5; }
.attitude-marking-wings { stroke: #f90; stroke-width: 6; fill: #f90; }
.round { stroke-linecap: round; }
";

#[derive(Clone, Debug)]
struct SvgNode {
    kind: ElementKind,
    children: Vec<NodeId>,
    attributes: Attributes,
    text: Option<String>,
}

/// An SVG element tree held in memory.
///
/// Node 0 is the `<svg>` root. Instruments set its `viewBox`, size and class when they build.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    nodes: Vec<SvgNode>,
    stylesheet: Option<String>,
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgDocument {
    /// Creates an empty document carrying [`DEFAULT_STYLESHEET`].
    pub fn new() -> Self {
        Self {
            nodes: vec![SvgNode {
                kind: ElementKind::Group,
                children: Vec::new(),
                attributes: Attributes::new(),
                text: None,
            }],
            stylesheet: Some(DEFAULT_STYLESHEET.to_owned()),
        }
    }

    /// Replaces the embedded stylesheet; `None` omits the `<style>` element.
    pub fn with_stylesheet(mut self, css: Option<String>) -> Self {
        self.stylesheet = css;
        self
    }

    /// Number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Kind of `node`, or `None` for an unknown id.
    pub fn kind(&self, node: NodeId) -> Option<ElementKind> {
        self.get(node).map(|n| n.kind)
    }

    /// Current value of an attribute.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)?
            .attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text content of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node)?.text.as_deref()
    }

    /// Children of `node` in paint order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Nodes whose `class` attribute contains every whitespace-separated token of `class`,
    /// in creation order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(node_id)
            .filter(|&id| {
                self.attribute(id, "class").is_some_and(|have| {
                    class
                        .split_whitespace()
                        .all(|token| have.split_whitespace().any(|t| t == token))
                })
            })
            .collect()
    }

    /// Serializes the document.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        write_attributes(&mut out, &self.nodes[0].attributes);
        out.push_str(">\n");
        if let Some(css) = &self.stylesheet {
            out.push_str("<style>\n");
            out.push_str(&escape_xml(css));
            out.push_str("</style>\n");
        }
        for &child in &self.nodes[0].children {
            self.write_node(&mut out, child, 1);
        }
        out.push_str("</svg>\n");
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let Some(node) = self.get(id) else {
            return;
        };
        let tag = node.kind.tag();
        indent(out, depth);
        out.push('<');
        out.push_str(tag);
        write_attributes(out, &node.attributes);
        if let Some(text) = &node.text {
            out.push('>');
            out.push_str(&escape_xml(text));
            let _ = writeln!(out, "</{tag}>");
        } else if node.children.is_empty() {
            out.push_str("/>\n");
        } else {
            out.push_str(">\n");
            for &child in &node.children {
                self.write_node(out, child, depth + 1);
            }
            indent(out, depth);
            let _ = writeln!(out, "</{tag}>");
        }
    }

    fn get(&self, node: NodeId) -> Option<&SvgNode> {
        self.nodes.get(node.0 as usize)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut SvgNode> {
        self.nodes.get_mut(node.0 as usize)
    }
}

impl Surface for SvgDocument {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn create_element(
        &mut self,
        parent: NodeId,
        kind: ElementKind,
        attributes: Attributes,
        text: Option<String>,
    ) -> NodeId {
        let id = node_id(self.nodes.len());
        let Some(parent_node) = self.get_mut(parent) else {
            log::warn!("create_element: unknown parent {parent:?}, attaching to root");
            return self.create_element(NodeId(0), kind, attributes, text);
        };
        parent_node.children.push(id);
        self.nodes.push(SvgNode {
            kind,
            children: Vec::new(),
            attributes,
            text,
        });
        id
    }

    fn set_attribute(&mut self, node: NodeId, name: &'static str, value: String) {
        let Some(node) = self.get_mut(node) else {
            log::warn!("set_attribute: unknown node {node:?}");
            return;
        };
        match node.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => node.attributes.push((name, value)),
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &'static str) {
        if let Some(node) = self.get_mut(node) {
            node.attributes.retain(|(n, _)| *n != name);
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "instrument documents stay far below u32::MAX nodes"
)]
fn node_id(index: usize) -> NodeId {
    NodeId(index as u32)
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_attributes(out: &mut String, attributes: &Attributes) {
    for (name, value) in attributes {
        let _ = write!(out, r#" {name}="{}""#, escape_xml(value));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements_serialize_in_paint_order() {
        let mut doc = SvgDocument::new().with_stylesheet(None);
        let root = doc.root();
        doc.set_attribute(root, "viewBox", "0 0 400 400".into());
        let g = doc.create_group(root, Some("gauge"));
        let mut attrs = Attributes::new();
        attrs.push(("class", "label".into()));
        doc.create_element(g, ElementKind::Text, attrs, Some("A & B".into()));
        doc.create_element(g, ElementKind::Circle, Attributes::new(), None);

        let svg = doc.to_svg_string();
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 400 400\">\n  \
             <g class=\"gauge\">\n    <text class=\"label\">A &amp; B</text>\n    \
             <circle/>\n  </g>\n</svg>\n"
        );
    }

    #[test]
    fn attributes_are_replaced_and_removed() {
        let mut doc = SvgDocument::new();
        let g = doc.create_group(doc.root(), None);
        doc.set_attribute(g, "transform", "rotate(1 0 0)".into());
        doc.set_attribute(g, "transform", "rotate(2 0 0)".into());
        assert_eq!(doc.attribute(g, "transform"), Some("rotate(2 0 0)"));
        doc.remove_attribute(g, "transform");
        assert_eq!(doc.attribute(g, "transform"), None);
    }

    #[test]
    fn class_lookup_matches_tokens() {
        let mut doc = SvgDocument::new();
        let root = doc.root();
        let a = doc.create_group(root, Some("scale scale-level-0"));
        let b = doc.create_group(root, Some("scale scale-level-1"));
        assert_eq!(doc.find_by_class("scale"), vec![a, b]);
        assert_eq!(doc.find_by_class("scale-level-1"), vec![b]);
        assert!(doc.find_by_class("scale-level").is_empty());
    }

    #[test]
    fn unknown_nodes_are_ignored() {
        let mut doc = SvgDocument::new();
        doc.set_attribute(NodeId(42), "class", "x".into());
        assert_eq!(doc.attribute(NodeId(42), "class"), None);
        let orphan = doc.create_group(NodeId(42), None);
        assert_eq!(doc.children(doc.root()), &[orphan]);
    }
}
