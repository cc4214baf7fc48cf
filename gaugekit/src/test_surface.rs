// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Surface`] for unit tests.

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::surface::{Attributes, ElementKind, NodeId, Surface};

#[derive(Debug)]
pub(crate) struct RecordedNode {
    pub(crate) kind: ElementKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) attributes: Attributes,
    pub(crate) text: Option<String>,
}

impl RecordedNode {
    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn class(&self) -> Option<&str> {
        self.attribute("class")
    }
}

/// Records every node in creation order; node 0 is the root.
#[derive(Debug)]
pub(crate) struct Recorder {
    pub(crate) nodes: Vec<RecordedNode>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            nodes: vec![RecordedNode {
                kind: ElementKind::Group,
                parent: None,
                attributes: Attributes::new(),
                text: None,
            }],
        }
    }
}

impl Recorder {
    pub(crate) fn node(&self, id: NodeId) -> &RecordedNode {
        &self.nodes[id.0 as usize]
    }

    pub(crate) fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attribute(name)
    }

    pub(crate) fn children(
        &self,
        id: NodeId,
    ) -> impl Iterator<Item = (NodeId, &RecordedNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.parent == Some(id))
            .map(|(i, n)| (NodeId(u32::try_from(i).unwrap_or(u32::MAX)), n))
    }

    pub(crate) fn count_class(&self, class: &str) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.class() == Some(class))
            .count()
    }
}

impl Surface for Recorder {
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
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(RecordedNode {
            kind,
            parent: Some(parent),
            attributes,
            text,
        });
        id
    }

    fn set_attribute(&mut self, node: NodeId, name: &'static str, value: String) {
        let attributes = &mut self.nodes[node.0 as usize].attributes;
        match attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => attributes.push((name, value)),
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &'static str) {
        self.nodes[node.0 as usize]
            .attributes
            .retain(|(n, _)| *n != name);
    }
}
