// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::{FlowValue, Step};

pub const NODE_PAD: u32 = 20;
pub const NODE_THICKNESS: u32 = 20;
pub const FIGURE_TITLE: &str = "Process Flow";
pub const FIGURE_FONT_SIZE: u32 = 12;
pub const FIGURE_HEIGHT: u32 = 500;

/// Renderer-facing description of a linear Sankey diagram.
///
/// Links are stored as three parallel sequences (`source`, `target`, `value`), the shape the
/// charting layer consumes. For a graph with `n` nodes each sequence has `n - 1` entries and
/// `target[i] == source[i] + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SankeyGraph {
    nodes: SankeyNodes,
    links: SankeyLinks,
    layout: FigureLayout,
}

impl SankeyGraph {
    pub(crate) fn new(nodes: SankeyNodes, links: SankeyLinks) -> Self {
        Self { nodes, links, layout: FigureLayout::default() }
    }

    pub fn nodes(&self) -> &SankeyNodes {
        &self.nodes
    }

    pub fn links(&self) -> &SankeyLinks {
        &self.links
    }

    pub fn layout(&self) -> &FigureLayout {
        &self.layout
    }

    pub fn node_count(&self) -> usize {
        self.nodes.labels.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.value.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyNodes {
    labels: Vec<Step>,
    pad: u32,
    thickness: u32,
}

impl SankeyNodes {
    pub(crate) fn new(labels: Vec<Step>) -> Self {
        Self { labels, pad: NODE_PAD, thickness: NODE_THICKNESS }
    }

    pub fn labels(&self) -> &[Step] {
        &self.labels
    }

    pub fn pad(&self) -> u32 {
        self.pad
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SankeyLinks {
    source: Vec<usize>,
    target: Vec<usize>,
    value: Vec<FlowValue>,
}

impl SankeyLinks {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            source: Vec::with_capacity(capacity),
            target: Vec::with_capacity(capacity),
            value: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, source: usize, target: usize, value: FlowValue) {
        self.source.push(source);
        self.target.push(target);
        self.value.push(value);
    }

    pub fn source(&self) -> &[usize] {
        &self.source
    }

    pub fn target(&self) -> &[usize] {
        &self.target
    }

    pub fn value(&self) -> &[FlowValue] {
        &self.value
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, FlowValue)> + '_ {
        self.source
            .iter()
            .zip(&self.target)
            .zip(&self.value)
            .map(|((source, target), value)| (*source, *target, *value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureLayout {
    pub title: &'static str,
    pub font_size: u32,
    pub height: u32,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self { title: FIGURE_TITLE, font_size: FIGURE_FONT_SIZE, height: FIGURE_HEIGHT }
    }
}

/// Stable reference to a node or link inside a [`SankeyGraph`], by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphRef {
    Node(usize),
    Link(usize),
}

impl fmt::Display for GraphRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(index) => write!(f, "node:{index}"),
            Self::Link(index) => write!(f, "link:{index}"),
        }
    }
}
