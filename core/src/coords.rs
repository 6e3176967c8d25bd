//! Turns a layout into drawable coordinate sequences.

use crate::errors::{GraphPlotError, Result};
use crate::graph::GraphSource;
use crate::types::{Layout, NodeKey};

/// Per-edge coordinate spans: one `[from, to]` pair per edge, in edge order.
/// The two vectors always have the same length.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EdgeSegments {
    pub xs: Vec<[f64; 2]>,
    pub ys: Vec<[f64; 2]>,
}

impl EdgeSegments {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// A laid-out node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePoint<N> {
    pub id: N,
    pub x: f64,
    pub y: f64,
}

/// Collects the coordinate spans of every edge.
///
/// Fails with [`GraphPlotError::LayoutMissingNode`] if an edge references a
/// node the layout does not place.
pub fn edge_segments<G: GraphSource>(
    graph: &G,
    layout: &Layout<G::NodeId>,
) -> Result<EdgeSegments> {
    let mut segments = EdgeSegments::default();
    for (a, b, _) in graph.edges() {
        let from = layout
            .get(&a)
            .ok_or_else(|| GraphPlotError::LayoutMissingNode(a.to_string()))?;
        let to = layout
            .get(&b)
            .ok_or_else(|| GraphPlotError::LayoutMissingNode(b.to_string()))?;
        segments.xs.push([from.x, to.x]);
        segments.ys.push([from.y, to.y]);
    }
    Ok(segments)
}

/// Lists every laid-out node with its position, in layout order. Node tables
/// of a render pass use exactly this order.
pub fn node_points<N: NodeKey>(layout: &Layout<N>) -> Vec<NodePoint<N>> {
    layout
        .iter()
        .map(|(n, p)| NodePoint {
            id: n.clone(),
            x: p.x,
            y: p.y,
        })
        .collect()
}
