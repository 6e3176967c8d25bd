pub mod attrgraph;

pub use attrgraph::AttrGraph;

use crate::types::{AttrMap, NodeKey};

/// Name of the node attribute that assigns a node to a bipartite side.
pub const SIDE_ATTRIBUTE: &str = "bipartite";

/// Capability a graph structure has to offer so it can be plotted.
///
/// The trait is deliberately small: the pipeline only ever iterates nodes and
/// edges together with their attribute mappings. Both iterations must be
/// repeatable and stable, because the row order of the emitted glyph tables is
/// defined by them.
pub trait GraphSource {
    type NodeId: NodeKey;

    /// Iterates all nodes with their attribute mapping, in the graph's own
    /// node order.
    fn nodes<'a>(&'a self) -> Box<dyn Iterator<Item = (Self::NodeId, &'a AttrMap)> + 'a>;

    /// Iterates all edges with their attribute mapping, in the graph's own
    /// edge order. Edges are undirected endpoint pairs and are reported once.
    fn edges<'a>(&'a self)
        -> Box<dyn Iterator<Item = (Self::NodeId, Self::NodeId, &'a AttrMap)> + 'a>;

    fn node_count(&self) -> usize {
        self.nodes().count()
    }

    fn edge_count(&self) -> usize {
        self.edges().count()
    }
}
