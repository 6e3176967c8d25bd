//! Bipartite classification and the node side attribute.
//!
//! A graph is treated as bipartite if it has at least one edge and its nodes
//! can be two-colored. The actual side a node is drawn on is not taken from
//! the coloring but from the [`SIDE_ATTRIBUTE`] value each node has to carry,
//! so callers stay in control of which side is which.

use rustc_hash::FxHashMap;

use crate::errors::{GraphPlotError, Result};
use crate::graph::{GraphSource, SIDE_ATTRIBUTE};
use crate::types::{AttrMap, AttrValue, NodeKey, Side};

/// Checks whether the graph should get the two-column bipartite rendering.
///
/// Graphs without edges are never classified as bipartite, they fall through
/// to the force-directed layout path.
pub fn is_bipartite<G: GraphSource>(graph: &G) -> bool {
    let mut adjacency: FxHashMap<G::NodeId, Vec<G::NodeId>> = FxHashMap::default();
    let mut has_edges = false;
    for (a, b, _) in graph.edges() {
        has_edges = true;
        adjacency.entry(a.clone()).or_default().push(b.clone());
        adjacency.entry(b).or_default().push(a);
    }
    if !has_edges {
        return false;
    }

    // Iterative two-coloring over all components.
    let mut colors: FxHashMap<G::NodeId, bool> = FxHashMap::default();
    for (start, _) in graph.nodes() {
        if colors.contains_key(&start) {
            continue;
        }
        colors.insert(start.clone(), false);
        let mut pending = vec![start];
        while let Some(node) = pending.pop() {
            let node_color = if let Some(c) = colors.get(&node) {
                *c
            } else {
                continue;
            };
            if let Some(neighbors) = adjacency.get(&node) {
                for neighbor in neighbors {
                    match colors.get(neighbor) {
                        Some(c) if *c == node_color => {
                            trace!("two-coloring failed at node {}", neighbor);
                            return false;
                        }
                        Some(_) => {}
                        None => {
                            colors.insert(neighbor.clone(), !node_color);
                            pending.push(neighbor.clone());
                        }
                    }
                }
            }
        }
    }
    true
}

/// Reads the side of a node from its attribute mapping.
pub fn side_of<N: NodeKey>(node: &N, attrs: &AttrMap) -> Result<Side> {
    match attrs.get(SIDE_ATTRIBUTE) {
        None | Some(AttrValue::Missing) => Err(GraphPlotError::MissingBipartiteAttribute(
            node.to_string(),
        )),
        Some(AttrValue::Num(v)) if *v == 0.0 => Ok(Side::Zero),
        Some(AttrValue::Num(v)) if *v == 1.0 => Ok(Side::One),
        Some(other) => Err(GraphPlotError::InvalidBipartiteSide {
            node: node.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Splits all nodes by their side attribute. Node order is kept within each
/// side.
pub fn partition<G: GraphSource>(graph: &G) -> Result<(Vec<G::NodeId>, Vec<G::NodeId>)> {
    let mut side0 = Vec::new();
    let mut side1 = Vec::new();
    for (node, attrs) in graph.nodes() {
        match side_of(&node, attrs)? {
            Side::Zero => side0.push(node),
            Side::One => side1.push(node),
        }
    }
    Ok((side0, side1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AttrGraph;
    use pretty_assertions::assert_eq;

    fn two_sided() -> AttrGraph<u32> {
        let mut g = AttrGraph::new();
        for n in [1, 2] {
            g.add_node_attribute(n, SIDE_ATTRIBUTE, 0);
        }
        for n in [3, 4, 5] {
            g.add_node_attribute(n, SIDE_ATTRIBUTE, 1);
        }
        g.add_edge(1, 3);
        g.add_edge(1, 4);
        g.add_edge(2, 5);
        g
    }

    #[test]
    fn triangle_is_not_bipartite() {
        let mut g: AttrGraph<u32> = AttrGraph::new();
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 1);
        assert!(!is_bipartite(&g));
    }

    #[test]
    fn even_cycle_is_bipartite() {
        let mut g: AttrGraph<u32> = AttrGraph::new();
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 4);
        g.add_edge(4, 1);
        assert!(is_bipartite(&g));
    }

    #[test]
    fn graph_without_edges_is_not_bipartite() {
        let mut g: AttrGraph<u32> = AttrGraph::new();
        g.add_node(1);
        g.add_node(2);
        assert!(!is_bipartite(&g));
    }

    #[test]
    fn odd_cycle_in_second_component_is_found() {
        let mut g: AttrGraph<u32> = AttrGraph::new();
        g.add_edge(1, 2);
        // Disconnected triangle.
        g.add_edge(10, 11);
        g.add_edge(11, 12);
        g.add_edge(12, 10);
        assert!(!is_bipartite(&g));
    }

    #[test]
    fn self_loop_is_not_bipartite() {
        let mut g: AttrGraph<u32> = AttrGraph::new();
        g.add_edge(1, 1);
        assert!(!is_bipartite(&g));
    }

    #[test]
    fn side_requires_attribute() {
        let attrs = AttrMap::default();
        assert!(matches!(
            side_of(&7, &attrs),
            Err(GraphPlotError::MissingBipartiteAttribute(n)) if n == "7"
        ));
    }

    #[test]
    fn side_rejects_values_outside_zero_and_one() {
        let mut attrs = AttrMap::default();
        attrs.insert(SIDE_ATTRIBUTE.into(), AttrValue::from(2));
        assert!(matches!(
            side_of(&7, &attrs),
            Err(GraphPlotError::InvalidBipartiteSide { value, .. }) if value == "2"
        ));

        attrs.insert(SIDE_ATTRIBUTE.into(), AttrValue::from("left"));
        assert!(side_of(&7, &attrs).is_err());
    }

    #[test]
    fn partition_keeps_node_order() {
        let g = two_sided();
        let (side0, side1) = partition(&g).unwrap();
        assert_eq!(vec![1, 2], side0);
        assert_eq!(vec![3, 4, 5], side1);
    }
}
