use rustc_hash::FxHashMap;
use smartstring::alias::String as SmartString;

use super::GraphSource;
use crate::types::{AttrMap, AttrValue, NodeKey};

/// In-memory graph with attribute mappings on nodes and undirected edges.
///
/// This is the default [`GraphSource`] for callers that do not already hold
/// their data in an external graph structure. Nodes and edges keep their
/// insertion order. Adding an edge also adds missing endpoints, and adding an
/// already known node or edge again keeps the existing attributes.
#[derive(Clone, Debug, Default)]
pub struct AttrGraph<N: NodeKey> {
    nodes: Vec<(N, AttrMap)>,
    node_index: FxHashMap<N, usize>,
    edges: Vec<(N, N, AttrMap)>,
    edge_index: FxHashMap<(N, N), usize>,
}

impl<N: NodeKey> AttrGraph<N> {
    pub fn new() -> AttrGraph<N> {
        AttrGraph {
            nodes: Vec::default(),
            node_index: FxHashMap::default(),
            edges: Vec::default(),
            edge_index: FxHashMap::default(),
        }
    }

    /// Adds a node without attributes. Returns `true` if the node was new.
    pub fn add_node(&mut self, node: N) -> bool {
        let known = self.node_index.contains_key(&node);
        if !known {
            self.ensure_node(node);
        }
        !known
    }

    /// Sets a single attribute on a node, adding the node if necessary.
    pub fn add_node_attribute<K, V>(&mut self, node: N, name: K, value: V)
    where
        K: Into<SmartString>,
        V: Into<AttrValue>,
    {
        let idx = self.ensure_node(node);
        self.nodes[idx].1.insert(name.into(), value.into());
    }

    /// Adds an undirected edge, adding missing endpoints as well. Returns
    /// `true` if the edge was new.
    pub fn add_edge(&mut self, a: N, b: N) -> bool {
        let key = Self::edge_key(&a, &b);
        let known = self.edge_index.contains_key(&key);
        if !known {
            self.ensure_edge(a, b);
        }
        !known
    }

    /// Sets a single attribute on an edge, adding the edge (and its endpoints)
    /// if necessary.
    pub fn add_edge_attribute<K, V>(&mut self, a: N, b: N, name: K, value: V)
    where
        K: Into<SmartString>,
        V: Into<AttrValue>,
    {
        let idx = self.ensure_edge(a, b);
        self.edges[idx].2.insert(name.into(), value.into());
    }

    pub fn node_attributes(&self, node: &N) -> Option<&AttrMap> {
        self.node_index.get(node).map(|idx| &self.nodes[*idx].1)
    }

    /// Attributes of the edge between `a` and `b`, regardless of the endpoint
    /// order the edge was added with.
    pub fn edge_attributes(&self, a: &N, b: &N) -> Option<&AttrMap> {
        let key = Self::edge_key(a, b);
        self.edge_index.get(&key).map(|idx| &self.edges[*idx].2)
    }

    fn ensure_node(&mut self, node: N) -> usize {
        if let Some(idx) = self.node_index.get(&node) {
            *idx
        } else {
            let idx = self.nodes.len();
            self.node_index.insert(node.clone(), idx);
            self.nodes.push((node, AttrMap::default()));
            idx
        }
    }

    fn ensure_edge(&mut self, a: N, b: N) -> usize {
        let key = Self::edge_key(&a, &b);
        if let Some(idx) = self.edge_index.get(&key) {
            *idx
        } else {
            self.ensure_node(a.clone());
            self.ensure_node(b.clone());
            let idx = self.edges.len();
            self.edge_index.insert(key, idx);
            self.edges.push((a, b, AttrMap::default()));
            idx
        }
    }

    // Canonical lookup key so (a, b) and (b, a) address the same edge.
    fn edge_key(a: &N, b: &N) -> (N, N) {
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }
}

impl<N: NodeKey> GraphSource for AttrGraph<N> {
    type NodeId = N;

    fn nodes<'a>(&'a self) -> Box<dyn Iterator<Item = (N, &'a AttrMap)> + 'a> {
        Box::new(self.nodes.iter().map(|(n, attrs)| (n.clone(), attrs)))
    }

    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item = (N, N, &'a AttrMap)> + 'a> {
        Box::new(
            self.edges
                .iter()
                .map(|(a, b, attrs)| (a.clone(), b.clone(), attrs)),
        )
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
