//! Attribute catalogs and the hover tooltip contract.
//!
//! A catalog is the sorted union of all attribute names found on a node
//! subset or on the edges. Catalogs decide whether a requested color is an
//! attribute reference, and they define which tooltip rows a hover shows.

use std::collections::BTreeSet;

use smartstring::alias::String as SmartString;

use crate::bipartite;
use crate::errors::Result;
use crate::graph::GraphSource;
use crate::types::NodeSubset;

/// Collects the sorted, duplicate-free attribute names of a node subset.
///
/// Selecting a bipartite side fails if any node lacks a valid side attribute.
/// [`NodeSubset::All`] never inspects sides and works on any graph.
pub fn node_attributes<G: GraphSource>(graph: &G, subset: NodeSubset) -> Result<Vec<SmartString>> {
    let mut names: BTreeSet<SmartString> = BTreeSet::new();
    for (node, attrs) in graph.nodes() {
        let keep = match subset {
            NodeSubset::All => true,
            NodeSubset::Side(side) => bipartite::side_of(&node, attrs)? == side,
        };
        if keep {
            names.extend(attrs.keys().cloned());
        }
    }
    Ok(names.into_iter().collect())
}

/// Collects the sorted, duplicate-free attribute names of all edges.
pub fn edge_attributes<G: GraphSource>(graph: &G) -> Vec<SmartString> {
    let mut names: BTreeSet<SmartString> = BTreeSet::new();
    for (_, _, attrs) in graph.edges() {
        names.extend(attrs.keys().cloned());
    }
    names.into_iter().collect()
}

/// One row of a hover tooltip.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tooltip {
    /// Label on the left side of the hover box.
    pub label: SmartString,
    /// Either a literal text or an `@column` reference the surface resolves
    /// per hovered glyph. Tooltips are metadata only, they never carry values
    /// themselves.
    pub value: SmartString,
}

impl Tooltip {
    /// A row with a fixed text value.
    pub fn literal(label: &str, value: &str) -> Tooltip {
        Tooltip {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A row referencing a table column.
    pub fn column(label: &str, column: &str) -> Tooltip {
        Tooltip {
            label: label.into(),
            value: format!("@{}", column).into(),
        }
    }
}

/// Tooltip rows for a node hover: glyph type, node identity and one row per
/// catalog attribute, in catalog order.
pub fn node_tooltips(attributes: &[SmartString]) -> Vec<Tooltip> {
    let mut rows = vec![
        Tooltip::literal("type", "node"),
        Tooltip::column("node", "_node"),
    ];
    rows.extend(attributes.iter().map(|attr| Tooltip::column(attr, attr)));
    rows
}

/// Tooltip rows for an edge hover: glyph type, both endpoints and one row per
/// catalog attribute, in catalog order.
pub fn edge_tooltips(attributes: &[SmartString]) -> Vec<Tooltip> {
    let mut rows = vec![
        Tooltip::literal("type", "edge"),
        Tooltip::column("u", "_u"),
        Tooltip::column("v", "_v"),
    ];
    rows.extend(attributes.iter().map(|attr| Tooltip::column(attr, attr)));
    rows
}
