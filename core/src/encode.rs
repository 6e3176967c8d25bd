//! Assembles glyph layers: resolves the requested colors against the
//! attribute catalogs, materializes columnar tables and bundles everything a
//! plotting surface needs to draw one render pass.

use rustc_hash::FxHashMap;
use smartstring::alias::String as SmartString;
use strum_macros::Display;

use crate::bipartite;
use crate::catalog::{self, Tooltip};
use crate::colormap::ColorMap;
use crate::coords::{EdgeSegments, NodePoint};
use crate::errors::Result;
use crate::graph::GraphSource;
use crate::table::{Column, EncodingTable};
use crate::types::{AlphaSpec, AttrMap, AttrValue, Color, ColorSpec, NodeSubset, Side};

/// Synthetic column holding the colors produced by a colormap.
pub const COLORMAP_COLUMN: &str = "_colormap";
/// Synthetic column holding attribute-driven edge opacities.
pub const EDGE_ALPHA_COLUMN: &str = "_edge_alpha";
/// Synthetic column holding attribute-driven node opacities.
pub const NODE_ALPHA_COLUMN: &str = "_node_alpha";
/// Identity column of the single node table of a non-bipartite graph.
pub const NODE_COLUMN: &str = "_node";
/// Identity column of a bipartite partition table.
pub const NAMES_COLUMN: &str = "names";
/// Source and target identity columns of the edge table.
pub const EDGE_U_COLUMN: &str = "_u";
pub const EDGE_V_COLUMN: &str = "_v";

/// Marker shape of a node partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Marker {
    Circle,
    Square,
}

/// The color binding of a glyph layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ColorKey {
    /// Colors come from the named table column.
    Column(SmartString),
    /// A single literal color token for the whole layer.
    Literal(Color),
}

/// The alpha binding of a glyph layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum AlphaKey {
    Column(SmartString),
    Literal(f64),
}

/// Options of one render pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Node color request: an attribute name or a literal color.
    pub node_color: SmartString,
    pub node_palette: SmartString,
    pub node_size: f64,
    pub node_alpha: AlphaSpec,
    /// Edge color request: an attribute name or a literal color.
    pub edge_color: SmartString,
    pub edge_palette: SmartString,
    pub edge_size: f64,
    pub edge_alpha: AlphaSpec,
    /// Caps the number of distinct colors, values below one mean "unlimited".
    pub max_colors: i64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            node_color: "firebrick".into(),
            node_palette: "Category20".into(),
            node_size: 9.0,
            node_alpha: AlphaSpec::Constant(0.7),
            edge_color: "navy".into(),
            edge_palette: "viridis".into(),
            edge_size: 1.0,
            edge_alpha: AlphaSpec::Constant(0.3),
            max_colors: -1,
        }
    }
}

/// Fully assembled edge layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeLayer {
    pub table: EncodingTable,
    pub color: ColorKey,
    pub alpha: AlphaKey,
    pub width: f64,
    /// Hover rows, present only when edge hover is enabled.
    pub tooltips: Option<Vec<Tooltip>>,
}

/// One node partition: all nodes of the graph, or one bipartite side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeLayer {
    pub side: Option<Side>,
    pub marker: Marker,
    pub table: EncodingTable,
    pub color: ColorKey,
    pub alpha: AlphaKey,
    pub size: f64,
    /// Hover rows, present only when node hover is enabled.
    pub tooltips: Option<Vec<Tooltip>>,
}

/// Everything a surface needs for one render pass. Layers are listed in draw
/// order, edges below the nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderPlan {
    pub edges: EdgeLayer,
    pub nodes: Vec<NodeLayer>,
}

/// Builds [`RenderPlan`]s for one graph.
///
/// Classification and the attribute catalogs are computed once at
/// construction time and reused by every render pass.
pub struct EncodingAssembler<'g, G: GraphSource> {
    graph: &'g G,
    bipartite_graph: bool,
    node_attributes: Vec<SmartString>,
    side_attributes: Option<(Vec<SmartString>, Vec<SmartString>)>,
    edge_attributes: Vec<SmartString>,
}

impl<'g, G: GraphSource> EncodingAssembler<'g, G> {
    pub fn new(graph: &'g G) -> Result<EncodingAssembler<'g, G>> {
        let bipartite_graph = bipartite::is_bipartite(graph);
        let side_attributes = if bipartite_graph {
            Some((
                catalog::node_attributes(graph, NodeSubset::Side(Side::Zero))?,
                catalog::node_attributes(graph, NodeSubset::Side(Side::One))?,
            ))
        } else {
            None
        };
        Ok(EncodingAssembler {
            graph,
            bipartite_graph,
            node_attributes: catalog::node_attributes(graph, NodeSubset::All)?,
            side_attributes,
            edge_attributes: catalog::edge_attributes(graph),
        })
    }

    pub fn is_bipartite(&self) -> bool {
        self.bipartite_graph
    }

    /// Catalog over all nodes.
    pub fn node_attributes(&self) -> &[SmartString] {
        &self.node_attributes
    }

    /// Catalog of one bipartite side, if the graph is bipartite.
    pub fn side_attributes(&self, side: Side) -> Option<&[SmartString]> {
        self.side_attributes.as_ref().map(|(lv0, lv1)| match side {
            Side::Zero => lv0.as_slice(),
            Side::One => lv1.as_slice(),
        })
    }

    pub fn edge_attributes(&self) -> &[SmartString] {
        &self.edge_attributes
    }

    /// Assembles the edge layer and the node layers for one render pass and
    /// checks the row consistency of every emitted table.
    pub fn render_plan(
        &self,
        segments: &EdgeSegments,
        points: &[NodePoint<G::NodeId>],
        options: &RenderOptions,
        hover_nodes: bool,
        hover_edges: bool,
    ) -> Result<RenderPlan> {
        let edges = self.edge_layer(segments, options, hover_edges)?;
        edges.table.validate()?;
        let nodes = self.node_layers(points, options, hover_nodes)?;
        for layer in &nodes {
            layer.table.validate()?;
        }
        Ok(RenderPlan { edges, nodes })
    }

    /// Builds the edge layer: coordinate spans, endpoint identities, all edge
    /// attributes and the resolved color and alpha bindings.
    pub fn edge_layer(
        &self,
        segments: &EdgeSegments,
        options: &RenderOptions,
        hover: bool,
    ) -> Result<EdgeLayer> {
        let mut table = EncodingTable::new();
        table.insert("xs", Column::Spans(segments.xs.clone()));
        table.insert("ys", Column::Spans(segments.ys.clone()));

        let (us, vs): (Vec<SmartString>, Vec<SmartString>) = self
            .graph
            .edges()
            .map(|(a, b, _)| (a.to_string().into(), b.to_string().into()))
            .unzip();
        // A graph without edges gets no endpoint columns.
        if !us.is_empty() {
            table.insert(EDGE_U_COLUMN, Column::Text(us));
            table.insert(EDGE_V_COLUMN, Column::Text(vs));
        }

        for attr in &self.edge_attributes {
            let values: Vec<AttrValue> = self
                .graph
                .edges()
                .map(|(_, _, attrs)| attrs.get(attr.as_str()).cloned().unwrap_or(AttrValue::Missing))
                .collect();
            table.insert(attr.clone(), Column::Values(values));
        }

        let color_spec = ColorSpec::resolve(options.edge_color.as_str(), &self.edge_attributes);
        let color = apply_color_spec(
            color_spec,
            options.edge_palette.as_str(),
            options.max_colors,
            &mut table,
        )?;
        let alpha = resolve_alpha(
            &options.edge_alpha,
            &self.edge_attributes,
            &mut table,
            EDGE_ALPHA_COLUMN,
            options.max_colors,
        )?;

        Ok(EdgeLayer {
            table,
            color,
            alpha,
            width: options.edge_size,
            tooltips: hover.then(|| catalog::edge_tooltips(&self.edge_attributes)),
        })
    }

    /// Builds the node layers: one layer per bipartite side, or a single
    /// layer for the whole graph. Color resolution is independent per layer.
    pub fn node_layers(
        &self,
        points: &[NodePoint<G::NodeId>],
        options: &RenderOptions,
        hover: bool,
    ) -> Result<Vec<NodeLayer>> {
        let node_attrs: FxHashMap<G::NodeId, &AttrMap> = self.graph.nodes().collect();

        if let Some((lv0, lv1)) = &self.side_attributes {
            let empty = AttrMap::default();
            let mut side0: Vec<&NodePoint<G::NodeId>> = Vec::new();
            let mut side1: Vec<&NodePoint<G::NodeId>> = Vec::new();
            for point in points {
                let attrs = node_attrs.get(&point.id).copied().unwrap_or(&empty);
                match bipartite::side_of(&point.id, attrs)? {
                    Side::Zero => side0.push(point),
                    Side::One => side1.push(point),
                }
            }
            debug!(
                "assembling bipartite node layers with {} and {} points",
                side0.len(),
                side1.len()
            );
            Ok(vec![
                self.node_layer(
                    Some(Side::Zero),
                    Marker::Circle,
                    &side0,
                    lv0,
                    &node_attrs,
                    options,
                    hover,
                )?,
                self.node_layer(
                    Some(Side::One),
                    Marker::Square,
                    &side1,
                    lv1,
                    &node_attrs,
                    options,
                    hover,
                )?,
            ])
        } else {
            let all: Vec<&NodePoint<G::NodeId>> = points.iter().collect();
            Ok(vec![self.node_layer(
                None,
                Marker::Circle,
                &all,
                &self.node_attributes,
                &node_attrs,
                options,
                hover,
            )?])
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn node_layer(
        &self,
        side: Option<Side>,
        marker: Marker,
        points: &[&NodePoint<G::NodeId>],
        attributes: &[SmartString],
        node_attrs: &FxHashMap<G::NodeId, &AttrMap>,
        options: &RenderOptions,
        hover: bool,
    ) -> Result<NodeLayer> {
        let mut table = EncodingTable::new();
        table.insert("xs", Column::Numeric(points.iter().map(|p| p.x).collect()));
        table.insert("ys", Column::Numeric(points.iter().map(|p| p.y).collect()));
        let identity = if side.is_some() {
            NAMES_COLUMN
        } else {
            NODE_COLUMN
        };
        table.insert(
            identity,
            Column::Text(points.iter().map(|p| p.id.to_string().into()).collect()),
        );

        let color_spec = ColorSpec::resolve(options.node_color.as_str(), attributes);
        let color_attr = match &color_spec {
            ColorSpec::ByAttribute(attr) => Some(attr.as_str()),
            ColorSpec::Literal(_) => None,
        };
        let alpha_attr = match &options.node_alpha {
            AlphaSpec::Attribute(attr) => Some(attr.as_str()),
            AlphaSpec::Constant(_) => None,
        };

        // Without hover the attribute columns are only needed as colormap or
        // alpha input.
        for attr in attributes {
            if hover || Some(attr.as_str()) == color_attr || Some(attr.as_str()) == alpha_attr {
                let values: Vec<AttrValue> = points
                    .iter()
                    .map(|p| {
                        node_attrs
                            .get(&p.id)
                            .and_then(|attrs| attrs.get(attr.as_str()))
                            .cloned()
                            .unwrap_or(AttrValue::Missing)
                    })
                    .collect();
                table.insert(attr.clone(), Column::Values(values));
            }
        }

        let color = apply_color_spec(
            color_spec,
            options.node_palette.as_str(),
            options.max_colors,
            &mut table,
        )?;
        let alpha = resolve_alpha(
            &options.node_alpha,
            attributes,
            &mut table,
            NODE_ALPHA_COLUMN,
            options.max_colors,
        )?;

        Ok(NodeLayer {
            side,
            marker,
            table,
            color,
            alpha,
            size: options.node_size,
            tooltips: hover.then(|| catalog::node_tooltips(attributes)),
        })
    }
}

/// Materializes the `_colormap` column for an attribute-driven color, or
/// passes the literal through. The caller resolves one [`ColorSpec`] per
/// layer.
fn apply_color_spec(
    spec: ColorSpec,
    palette: &str,
    max_colors: i64,
    table: &mut EncodingTable,
) -> Result<ColorKey> {
    match spec {
        ColorSpec::ByAttribute(attr) => {
            let colormap = ColorMap::new(palette, max_colors)?;
            let values = match table.get(attr.as_str()) {
                Some(Column::Values(values)) => values.clone(),
                _ => Vec::default(),
            };
            let colors = colormap.map(&values)?;
            table.insert(COLORMAP_COLUMN, Column::Text(colors));
            Ok(ColorKey::Column(COLORMAP_COLUMN.into()))
        }
        ColorSpec::Literal(color) => Ok(ColorKey::Literal(color)),
    }
}

fn resolve_alpha(
    spec: &AlphaSpec,
    attributes: &[SmartString],
    table: &mut EncodingTable,
    column_name: &str,
    max_colors: i64,
) -> Result<AlphaKey> {
    match spec {
        AlphaSpec::Constant(alpha) => Ok(AlphaKey::Literal(*alpha)),
        AlphaSpec::Attribute(attr) => {
            if attributes.binary_search(attr).is_ok() {
                let values = match table.get(attr.as_str()) {
                    Some(Column::Values(values)) => values.clone(),
                    _ => Vec::default(),
                };
                let alphas = ColorMap::map_alpha(&values, max_colors)?;
                table.insert(column_name, Column::Numeric(alphas));
                Ok(AlphaKey::Column(column_name.into()))
            } else {
                // Unknown names stay column references that the surface has
                // to resolve, mirroring how color fields travel unchecked.
                Ok(AlphaKey::Column(attr.clone()))
            }
        }
    }
}
