//! Shared solver and surface doubles plus small example graphs.

use graphplot::figure::{FigureOptions, HoverSpec};
use graphplot::surface::{DisplayMode, RendererHandle, Surface};
use graphplot_core::encode::{EdgeLayer, NodeLayer};
use graphplot_core::errors::{GraphPlotError, Result};
use graphplot_core::graph::{AttrGraph, GraphSource, SIDE_ATTRIBUTE};
use graphplot_core::layout::{PositionSolver, SpringParams};
use graphplot_core::types::{Layout, NodeKey, Point};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Deterministic spring stand-in: scatters nodes with the seeded generator
/// and puts bipartite sides on the vertical lines `x = 0` and `x = 1`.
pub struct ScatterSolver;

impl<N: NodeKey> PositionSolver<N> for ScatterSolver {
    fn spring(
        &mut self,
        nodes: &[N],
        _edges: &[(N, N)],
        params: &SpringParams,
    ) -> Result<Layout<N>> {
        let mut rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(nodes
            .iter()
            .map(|n| {
                let x = rng.gen_range(-params.scale..=params.scale);
                let y = rng.gen_range(-params.scale..=params.scale);
                (n.clone(), Point { x, y })
            })
            .collect())
    }

    fn two_column(&mut self, side0: &[N], side1: &[N]) -> Result<Layout<N>> {
        Ok(side0
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), Point { x: 0.0, y: i as f64 }))
            .chain(
                side1
                    .iter()
                    .enumerate()
                    .map(|(i, n)| (n.clone(), Point { x: 1.0, y: i as f64 })),
            )
            .collect())
    }
}

/// Solver double whose numeric backend is permanently unavailable.
pub struct FailingSolver;

impl<N: NodeKey> PositionSolver<N> for FailingSolver {
    fn spring(
        &mut self,
        _nodes: &[N],
        _edges: &[(N, N)],
        _params: &SpringParams,
    ) -> Result<Layout<N>> {
        Err(GraphPlotError::solver("spring backend unavailable"))
    }

    fn two_column(&mut self, _side0: &[N], _side1: &[N]) -> Result<Layout<N>> {
        Err(GraphPlotError::solver("two-column backend unavailable"))
    }
}

/// A figure assembled by the [`RecordingSurface`].
#[derive(Clone, Debug)]
pub struct RecordedFigure {
    pub options: FigureOptions,
    pub edge_layers: Vec<EdgeLayer>,
    pub node_layers: Vec<NodeLayer>,
    pub hovers: Vec<(RendererHandle, HoverSpec)>,
}

impl RecordedFigure {
    fn renderers(&self) -> usize {
        self.edge_layers.len() + self.node_layers.len()
    }
}

/// Surface double that records every hand-off for inspection.
#[derive(Default)]
pub struct RecordingSurface {
    pub shown: Vec<(RecordedFigure, DisplayMode)>,
}

impl Surface for RecordingSurface {
    type Figure = RecordedFigure;

    fn create_figure(&mut self, options: &FigureOptions) -> Result<RecordedFigure> {
        Ok(RecordedFigure {
            options: options.clone(),
            edge_layers: Vec::new(),
            node_layers: Vec::new(),
            hovers: Vec::new(),
        })
    }

    fn multi_line(
        &mut self,
        figure: &mut RecordedFigure,
        layer: &EdgeLayer,
    ) -> Result<RendererHandle> {
        let handle = RendererHandle(figure.renderers());
        figure.edge_layers.push(layer.clone());
        Ok(handle)
    }

    fn scatter(&mut self, figure: &mut RecordedFigure, layer: &NodeLayer) -> Result<RendererHandle> {
        let handle = RendererHandle(figure.renderers());
        figure.node_layers.push(layer.clone());
        Ok(handle)
    }

    fn add_hover(
        &mut self,
        figure: &mut RecordedFigure,
        renderer: RendererHandle,
        hover: &HoverSpec,
    ) -> Result<()> {
        figure.hovers.push((renderer, hover.clone()));
        Ok(())
    }

    fn show(&mut self, figure: RecordedFigure, mode: DisplayMode) -> Result<()> {
        self.shown.push((figure, mode));
        Ok(())
    }
}

/// Surface double that rejects every glyph hand-off and counts how often a
/// finished figure reaches [`Surface::show`].
#[derive(Default)]
pub struct FailingSurface {
    pub shows: usize,
}

impl Surface for FailingSurface {
    type Figure = ();

    fn create_figure(&mut self, _options: &FigureOptions) -> Result<()> {
        Ok(())
    }

    fn multi_line(&mut self, _figure: &mut (), _layer: &EdgeLayer) -> Result<RendererHandle> {
        Err(GraphPlotError::surface("backend rejected the line glyphs"))
    }

    fn scatter(&mut self, _figure: &mut (), _layer: &NodeLayer) -> Result<RendererHandle> {
        Err(GraphPlotError::surface("backend rejected the markers"))
    }

    fn add_hover(
        &mut self,
        _figure: &mut (),
        _renderer: RendererHandle,
        _hover: &HoverSpec,
    ) -> Result<()> {
        Ok(())
    }

    fn show(&mut self, _figure: (), _mode: DisplayMode) -> Result<()> {
        self.shows += 1;
        Ok(())
    }
}

/// Triangle `1 - 2 - 3` with a path tail `3 - 4 - ... - n`, so the graph is
/// never two-colorable. Every node carries its numeric `degree` as an
/// attribute and every edge a `weight`.
pub fn tadpole_graph(n: u32) -> AttrGraph<u32> {
    assert!(n >= 3);
    let mut g = AttrGraph::new();
    let mut edges = vec![(1, 2), (2, 3), (3, 1)];
    edges.extend((3..n).map(|node| (node, node + 1)));
    for (i, (a, b)) in edges.into_iter().enumerate() {
        g.add_edge(a, b);
        g.add_edge_attribute(a, b, "weight", (i + 1) as i64);
    }
    for node in 1..=n {
        let degree = g
            .edges()
            .filter(|(a, b, _)| *a == node || *b == node)
            .count();
        g.add_node_attribute(node, "degree", degree as i64);
    }
    g
}

/// Two banks: three persons (side 0) connected to four events (side 1).
/// Every node carries its `degree`: 2 for each person, `[1, 2, 2, 1]` for
/// the events.
pub fn two_banks() -> AttrGraph<&'static str> {
    let mut g = AttrGraph::new();
    for person in ["ada", "bert", "cora"] {
        g.add_node_attribute(person, SIDE_ATTRIBUTE, 0);
        g.add_node_attribute(person, "degree", 2);
    }
    for (event, degree) in [("e1", 1), ("e2", 2), ("e3", 2), ("e4", 1)] {
        g.add_node_attribute(event, SIDE_ATTRIBUTE, 1);
        g.add_node_attribute(event, "degree", degree);
    }
    g.add_edge("ada", "e1");
    g.add_edge("ada", "e2");
    g.add_edge("bert", "e2");
    g.add_edge("bert", "e3");
    g.add_edge("cora", "e3");
    g.add_edge("cora", "e4");
    g
}
