//! The user-facing visualization façade.

use graphplot_core::coords::{self, EdgeSegments, NodePoint};
use graphplot_core::encode::{EncodingAssembler, RenderOptions, RenderPlan};
use graphplot_core::errors::Result;
use graphplot_core::graph::GraphSource;
use graphplot_core::layout::{self, LayoutOptions, PositionSolver};
use graphplot_core::types::Layout;

use crate::figure::{FigureOptions, HoverSpec};
use crate::surface::{DisplayMode, Surface};

/// Construction options of a [`GraphVisualization`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizOptions {
    pub width: u32,
    pub height: u32,
    /// Show hover boxes over nodes.
    pub hover_nodes: bool,
    /// Show hover boxes over edges.
    pub hover_edges: bool,
    pub display: DisplayMode,
}

impl Default for VizOptions {
    fn default() -> Self {
        VizOptions {
            width: 800,
            height: 600,
            hover_nodes: true,
            hover_edges: false,
            display: DisplayMode::Embedded,
        }
    }
}

/// Drives the pipeline for one graph: classification, layout, coordinates,
/// encoding and the hand-off to the plotting surface.
///
/// The graph is borrowed and must not change while the visualization exists;
/// classification and the attribute catalogs are computed once up front.
/// Layout and coordinates are cached between render passes, computing or
/// setting a new layout drops the cached coordinates. The struct is meant to
/// be driven by a single caller and is not `Sync`.
pub struct GraphVisualization<'g, G, P, S>
where
    G: GraphSource,
    P: PositionSolver<G::NodeId>,
    S: Surface,
{
    graph: &'g G,
    solver: P,
    surface: S,
    options: VizOptions,
    assembler: EncodingAssembler<'g, G>,
    layout: Option<Layout<G::NodeId>>,
    segments: Option<EdgeSegments>,
    points: Option<Vec<NodePoint<G::NodeId>>>,
}

impl<'g, G, P, S> GraphVisualization<'g, G, P, S>
where
    G: GraphSource,
    P: PositionSolver<G::NodeId>,
    S: Surface,
{
    pub fn new(graph: &'g G, solver: P, surface: S) -> Result<GraphVisualization<'g, G, P, S>> {
        GraphVisualization::with_options(graph, solver, surface, VizOptions::default())
    }

    pub fn with_options(
        graph: &'g G,
        solver: P,
        surface: S,
        options: VizOptions,
    ) -> Result<GraphVisualization<'g, G, P, S>> {
        let assembler = EncodingAssembler::new(graph)?;
        debug!(
            "visualizing a graph with {} nodes and {} edges (bipartite: {})",
            graph.node_count(),
            graph.edge_count(),
            assembler.is_bipartite()
        );
        Ok(GraphVisualization {
            graph,
            solver,
            surface,
            options,
            assembler,
            layout: None,
            segments: None,
            points: None,
        })
    }

    /// Whether the graph gets the bipartite two-column treatment.
    pub fn is_bipartite(&self) -> bool {
        self.assembler.is_bipartite()
    }

    /// Computes node positions with the configured solver. Any previous
    /// layout and the coordinates derived from it are dropped.
    pub fn layout(&mut self, options: &LayoutOptions) -> Result<()> {
        let computed =
            layout::compute_layout(self.graph, self.assembler.is_bipartite(), options, &mut self.solver)?;
        self.set_layout(computed);
        Ok(())
    }

    /// Uses caller-provided positions instead of computing them.
    pub fn set_layout(&mut self, layout: Layout<G::NodeId>) {
        debug!("layout with {} positions installed", layout.len());
        self.layout = Some(layout);
        self.segments = None;
        self.points = None;
    }

    pub fn current_layout(&self) -> Option<&Layout<G::NodeId>> {
        self.layout.as_ref()
    }

    /// Renders one pass into a new figure without displaying it. A layout is
    /// computed with default options if none exists yet.
    pub fn render(&mut self, options: &RenderOptions) -> Result<S::Figure> {
        let plan = self.plan(options)?;
        let figure_options = FigureOptions {
            width: self.options.width,
            height: self.options.height,
            ..FigureOptions::default()
        };
        let mut figure = self.surface.create_figure(&figure_options)?;

        // Edges are drawn first so the node markers end up on top.
        let edge_renderer = self.surface.multi_line(&mut figure, &plan.edges)?;
        if let Some(tooltips) = &plan.edges.tooltips {
            self.surface
                .add_hover(&mut figure, edge_renderer, &HoverSpec::lines(tooltips.clone()))?;
        }
        for layer in &plan.nodes {
            let renderer = self.surface.scatter(&mut figure, layer)?;
            if let Some(tooltips) = &layer.tooltips {
                self.surface
                    .add_hover(&mut figure, renderer, &HoverSpec::points(tooltips.clone()))?;
            }
        }
        Ok(figure)
    }

    /// Renders and displays the figure with default render options.
    pub fn draw(&mut self) -> Result<()> {
        self.draw_with(&RenderOptions::default())
    }

    /// Renders and displays the figure. A failed render pass hands nothing to
    /// the surface.
    pub fn draw_with(&mut self, options: &RenderOptions) -> Result<()> {
        let figure = self.render(options)?;
        self.surface.show(figure, self.options.display)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Releases the surface, e.g. to inspect recorded output in tests.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn plan(&mut self, options: &RenderOptions) -> Result<RenderPlan> {
        self.ensure_coordinates()?;
        let segments = self.segments.get_or_insert_with(EdgeSegments::default);
        let points = self.points.get_or_insert_with(Vec::new);
        self.assembler.render_plan(
            segments,
            points,
            options,
            self.options.hover_nodes,
            self.options.hover_edges,
        )
    }

    fn ensure_coordinates(&mut self) -> Result<()> {
        if self.layout.is_none() {
            self.layout(&LayoutOptions::default())?;
        }
        let layout = self.layout.get_or_insert_with(Layout::new);
        if self.segments.is_none() {
            self.segments = Some(coords::edge_segments(self.graph, layout)?);
        }
        if self.points.is_none() {
            self.points = Some(coords::node_points(layout));
        }
        Ok(())
    }
}
