//! Layout stage: chooses between the bipartite two-column arrangement and a
//! force-directed run, and hands the numeric work to a caller-provided
//! solver.

use crate::bipartite;
use crate::errors::Result;
use crate::graph::GraphSource;
use crate::types::{Layout, NodeKey};

/// Parameters of one force-directed (spring) layout run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Optimal distance between nodes, derived from the node count and the
    /// shrink factor.
    pub optimal_distance: f64,
    pub iterations: u32,
    /// Extent of the coordinate range the result is scaled to.
    pub scale: f64,
    /// Seed for the randomized start positions. `None` lets the solver use
    /// its own entropy.
    pub seed: Option<u64>,
}

/// External collaborator that computes node positions.
///
/// Implementations must place every node they are given and, when a seed is
/// provided, must be deterministic for that seed. Failures of the underlying
/// engine are wrapped with [`crate::errors::GraphPlotError::solver`].
pub trait PositionSolver<N: NodeKey> {
    /// Force-directed layout of the given nodes and edges.
    fn spring(&mut self, nodes: &[N], edges: &[(N, N)], params: &SpringParams)
        -> Result<Layout<N>>;

    /// Places side 0 in one vertical column and side 1 in another.
    fn two_column(&mut self, side0: &[N], side1: &[N]) -> Result<Layout<N>>;
}

/// Knobs of the layout stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Scales the optimal node distance. Values below 1 move nodes apart.
    pub shrink_factor: f64,
    pub iterations: u32,
    pub scale: f64,
    pub seed: Option<u64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            shrink_factor: 0.8,
            iterations: 50,
            scale: 1.0,
            seed: None,
        }
    }
}

/// The optimal node distance `1 / sqrt(node_count * shrink_factor)` handed to
/// the spring solver.
pub fn optimal_distance(node_count: usize, shrink_factor: f64) -> f64 {
    1.0 / ((node_count as f64).max(1.0) * shrink_factor).sqrt()
}

/// Computes positions for the whole graph.
///
/// An empty graph short-circuits to an empty layout without consulting the
/// solver. With `bipartite_graph` set, nodes are placed in two columns
/// according to their side attribute, everything else goes through the spring
/// path.
pub fn compute_layout<G, S>(
    graph: &G,
    bipartite_graph: bool,
    options: &LayoutOptions,
    solver: &mut S,
) -> Result<Layout<G::NodeId>>
where
    G: GraphSource,
    S: PositionSolver<G::NodeId> + ?Sized,
{
    let node_count = graph.node_count();
    if node_count == 0 {
        debug!("empty graph, layout stage produces no positions");
        return Ok(Layout::new());
    }
    if bipartite_graph {
        let (side0, side1) = bipartite::partition(graph)?;
        debug!(
            "two-column layout with {} and {} nodes",
            side0.len(),
            side1.len()
        );
        solver.two_column(&side0, &side1)
    } else {
        let nodes: Vec<G::NodeId> = graph.nodes().map(|(n, _)| n).collect();
        let edges: Vec<(G::NodeId, G::NodeId)> = graph.edges().map(|(a, b, _)| (a, b)).collect();
        let params = SpringParams {
            optimal_distance: optimal_distance(node_count, options.shrink_factor),
            iterations: options.iterations,
            scale: options.scale,
            seed: options.seed,
        };
        debug!(
            "spring layout with {} nodes and optimal distance {}",
            nodes.len(),
            params.optimal_distance
        );
        solver.spring(&nodes, &edges, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AttrGraph, SIDE_ATTRIBUTE};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct StubSolver {
        spring_params: Option<SpringParams>,
        spring_calls: usize,
        two_column_calls: usize,
    }

    impl PositionSolver<u32> for StubSolver {
        fn spring(
            &mut self,
            nodes: &[u32],
            _edges: &[(u32, u32)],
            params: &SpringParams,
        ) -> Result<Layout<u32>> {
            self.spring_calls += 1;
            self.spring_params = Some(*params);
            Ok(nodes
                .iter()
                .enumerate()
                .map(|(i, n)| (*n, (i as f64, 0.0).into()))
                .collect())
        }

        fn two_column(&mut self, side0: &[u32], side1: &[u32]) -> Result<Layout<u32>> {
            self.two_column_calls += 1;
            Ok(side0
                .iter()
                .enumerate()
                .map(|(i, n)| (*n, (0.0, i as f64).into()))
                .chain(
                    side1
                        .iter()
                        .enumerate()
                        .map(|(i, n)| (*n, (1.0, i as f64).into())),
                )
                .collect())
        }
    }

    #[test]
    fn empty_graph_skips_the_solver() {
        let g: AttrGraph<u32> = AttrGraph::new();
        let mut solver = StubSolver::default();
        let layout = compute_layout(&g, false, &LayoutOptions::default(), &mut solver).unwrap();
        assert!(layout.is_empty());
        assert_eq!(0, solver.spring_calls);
        assert_eq!(0, solver.two_column_calls);
    }

    #[test]
    fn spring_path_passes_derived_parameters() {
        let mut g: AttrGraph<u32> = AttrGraph::new();
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 1);
        g.add_node(4);

        let mut solver = StubSolver::default();
        let options = LayoutOptions {
            seed: Some(42),
            ..LayoutOptions::default()
        };
        let layout = compute_layout(&g, false, &options, &mut solver).unwrap();

        assert_eq!(4, layout.len());
        assert_eq!(1, solver.spring_calls);
        let params = solver.spring_params.unwrap();
        assert_eq!(optimal_distance(4, 0.8), params.optimal_distance);
        assert_eq!(50, params.iterations);
        assert_eq!(1.0, params.scale);
        assert_eq!(Some(42), params.seed);
    }

    #[test]
    fn bipartite_flag_selects_two_columns() {
        let mut g: AttrGraph<u32> = AttrGraph::new();
        g.add_node_attribute(1, SIDE_ATTRIBUTE, 0);
        g.add_node_attribute(2, SIDE_ATTRIBUTE, 1);
        g.add_node_attribute(3, SIDE_ATTRIBUTE, 1);
        g.add_edge(1, 2);
        g.add_edge(1, 3);

        let mut solver = StubSolver::default();
        let layout = compute_layout(&g, true, &LayoutOptions::default(), &mut solver).unwrap();

        assert_eq!(1, solver.two_column_calls);
        assert_eq!(0, solver.spring_calls);
        assert_eq!(Some(0.0), layout.get(&1).map(|p| p.x));
        assert_eq!(Some(1.0), layout.get(&2).map(|p| p.x));
        assert_eq!(Some(1.0), layout.get(&3).map(|p| p.x));
    }

    #[test]
    fn optimal_distance_formula() {
        let k = optimal_distance(100, 0.8);
        assert!((k - 1.0 / 80.0_f64.sqrt()).abs() < 1e-12);
        // Smaller shrink factors increase the distance.
        assert!(optimal_distance(100, 0.4) > k);
    }
}
