use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GraphPlotError {
    #[error("unknown palette '{0}'")]
    UnsupportedPalette(String),
    #[error("cannot derive a color ramp from an empty value sequence")]
    EmptyDomain,
    #[error("node '{0}' has no 'bipartite' attribute, but the graph is drawn as bipartite")]
    MissingBipartiteAttribute(String),
    #[error("node '{node}' has bipartite side '{value}', expected the numbers 0 or 1")]
    InvalidBipartiteSide { node: String, value: String },
    #[error("node '{0}' is referenced by an edge but has no position in the layout")]
    LayoutMissingNode(String),
    #[error("column '{column}' has {actual} rows, but the table already contains {expected}")]
    InconsistentRowLength {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("layout stage failed: {0}")]
    Solver(Box<dyn std::error::Error + Send + Sync>),
    #[error("plotting surface failed: {0}")]
    Surface(Box<dyn std::error::Error + Send + Sync>),
}

impl GraphPlotError {
    /// Wraps an error raised by an external position solver.
    pub fn solver<E>(error: E) -> GraphPlotError
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        GraphPlotError::Solver(error.into())
    }

    /// Wraps an error raised by an external plotting surface.
    pub fn surface<E>(error: E) -> GraphPlotError
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        GraphPlotError::Surface(error.into())
    }
}

pub type Result<T> = std::result::Result<T, GraphPlotError>;
