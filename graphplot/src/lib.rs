#![warn(clippy::panic)]
#![warn(clippy::expect_used)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod figure;
pub mod surface;
pub mod viz;

pub use graphplot_core::bipartite;
pub use graphplot_core::catalog;
pub use graphplot_core::colormap;
pub use graphplot_core::coords;
pub use graphplot_core::encode;
pub use graphplot_core::errors;
pub use graphplot_core::graph;
pub use graphplot_core::layout;
pub use graphplot_core::table;
pub use graphplot_core::types;

pub use viz::{GraphVisualization, VizOptions};
