//! Seam to the concrete plotting backend.

use graphplot_core::encode::{EdgeLayer, NodeLayer};
use graphplot_core::errors::Result;
use strum_macros::{Display, EnumString};

use crate::figure::{FigureOptions, HoverSpec};

/// Handle of one glyph renderer on a figure, issued by the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RendererHandle(pub usize);

/// Where a finished figure is displayed.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum DisplayMode {
    /// Embedded into a notebook-like host document.
    #[default]
    Embedded,
    /// A standalone document the backend opens itself.
    Standalone,
}

/// External plotting collaborator.
///
/// The pipeline is backend agnostic: it prepares glyph layers and figure
/// chrome, an implementation of this trait turns them into actual output.
/// Failures are wrapped with [`graphplot_core::errors::GraphPlotError::surface`].
pub trait Surface {
    /// Backend-specific figure under construction.
    type Figure;

    fn create_figure(&mut self, options: &FigureOptions) -> Result<Self::Figure>;

    /// Draws all edge segments as one multi-line renderer.
    fn multi_line(&mut self, figure: &mut Self::Figure, layer: &EdgeLayer)
        -> Result<RendererHandle>;

    /// Draws one node partition as a scatter renderer with the layer's
    /// marker shape.
    fn scatter(&mut self, figure: &mut Self::Figure, layer: &NodeLayer) -> Result<RendererHandle>;

    /// Attaches a hover tool to a previously created renderer.
    fn add_hover(
        &mut self,
        figure: &mut Self::Figure,
        renderer: RendererHandle,
        hover: &HoverSpec,
    ) -> Result<()>;

    /// Displays the finished figure. This consumes the figure, a new render
    /// pass starts from scratch.
    fn show(&mut self, figure: Self::Figure, mode: DisplayMode) -> Result<()>;
}
