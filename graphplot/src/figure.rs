//! Chrome of the target figure: size, toolbar, plane styling and hover
//! behavior. These types describe what the surface should build, they do not
//! render anything themselves.

use graphplot_core::catalog::Tooltip;
use smartstring::alias::String as SmartString;
use strum_macros::{Display, EnumIter, EnumString};

/// Interactive tool on the figure toolbar.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Tool {
    BoxZoom,
    Reset,
    WheelZoom,
    Pan,
}

/// Chrome of the figure a render pass draws into. The default is a plain
/// canvas: no axes, no grid and no toolbar logo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureOptions {
    pub width: u32,
    pub height: u32,
    /// Toolbar tools, in order.
    pub tools: Vec<Tool>,
    pub show_toolbar_logo: bool,
    pub show_axes: bool,
    pub show_grid: bool,
}

impl Default for FigureOptions {
    fn default() -> Self {
        FigureOptions {
            width: 800,
            height: 600,
            tools: vec![Tool::BoxZoom, Tool::Reset, Tool::WheelZoom, Tool::Pan],
            show_toolbar_logo: false,
            show_axes: false,
            show_grid: false,
        }
    }
}

/// How a hover tool follows the pointer over a glyph renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverMode {
    /// Interpolate along line glyphs.
    LineInterp,
    /// Attach vertically above point glyphs.
    VerticalPoints,
}

/// Hover tool configuration for a single glyph renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoverSpec {
    pub tooltips: Vec<Tooltip>,
    /// `printf` formatter assignment per column reference. Rows with literal
    /// values have no formatter.
    pub formatters: Vec<(SmartString, SmartString)>,
    pub mode: HoverMode,
}

impl HoverSpec {
    /// Hover over the edge renderer.
    pub fn lines(tooltips: Vec<Tooltip>) -> HoverSpec {
        HoverSpec::with_mode(tooltips, HoverMode::LineInterp)
    }

    /// Hover over a node renderer.
    pub fn points(tooltips: Vec<Tooltip>) -> HoverSpec {
        HoverSpec::with_mode(tooltips, HoverMode::VerticalPoints)
    }

    fn with_mode(tooltips: Vec<Tooltip>, mode: HoverMode) -> HoverSpec {
        let formatters = tooltips
            .iter()
            .filter(|t| t.value.starts_with('@'))
            .map(|t| (t.value.clone(), SmartString::from("printf")))
            .collect();
        HoverSpec {
            tooltips,
            formatters,
            mode,
        }
    }
}
