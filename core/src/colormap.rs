//! Maps raw attribute values to renderable color tokens.
//!
//! A [`ColorMap`] is constructed from a palette name and an optional cap on
//! the number of distinct colors. Value sequences that are entirely numeric
//! are normalized between their minimum and maximum and looked up along the
//! palette; any other sequence is treated as categorical, with the distinct
//! values ranked by the total order of [`AttrValue`]. Both variants are
//! deterministic for a given input.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use itertools::{Itertools, MinMaxResult};
use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::{GraphPlotError, Result};
use crate::types::{AttrValue, Color};

/// Smallest opacity an attribute-driven alpha channel can produce, so rows
/// with the minimum value stay visible.
pub const MIN_ALPHA: f64 = 0.1;

const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const CATEGORY20: &[&str] = &[
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

const VIRIDIS_ANCHORS: &[&str] = &[
    "#440154", "#46327e", "#365c8d", "#277f8e", "#1fa187", "#4ac16d", "#a0da39", "#fde725",
];

const MAGMA_ANCHORS: &[&str] = &[
    "#000004", "#1d1147", "#51127c", "#822681", "#b63679", "#e65164", "#fb8861", "#fcfdbf",
];

const NUMERIC_ANCHORS: &[&str] = &["#000000", "#ffffff"];

lazy_static! {
    static ref VIRIDIS_RAMP: Vec<Rgb> = parse_ramp(VIRIDIS_ANCHORS);
    static ref MAGMA_RAMP: Vec<Rgb> = parse_ramp(MAGMA_ANCHORS);
    static ref NUMERIC_RAMP: Vec<Rgb> = parse_ramp(NUMERIC_ANCHORS);
}

/// The built-in palettes. Parsing a palette name is ASCII case-insensitive
/// because the names travel through user configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Palette {
    /// 10 distinct categorical colors.
    Category10,
    /// 20 distinct categorical colors.
    Category20,
    /// Perceptually uniform continuous ramp.
    Viridis,
    /// Continuous ramp from black over magenta to light yellow.
    Magma,
    /// Grayscale ramp for scalar data.
    Numeric,
}

impl Palette {
    /// Parses a palette name, e.g. `"Category20"` or `"viridis"`.
    pub fn parse(name: &str) -> Result<Palette> {
        Palette::from_str(&name.to_ascii_lowercase())
            .map_err(|_| GraphPlotError::UnsupportedPalette(name.to_string()))
    }

    /// The fixed swatch list of a discrete palette.
    fn swatches(&self) -> Option<&'static [&'static str]> {
        match self {
            Palette::Category10 => Some(CATEGORY10),
            Palette::Category20 => Some(CATEGORY20),
            _ => None,
        }
    }

    fn ramp(&self) -> &'static [Rgb] {
        match self {
            Palette::Viridis => &VIRIDIS_RAMP,
            Palette::Magma => &MAGMA_RAMP,
            _ => &NUMERIC_RAMP,
        }
    }
}

/// Converts attribute value sequences into color tokens for one glyph layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorMap {
    palette: Palette,
    max_colors: Option<usize>,
}

impl ColorMap {
    /// Creates a colormap from a palette name. A `max_colors` value greater
    /// than zero caps the number of distinct output colors, everything else
    /// means "unlimited".
    pub fn new(palette: &str, max_colors: i64) -> Result<ColorMap> {
        Ok(ColorMap::with_palette(Palette::parse(palette)?, max_colors))
    }

    pub fn with_palette(palette: Palette, max_colors: i64) -> ColorMap {
        let max_colors = if max_colors > 0 {
            Some(max_colors as usize)
        } else {
            None
        };
        ColorMap {
            palette,
            max_colors,
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Maps each input value to a color token, one output entry per input
    /// entry. Identical inputs always map to the same color.
    pub fn map(&self, values: &[AttrValue]) -> Result<Vec<Color>> {
        if values.is_empty() {
            return Err(GraphPlotError::EmptyDomain);
        }
        let numeric: Option<Vec<f64>> = values.iter().map(AttrValue::as_num).collect();
        match numeric {
            Some(nums) => {
                debug!(
                    "mapping {} numeric values onto palette {}",
                    nums.len(),
                    self.palette
                );
                Ok(self.map_numeric(&nums))
            }
            None => {
                debug!(
                    "mapping {} categorical values onto palette {}",
                    values.len(),
                    self.palette
                );
                Ok(self.map_categorical(values))
            }
        }
    }

    /// Normalizes values into opacities in `[MIN_ALPHA, 1.0]`. Numeric values
    /// scale between their minimum and maximum, anything else is ranked like
    /// in the categorical color path. `max_colors` caps the number of
    /// distinct opacity levels the same way it caps colors.
    pub fn map_alpha(values: &[AttrValue], max_colors: i64) -> Result<Vec<f64>> {
        if values.is_empty() {
            return Err(GraphPlotError::EmptyDomain);
        }
        let levels = if max_colors > 0 {
            Some(max_colors as usize)
        } else {
            None
        };
        let numeric: Option<Vec<f64>> = values.iter().map(AttrValue::as_num).collect();
        let ts = match numeric {
            Some(nums) => normalize(&nums),
            None => ordinal(values),
        };
        Ok(ts
            .into_iter()
            .map(|t| {
                let t = match levels {
                    Some(levels) => bucket_value(t, levels),
                    None => t,
                };
                MIN_ALPHA + (1.0 - MIN_ALPHA) * t
            })
            .collect())
    }

    fn map_numeric(&self, nums: &[f64]) -> Vec<Color> {
        let ts = normalize(nums);
        match self.palette.swatches() {
            Some(swatches) => {
                let levels = self.max_colors.unwrap_or(swatches.len());
                ts.into_iter()
                    .map(|t| swatches[bucket_index(t, levels) % swatches.len()].into())
                    .collect()
            }
            None => {
                let ramp = self.palette.ramp();
                ts.into_iter()
                    .map(|t| {
                        let t = match self.max_colors {
                            Some(levels) => bucket_value(t, levels),
                            None => t,
                        };
                        ramp_at(ramp, t)
                    })
                    .collect()
            }
        }
    }

    fn map_categorical(&self, values: &[AttrValue]) -> Vec<Color> {
        let ranks = sorted_ranks(values);
        let distinct = ranks.len().max(1);
        match self.palette.swatches() {
            Some(swatches) => {
                let cap = self
                    .max_colors
                    .map(|m| m.min(swatches.len()))
                    .unwrap_or(swatches.len())
                    .max(1);
                values
                    .iter()
                    .map(|v| {
                        let rank = ranks.get(v).copied().unwrap_or(0);
                        swatches[rank % cap].into()
                    })
                    .collect()
            }
            None => {
                let ramp = self.palette.ramp();
                let stops = self.max_colors.map(|m| m.min(distinct)).unwrap_or(distinct);
                values
                    .iter()
                    .map(|v| {
                        let rank = ranks.get(v).copied().unwrap_or(0);
                        let t = if stops <= 1 {
                            0.0
                        } else {
                            (rank % stops) as f64 / (stops - 1) as f64
                        };
                        ramp_at(ramp, t)
                    })
                    .collect()
            }
        }
    }
}

/// Ranks of the distinct values, ordered by the total order of `AttrValue`.
fn sorted_ranks(values: &[AttrValue]) -> BTreeMap<&AttrValue, usize> {
    let distinct: BTreeSet<&AttrValue> = values.iter().collect();
    distinct.into_iter().enumerate().map(|(i, v)| (v, i)).collect()
}

/// Evenly spaced positions of the distinct values in `[0, 1]`.
fn ordinal(values: &[AttrValue]) -> Vec<f64> {
    let ranks = sorted_ranks(values);
    let distinct = ranks.len();
    values
        .iter()
        .map(|v| {
            let rank = ranks.get(v).copied().unwrap_or(0);
            if distinct <= 1 {
                0.0
            } else {
                rank as f64 / (distinct - 1) as f64
            }
        })
        .collect()
}

/// Scales numbers into `[0, 1]`. A constant sequence maps to the ramp start.
fn normalize(nums: &[f64]) -> Vec<f64> {
    match nums.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => Vec::default(),
        MinMaxResult::OneElement(_) => vec![0.0; nums.len()],
        MinMaxResult::MinMax(min, max) => {
            if (max - min).abs() <= f64::EPSILON {
                vec![0.0; nums.len()]
            } else {
                nums.iter()
                    .map(|v| ((v - min) / (max - min)).clamp(0.0, 1.0))
                    .collect()
            }
        }
    }
}

fn bucket_index(t: f64, levels: usize) -> usize {
    let levels = levels.max(1);
    ((t * levels as f64).floor() as usize).min(levels - 1)
}

/// Snaps `t` to the representative position of its bucket.
fn bucket_value(t: f64, levels: usize) -> f64 {
    let idx = bucket_index(t, levels);
    if levels <= 1 {
        0.0
    } else {
        idx as f64 / (levels - 1) as f64
    }
}

fn ramp_at(ramp: &[Rgb], t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    match ramp {
        [] => "#000000".into(),
        [single] => single.to_hex(),
        _ => {
            let scaled = t * (ramp.len() - 1) as f64;
            let idx = (scaled.floor() as usize).min(ramp.len() - 2);
            let frac = scaled - idx as f64;
            ramp[idx].lerp(ramp[idx + 1], frac).to_hex()
        }
    }
}

fn parse_ramp(anchors: &[&str]) -> Vec<Rgb> {
    anchors.iter().filter_map(|hex| Rgb::parse(hex)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    fn parse(hex: &str) -> Option<Rgb> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        Some(Rgb {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    fn to_hex(self) -> Color {
        use std::fmt::Write;
        let mut out = Color::new();
        // Writing to a string cannot fail.
        let _ = write!(out, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        out
    }
}
