use rustc_hash::FxHashMap;
use smartstring::alias::String;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Marker trait for types that can identify a node of a plotted graph.
///
/// Identifiers must be cheap to clone, usable as map keys, have a total order
/// (used for deterministic partition output) and render to text for identity
/// columns and error messages.
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug + Display {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Ord + Debug + Display {}

/// A single attribute value attached to a node or an edge.
///
/// The ordering is total: `Missing < Bool < Num < Text`, with numbers compared
/// by [`f64::total_cmp`]. Categorical color assignment and attribute catalogs
/// rely on this order being stable across runs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Sentinel for a key that is absent on this particular node or edge.
    Missing,
    Bool(bool),
    Num(f64),
    Text(String),
}

impl AttrValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, AttrValue::Missing)
    }

    /// The numeric payload, if this value is a number.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            AttrValue::Num(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl Ord for AttrValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use AttrValue::*;
        match (self, other) {
            (Missing, Missing) => Ordering::Equal,
            (Missing, _) => Ordering::Less,
            (_, Missing) => Ordering::Greater,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Bool(_), _) => Ordering::Less,
            (_, Bool(_)) => Ordering::Greater,
            (Num(a), Num(b)) => a.total_cmp(b),
            (Num(_), _) => Ordering::Less,
            (_, Num(_)) => Ordering::Greater,
            (Text(a), Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for AttrValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with the total order, so `Num` goes through `total_cmp`
// instead of the partial IEEE 754 comparison.
impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AttrValue {}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttrValue::Missing => Ok(()),
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Num(v) => {
                // Counters and degrees arrive as floats, render them without
                // the trailing ".0" where the value is integral.
                if v.fract() == 0.0 && v.is_finite() && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{}", v)
                }
            }
            AttrValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Num(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Num(value as f64)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Num(f64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Num(f64::from(value))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.into())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<std::string::String> for AttrValue {
    fn from(value: std::string::String) -> Self {
        AttrValue::Text(value.into())
    }
}

/// Attribute mapping of one node or edge. The keys are sorted so iterating a
/// mapping is deterministic.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// A color token handed to the plotting surface, e.g. `#1f77b4` or a CSS name.
pub type Color = String;

/// Which side of a bipartite graph a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Zero,
    One,
}

impl Side {
    pub fn index(&self) -> usize {
        match self {
            Side::Zero => 0,
            Side::One => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Node subset an attribute catalog is collected over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeSubset {
    /// All nodes of the graph.
    All,
    /// Only the nodes of the given bipartite side.
    Side(Side),
}

/// How a requested color string resolves against an attribute catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorSpec {
    /// The request names a known attribute and is encoded through a colormap.
    ByAttribute(String),
    /// Anything else is passed to the surface as a literal color token.
    Literal(Color),
}

impl ColorSpec {
    /// Classifies `requested` against a sorted attribute catalog.
    pub fn resolve(requested: &str, catalog: &[String]) -> ColorSpec {
        if catalog
            .binary_search_by(|attr| attr.as_str().cmp(requested))
            .is_ok()
        {
            ColorSpec::ByAttribute(requested.into())
        } else {
            ColorSpec::Literal(requested.into())
        }
    }
}

/// Alpha channel request: either a constant or the name of an attribute whose
/// values are normalized into opacities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlphaSpec {
    Constant(f64),
    Attribute(String),
}

impl From<f64> for AlphaSpec {
    fn from(value: f64) -> Self {
        AlphaSpec::Constant(value)
    }
}

impl From<&str> for AlphaSpec {
    fn from(value: &str) -> Self {
        AlphaSpec::Attribute(value.into())
    }
}

/// A 2D coordinate produced by a position solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Node positions produced by the layout stage.
///
/// Positions are keyed by node, but the insertion order is preserved because
/// the node tables of a render pass are emitted in layout order.
#[derive(Clone, Debug, Default)]
pub struct Layout<N: NodeKey> {
    order: Vec<N>,
    positions: FxHashMap<N, Point>,
}

impl<N: NodeKey> Layout<N> {
    pub fn new() -> Layout<N> {
        Layout {
            order: Vec::default(),
            positions: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Layout<N> {
        let mut positions = FxHashMap::default();
        positions.reserve(capacity);
        Layout {
            order: Vec::with_capacity(capacity),
            positions,
        }
    }

    /// Inserts or replaces the position of a node. The first insertion decides
    /// the iteration position of the node.
    pub fn insert(&mut self, node: N, position: Point) {
        if self.positions.insert(node.clone(), position).is_none() {
            self.order.push(node);
        }
    }

    pub fn get(&self, node: &N) -> Option<Point> {
        self.positions.get(node).copied()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.positions.contains_key(node)
    }

    /// Iterates all nodes with their position in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, Point)> {
        self.order.iter().map(|n| (n, self.positions[n]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<N: NodeKey> FromIterator<(N, Point)> for Layout<N> {
    fn from_iter<T: IntoIterator<Item = (N, Point)>>(iter: T) -> Self {
        let mut layout = Layout::new();
        for (node, position) in iter {
            layout.insert(node, position);
        }
        layout
    }
}
