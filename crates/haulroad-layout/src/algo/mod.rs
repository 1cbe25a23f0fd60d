pub mod curve_fit;
pub mod meander;
pub mod orthogonal;
pub mod zigzag;

use crate::error::{Error, Result};
use crate::geom::{Point, same_point};
use crate::model::{Bounds, Layout};
use rustc_hash::{FxBuildHasher, FxHashSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    /// Alternating wide horizontal runs and short depth steps; intermediates are spread over the
    /// corner segments (two per long run, one per short step).
    ZigZag(ZigZagOptions),
    /// Manhattan routing with one segment per intermediate node.
    Orthogonal(OrthogonalOptions),
    /// Ping-pong column pattern joined by orthogonal elbows; nodes sit on path vertices.
    Meander(MeanderOptions),
    /// Zig-zag node placement with a Catmull-Rom curve sampled through the nodes as the path.
    CurveFit(CurveFitOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::ZigZag(ZigZagOptions::default())
    }
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ZigZag(_) => "zigZag",
            Self::Orthogonal(_) => "orthogonal",
            Self::Meander(_) => "meander",
            Self::CurveFit(_) => "curveFit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZigZagOptions {
    /// Depth advanced by every short (vertical) segment.
    pub step: f64,
    /// Signed horizontal offset of the first run; runs alternate between `offset` and `-offset`.
    pub offset: f64,
    /// Length of the straight lead-in before the first node and lead-out after the last one.
    /// `0` disables both.
    pub lead: f64,
    /// Translate the result so the path's bounding box is centred on the origin.
    pub center: bool,
}

impl Default for ZigZagOptions {
    fn default() -> Self {
        Self {
            step: 3.5,
            offset: -6.0,
            lead: 3.5,
            center: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrthogonalOptions {
    /// Depth of the first node.
    pub start_depth: f64,
    pub step: f64,
    /// Extra depth added to every vertical segment on top of `step`.
    pub extension: f64,
    pub offset: f64,
    pub center: bool,
}

impl Default for OrthogonalOptions {
    fn default() -> Self {
        Self {
            start_depth: -5.0,
            step: 2.0,
            extension: 2.0,
            offset: 5.0,
            center: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeanderOptions {
    /// Half of the drawing width; the column pattern is expressed as fractions of it.
    pub half_width: f64,
    pub start_depth: f64,
    /// Depth between rows. Defaults to a quarter of `half_width`.
    pub row: Option<f64>,
}

impl Default for MeanderOptions {
    fn default() -> Self {
        Self {
            half_width: 400.0,
            start_depth: 130.0,
            row: None,
        }
    }
}

impl MeanderOptions {
    pub fn row(&self) -> f64 {
        self.row.unwrap_or(self.half_width / 4.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurveFitOptions {
    pub zig_zag: ZigZagOptions,
    /// Path points emitted per span between two consecutive nodes.
    pub samples: usize,
    /// Catmull-Rom parameterization: `0.5` is centripetal, `0` uniform, `1` chordal.
    pub alpha: f64,
}

impl Default for CurveFitOptions {
    fn default() -> Self {
        Self {
            zig_zag: ZigZagOptions::default(),
            samples: 16,
            alpha: 0.5,
        }
    }
}

pub(crate) fn validate_ids<S: AsRef<str>>(ids: &[S]) -> Result<Vec<String>> {
    if ids.len() < 2 {
        return Err(Error::TooFewNodes { count: ids.len() });
    }
    let mut seen: FxHashSet<&str> =
        FxHashSet::with_capacity_and_hasher(ids.len(), FxBuildHasher);
    for (index, id) in ids.iter().enumerate() {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(Error::EmptyNodeId { index });
        }
        if !seen.insert(id) {
            return Err(Error::DuplicateNode { id: id.to_string() });
        }
    }
    Ok(ids.iter().map(|id| id.as_ref().to_string()).collect())
}

pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidOption {
            name,
            message: format!("expected a finite number, got {value}"),
        })
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidOption {
            name,
            message: format!("expected a positive number, got {value}"),
        })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidOption {
            name,
            message: format!("expected a non-negative number, got {value}"),
        })
    }
}

pub(crate) fn non_zero(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value != 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidOption {
            name,
            message: "must not be zero".to_string(),
        })
    }
}

/// Appends `p` unless it repeats the last vertex.
pub(crate) fn push_distinct(path: &mut Vec<Point>, p: Point) {
    match path.last() {
        Some(&last) if same_point(last, p) => {}
        _ => path.push(p),
    }
}

pub(crate) fn center_on_origin(layout: &mut Layout) {
    if let Some(b) = Bounds::from_points(layout.path.iter().copied()) {
        layout.translate(b.center());
    }
}
