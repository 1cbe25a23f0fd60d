#![forbid(unsafe_code)]

//! Headless "winding road" layouts for an ordered list of named nodes.
//!
//! Every algorithm is deterministic: the same id list and options always produce the same node
//! coordinates and the same connecting polyline. Coordinates live on the ground plane (`x`, `z`)
//! with `y` reserved for elevation, so 2D and 3D consumers can share one layout.

pub mod algo;
pub mod curve;
pub mod error;
pub mod geom;
pub mod leaves;
pub mod model;

pub use algo::{Algorithm, CurveFitOptions, MeanderOptions, OrthogonalOptions, ZigZagOptions};
pub use curve::CatmullRom;
pub use error::{Error, Result};
pub use geom::{Point, Vector};
pub use leaves::leaf_positions;
pub use model::{Bounds, Layout, Node};

/// Headless layout entry point.
pub fn layout<S: AsRef<str>>(ids: &[S], algorithm: &Algorithm) -> Result<Layout> {
    let ids = algo::validate_ids(ids)?;
    let out = match algorithm {
        Algorithm::ZigZag(opts) => algo::zigzag::layout(&ids, opts)?,
        Algorithm::Orthogonal(opts) => algo::orthogonal::layout(&ids, opts)?,
        Algorithm::Meander(opts) => algo::meander::layout(&ids, opts)?,
        Algorithm::CurveFit(opts) => algo::curve_fit::layout(&ids, opts)?,
    };
    tracing::debug!(
        algorithm = algorithm.name(),
        nodes = out.nodes.len(),
        path_points = out.path.len(),
        "generated layout"
    );
    Ok(out)
}
