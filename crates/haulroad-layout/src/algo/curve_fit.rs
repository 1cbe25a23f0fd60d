use crate::algo::{CurveFitOptions, zigzag};
use crate::curve::CatmullRom;
use crate::error::{Error, Result};
use crate::model::{Layout, Node};

pub fn layout(ids: &[String], opts: &CurveFitOptions) -> Result<Layout> {
    if opts.samples == 0 {
        return Err(Error::InvalidOption {
            name: "samples",
            message: "must be at least 1".to_string(),
        });
    }

    let placed = zigzag::layout(ids, &opts.zig_zag)?;
    let curve = CatmullRom::with_alpha(
        placed.nodes.iter().map(Node::position).collect(),
        opts.alpha,
    );
    // Node `i` sits at t = i / (n - 1), which is exactly sample `i * samples`.
    let path = curve.sample(opts.samples * (placed.nodes.len() - 1));
    let last_anchor = path.len() - 1;

    Ok(Layout {
        nodes: placed.nodes,
        path,
        first_anchor: 0,
        last_anchor,
    })
}
