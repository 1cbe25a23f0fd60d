use crate::algo::{ZigZagOptions, center_on_origin, non_negative, non_zero, positive, push_distinct};
use crate::error::Result;
use crate::geom::{lerp, point};
use crate::model::{Layout, Node};

impl ZigZagOptions {
    pub fn validate(&self) -> Result<()> {
        positive("step", self.step)?;
        non_zero("offset", self.offset)?;
        non_negative("lead", self.lead)?;
        Ok(())
    }
}

/// Number of walk steps (exclusive upper bound, starting at 1) needed for `intermediates` nodes.
///
/// Every horizontal + vertical pair after the first vertical step hosts three nodes (two on the
/// long run, one on the step), and the first vertical step hosts one.
fn corner_limit(intermediates: usize) -> usize {
    debug_assert!(intermediates > 0);
    (intermediates - 1).div_ceil(3) * 2 + 2
}

pub fn layout(ids: &[String], opts: &ZigZagOptions) -> Result<Layout> {
    opts.validate()?;

    let intermediates = ids.len() - 2;
    let mut path = Vec::with_capacity(ids.len() + 6);
    let mut x = 0.0;
    let mut z = 0.0;

    if opts.lead > 0.0 {
        path.push(point(0.0, 0.0, -opts.lead));
    }
    let first_anchor = path.len();
    path.push(point(0.0, 0.0, 0.0));

    if intermediates > 0 {
        for i in 1..corner_limit(intermediates) {
            if i % 2 == 1 {
                x = if i % 4 == 1 { opts.offset } else { -opts.offset };
            } else {
                z += opts.step;
            }
            push_distinct(&mut path, point(x, 0.0, z));
        }
        z += opts.step;
        push_distinct(&mut path, point(x, 0.0, z));
    } else {
        z += opts.step;
    }

    push_distinct(&mut path, point(0.0, 0.0, z));
    let last_anchor = path.len() - 1;
    if opts.lead > 0.0 {
        path.push(point(0.0, 0.0, z + opts.lead));
    }

    let mut nodes = Vec::with_capacity(ids.len());
    nodes.push(Node::at(&ids[0], path[first_anchor]));

    // Segments strictly between the first run (which the first node owns) and the final run back
    // to the centre line. Bounded by the remaining intermediates, not by the vertex count.
    let mut pending = ids[1..ids.len() - 1].iter();
    let mut remaining = intermediates;
    for end in (first_anchor + 2)..last_anchor {
        if remaining == 0 {
            break;
        }
        let (start, stop) = (path[end - 1], path[end]);
        let d = stop - start;
        let is_short = d.z.abs() > d.x.abs();
        let ts: &[f64] = if is_short {
            &[0.5]
        } else {
            &[1.0 / 3.0, 2.0 / 3.0]
        };
        for &t in ts {
            let Some(id) = pending.next() else {
                break;
            };
            nodes.push(Node::at(id, lerp(start, stop, t)));
            remaining -= 1;
        }
    }
    debug_assert_eq!(remaining, 0, "zig-zag corners must host every intermediate");

    nodes.push(Node::at(&ids[ids.len() - 1], path[last_anchor]));

    let mut out = Layout {
        nodes,
        path,
        first_anchor,
        last_anchor,
    };
    if opts.center {
        center_on_origin(&mut out);
    }
    Ok(out)
}
