use crate::algo::{OrthogonalOptions, center_on_origin, finite, non_negative, non_zero, positive, push_distinct};
use crate::error::Result;
use crate::geom::point;
use crate::model::{Layout, Node};

impl OrthogonalOptions {
    pub fn validate(&self) -> Result<()> {
        finite("startDepth", self.start_depth)?;
        positive("step", self.step)?;
        non_negative("extension", self.extension)?;
        non_zero("offset", self.offset)?;
        Ok(())
    }
}

pub fn layout(ids: &[String], opts: &OrthogonalOptions) -> Result<Layout> {
    opts.validate()?;

    let rise = opts.step + opts.extension;
    let mut x = 0.0;
    let mut z = opts.start_depth;

    let mut path = vec![point(x, 0.0, z)];
    let mut nodes = Vec::with_capacity(ids.len());
    nodes.push(Node::at(&ids[0], point(x, 0.0, z)));

    for (i, id) in ids[1..ids.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, id)| (i + 1, id))
    {
        if i % 2 == 1 {
            let toward = if i % 4 == 1 { opts.offset } else { -opts.offset };
            push_distinct(&mut path, point(toward, 0.0, z));
            // A third of the way out from the centre line: 1/3 along the first run, 2/3 along
            // every later run (which spans from one side to the other).
            nodes.push(Node::at(id, point(toward / 3.0, 0.0, z)));
            x = toward;
        } else {
            let from = z;
            z += rise;
            push_distinct(&mut path, point(x, 0.0, z));
            nodes.push(Node::at(id, point(x, 0.0, (from + z) / 2.0)));
        }
    }

    z += rise;
    push_distinct(&mut path, point(x, 0.0, z));
    push_distinct(&mut path, point(0.0, 0.0, z));
    nodes.push(Node::at(&ids[ids.len() - 1], point(0.0, 0.0, z)));

    let last_anchor = path.len() - 1;
    let mut out = Layout {
        nodes,
        path,
        first_anchor: 0,
        last_anchor,
    };
    if opts.center {
        center_on_origin(&mut out);
    }
    Ok(out)
}
