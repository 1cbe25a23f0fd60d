use crate::algo::{MeanderOptions, finite, positive, push_distinct};
use crate::error::Result;
use crate::geom::{Point, point};
use crate::model::{Layout, Node};

/// Column positions as fractions of the half width, walked back and forth.
const COLUMNS: [f64; 4] = [-0.75, -0.25, 0.25, 0.75];

impl MeanderOptions {
    pub fn validate(&self) -> Result<()> {
        positive("halfWidth", self.half_width)?;
        finite("startDepth", self.start_depth)?;
        positive("row", self.row())?;
        Ok(())
    }
}

/// Ping-pong walk over `COLUMNS`: 0, 1, 2, 3, 2, 1, 0, 1, ...
struct ColumnWalk {
    index: usize,
    ascending: bool,
}

impl ColumnWalk {
    fn new() -> Self {
        Self {
            index: 0,
            ascending: true,
        }
    }

    fn next_column(&mut self) -> usize {
        let current = self.index;
        if self.ascending {
            if self.index + 1 >= COLUMNS.len() {
                self.index = COLUMNS.len() - 2;
                self.ascending = false;
            } else {
                self.index += 1;
            }
        } else if self.index == 0 {
            self.index = 1;
            self.ascending = true;
        } else {
            self.index -= 1;
        }
        current
    }
}

fn is_inner_crossing(prev: Option<usize>, next: usize) -> bool {
    matches!((prev, next), (Some(1), 2) | (Some(2), 1))
}

/// Whether the connector leaving node `index` runs horizontally before turning.
fn horizontal_first(index: usize, segments: usize) -> bool {
    if index == 0 {
        true
    } else if index == segments - 1 {
        (index - 1) % 3 == 1
    } else {
        (index - 1) % 3 != 0
    }
}

pub fn layout(ids: &[String], opts: &MeanderOptions) -> Result<Layout> {
    opts.validate()?;

    let row = opts.row();
    let mut depth = opts.start_depth;
    let mut positions: Vec<Point> = Vec::with_capacity(ids.len());
    positions.push(point(0.0, 0.0, depth));

    let mut walk = ColumnWalk::new();
    let mut prev_column = None;
    for _ in 1..ids.len() - 1 {
        let column = walk.next_column();
        if !is_inner_crossing(prev_column, column) {
            depth += row;
        }
        positions.push(point(COLUMNS[column] * opts.half_width, 0.0, depth));
        prev_column = Some(column);
    }
    positions.push(point(0.0, 0.0, depth + row));

    let segments = positions.len() - 1;
    let mut path = vec![positions[0]];
    for (index, pair) in positions.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        let elbow = if horizontal_first(index, segments) {
            point(end.x, 0.0, start.z)
        } else {
            point(start.x, 0.0, end.z)
        };
        push_distinct(&mut path, elbow);
        push_distinct(&mut path, end);
    }

    let nodes = ids
        .iter()
        .zip(&positions)
        .map(|(id, p)| Node::at(id, *p))
        .collect();
    let last_anchor = path.len() - 1;
    Ok(Layout {
        nodes,
        path,
        first_anchor: 0,
        last_anchor,
    })
}
