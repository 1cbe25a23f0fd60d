//! Moving a marker along a route by progress.
//!
//! The free functions work directly on polyline slices. [`Route`] abstracts over the two
//! traversal strategies (straight segments, and a Catmull-Rom curve through the path vertices with
//! the node positions spliced in) so the marker and tour code does not care which one is
//! configured.

pub mod marker;

pub use marker::{Marker, Pose};

use crate::progress::Progress;
use haulroad_layout::CatmullRom;
use haulroad_layout::geom::{Point, Vector, distance, lerp};
use serde::{Deserialize, Serialize};

/// Where a distance along a polyline falls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    /// Index of the segment start vertex; the segment ends at `segment + 1`.
    pub segment: usize,
    /// Position within the segment, `0` at its start and `1` at its end.
    pub t: f64,
    /// Distance from the start of the path, clamped to the path length.
    pub distance: f64,
}

/// Sum of the segment lengths; `0` for fewer than two points.
pub fn total_distance(path: &[Point]) -> f64 {
    path.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Locates `distance` on the path. `None` when the path has no segment.
pub fn locate(path: &[Point], distance_along: f64) -> Option<Location> {
    if path.len() < 2 {
        return None;
    }
    let target = if distance_along.is_nan() {
        0.0
    } else {
        distance_along.max(0.0)
    };

    let last = path.len() - 2;
    let mut walked = 0.0;
    for (segment, w) in path.windows(2).enumerate() {
        let len = distance(w[0], w[1]);
        let end = walked + len;
        if target <= end || segment == last {
            let t = if target >= end {
                1.0
            } else if len > 0.0 {
                ((target - walked) / len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            return Some(Location {
                segment,
                t,
                distance: target.min(end),
            });
        }
        walked = end;
    }
    None
}

/// Point `distance` along the path. Past the end this is the last point; an empty path yields
/// the origin.
pub fn point_at_distance(path: &[Point], distance_along: f64) -> Point {
    match path {
        [] => Point::origin(),
        [only] => *only,
        _ => match locate(path, distance_along) {
            Some(loc) => interpolate(path[loc.segment], path[loc.segment + 1], loc.t),
            None => path[path.len() - 1],
        },
    }
}

pub fn point_at_progress(path: &[Point], progress: Progress) -> Point {
    point_at_distance(path, progress.get() * total_distance(path))
}

/// Segment endpoints are returned exactly rather than through `lerp` rounding.
fn interpolate(a: Point, b: Point, t: f64) -> Point {
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        lerp(a, b, t)
    }
}

/// Points closer than this count as the same point, and as lying on a segment.
const COINCIDENT: f64 = 1e-6;

/// Parameter (at least `from`) and distance of the point on segment `a`-`b` nearest to `p`.
fn project(a: Point, b: Point, p: Point, from: f64) -> (f64, f64) {
    let ab = b - a;
    let len2 = ab.square_length();
    let t = if len2 > 0.0 {
        ((p - a).dot(ab) / len2).clamp(from, 1.0)
    } else {
        from
    };
    (t, distance(interpolate(a, b, t), p))
}

fn push_distinct(out: &mut Vec<Point>, p: Point) {
    if out.last().is_some_and(|&last| distance(last, p) < COINCIDENT) {
        return;
    }
    out.push(p);
}

/// Path vertices with every stop inserted where the path passes it.
///
/// Stops are matched in order and never before the previous one, so a path that crosses itself
/// still receives them in travel order. A stop off the path is inserted after its nearest
/// segment. Coincident neighbours are collapsed.
pub fn splice_stops(path: &[Point], stops: &[Point]) -> Vec<Point> {
    let mut out = Vec::with_capacity(path.len() + stops.len());
    let Some(&first) = path.first() else {
        for &stop in stops {
            push_distinct(&mut out, stop);
        }
        return out;
    };
    out.push(first);

    let segments = path.len() - 1;
    let (mut cursor, mut cursor_t) = (0, 0.0);
    for &stop in stops {
        let mut best: Option<(usize, f64, f64)> = None;
        for s in cursor..segments {
            let from = if s == cursor { cursor_t } else { 0.0 };
            let (t, d) = project(path[s], path[s + 1], stop, from);
            if best.is_none_or(|(_, _, bd)| d < bd) {
                best = Some((s, t, d));
            }
            if d < COINCIDENT {
                break;
            }
        }
        if let Some((s, t, _)) = best {
            for &vertex in &path[cursor + 1..=s] {
                push_distinct(&mut out, vertex);
            }
            cursor = s;
            cursor_t = t;
        }
        push_distinct(&mut out, stop);
    }
    for &vertex in &path[(cursor + 1).min(path.len())..] {
        push_distinct(&mut out, vertex);
    }
    out
}

fn first_direction(path: &[Point]) -> Option<Vector> {
    path.windows(2)
        .map(|w| w[1] - w[0])
        .find(|d| d.square_length() > 0.0)
}

pub trait Route {
    fn length(&self) -> f64;

    fn point_at_progress(&self, progress: Progress) -> Point;

    /// Direction of travel, when the route can provide one analytically.
    fn tangent_at_progress(&self, progress: Progress) -> Option<Vector>;

    /// Facing before the marker has moved.
    fn start_direction(&self) -> Option<Vector>;
}

/// Straight segments between path vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    total: f64,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        let total = total_distance(&points);
        Self { points, total }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point_at_distance(&self, distance_along: f64) -> Point {
        point_at_distance(&self.points, distance_along)
    }

    pub fn locate(&self, progress: Progress) -> Option<Location> {
        locate(&self.points, progress.get() * self.total)
    }
}

impl Route for Polyline {
    fn length(&self) -> f64 {
        self.total
    }

    fn point_at_progress(&self, progress: Progress) -> Point {
        point_at_distance(&self.points, progress.get() * self.total)
    }

    fn tangent_at_progress(&self, _progress: Progress) -> Option<Vector> {
        None
    }

    fn start_direction(&self) -> Option<Vector> {
        first_direction(&self.points)
    }
}

/// Catmull-Rom curve through its control points, sampled by curve parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    curve: CatmullRom,
    length: f64,
}

impl Curve {
    pub fn new(points: Vec<Point>, alpha: f64) -> Self {
        let curve = CatmullRom::with_alpha(points, alpha);
        let length = curve.length();
        Self { curve, length }
    }

    pub fn curve(&self) -> &CatmullRom {
        &self.curve
    }
}

impl Route for Curve {
    fn length(&self) -> f64 {
        self.length
    }

    fn point_at_progress(&self, progress: Progress) -> Point {
        self.curve.point(progress.get())
    }

    fn tangent_at_progress(&self, progress: Progress) -> Option<Vector> {
        Some(self.curve.tangent(progress.get()))
    }

    fn start_direction(&self) -> Option<Vector> {
        let t = self.curve.tangent(0.0);
        if t.square_length() > 0.0 {
            Some(t)
        } else {
            first_direction(self.curve.points())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Traversal {
    #[default]
    Polyline,
    CatmullRom,
}

impl Traversal {
    /// Builds the route for `path`. Every stop lies on the result: the polyline already passes
    /// them, and the curve is fitted through the path with the stops spliced in.
    pub fn build(
        self,
        path: &[Point],
        stops: &[Point],
        curve_alpha: f64,
    ) -> Box<dyn Route + Send + Sync> {
        tracing::debug!(
            strategy = ?self,
            vertices = path.len(),
            stops = stops.len(),
            "building route"
        );
        match self {
            Self::Polyline => Box::new(Polyline::new(path.to_vec())),
            Self::CatmullRom => Box::new(Curve::new(splice_stops(path, stops), curve_alpha)),
        }
    }
}
