//! Catmull-Rom interpolation through an ordered point list.
//!
//! The curve passes through every control point. Endpoints are handled by extrapolating a phantom
//! control point past each end (`2·p0 − p1`), so the curve starts at the first point and ends at
//! the last one. Parameter `t ∈ [0, 1]` is spread evenly over the spans (not by arc length).

use crate::geom::{Point, Vector, distance, point, vector};

/// Divisions used to approximate arc length.
pub const LENGTH_DIVISIONS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom {
    points: Vec<Point>,
    alpha: f64,
}

#[derive(Debug, Clone, Copy)]
struct Cubic {
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl Cubic {
    fn hermite(x0: f64, x1: f64, t0: f64, t1: f64) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn nonuniform(x0: f64, x1: f64, x2: f64, x3: f64, dt0: f64, dt1: f64, dt2: f64) -> Self {
        let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        t1 *= dt1;
        t2 *= dt1;
        Self::hermite(x1, x2, t1, t2)
    }

    fn value(&self, t: f64) -> f64 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }

    fn derivative(&self, t: f64) -> f64 {
        self.c1 + 2.0 * self.c2 * t + 3.0 * self.c3 * t * t
    }
}

struct Span {
    x: Cubic,
    y: Cubic,
    z: Cubic,
    weight: f64,
}

impl CatmullRom {
    /// Centripetal parameterization (`alpha = 0.5`), which avoids cusps and self-intersections
    /// within a span.
    pub fn centripetal(points: Vec<Point>) -> Self {
        Self::with_alpha(points, 0.5)
    }

    pub fn with_alpha(points: Vec<Point>, alpha: f64) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.5
        };
        Self { points, alpha }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn span(&self, t: f64) -> Option<Span> {
        let l = self.points.len();
        if l < 2 {
            return None;
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let p = (l - 1) as f64 * t;
        let mut index = p.floor() as usize;
        let mut weight = p - index as f64;
        if index >= l - 1 {
            index = l - 2;
            weight = 1.0;
        }

        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        let p0 = if index > 0 {
            self.points[index - 1]
        } else {
            p1 + (p1 - p2)
        };
        let p3 = if index + 2 < l {
            self.points[index + 2]
        } else {
            p2 + (p2 - p1)
        };

        let knot = |a: Point, b: Point| (b - a).square_length().powf(self.alpha * 0.5);
        let mut dt0 = knot(p0, p1);
        let mut dt1 = knot(p1, p2);
        let mut dt2 = knot(p2, p3);
        // Coincident control points would collapse the knot spacing.
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        Some(Span {
            x: Cubic::nonuniform(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2),
            y: Cubic::nonuniform(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2),
            z: Cubic::nonuniform(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2),
            weight,
        })
    }

    /// Point at curve parameter `t` (clamped to `[0, 1]`).
    pub fn point(&self, t: f64) -> Point {
        match self.span(t) {
            Some(s) => point(s.x.value(s.weight), s.y.value(s.weight), s.z.value(s.weight)),
            None => self.points.first().copied().unwrap_or_else(Point::origin),
        }
    }

    /// Derivative of the curve at `t`. Not normalized; zero for degenerate curves.
    pub fn tangent(&self, t: f64) -> Vector {
        match self.span(t) {
            Some(s) => vector(
                s.x.derivative(s.weight),
                s.y.derivative(s.weight),
                s.z.derivative(s.weight),
            ),
            None => Vector::zero(),
        }
    }

    /// `divisions + 1` evenly spaced samples from `t = 0` to `t = 1`.
    pub fn sample(&self, divisions: usize) -> Vec<Point> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point(i as f64 / divisions as f64))
            .collect()
    }

    /// Arc length approximated by a polyline through `LENGTH_DIVISIONS` samples.
    pub fn length(&self) -> f64 {
        self.sample(LENGTH_DIVISIONS)
            .windows(2)
            .map(|w| distance(w[0], w[1]))
            .sum()
    }
}
