use crate::geom::{Point, vector};

/// Fans `count` leaf positions on a half circle of `radius` above `center`.
///
/// Leaf `i` sits at angle `π / (count + 1) · (i + 1)` in the `x`/`y` plane, so the leaves never
/// touch the road on either side of the node.
pub fn leaf_positions(center: Point, count: usize, radius: f64) -> Vec<Point> {
    let step = std::f64::consts::PI / (count + 1) as f64;
    (0..count)
        .map(|i| {
            let angle = step * (i + 1) as f64;
            center + vector(angle.cos() * radius, angle.sin() * radius, 0.0)
        })
        .collect()
}
