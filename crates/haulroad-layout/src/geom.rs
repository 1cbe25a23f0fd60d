pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point3D<f64, Unit>;
pub type Vector = euclid::Vector3D<f64, Unit>;

pub fn point(x: f64, y: f64, z: f64) -> Point {
    euclid::point3(x, y, z)
}

pub fn vector(x: f64, y: f64, z: f64) -> Vector {
    euclid::vec3(x, y, z)
}

/// Linear interpolation; `t` is not clamped.
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    a + (b - a) * t
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).length()
}

/// Distance on the ground plane, ignoring elevation (`y`).
pub fn planar_distance(a: Point, b: Point) -> f64 {
    let d = b - a;
    (d.x * d.x + d.z * d.z).sqrt()
}

pub(crate) fn same_point(a: Point, b: Point) -> bool {
    (b - a).square_length() <= f64::EPSILON * f64::EPSILON
}

#[cfg(test)]
mod tests {
    use super::{distance, lerp, planar_distance, point};

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = point(0.0, 0.0, 0.0);
        let b = point(2.0, 4.0, -6.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), point(1.0, 2.0, -3.0));
    }

    #[test]
    fn planar_distance_ignores_elevation() {
        let a = point(0.0, 0.0, 0.0);
        let b = point(3.0, 10.0, 4.0);
        assert_eq!(planar_distance(a, b), 5.0);
        assert!(distance(a, b) > 10.0);
    }
}
