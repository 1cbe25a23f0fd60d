//! Layout output types.

use crate::geom::{Point, point};
use serde::{Deserialize, Serialize};

/// A named anchor point in layout space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Node {
    pub fn at(id: impl Into<String>, p: Point) -> Self {
        Self {
            id: id.into(),
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }

    pub fn position(&self) -> Point {
        point(self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: Vec<Node>,
    /// Polyline vertices in traversal order. Never contains two equal consecutive points.
    pub path: Vec<Point>,
    /// Index into `path` of the vertex the first node sits on.
    pub first_anchor: usize,
    /// Index into `path` of the vertex the last node sits on.
    pub last_anchor: usize,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Bounds of the path and the nodes together.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(
            self.path
                .iter()
                .copied()
                .chain(self.nodes.iter().map(Node::position)),
        )
    }

    pub(crate) fn translate(&mut self, by: Point) {
        let offset = by.to_vector();
        for p in &mut self.path {
            *p = *p - offset;
        }
        for n in &mut self.nodes {
            n.x -= offset.x;
            n.y -= offset.y;
            n.z -= offset.z;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut it = points.into_iter();
        let p0 = it.next()?;
        let mut b = Self {
            min_x: p0.x,
            min_y: p0.y,
            min_z: p0.z,
            max_x: p0.x,
            max_y: p0.y,
            max_z: p0.z,
        };
        for p in it {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.min_z = b.min_z.min(p.z);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
            b.max_z = b.max_z.max(p.z);
        }
        Some(b)
    }

    pub fn center(&self) -> Point {
        point(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }
}
