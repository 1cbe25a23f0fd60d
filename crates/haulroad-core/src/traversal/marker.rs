use super::Route;
use crate::config::TraversalSettings;
use crate::progress::Progress;
use haulroad_layout::geom::{Point, Vector, vector};
use serde::Serialize;

/// Resolved placement of the marker for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    pub progress: Progress,
    /// Point on the route. Proximity is measured from here.
    pub position: Point,
    /// `position` lifted by the configured elevation, for rendering.
    pub render_position: Point,
    /// Unit direction of travel.
    pub facing: Vector,
    /// Rotation about the vertical axis, in radians.
    pub yaw: f64,
}

/// Tracks the marker between ticks so facing can be derived from movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    previous: Option<Point>,
    initial_facing: Vector,
    facing: Vector,
    epsilon: f64,
    elevation: f64,
    yaw_offset: f64,
}

impl Marker {
    pub fn new(route: &dyn Route, settings: &TraversalSettings) -> Self {
        let facing = route
            .start_direction()
            .and_then(normalized)
            .unwrap_or_else(|| vector(0.0, 0.0, 1.0));
        Self {
            previous: None,
            initial_facing: facing,
            facing,
            epsilon: settings.epsilon,
            elevation: settings.elevation,
            yaw_offset: settings.yaw_offset,
        }
    }

    pub fn facing(&self) -> Vector {
        self.facing
    }

    pub fn previous(&self) -> Option<Point> {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.facing = self.initial_facing;
    }

    pub fn advance(&mut self, route: &dyn Route, progress: Progress) -> Pose {
        let position = route.point_at_progress(progress);

        let tangent = route
            .tangent_at_progress(progress)
            .filter(|t| t.length() >= self.epsilon);
        let movement = self
            .previous
            .map(|prev| position - prev)
            .filter(|m| m.length() >= self.epsilon);
        if let Some(dir) = tangent.or(movement).and_then(normalized) {
            self.facing = dir;
        }
        self.previous = Some(position);

        Pose {
            progress,
            position,
            render_position: position + vector(0.0, self.elevation, 0.0),
            facing: self.facing,
            yaw: self.facing.x.atan2(self.facing.z) + self.yaw_offset,
        }
    }
}

fn normalized(v: Vector) -> Option<Vector> {
    let len = v.length();
    if len > 0.0 && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}
