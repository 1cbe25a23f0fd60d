//! Scroll position to traversal progress.

use serde::{Deserialize, Serialize};

/// Fraction of the route travelled, saturated into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    pub const START: Self = Self(0.0);
    pub const END: Self = Self(1.0);

    /// NaN maps to `0`; everything else is clamped.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Progress> for f64 {
    fn from(value: Progress) -> Self {
        value.0
    }
}

/// Scroll container measurements sampled on a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            scroll_height,
            viewport_height,
        }
    }

    pub fn scroll_range(&self) -> f64 {
        self.scroll_height - self.viewport_height
    }

    pub fn progress(&self) -> Progress {
        let range = self.scroll_range();
        // Content that fits the viewport has nothing to scroll.
        if range.is_nan() || range <= 0.0 {
            return Progress::START;
        }
        Progress::new(self.scroll_y / range)
    }
}

/// Number of road segments visible `elapsed` seconds into the intro animation.
pub fn draw_in(elapsed: f64, duration: f64, segments: usize) -> usize {
    if duration.is_nan() || duration <= 0.0 || elapsed >= duration {
        return segments;
    }
    if elapsed.is_nan() || elapsed <= 0.0 {
        return 0;
    }
    let shown = (elapsed / duration * segments as f64).floor() as usize;
    shown.min(segments)
}

#[cfg(test)]
mod tests {
    use super::{Progress, ScrollMetrics, draw_in};

    #[test]
    fn progress_is_saturated() {
        assert_eq!(Progress::new(-0.5).get(), 0.0);
        assert_eq!(Progress::new(1.5).get(), 1.0);
        assert_eq!(Progress::new(f64::NAN).get(), 0.0);
        assert_eq!(Progress::new(f64::INFINITY), Progress::END);
        assert_eq!(Progress::new(0.25).get(), 0.25);
    }

    #[test]
    fn progress_deserializes_through_the_clamp() {
        let p: Progress = serde_json::from_str("3.0").unwrap();
        assert_eq!(p, Progress::END);
        assert_eq!(serde_json::to_string(&Progress::new(0.5)).unwrap(), "0.5");
    }

    #[test]
    fn scroll_metrics_map_to_progress() {
        assert_eq!(ScrollMetrics::new(0.0, 3000.0, 1000.0).progress().get(), 0.0);
        assert_eq!(ScrollMetrics::new(1000.0, 3000.0, 1000.0).progress().get(), 0.5);
        assert_eq!(ScrollMetrics::new(2000.0, 3000.0, 1000.0).progress().get(), 1.0);
        // Overscroll (e.g. elastic bounce) stays in range.
        assert_eq!(ScrollMetrics::new(2400.0, 3000.0, 1000.0).progress().get(), 1.0);
        assert_eq!(ScrollMetrics::new(-50.0, 3000.0, 1000.0).progress().get(), 0.0);
    }

    #[test]
    fn non_scrollable_content_stays_at_the_start() {
        assert_eq!(ScrollMetrics::new(10.0, 800.0, 800.0).progress(), Progress::START);
        assert_eq!(ScrollMetrics::new(10.0, 600.0, 800.0).progress(), Progress::START);
    }

    #[test]
    fn draw_in_reveals_segments_over_time() {
        assert_eq!(draw_in(0.0, 2.0, 10), 0);
        assert_eq!(draw_in(0.5, 2.0, 10), 2);
        assert_eq!(draw_in(1.99, 2.0, 10), 9);
        assert_eq!(draw_in(2.0, 2.0, 10), 10);
        assert_eq!(draw_in(9.0, 2.0, 10), 10);
        assert_eq!(draw_in(0.0, 0.0, 7), 7);
        assert_eq!(draw_in(-1.0, 2.0, 7), 0);
    }
}
