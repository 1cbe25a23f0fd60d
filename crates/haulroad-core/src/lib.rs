#![forbid(unsafe_code)]

//! Scroll-driven traversal of a haulroad layout (headless).
//!
//! A [`Tour`] turns scroll positions into marker poses along the laid-out road and reveals each
//! catalog category (and its leaves) as the marker comes within reach of its node. Nothing here
//! renders; every tick produces a plain [`Frame`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod progress;
pub mod tour;
pub mod traversal;
pub mod visibility;

pub use catalog::{Catalog, Leaf, Link, leaf_id};
pub use config::{TourConfig, TourSettings};
pub use error::{Error, Result};
pub use progress::{Progress, ScrollMetrics, draw_in};
pub use tour::{Frame, Tour};
pub use traversal::{
    Location, Marker, Pose, Route, Traversal, locate, point_at_distance, point_at_progress,
    splice_stops, total_distance,
};
pub use visibility::{Metric, ProximityTrigger, Reveal, VisibilityState};

pub use haulroad_layout as layout;
