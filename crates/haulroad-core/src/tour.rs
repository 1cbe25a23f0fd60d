//! A scroll-driven tour: layout, route, marker and reveal state for one catalog.

use crate::catalog::Catalog;
use crate::config::TourSettings;
use crate::progress::{Progress, ScrollMetrics};
use crate::traversal::{Marker, Pose, Route};
use crate::visibility::{ProximityTrigger, Reveal, VisibilityState};
use crate::Result;
use haulroad_layout::{Layout, Node, Point, leaf_positions};
use serde::Serialize;
use url::Url;

/// Everything a renderer needs for one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub progress: Progress,
    pub pose: Pose,
    pub newly_revealed: Vec<Reveal>,
    pub revealed_nodes: Vec<String>,
}

pub struct Tour {
    catalog: Catalog,
    layout: Layout,
    route: Box<dyn Route + Send + Sync>,
    marker: Marker,
    trigger: ProximityTrigger,
    visibility: VisibilityState,
    progress: Progress,
    attached: bool,
    leaf_radius: f64,
}

impl std::fmt::Debug for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tour")
            .field("nodes", &self.layout.nodes.len())
            .field("progress", &self.progress)
            .field("attached", &self.attached)
            .field("revealed", &self.visibility.node_count())
            .finish_non_exhaustive()
    }
}

impl Tour {
    /// Lays out the catalog's categories in file order. The tour starts detached.
    pub fn new(catalog: Catalog, settings: &TourSettings) -> Result<Self> {
        settings.validate()?;
        let ids: Vec<&str> = catalog.ids().collect();
        let layout = haulroad_layout::layout(&ids, &settings.layout.algorithm())?;
        let stops: Vec<Point> = layout.nodes.iter().map(Node::position).collect();
        let route = settings.traversal.strategy.build(
            &layout.path,
            &stops,
            settings.traversal.curve_alpha,
        );
        let marker = Marker::new(route.as_ref(), &settings.traversal);
        let trigger = ProximityTrigger::new(settings.reveal.threshold, settings.reveal.metric)?;
        Ok(Self {
            catalog,
            layout,
            route,
            marker,
            trigger,
            visibility: VisibilityState::new(),
            progress: Progress::START,
            attached: false,
            leaf_radius: settings.layout.leaf_radius,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn route(&self) -> &(dyn Route + Send + Sync) {
        self.route.as_ref()
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stops reacting to scroll events. Already revealed content stays revealed.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns whether the progress changed. Ignored while detached.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !self.attached {
            return false;
        }
        self.set_progress(metrics.progress())
    }

    /// Sets progress directly, bypassing the scroll listener.
    pub fn set_progress(&mut self, progress: Progress) -> bool {
        let changed = progress != self.progress;
        self.progress = progress;
        changed
    }

    pub fn tick(&mut self) -> Frame {
        let pose = self.marker.advance(self.route.as_ref(), self.progress);
        let newly_revealed = self.trigger.observe(
            &mut self.visibility,
            pose.position,
            &self.layout.nodes,
            &self.catalog,
        );
        tracing::trace!(
            progress = self.progress.get(),
            x = pose.position.x,
            z = pose.position.z,
            revealed = newly_revealed.len(),
            "tick"
        );
        Frame {
            progress: self.progress,
            pose,
            newly_revealed,
            revealed_nodes: self
                .visibility
                .revealed_nodes()
                .map(str::to_string)
                .collect(),
        }
    }

    /// The URL a click on a leaf opens: its first link, once the leaf is revealed.
    pub fn activate_leaf(&self, node: &str, leaf: &str) -> Option<&Url> {
        if !self.visibility.is_leaf_revealed(node, leaf) {
            return None;
        }
        let url = &self.catalog.leaf(node, leaf)?.primary_link()?.url;
        tracing::debug!(node, leaf, url = %url, "activated leaf");
        Some(url)
    }

    pub fn leaf_positions(&self, node: &str) -> Option<Vec<Point>> {
        let n = self.layout.node(node)?;
        let count = self.catalog.leaves(node).map_or(0, <[_]>::len);
        Some(leaf_positions(n.position(), count, self.leaf_radius))
    }

    /// Back to the initial state, as on a full reload. Attachment is kept.
    pub fn reset(&mut self) {
        self.visibility.reset();
        self.marker.reset();
        self.progress = Progress::START;
    }
}
