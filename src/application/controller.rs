//! Collapsible tree interaction controller.
//!
//! Per node the controller tracks `{Expanded, Collapsed} x {Highlighted, Normal}`.
//! `toggle()` is the only user mutation: it flips the collapse flag, persists it
//! onto the tree, highlights the node for [`HIGHLIGHT_DURATION`] and asks for
//! the node to be centred in the next frame.
//!
//! # Invariants
//! - Root starts expanded, every other node collapsed.
//! - Highlight timers are never cancelled; overlapping windows keep the node
//!   highlighted until the latest one ends.
//! - Only rendered organization nodes can be toggled.
//! - Deferred effects for nodes that left the tree, or are no longer rendered,
//!   do nothing.

use std::time::Duration;

use tracing::{debug, instrument, trace};

use crate::application::render::RenderTree;
use crate::application::scheduler::EffectScheduler;
use crate::application::state::{NodeState, StateStore};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{HierarchyBuilder, OrgTierRecord, OrgTree};
use crate::infrastructure::traits::{LayoutProbe, Rect, ScrollBehavior, ScrollCommand, Viewport};

/// How long a toggled node stays highlighted.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerOptions {
    pub scroll_behavior: ScrollBehavior,
}

/// Result of a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub node_id: String,
    pub collapsed: bool,
    /// Virtual-clock instant the highlight ends unless toggled again
    pub highlight_until: Duration,
}

/// A node returning to `Normal` after its highlight window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightCleared {
    pub node_id: String,
    pub at: Duration,
}

pub struct TreeController {
    tree: OrgTree,
    store: StateStore,
    scheduler: EffectScheduler,
    builder: HierarchyBuilder,
    options: ControllerOptions,
}

impl TreeController {
    pub fn new(tree: OrgTree, options: ControllerOptions) -> Self {
        let store = StateStore::seed(&tree);
        Self {
            tree,
            store,
            scheduler: EffectScheduler::new(),
            builder: HierarchyBuilder::new(),
            options,
        }
    }

    pub fn from_records(records: &[OrgTierRecord], options: ControllerOptions) -> ApplicationResult<Self> {
        let mut builder = HierarchyBuilder::new();
        let tree = builder.build(records)?;
        let mut controller = Self::new(tree, options);
        controller.builder = builder;
        Ok(controller)
    }

    pub fn tree(&self) -> &OrgTree {
        &self.tree
    }

    pub fn state(&self, node_id: &str) -> Option<&NodeState> {
        self.store.get(node_id)
    }

    pub fn is_collapsed(&self, node_id: &str) -> Option<bool> {
        self.store.is_collapsed(node_id)
    }

    pub fn is_highlighted(&self, node_id: &str) -> Option<bool> {
        self.store.is_highlighted(node_id)
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_timers()
    }

    pub fn pending_frames(&self) -> usize {
        self.scheduler.pending_frames()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Renderable view over the current tree and state.
    pub fn render(&self) -> RenderTree<'_> {
        RenderTree::new(&self.tree, &self.store)
    }

    /// Flip a rendered node between expanded and collapsed.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle(&mut self, node_id: &str) -> ApplicationResult<ToggleOutcome> {
        let node = self
            .tree
            .find(node_id)
            .ok_or_else(|| ApplicationError::UnknownNode(node_id.to_string()))?;
        if node.is_account() {
            return Err(ApplicationError::NotToggleable(node_id.to_string()));
        }
        if !self.is_rendered(node_id) {
            return Err(ApplicationError::NotRendered(node_id.to_string()));
        }

        let deadline = self.scheduler.schedule_clear(node_id, HIGHLIGHT_DURATION);
        let state = self
            .store
            .get_mut(node_id)
            .ok_or_else(|| ApplicationError::UnknownNode(node_id.to_string()))?;
        state.collapsed = !state.collapsed;
        let highlight_until = state.highlight_until.map_or(deadline, |until| until.max(deadline));
        state.highlight_until = Some(highlight_until);
        let collapsed = state.collapsed;

        self.scheduler.request_frame(node_id);
        self.persist(node_id)?;

        debug!(
            "toggled {} -> {}",
            node_id,
            if collapsed { "collapsed" } else { "expanded" }
        );
        Ok(ToggleOutcome {
            node_id: node_id.to_string(),
            collapsed,
            highlight_until,
        })
    }

    /// Write the store's collapse flag back onto the tree node.
    pub fn persist(&mut self, node_id: &str) -> ApplicationResult<()> {
        let collapsed = self
            .store
            .is_collapsed(node_id)
            .ok_or_else(|| ApplicationError::UnknownNode(node_id.to_string()))?;
        self.tree.set_collapsed(node_id, collapsed)?;
        Ok(())
    }

    /// Advance the virtual clock, firing due highlight timers.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<HighlightCleared> {
        let mut cleared = Vec::new();
        for timer in self.scheduler.advance(elapsed) {
            let Some(state) = self.store.get_mut(&timer.node_id) else {
                debug!("highlight timer for removed node {}, ignoring", timer.node_id);
                continue;
            };
            match state.highlight_until {
                Some(until) if timer.deadline >= until => {
                    state.highlight_until = None;
                    cleared.push(HighlightCleared {
                        node_id: timer.node_id,
                        at: timer.deadline,
                    });
                }
                Some(until) => trace!("{} stays highlighted until {:?}", timer.node_id, until),
                None => {}
            }
        }
        cleared
    }

    /// Run next-frame effects once layout reflects the latest toggles.
    ///
    /// Each toggled node still in the rendered tree is centred in the
    /// viewport. A node without a bounding box, or with an empty one, is
    /// skipped.
    ///
    /// `layout` boxes are relative to the scroll position at frame start, so
    /// every target is computed from that position, not from the viewport as
    /// moved by earlier commands of the same frame.
    #[instrument(level = "debug", skip_all)]
    pub fn run_frame(&mut self, layout: &dyn LayoutProbe, viewport: &mut dyn Viewport) -> Vec<ScrollCommand> {
        let scroll = viewport.scroll_position();
        let size = viewport.size();
        let mut commands = Vec::new();
        for node_id in self.scheduler.take_frame() {
            if !self.is_rendered(&node_id) {
                debug!("{} is not rendered, skipping centering", node_id);
                continue;
            }
            let Some(rect) = layout.bounding_box(&node_id).filter(|r| !r.is_empty()) else {
                debug!("no bounding box for {} yet, skipping centering", node_id);
                continue;
            };
            let command = center_on(
                &node_id,
                rect,
                scroll,
                size,
                self.options.scroll_behavior,
            );
            trace!("scroll to ({}, {})", command.left, command.top);
            viewport.scroll_to(&command);
            commands.push(command);
        }
        commands
    }

    /// Replace the tree with one built from `records`, keeping per-node state
    /// for ids present in both.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn rebuild(&mut self, records: &[OrgTierRecord]) -> ApplicationResult<()> {
        let tree = self.builder.build(records)?;
        self.store = StateStore::merge(&self.store, &tree);
        self.tree = tree;

        let ids: Vec<String> = self.tree.iter().map(|(_, node)| node.id.clone()).collect();
        for id in &ids {
            self.persist(id)?;
        }
        debug!("rebuilt chart with {} nodes", ids.len());
        Ok(())
    }

    /// Expand every organization node. No highlight, no centering.
    pub fn expand_all(&mut self) -> ApplicationResult<()> {
        self.set_all(|_| false)
    }

    /// Back to the initial view: root expanded, everything else collapsed.
    pub fn collapse_all(&mut self) -> ApplicationResult<()> {
        let root_id = self.tree.root_node().id.clone();
        self.set_all(|id| id != root_id)
    }

    fn set_all<F>(&mut self, collapsed_for: F) -> ApplicationResult<()>
    where
        F: Fn(&str) -> bool,
    {
        let ids: Vec<String> = self
            .tree
            .iter()
            .filter(|(_, node)| !node.is_account())
            .map(|(_, node)| node.id.clone())
            .collect();
        for id in &ids {
            if let Some(state) = self.store.get_mut(id) {
                state.collapsed = collapsed_for(id.as_str());
            }
            self.persist(id)?;
        }
        Ok(())
    }

    /// Context menu hook point. Menu actions are not part of the chart core.
    pub fn on_menu(&self, node_id: &str) {
        debug!("menu requested for {}", node_id);
    }

    fn is_rendered(&self, node_id: &str) -> bool {
        self.store.contains(node_id)
            && self.tree.is_rendered_with(node_id, |parent| {
                self.store.is_collapsed(&parent.id).unwrap_or(true)
            })
    }
}

/// Scroll target that puts the centre of `rect` at the centre of the viewport.
///
/// `rect` is viewport-relative, `scroll` and the result are document offsets.
pub fn center_on(
    node_id: &str,
    rect: Rect,
    scroll: (f64, f64),
    viewport_size: (f64, f64),
    behavior: ScrollBehavior,
) -> ScrollCommand {
    let (center_x, center_y) = rect.center();
    ScrollCommand {
        node_id: node_id.to_string(),
        left: (scroll.0 + center_x - viewport_size.0 / 2.0).max(0.0),
        top: (scroll.1 + center_y - viewport_size.1 / 2.0).max(0.0),
        behavior,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_rect_right_of_center_when_centering_then_scrolls_right() {
        let command = center_on(
            "n",
            Rect::new(700.0, 300.0, 200.0, 100.0),
            (100.0, 50.0),
            (1000.0, 800.0),
            ScrollBehavior::Smooth,
        );
        // centre (800, 350) -> 100 + 800 - 500, 50 + 350 - 400
        assert_eq!(command.left, 400.0);
        assert_eq!(command.top, 0.0);
        assert_eq!(command.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn given_rect_near_origin_when_centering_then_clamps_at_zero() {
        let command = center_on(
            "n",
            Rect::new(0.0, 0.0, 10.0, 10.0),
            (0.0, 0.0),
            (1000.0, 800.0),
            ScrollBehavior::Instant,
        );
        assert_eq!((command.left, command.top), (0.0, 0.0));
    }
}
