//! Render descriptors handed to the tree-layout renderer.
//!
//! A collapsed node yields no children at all: its subtree is pruned from the
//! render tree rather than hidden. An expanded node yields its accounts (as
//! terminal leaves) followed by its children (as subtrees).

use std::slice;

use generational_arena::Index;
use termtree::Tree;

use crate::application::controller::{ToggleOutcome, TreeController};
use crate::application::state::StateStore;
use crate::application::ApplicationResult;
use crate::config::DisplaySettings;
use crate::domain::{NodeVariant, OrgNode, OrgTree};

/// Widget a descriptor is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderForm {
    /// Chart root, wraps the whole tree
    Root,
    /// Organization card with a collapse affordance
    Branch,
    /// Terminal account card
    Account,
}

/// Subordinate counts shown on an organization card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub managers: usize,
    pub others: usize,
    /// Only shown while the card is collapsed
    pub visible: bool,
}

impl Badge {
    pub fn total(&self) -> usize {
        self.managers + self.others
    }

    pub fn tooltip(&self) -> String {
        format!("{} managers, {} others.", self.managers, self.others)
    }
}

/// What a card displays.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPayload<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub titles: &'a [String],
    pub tier_level: i32,
    pub badge: Option<Badge>,
}

/// Deferred `toggle()` for one node, detached from the render borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleHandle {
    node_id: String,
}

impl ToggleHandle {
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn fire(&self, controller: &mut TreeController) -> ApplicationResult<ToggleOutcome> {
        controller.toggle(&self.node_id)
    }
}

/// Read-only view of the tree with the controller's current state applied.
#[derive(Debug, Clone, Copy)]
pub struct RenderTree<'a> {
    tree: &'a OrgTree,
    store: &'a StateStore,
}

impl<'a> RenderTree<'a> {
    pub fn new(tree: &'a OrgTree, store: &'a StateStore) -> Self {
        Self { tree, store }
    }

    pub fn root(&self) -> RenderNode<'a> {
        RenderNode {
            tree: self.tree,
            store: self.store,
            node: self.tree.root_node(),
            form: RenderForm::Root,
        }
    }

    /// Every rendered descriptor with its depth, pre-order.
    pub fn walk(&self) -> Vec<(usize, RenderNode<'a>)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, self.root())];
        while let Some((depth, node)) = stack.pop() {
            let children: Vec<_> = node.children().collect();
            for child in children.into_iter().rev() {
                stack.push((depth + 1, child));
            }
            out.push((depth, node));
        }
        out
    }

    /// Ids of every rendered descriptor, pre-order.
    pub fn rendered_ids(&self) -> Vec<String> {
        self.walk()
            .into_iter()
            .map(|(_, node)| node.id().to_string())
            .collect()
    }
}

/// One renderable node.
#[derive(Debug, Clone, Copy)]
pub struct RenderNode<'a> {
    tree: &'a OrgTree,
    store: &'a StateStore,
    node: &'a OrgNode,
    form: RenderForm,
}

impl<'a> RenderNode<'a> {
    pub fn id(&self) -> &'a str {
        &self.node.id
    }

    pub fn form(&self) -> RenderForm {
        self.form
    }

    pub fn node(&self) -> &'a OrgNode {
        self.node
    }

    pub fn collapsed(&self) -> bool {
        self.store
            .is_collapsed(&self.node.id)
            .unwrap_or(self.node.collapsed)
    }

    pub fn highlighted(&self) -> bool {
        self.store.is_highlighted(&self.node.id).unwrap_or(false)
    }

    pub fn display(&self) -> DisplayPayload<'a> {
        let badge = match self.form {
            RenderForm::Account => None,
            RenderForm::Root | RenderForm::Branch => Some(Badge {
                managers: self.node.managers(),
                others: self.node.others(),
                visible: self.collapsed(),
            }),
        };
        DisplayPayload {
            title: &self.node.display_name,
            subtitle: &self.node.subtitle,
            titles: &self.node.titles,
            tier_level: self.node.tier_level,
            badge,
        }
    }

    /// Toggle callback; accounts have none.
    pub fn on_toggle(&self) -> Option<ToggleHandle> {
        match self.form {
            RenderForm::Account => None,
            RenderForm::Root | RenderForm::Branch => Some(ToggleHandle {
                node_id: self.node.id.clone(),
            }),
        }
    }

    /// Child descriptors. Lazy and finite; call again to restart.
    pub fn children(&self) -> RenderChildren<'a> {
        let pruned = self.form == RenderForm::Account || self.collapsed();
        let (accounts, children): (&'a [Index], &'a [Index]) = if pruned {
            (&[], &[])
        } else {
            (&self.node.accounts, &self.node.children)
        };
        RenderChildren {
            tree: self.tree,
            store: self.store,
            accounts: accounts.iter(),
            children: children.iter(),
        }
    }
}

pub struct RenderChildren<'a> {
    tree: &'a OrgTree,
    store: &'a StateStore,
    accounts: slice::Iter<'a, Index>,
    children: slice::Iter<'a, Index>,
}

impl<'a> Iterator for RenderChildren<'a> {
    type Item = RenderNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, form) = match self.accounts.next() {
            Some(&idx) => (idx, RenderForm::Account),
            None => (*self.children.next()?, RenderForm::Branch),
        };
        let node = self.tree.get(idx)?;
        Some(RenderNode {
            tree: self.tree,
            store: self.store,
            node,
            form,
        })
    }
}

/// Conversion into a printable terminal tree.
pub trait TreeNodeConvert {
    fn to_tree_string(&self, style: &DisplaySettings) -> Tree<String>;
}

impl TreeNodeConvert for RenderTree<'_> {
    fn to_tree_string(&self, style: &DisplaySettings) -> Tree<String> {
        fn build(node: RenderNode<'_>, style: &DisplaySettings) -> Tree<String> {
            let leaves: Vec<_> = node.children().map(|child| build(child, style)).collect();
            Tree::new(render_label(&node, style)).with_leaves(leaves)
        }
        build(self.root(), style)
    }
}

/// Full structure, ignoring collapse state.
impl TreeNodeConvert for OrgTree {
    fn to_tree_string(&self, style: &DisplaySettings) -> Tree<String> {
        fn build(tree: &OrgTree, idx: Index, style: &DisplaySettings) -> Tree<String> {
            let Some(node) = tree.get(idx) else {
                return Tree::new(String::new());
            };
            let mut out = Tree::new(structure_label(node, style));
            for &sub in node.accounts.iter().chain(node.children.iter()) {
                out.push(build(tree, sub, style));
            }
            out
        }
        build(self, self.root(), style)
    }
}

fn describe(node: &OrgNode, style: &DisplaySettings) -> String {
    let mut label = node.display_name.clone();
    if style.show_subtitle && !node.subtitle.is_empty() {
        label.push_str(&format!(" | {}", node.subtitle));
    }
    if style.show_titles && !node.titles.is_empty() {
        label.push_str(&format!(" [{}]", node.titles.join(", ")));
    }
    label
}

fn render_label(node: &RenderNode<'_>, style: &DisplaySettings) -> String {
    let base = describe(node.node(), style);
    let mut label = match node.form() {
        RenderForm::Account => format!("- {base}"),
        RenderForm::Root | RenderForm::Branch if node.collapsed() => format!("+ {base}"),
        RenderForm::Root | RenderForm::Branch => format!("v {base}"),
    };
    if let Some(badge) = node.display().badge {
        if style.show_badge && badge.visible && badge.total() > 0 {
            label.push_str(&format!(" ({})", badge.total()));
        }
    }
    if node.highlighted() {
        label.push_str(" *");
    }
    label
}

fn structure_label(node: &OrgNode, style: &DisplaySettings) -> String {
    let tag = match (node.variant, node.is_account()) {
        (NodeVariant::Root, _) => "root",
        (NodeVariant::Branch, false) => "org",
        (NodeVariant::Branch, true) => "account",
    };
    format!("{} <{}>", describe(node, style), tag)
}
