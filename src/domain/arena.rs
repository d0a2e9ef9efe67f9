use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::record::OrgTierRecord;

/// Classification of a node derived from its subordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Has at least one subordinate tier
    Organization,
    /// Terminal leaf: no subordinate tiers
    Account,
}

/// Wrapper a node is rendered with, fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeVariant {
    Root,
    Branch,
}

/// Node in the assembled organization chart.
#[derive(Debug, Clone)]
pub struct OrgNode {
    pub id: String,
    /// Owner's given and family name
    pub display_name: String,
    /// Tier name shown under the owner
    pub subtitle: String,
    pub tier_level: i32,
    /// Owner's role titles
    pub titles: Vec<String>,
    pub kind: NodeKind,
    pub variant: NodeVariant,
    pub parent_id: Option<String>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Subordinates that have subordinates of their own, in input order
    pub children: Vec<Index>,
    /// Subordinates without subordinates, in input order
    pub accounts: Vec<Index>,
    /// Persisted collapse flag; written back by the interaction controller
    pub collapsed: bool,
}

impl OrgNode {
    /// Fresh, unlinked node for a record. Starts collapsed.
    pub fn materialize(record: &OrgTierRecord) -> Self {
        Self {
            id: record.id.clone(),
            display_name: record.owner.display_name(),
            subtitle: record.name.clone(),
            tier_level: record.tier_level,
            titles: record.owner.titles.clone(),
            kind: NodeKind::Organization,
            variant: if record.is_root() {
                NodeVariant::Root
            } else {
                NodeVariant::Branch
            },
            parent_id: record.parent_id.clone(),
            parent: None,
            children: Vec::new(),
            accounts: Vec::new(),
            collapsed: true,
        }
    }

    pub fn is_root(&self) -> bool {
        self.variant == NodeVariant::Root
    }

    pub fn is_account(&self) -> bool {
        self.kind == NodeKind::Account
    }

    /// Number of subordinates that are organizations ("managers").
    pub fn managers(&self) -> usize {
        self.children.len()
    }

    /// Number of subordinates that are accounts ("others").
    pub fn others(&self) -> usize {
        self.accounts.len()
    }

    pub fn subordinate_count(&self) -> usize {
        self.children.len() + self.accounts.len()
    }
}

impl fmt::Display for OrgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subtitle.is_empty() {
            write!(f, "{}", self.display_name)
        } else {
            write!(f, "{} ({})", self.display_name, self.subtitle)
        }
    }
}

/// Summary counts for a built chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartStats {
    pub organizations: usize,
    pub accounts: usize,
    pub depth: usize,
}

/// Arena-based organization chart.
///
/// Produced by [`crate::domain::HierarchyBuilder`]; always has exactly one root.
/// Structure is immutable after construction, only `collapsed` flags change.
#[derive(Debug, Clone)]
pub struct OrgTree {
    arena: Arena<OrgNode>,
    root: Index,
    by_id: HashMap<String, Index>,
}

impl OrgTree {
    pub(crate) fn from_parts(arena: Arena<OrgNode>, root: Index, by_id: HashMap<String, Index>) -> Self {
        Self { arena, root, by_id }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &OrgNode {
        &self.arena[self.root]
    }

    pub fn get(&self, idx: Index) -> Option<&OrgNode> {
        self.arena.get(idx)
    }

    pub fn index_of(&self, id: &str) -> Option<Index> {
        self.by_id.get(id).copied()
    }

    pub fn find(&self, id: &str) -> Option<&OrgNode> {
        self.index_of(id).and_then(|idx| self.arena.get(idx))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Organization subordinates of a node, in order.
    pub fn children(&self, idx: Index) -> impl Iterator<Item = &OrgNode> + '_ {
        self.get(idx)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(move |&child| self.arena.get(child))
    }

    /// Account subordinates of a node, in order.
    pub fn accounts(&self, idx: Index) -> impl Iterator<Item = &OrgNode> + '_ {
        self.get(idx)
            .into_iter()
            .flat_map(|node| node.accounts.iter())
            .filter_map(move |&account| self.arena.get(account))
    }

    /// Writes a collapse flag onto the node with the given id.
    #[instrument(level = "trace", skip(self))]
    pub fn set_collapsed(&mut self, id: &str, collapsed: bool) -> TreeResult<()> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| DomainError::NodeNotFound(id.to_string()))?;
        let node = self
            .arena
            .get_mut(idx)
            .ok_or_else(|| DomainError::NodeNotFound(id.to_string()))?;
        node.collapsed = collapsed;
        Ok(())
    }

    /// True when every ancestor of the node is expanded, i.e. the node
    /// is part of the rendered tree given the persisted flags.
    pub fn is_rendered_with<F>(&self, id: &str, is_collapsed: F) -> bool
    where
        F: Fn(&OrgNode) -> bool,
    {
        let Some(mut current) = self.find(id) else {
            return false;
        };
        while let Some(parent) = current.parent.and_then(|p| self.arena.get(p)) {
            if is_collapsed(parent) {
                return false;
            }
            current = parent;
        }
        true
    }

    /// Pre-order iteration in render order: accounts before children.
    pub fn iter(&self) -> OrgTreeIterator<'_> {
        OrgTreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get(node_idx) {
            1 + node
                .children
                .iter()
                .chain(node.accounts.iter())
                .map(|&sub| self.calculate_depth(sub))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Ids of all account nodes in render order.
    pub fn account_ids(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_account())
            .map(|(_, node)| node.id.clone())
            .collect()
    }

    pub fn stats(&self) -> ChartStats {
        let accounts = self.iter().filter(|(_, node)| node.is_account()).count();
        ChartStats {
            organizations: self.len() - accounts,
            accounts,
            depth: self.depth(),
        }
    }
}

pub struct OrgTreeIterator<'a> {
    tree: &'a OrgTree,
    stack: Vec<Index>,
}

impl<'a> OrgTreeIterator<'a> {
    fn new(tree: &'a OrgTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a> Iterator for OrgTreeIterator<'a> {
    type Item = (Index, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get(current_idx)?;
        // Reverse push so accounts come out first, then children, left to right
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        for &account in node.accounts.iter().rev() {
            self.stack.push(account);
        }
        Some((current_idx, node))
    }
}
