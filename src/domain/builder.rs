//! Hierarchy builder: flat parent-pointer records into a rooted org chart.

use std::collections::{HashMap, HashSet, VecDeque};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::arena::{NodeKind, OrgNode, OrgTree};
use crate::domain::error::{MalformedHierarchyError, TreeResult};
use crate::domain::record::OrgTierRecord;

/// Assembles [`OrgTree`]s from organization tier records.
///
/// Three passes over the record set, each O(n) with an id index:
/// materialize nodes, link every node under its parent, then move
/// subordinate-less nodes from their parent's `children` to `accounts`.
pub struct HierarchyBuilder {
    id_index: HashMap<String, Index>,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self {
            id_index: HashMap::new(),
        }
    }

    /// Build the chart. Deterministic: the same input yields the same
    /// node order and classification.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(&mut self, records: &[OrgTierRecord]) -> TreeResult<OrgTree> {
        self.id_index.clear();
        if records.is_empty() {
            return Err(MalformedHierarchyError::Empty.into());
        }

        let mut arena = Arena::with_capacity(records.len());
        let (order, root) = self.materialize(records, &mut arena)?;
        self.link(&order, root, &mut arena)?;
        Self::check_reachable(&order, root, &arena)?;
        let accounts = Self::reclassify(&order, root, &mut arena);

        if let Some(root_node) = arena.get_mut(root) {
            root_node.collapsed = false;
        }
        debug!(
            "built chart: {} nodes, {} accounts",
            order.len(),
            accounts
        );

        Ok(OrgTree::from_parts(
            arena,
            root,
            std::mem::take(&mut self.id_index),
        ))
    }

    /// Pass 1: one node per record; returns arena indices in input order
    /// and the single root.
    fn materialize(
        &mut self,
        records: &[OrgTierRecord],
        arena: &mut Arena<OrgNode>,
    ) -> TreeResult<(Vec<Index>, Index)> {
        let mut order = Vec::with_capacity(records.len());
        let mut roots = Vec::new();

        for record in records {
            if self.id_index.contains_key(&record.id) {
                return Err(MalformedHierarchyError::DuplicateId(record.id.clone()).into());
            }
            if record.parent_id.as_deref() == Some(record.id.as_str()) {
                return Err(MalformedHierarchyError::SelfParent(record.id.clone()).into());
            }

            let idx = arena.insert(OrgNode::materialize(record));
            self.id_index.insert(record.id.clone(), idx);
            order.push(idx);
            if record.is_root() {
                roots.push(idx);
            }
        }

        let root = match roots.as_slice() {
            [] => return Err(MalformedHierarchyError::NoRoot.into()),
            [root] => *root,
            many => {
                let ids = many.iter().map(|&idx| arena[idx].id.clone()).collect();
                return Err(MalformedHierarchyError::MultipleRoots(ids).into());
            }
        };
        Ok((order, root))
    }

    /// Pass 2: every non-root node starts out as an organization child.
    fn link(&self, order: &[Index], root: Index, arena: &mut Arena<OrgNode>) -> TreeResult<()> {
        for &idx in order {
            if idx == root {
                continue;
            }
            let node = &arena[idx];
            let Some(parent_id) = node.parent_id.as_deref() else {
                continue;
            };
            let parent_idx = *self.id_index.get(parent_id).ok_or_else(|| {
                MalformedHierarchyError::DanglingParent {
                    id: node.id.clone(),
                    parent_id: parent_id.to_string(),
                }
            })?;

            arena[idx].parent = Some(parent_idx);
            arena[parent_idx].children.push(idx);
        }
        Ok(())
    }

    /// Nodes caught in a parent cycle are linked but detached from the root.
    fn check_reachable(order: &[Index], root: Index, arena: &Arena<OrgNode>) -> TreeResult<()> {
        let mut seen = HashSet::with_capacity(order.len());
        let mut queue = VecDeque::from([root]);
        while let Some(idx) = queue.pop_front() {
            if seen.insert(idx) {
                queue.extend(arena[idx].children.iter().copied());
            }
        }

        if seen.len() == order.len() {
            return Ok(());
        }
        let ids = order
            .iter()
            .filter(|idx| !seen.contains(*idx))
            .map(|&idx| arena[idx].id.clone())
            .collect();
        Err(MalformedHierarchyError::Unreachable { ids }.into())
    }

    /// Pass 3: subordinate-less nodes become accounts of their parent.
    ///
    /// Leaves are decided from the linked state before any node moves, so
    /// the result does not depend on record order. Returns the account count.
    fn reclassify(order: &[Index], root: Index, arena: &mut Arena<OrgNode>) -> usize {
        let leaves: Vec<Index> = order
            .iter()
            .copied()
            .filter(|&idx| idx != root && arena[idx].children.is_empty())
            .collect();

        for &leaf in &leaves {
            arena[leaf].kind = NodeKind::Account;
            if let Some(parent_idx) = arena[leaf].parent {
                arena[parent_idx].accounts.push(leaf);
            }
        }

        for &idx in order {
            let children = std::mem::take(&mut arena[idx].children);
            let kept: Vec<Index> = children
                .into_iter()
                .filter(|&child| arena[child].kind == NodeKind::Organization)
                .collect();
            arena[idx].children = kept;
        }

        leaves.len()
    }
}

/// Build a chart with a fresh builder.
pub fn build(records: &[OrgTierRecord]) -> TreeResult<OrgTree> {
    HierarchyBuilder::new().build(records)
}
