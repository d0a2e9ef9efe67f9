//! Per-node interaction state, indexed by node id and kept apart from the tree.

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::OrgTree;

/// Interaction state of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeState {
    pub collapsed: bool,
    /// Virtual-clock instant at which the latest highlight window ends
    pub highlight_until: Option<Duration>,
}

impl NodeState {
    pub fn highlighted(&self) -> bool {
        self.highlight_until.is_some()
    }
}

/// id -> [`NodeState`] store owned by the tree controller.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    states: HashMap<String, NodeState>,
}

impl StateStore {
    /// Initial state taken from the persisted flags of a freshly built tree.
    pub fn seed(tree: &OrgTree) -> Self {
        let states = tree
            .iter()
            .map(|(_, node)| {
                (
                    node.id.clone(),
                    NodeState {
                        collapsed: node.collapsed,
                        highlight_until: None,
                    },
                )
            })
            .collect();
        Self { states }
    }

    /// State for a rebuilt tree: nodes whose id survives keep their prior
    /// state, new nodes start from the tree's flags, vanished ids are dropped.
    pub fn merge(prior: &StateStore, tree: &OrgTree) -> Self {
        let states = tree
            .iter()
            .map(|(_, node)| {
                let state = prior.get(&node.id).copied().unwrap_or(NodeState {
                    collapsed: node.collapsed,
                    highlight_until: None,
                });
                (node.id.clone(), state)
            })
            .collect();
        Self { states }
    }

    pub fn get(&self, id: &str) -> Option<&NodeState> {
        self.states.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut NodeState> {
        self.states.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.states.contains_key(id)
    }

    pub fn is_collapsed(&self, id: &str) -> Option<bool> {
        self.get(id).map(|state| state.collapsed)
    }

    pub fn is_highlighted(&self, id: &str) -> Option<bool> {
        self.get(id).map(NodeState::highlighted)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &NodeState)> {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build, OrgTierRecord, Owner};

    fn tree(ids: &[(&str, Option<&str>)]) -> OrgTree {
        let records: Vec<_> = ids
            .iter()
            .map(|(id, parent)| OrgTierRecord::new(*id, "", Owner::new("G", *id), *parent))
            .collect();
        build(&records).unwrap()
    }

    #[test]
    fn given_built_tree_when_seeding_then_mirrors_collapsed_flags() {
        let store = StateStore::seed(&tree(&[("1", None), ("2", Some("1"))]));
        assert_eq!(store.is_collapsed("1"), Some(false));
        assert_eq!(store.is_collapsed("2"), Some(true));
        assert_eq!(store.is_highlighted("2"), Some(false));
    }

    #[test]
    fn given_prior_state_when_merging_then_keeps_surviving_ids_only() {
        let mut prior = StateStore::seed(&tree(&[("1", None), ("2", Some("1")), ("3", Some("1"))]));
        prior.get_mut("2").unwrap().collapsed = false;

        let merged = StateStore::merge(&prior, &tree(&[("1", None), ("2", Some("1")), ("4", Some("2"))]));

        assert_eq!(merged.is_collapsed("2"), Some(false));
        assert_eq!(merged.is_collapsed("4"), Some(true));
        assert!(!merged.contains("3"));
        assert_eq!(merged.len(), 3);
    }
}
