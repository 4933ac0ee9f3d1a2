//! Arena-backed menu tree addressed by item key.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::item::{sort_menu, MenuItem};
use crate::domain::link::Link;

/// Tree node stored in the arena.
#[derive(Debug, Clone)]
pub struct MenuNode {
    /// Key, unique across the whole tree
    pub key: String,
    /// Link owned by this node
    pub link: Link,
    /// Sibling ordering weight, lower first
    pub weight: i64,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in insertion order
    pub children: Vec<Index>,
}

/// One menu tree.
///
/// Nodes live in a generational arena; `index` maps every key to its node so
/// lookups anywhere in the tree are O(1), and `roots` keeps top-level
/// insertion order. Every mutation validates before it touches the arena, so a
/// failed call leaves the tree unchanged.
#[derive(Debug, Clone)]
pub struct MenuArena {
    arena: Arena<MenuNode>,
    index: HashMap<String, Index>,
    roots: Vec<Index>,
}

impl Default for MenuArena {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            index: HashMap::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a node under `parent_key`, or as a root when `None`.
    ///
    /// # Errors
    /// - `DuplicateKey` if `key` exists anywhere in the tree
    /// - `EmptyAnchor` if the link has no anchor text
    /// - `ParentNotFound` if `parent_key` is not in the tree
    #[instrument(level = "trace", skip(self, link))]
    pub fn insert(
        &mut self,
        key: &str,
        link: Link,
        parent_key: Option<&str>,
        weight: i64,
    ) -> DomainResult<Index> {
        if self.index.contains_key(key) {
            return Err(DomainError::DuplicateKey(key.to_string()));
        }
        if link.anchor().is_empty() {
            return Err(DomainError::EmptyAnchor(key.to_string()));
        }
        let parent = match parent_key {
            None => None,
            Some(parent_key) => Some(*self.index.get(parent_key).ok_or_else(|| {
                DomainError::ParentNotFound {
                    key: key.to_string(),
                    parent: parent_key.to_string(),
                }
            })?),
        };

        let node_idx = self.arena.insert(MenuNode {
            key: key.to_string(),
            link,
            weight,
            parent,
            children: Vec::new(),
        });

        match parent {
            Some(parent_idx) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.children.push(node_idx);
                }
            }
            None => self.roots.push(node_idx),
        }
        self.index.insert(key.to_string(), node_idx);
        trace!(key, "inserted node");

        Ok(node_idx)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&MenuNode> {
        self.index.get(key).and_then(|&idx| self.arena.get(idx))
    }

    pub fn link(&self, key: &str) -> Option<&Link> {
        self.get(key).map(|node| &node.link)
    }

    /// Key of the node's parent, None for roots and unknown keys.
    pub fn parent_key(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|node| node.parent)
            .and_then(|idx| self.arena.get(idx))
            .map(|parent| parent.key.as_str())
    }

    /// Remove `key` and its whole subtree.
    ///
    /// Absent keys are a no-op. Returns the removed keys in pre-order.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, key: &str) -> Vec<String> {
        let Some(node_idx) = self.index.get(key).copied() else {
            return Vec::new();
        };
        let doomed: Vec<Index> = self.iter_from(node_idx).map(|(idx, _)| idx).collect();

        match self.arena.get(node_idx).and_then(|node| node.parent) {
            Some(parent_idx) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.children.retain(|&c| c != node_idx);
                }
            }
            None => self.roots.retain(|&r| r != node_idx),
        }

        let mut removed = Vec::with_capacity(doomed.len());
        for idx in doomed {
            if let Some(node) = self.arena.remove(idx) {
                self.index.remove(&node.key);
                removed.push(node.key);
            }
        }
        trace!(key, count = removed.len(), "removed subtree");
        removed
    }

    /// Replace the node's link with one derived from the current link.
    pub fn update_link<F>(&mut self, key: &str, derive: F) -> DomainResult<()>
    where
        F: FnOnce(&Link) -> Link,
    {
        let node = self
            .index
            .get(key)
            .and_then(|&idx| self.arena.get_mut(idx))
            .ok_or_else(|| DomainError::KeyNotFound(key.to_string()))?;
        node.link = derive(&node.link);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Owned copy of the tree in insertion order.
    pub fn snapshot(&self) -> Vec<MenuItem> {
        self.snapshot_level(&self.roots)
    }

    fn snapshot_level(&self, level: &[Index]) -> Vec<MenuItem> {
        level
            .iter()
            .filter_map(|&idx| self.arena.get(idx))
            .map(|node| MenuItem {
                key: node.key.clone(),
                link: node.link.clone(),
                weight: node.weight,
                children: self.snapshot_level(&node.children),
            })
            .collect()
    }

    /// Owned copy of the tree with every level sorted by weight.
    ///
    /// Stored order is untouched, so repeated calls yield equal results.
    #[instrument(level = "trace", skip(self))]
    pub fn build(&self) -> Vec<MenuItem> {
        sort_menu(self.snapshot())
    }

    /// Pre-order traversal of the subtree rooted at `start`.
    fn iter_from(&self, start: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, vec![start])
    }
}

struct TreeIterator<'a> {
    tree: &'a MenuArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a MenuArena, stack: Vec<Index>) -> Self {
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a MenuNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuArena {
        let mut tree = MenuArena::new();
        tree.insert("home", Link::new("/", "Home"), None, 50).unwrap();
        tree.insert("about", Link::new("/about", "About"), None, 50).unwrap();
        tree.insert("team", Link::new("/team", "Team"), Some("about"), 50)
            .unwrap();
        tree.insert("jobs", Link::new("/jobs", "Jobs"), Some("team"), 50)
            .unwrap();
        tree
    }

    #[test]
    fn given_tree_when_snapshot_then_keeps_insertion_order() {
        let tree = sample();
        let roots: Vec<_> = tree.snapshot().into_iter().map(|i| i.key).collect();
        assert_eq!(roots, ["home", "about"]);
        assert_eq!(tree.parent_key("jobs"), Some("team"));
        assert_eq!(tree.parent_key("home"), None);
    }

    #[test]
    fn given_nested_key_when_insert_duplicate_then_rejects_at_any_level() {
        let mut tree = sample();
        let result = tree.insert("jobs", Link::new("/x", "X"), None, 10);
        assert_eq!(result.unwrap_err(), DomainError::DuplicateKey("jobs".into()));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_missing_parent_when_insert_then_fails_without_change() {
        let mut tree = sample();
        let result = tree.insert("x", Link::new("/x", "X"), Some("nope"), 50);
        assert!(matches!(result, Err(DomainError::ParentNotFound { .. })));
        assert!(!tree.contains("x"));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_empty_anchor_when_insert_then_fails() {
        let mut tree = MenuArena::new();
        let result = tree.insert("x", Link::new("/x", ""), None, 50);
        assert_eq!(result.unwrap_err(), DomainError::EmptyAnchor("x".into()));
        assert!(tree.is_empty());
    }

    #[test]
    fn given_subtree_when_remove_then_descendants_are_gone() {
        let mut tree = sample();
        let removed = tree.remove("about");
        assert_eq!(removed, ["about", "team", "jobs"]);
        assert!(!tree.contains("team"));
        assert!(!tree.contains("jobs"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.snapshot().len(), 1);
    }

    #[test]
    fn given_absent_key_when_remove_then_noop() {
        let mut tree = sample();
        assert!(tree.remove("nope").is_empty());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_removed_key_when_reinserted_then_accepted() {
        let mut tree = sample();
        tree.remove("team");
        tree.insert("team", Link::new("/t", "T"), Some("home"), 50)
            .unwrap();
        assert_eq!(tree.parent_key("team"), Some("home"));
    }

    #[test]
    fn given_unknown_key_when_update_link_then_key_not_found() {
        let mut tree = sample();
        let result = tree.update_link("nope", |l| l.clone());
        assert_eq!(result.unwrap_err(), DomainError::KeyNotFound("nope".into()));
    }
}
