use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::entities::{join_route, Entry, Manifest};
use crate::domain::error::DomainError;

/// Data payload for arena nodes: an entry without its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub title: String,
    pub href: String,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub excerpt: Option<String>,
}

impl From<&Entry> for NodeData {
    fn from(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            href: entry.href.clone(),
            tags: entry.tags.clone(),
            keywords: entry.keywords.clone(),
            excerpt: entry.excerpt.clone(),
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.href)
    }
}

/// Node in the arena-based navigation forest.
#[derive(Debug)]
pub struct NavNode {
    /// Entry data for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for top-level nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in authoring order
    pub children: Vec<Index>,
}

/// Arena-based navigation forest with parent links.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Routes and ancestor chains are computed by walking parent links.
#[derive(Debug, Default)]
pub struct NavArena {
    arena: Arena<NavNode>,
    roots: Vec<Index>,
}

impl NavArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = NavNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&NavNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Hrefs of all leaf nodes (no children), left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.data.href.clone())
            .collect()
    }

    /// Parent chain from the immediate parent up to the root.
    ///
    /// Bounded by the node count, so a corrupted parent chain cannot loop forever.
    pub fn ancestors(&self, idx: Index) -> Result<Vec<Index>, DomainError> {
        let mut chain = Vec::new();
        let mut current = self
            .get_node(idx)
            .ok_or_else(|| DomainError::InvalidNode(format!("{idx:?}")))?
            .parent;
        while let Some(parent_idx) = current {
            if parent_idx == idx || chain.len() > self.arena.len() {
                return Err(DomainError::CycleDetected(self.describe(idx)));
            }
            chain.push(parent_idx);
            current = self
                .get_node(parent_idx)
                .ok_or_else(|| DomainError::InvalidNode(format!("{parent_idx:?}")))?
                .parent;
        }
        Ok(chain)
    }

    /// Full route of a node: base path joined with the hrefs from its root.
    pub fn route(&self, idx: Index, base: &str) -> Result<String, DomainError> {
        let mut hrefs: Vec<&str> = Vec::new();
        for ancestor in self.ancestors(idx)?.into_iter().rev() {
            if let Some(node) = self.get_node(ancestor) {
                hrefs.push(node.data.href.as_str());
            }
        }
        if let Some(node) = self.get_node(idx) {
            hrefs.push(node.data.href.as_str());
        }
        Ok(join_route(base, &hrefs))
    }

    /// Find a node by its `/`-separated href path (base path not included).
    pub fn find_route(&self, route: &str) -> Option<Index> {
        let mut candidates = self.roots.as_slice();
        let mut found = None;
        for segment in route.split('/').filter(|s| !s.is_empty()) {
            let idx = candidates.iter().copied().find(|&c| {
                self.get_node(c)
                    .map(|n| n.data.href == segment)
                    .unwrap_or(false)
            })?;
            candidates = self.get_node(idx).map(|n| n.children.as_slice())?;
            found = Some(idx);
        }
        found
    }

    /// Move `node` (with its subtree) under `new_parent`, appending it as the last child.
    ///
    /// `None` makes the node a top-level entry. Refuses to move a node below itself.
    #[instrument(level = "debug", skip(self))]
    pub fn reparent(&mut self, node: Index, new_parent: Option<Index>) -> Result<(), DomainError> {
        let old_parent = self
            .get_node(node)
            .ok_or_else(|| DomainError::InvalidNode(format!("{node:?}")))?
            .parent;

        if let Some(target) = new_parent {
            if self.get_node(target).is_none() {
                return Err(DomainError::InvalidNode(format!("{target:?}")));
            }
            if target == node || self.ancestors(target)?.contains(&node) {
                return Err(DomainError::CycleDetected(self.describe(node)));
            }
        }

        match old_parent {
            Some(p) => {
                if let Some(parent) = self.arena.get_mut(p) {
                    parent.children.retain(|&c| c != node);
                }
            }
            None => self.roots.retain(|&r| r != node),
        }
        match new_parent {
            Some(p) => {
                if let Some(parent) = self.arena.get_mut(p) {
                    parent.children.push(node);
                }
            }
            None => self.roots.push(node),
        }
        if let Some(moved) = self.arena.get_mut(node) {
            moved.parent = new_parent;
        }
        Ok(())
    }

    /// Check that no node is its own ancestor and every node is reachable from a root.
    #[instrument(level = "debug", skip(self))]
    pub fn verify_acyclic(&self) -> Result<(), DomainError> {
        for (idx, _) in self.arena.iter() {
            self.ancestors(idx)?;
        }
        let reachable = self.iter().count();
        if reachable != self.arena.len() {
            return Err(DomainError::MalformedManifest {
                message: format!(
                    "{} of {} nodes unreachable from the roots",
                    self.arena.len() - reachable,
                    self.arena.len()
                ),
            });
        }
        Ok(())
    }

    /// Rebuild the owned entry forest.
    pub fn to_manifest(&self) -> Manifest {
        Manifest::new(
            self.roots
                .iter()
                .filter_map(|&root| self.to_entry(root))
                .collect(),
        )
    }

    fn to_entry(&self, idx: Index) -> Option<Entry> {
        let node = self.get_node(idx)?;
        Some(Entry {
            title: node.data.title.clone(),
            href: node.data.href.clone(),
            tags: node.data.tags.clone(),
            keywords: node.data.keywords.clone(),
            excerpt: node.data.excerpt.clone(),
            children: node
                .children
                .iter()
                .filter_map(|&c| self.to_entry(c))
                .collect(),
        })
    }

    fn describe(&self, idx: Index) -> String {
        self.get_node(idx)
            .map(|n| n.data.href.clone())
            .unwrap_or_else(|| format!("{idx:?}"))
    }
}

pub struct PreOrderIterator<'a> {
    arena: &'a NavArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a NavArena) -> Self {
        let stack = arena.roots().iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a NavNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
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

pub struct PostOrderIterator<'a> {
    arena: &'a NavArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a NavArena) -> Self {
        let stack = arena.roots().iter().rev().map(|&r| (r, false)).collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a NavNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::create_branches;

    fn node(href: &str) -> NodeData {
        NodeData::from(&Entry::new(href.to_uppercase(), href))
    }

    /// root -> grafana -> setup-alerts, with grafana's parent link bent back to its child
    fn corrupted() -> (NavArena, Index) {
        let mut arena = NavArena::new();
        let root = arena.insert_node(node("tutorials"), None);
        let grafana = arena.insert_node(node("grafana"), Some(root));
        let alerts = arena.insert_node(node("setup-alerts"), Some(grafana));
        if let Some(n) = arena.arena.get_mut(grafana) {
            n.parent = Some(alerts);
        }
        (arena, alerts)
    }

    #[test]
    fn given_bent_parent_chain_when_walking_ancestors_then_cycle_detected() {
        let (arena, alerts) = corrupted();
        assert!(matches!(
            arena.ancestors(alerts),
            Err(DomainError::CycleDetected(_))
        ));
        assert!(arena.verify_acyclic().is_err());
    }

    #[test]
    fn given_bent_parent_chain_when_creating_branches_then_error_is_propagated() {
        let (arena, _) = corrupted();
        assert_eq!(
            create_branches(&arena),
            Err(DomainError::CycleDetected("setup-alerts".to_string()))
        );
    }
}

