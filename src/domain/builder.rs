//! Builds the arena form of a navigation manifest.

use generational_arena::Index;
use tracing::debug;

use crate::domain::arena::{NavArena, NodeData};
use crate::domain::entities::{Entry, Manifest};
use crate::domain::error::DomainError;

/// Flattens an entry forest into a [`NavArena`].
#[derive(Debug, Default)]
pub struct NavBuilder;

impl NavBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Non-recursive build using an explicit stack.
    ///
    /// Children are pushed in reverse so they pop, and are inserted, in authoring order.
    pub fn build(&self, manifest: &Manifest) -> NavArena {
        let mut arena = NavArena::new();
        let mut stack: Vec<(&Entry, Option<Index>)> =
            manifest.entries.iter().rev().map(|e| (e, None)).collect();

        while let Some((entry, parent_idx)) = stack.pop() {
            let current_idx = arena.insert_node(NodeData::from(entry), parent_idx);
            for child in entry.children.iter().rev() {
                stack.push((child, Some(current_idx)));
            }
        }

        debug!(
            "built navigation arena: {} nodes, {} roots",
            arena.len(),
            arena.roots().len()
        );
        arena
    }
}

/// Every root-to-leaf branch as a list of hrefs.
///
/// A corrupted parent chain fails with [`DomainError::CycleDetected`].
pub fn create_branches(arena: &NavArena) -> Result<Vec<Vec<String>>, DomainError> {
    arena
        .iter()
        .filter(|(_, node)| node.children.is_empty())
        .map(|(idx, node)| {
            let mut branch: Vec<String> = arena
                .ancestors(idx)?
                .into_iter()
                .rev()
                .filter_map(|a| arena.get_node(a).map(|n| n.data.href.clone()))
                .collect();
            branch.push(node.data.href.clone());
            Ok(branch)
        })
        .collect()
}
