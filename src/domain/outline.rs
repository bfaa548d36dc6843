/*
Rendering of navigation forests as terminal trees.

termtree::Tree has a single root, so a forest with several top-level entries is
rendered as one tree per root.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::NavArena;
use crate::domain::entities::{Entry, Manifest};

pub trait ToOutline {
    fn to_outline(&self) -> Vec<Tree<String>>;
}

fn label(title: &str, href: &str) -> String {
    format!("{title} [{href}]")
}

fn entry_tree(entry: &Entry) -> Tree<String> {
    let leaves: Vec<_> = entry.children.iter().map(entry_tree).collect();
    Tree::new(label(&entry.title, &entry.href)).with_leaves(leaves)
}

impl ToOutline for Entry {
    fn to_outline(&self) -> Vec<Tree<String>> {
        vec![entry_tree(self)]
    }
}

impl ToOutline for Manifest {
    #[instrument(level = "debug", skip(self))]
    fn to_outline(&self) -> Vec<Tree<String>> {
        self.entries.iter().map(entry_tree).collect()
    }
}

impl ToOutline for NavArena {
    #[instrument(level = "debug", skip(self))]
    fn to_outline(&self) -> Vec<Tree<String>> {
        fn build_tree(arena: &NavArena, node_idx: Index) -> Option<Tree<String>> {
            let node = arena.get_node(node_idx)?;
            let mut tree = Tree::new(label(&node.data.title, &node.data.href));
            for &child_idx in &node.children {
                if let Some(child) = build_tree(arena, child_idx) {
                    tree.push(child);
                }
            }
            Some(tree)
        }

        self.roots()
            .iter()
            .filter_map(|&root| build_tree(self, root))
            .collect()
    }
}
