//! Leaf key path extraction.
//!
//! Every caller that needs "all keys of a locale" goes through [`Leaves`]:
//! the differ, the `keys` command and the MCP locale listing.

use indexmap::map::Iter;

use super::{
    key_path::KeyPath,
    tree::{LocaleTree, Node},
};

/// Depth-first, insertion-ordered iterator over the leaves of a tree.
///
/// Leaves are scalars and lists; mappings are descended into and never
/// yielded. The iterator is lazy and cheap to clone, and a fresh one can be
/// created from the same tree at any time.
#[derive(Clone)]
pub struct Leaves<'a> {
    stack: Vec<(KeyPath, Iter<'a, String, Node>)>,
}

impl<'a> Leaves<'a> {
    pub fn new(tree: &'a LocaleTree) -> Self {
        Self {
            stack: vec![(KeyPath::root(), tree.iter())],
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (KeyPath, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (prefix, entries) = self.stack.last_mut()?;
            match entries.next() {
                None => {
                    self.stack.pop();
                }
                Some((key, node)) => {
                    let path = prefix.child(key.as_str());
                    match node {
                        Node::Map(child) => self.stack.push((path, child.iter())),
                        leaf => return Some((path, leaf)),
                    }
                }
            }
        }
    }
}

impl LocaleTree {
    /// Iterate over `(path, leaf)` pairs.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self)
    }

    /// Iterate over leaf key paths only.
    pub fn leaf_paths(&self) -> impl Iterator<Item = KeyPath> + Clone + '_ {
        self.leaves().map(|(path, _)| path)
    }
}
