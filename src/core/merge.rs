//! Non-destructive deep merge of a flat patch into a locale tree.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::{
    key_path::{KeyPath, KeyPathError},
    tree::{LocaleTree, Node, ValueError},
};

/// An ordered list of `(path, value)` pairs to set on a tree.
///
/// Values are always leaves: pushing a mapping pushes one entry per leaf
/// underneath it, so an empty mapping pushes nothing. [`Patch::from_json`]
/// rejects empty mappings instead. Within one patch the last write wins, so pushing a path
/// drops earlier entries for the same path, its ancestors and its
/// descendants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    entries: Vec<(KeyPath, Node)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("invalid key path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: KeyPathError,
    },
    #[error("invalid value for '{path}': {source}")]
    InvalidValue {
        path: String,
        #[source]
        source: ValueError,
    },
    #[error("empty mapping at '{path}' sets no keys")]
    EmptyMapping { path: String },
    #[error("patch must be an object of paths to values or an array of [path, value] pairs")]
    Shape,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: KeyPath, value: impl Into<Node>) {
        match value.into() {
            Node::Map(tree) => {
                for (key, child) in tree.iter() {
                    self.push(path.child(key.as_str()), child.clone());
                }
            }
            leaf => {
                self.entries
                    .retain(|(existing, _)| !existing.starts_with(&path) && !path.starts_with(existing));
                self.entries.push((path, leaf));
            }
        }
    }

    pub fn entries(&self) -> &[(KeyPath, Node)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a patch from JSON: `{"nav.home": "Inicio"}` or
    /// `[["nav.home", "Inicio"]]`. Object order is preserved.
    pub fn from_json(value: &Value) -> Result<Self, PatchError> {
        let mut patch = Patch::new();
        match value {
            Value::Object(map) => {
                for (path, value) in map {
                    patch.push_json(path, value)?;
                }
            }
            Value::Array(pairs) => {
                for pair in pairs {
                    match pair.as_array().map(Vec::as_slice) {
                        Some([Value::String(path), value]) => patch.push_json(path, value)?,
                        _ => return Err(PatchError::Shape),
                    }
                }
            }
            _ => return Err(PatchError::Shape),
        }
        Ok(patch)
    }

    fn push_json(&mut self, path: &str, value: &Value) -> Result<(), PatchError> {
        let key_path = KeyPath::parse(path).map_err(|source| PatchError::InvalidPath {
            path: path.to_string(),
            source,
        })?;
        let node = Node::try_from(value).map_err(|source| PatchError::InvalidValue {
            path: path.to_string(),
            source,
        })?;
        if let Some(empty) = find_empty_mapping(&node, &key_path) {
            return Err(PatchError::EmptyMapping {
                path: empty.to_string(),
            });
        }
        self.push(key_path, node);
        Ok(())
    }
}

fn find_empty_mapping(node: &Node, path: &KeyPath) -> Option<KeyPath> {
    match node {
        Node::Map(tree) if tree.is_empty() => Some(path.clone()),
        Node::Map(tree) => tree
            .iter()
            .find_map(|(key, child)| find_empty_mapping(child, &path.child(key.as_str()))),
        _ => None,
    }
}

impl<P: Into<KeyPath>, V: Into<Node>> FromIterator<(P, V)> for Patch {
    fn from_iter<T: IntoIterator<Item = (P, V)>>(iter: T) -> Self {
        let mut patch = Patch::new();
        for (path, value) in iter {
            patch.push(path.into(), value);
        }
        patch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Added,
    Updated,
    Unchanged,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Updated => "updated",
            ChangeKind::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub path: KeyPath,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverrideKind {
    /// A scalar or list sat where the patch needed an intermediate mapping.
    ScalarReplaced,
    /// A mapping sat where the patch sets a leaf value.
    BranchReplaced,
}

/// A node the merge had to replace with a different kind of node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralOverride {
    /// Path of the replaced node.
    pub path: KeyPath,
    /// Patch entry that caused the replacement.
    pub patch_path: KeyPath,
    pub replaced: Node,
    pub kind: OverrideKind,
}

impl fmt::Display for StructuralOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OverrideKind::ScalarReplaced => write!(
                f,
                "'{}' holds a {} value but '{}' needs it to be a mapping",
                self.path,
                self.replaced.kind(),
                self.patch_path
            ),
            OverrideKind::BranchReplaced => write!(
                f,
                "'{}' is a mapping with {} leaves that would be replaced by a single value",
                self.path,
                self.replaced.as_map().map(LocaleTree::leaf_count).unwrap_or(0)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub tree: LocaleTree,
    /// One entry per patch entry, in patch order.
    pub changes: Vec<Change>,
    pub overrides: Vec<StructuralOverride>,
}

impl MergeOutcome {
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }

    pub fn is_noop(&self) -> bool {
        self.changes.iter().all(|c| c.kind == ChangeKind::Unchanged)
    }

    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }
}

/// Apply `patch` to a copy of `base`.
pub fn merge(base: &LocaleTree, patch: &Patch) -> MergeOutcome {
    let mut tree = base.clone();
    let mut overrides = Vec::new();
    let mut changes = Vec::with_capacity(patch.len());

    for (path, value) in patch.entries() {
        let kind = if path.is_empty() {
            ChangeKind::Unchanged
        } else {
            set_path(&mut tree, path, 0, value, &mut overrides)
        };
        changes.push(Change {
            path: path.clone(),
            kind,
        });
    }

    for o in &overrides {
        tracing::warn!(path = %o.path, patch_path = %o.patch_path, kind = ?o.kind, "structural override");
    }

    MergeOutcome {
        tree,
        changes,
        overrides,
    }
}

fn set_path(
    tree: &mut LocaleTree,
    path: &KeyPath,
    depth: usize,
    value: &Node,
    overrides: &mut Vec<StructuralOverride>,
) -> ChangeKind {
    let segments = path.segments();
    let key = segments[depth].as_str();

    if depth + 1 == segments.len() {
        return set_leaf(tree, path, key, value, overrides);
    }

    let mut branch = match tree.get_mut(key) {
        Some(slot) => match std::mem::replace(slot, Node::Map(LocaleTree::new())) {
            Node::Map(child) => child,
            replaced => {
                overrides.push(StructuralOverride {
                    path: path.prefix(depth + 1),
                    patch_path: path.clone(),
                    replaced,
                    kind: OverrideKind::ScalarReplaced,
                });
                LocaleTree::new()
            }
        },
        None => LocaleTree::new(),
    };

    let change = set_path(&mut branch, path, depth + 1, value, overrides);
    tree.insert(key, branch);
    change
}

fn set_leaf(
    tree: &mut LocaleTree,
    path: &KeyPath,
    key: &str,
    value: &Node,
    overrides: &mut Vec<StructuralOverride>,
) -> ChangeKind {
    match tree.get(key) {
        None => {
            tree.insert(key, value.clone());
            ChangeKind::Added
        }
        Some(existing) if existing == value => ChangeKind::Unchanged,
        Some(existing) => {
            if let Node::Map(_) = existing {
                overrides.push(StructuralOverride {
                    path: path.clone(),
                    patch_path: path.clone(),
                    replaced: existing.clone(),
                    kind: OverrideKind::BranchReplaced,
                });
            }
            tree.insert(key, value.clone());
            ChangeKind::Updated
        }
    }
}
