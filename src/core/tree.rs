use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use super::key_path::KeyPath;

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Number(n) => write!(f, "{}", format_number(*n)),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Render a number the way a JS literal would spell it.
///
/// Integral values print without a fractional part (`3`, not `3.0`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// A node of a [`LocaleTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    /// An ordered list of scalars, e.g. `["Fast", "Easy"]`.
    List(Vec<Scalar>),
    Map(LocaleTree),
}

/// Structural kind of a node, compared by the differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Scalar,
    List,
    Map,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Scalar => write!(f, "scalar"),
            NodeKind::List => write!(f, "list"),
            NodeKind::Map => write!(f, "mapping"),
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::List(_) => NodeKind::List,
            Node::Map(_) => NodeKind::Map,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Node::Map(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(scalar) => scalar.as_str(),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&LocaleTree> {
        match self {
            Node::Map(tree) => Some(tree),
            _ => None,
        }
    }

    /// Short single-line rendering for reports.
    pub fn preview(&self) -> String {
        match self {
            Node::Scalar(scalar) => scalar.to_string(),
            Node::List(items) => items
                .iter()
                .map(Scalar::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            Node::Map(tree) => format!("{{{} keys}}", tree.len()),
        }
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Scalar(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(value.into())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(value.into())
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Scalar(value.into())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Scalar(value.into())
    }
}

impl From<LocaleTree> for Node {
    fn from(value: LocaleTree) -> Self {
        Node::Map(value)
    }
}

/// One locale's content: an insertion-ordered mapping of keys to nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleTree {
    entries: IndexMap<String, Node>,
}

impl LocaleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// Insert or replace `key`. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), node.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Walk `path` from the root. The empty path resolves to nothing.
    pub fn resolve(&self, path: &KeyPath) -> Option<&Node> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get(segment)?.as_map()?;
        }
        current.get(last)
    }

    /// Resolve `path` into a [`LeafEntry`].
    pub fn lookup(&self, path: &KeyPath) -> LeafEntry<'_> {
        let value = self.resolve(path);
        let kind = match value {
            None => LeafKind::Missing,
            Some(Node::Scalar(_)) => LeafKind::Scalar,
            Some(Node::List(_)) => LeafKind::List,
            Some(Node::Map(_)) => LeafKind::Branch,
        };
        LeafEntry {
            path: path.clone(),
            value,
            kind,
        }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                Node::Map(tree) => tree.leaf_count(),
                _ => 1,
            })
            .sum()
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for LocaleTree {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = LocaleTree::new();
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}

/// What a key path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Scalar,
    List,
    /// The path resolves to a mapping, which is never a leaf.
    Branch,
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeafEntry<'a> {
    pub path: KeyPath,
    pub value: Option<&'a Node>,
    pub kind: LeafKind,
}

// Trees serialize as plain JSON so reports and MCP payloads can embed values.

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Scalar::Number(n) => serializer.serialize_f64(*n),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(scalar) => scalar.serialize(serializer),
            Node::List(items) => items.serialize(serializer),
            Node::Map(tree) => tree.serialize(serializer),
        }
    }
}

impl Serialize for LocaleTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

/// Why a JSON value cannot become a tree node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("null is not a supported value")]
    Null,
    #[error("lists may only contain strings, numbers and booleans")]
    NestedList,
    #[error("number {0} cannot be represented")]
    Number(String),
}

fn scalar_from_json(value: &Value) -> Result<Scalar, ValueError> {
    match value {
        Value::String(s) => Ok(Scalar::String(s.clone())),
        Value::Bool(b) => Ok(Scalar::Bool(*b)),
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Scalar::Number)
            .ok_or_else(|| ValueError::Number(n.to_string())),
        Value::Null => Err(ValueError::Null),
        Value::Array(_) | Value::Object(_) => Err(ValueError::NestedList),
    }
}

impl TryFrom<&Value> for Node {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(scalar_from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Node::List),
            Value::Object(map) => {
                let mut tree = LocaleTree::new();
                for (key, child) in map {
                    tree.insert(key.clone(), Node::try_from(child)?);
                }
                Ok(Node::Map(tree))
            }
            other => scalar_from_json(other).map(Node::Scalar),
        }
    }
}
