//! Materialized ancestor path of a published node.

use crate::model::ids::NodeId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Chain of node ids from the root of the content tree down to the node
/// itself (root first, node last).
///
/// Access rules and wildcard domains are both keyed by ancestry, so the path
/// is carried on every [`crate::PublishedNode`] rather than recomputed.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct NodePath(Vec<NodeId>);

impl NodePath {
    pub fn new(ids: Vec<NodeId>) -> Self {
        Self(ids)
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.0
    }

    /// The node's own id, when the path is non-empty.
    pub fn leaf(&self) -> Option<NodeId> {
        self.0.last().copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    /// Walks the path from the node itself up towards the root.
    pub fn iter_leaf_to_root(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().rev().copied()
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for id in &self.0 {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

/// Failure to parse a comma-separated path string.
#[derive(Debug, Eq, PartialEq)]
pub struct NodePathParseError {
    segment: String,
}

impl Display for NodePathParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "path segment '{}' is not a node id", self.segment)
    }
}

impl Error for NodePathParseError {}

impl FromStr for NodePath {
    type Err = NodePathParseError;

    /// Parses the comma-separated form, e.g. `"1000,1001,1003"`.
    ///
    /// A leading `-1` virtual-root marker is accepted and dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ids = Vec::new();
        for (index, segment) in s.split(',').map(str::trim).enumerate() {
            if segment.is_empty() && ids.is_empty() {
                continue;
            }
            let id: i64 = segment.parse().map_err(|_| NodePathParseError {
                segment: segment.to_string(),
            })?;
            if id == -1 && index == 0 {
                continue;
            }
            ids.push(NodeId(id));
        }
        Ok(Self(ids))
    }
}
