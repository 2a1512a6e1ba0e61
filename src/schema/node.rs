use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Newtype wrapper for node identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One of the three edges leaving a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Forward,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Left, Direction::Right, Direction::Forward];

    /// The query-string token for this direction: "left", "right", "forward".
    pub fn token(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Forward => "forward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A single location in the narrative graph.
///
/// Edges are stored as identifiers into the owning `GameMap`, never as
/// references, so back-edges need no special ownership handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub left: Option<NodeId>,
    #[serde(default)]
    pub right: Option<NodeId>,
    #[serde(default)]
    pub forward: Option<NodeId>,
}

impl Node {
    /// A node with no outgoing edges.
    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            left: None,
            right: None,
            forward: None,
        }
    }

    /// Set the edge for `direction`. Chains for literal map construction.
    pub fn with_edge(mut self, direction: Direction, target: impl Into<String>) -> Self {
        let target = Some(NodeId::new(target));
        match direction {
            Direction::Left => self.left = target,
            Direction::Right => self.right = target,
            Direction::Forward => self.forward = target,
        }
        self
    }

    /// The destination identifier of the edge in `direction`, if any.
    pub fn edge(&self, direction: Direction) -> Option<&NodeId> {
        match direction {
            Direction::Left => self.left.as_ref(),
            Direction::Right => self.right.as_ref(),
            Direction::Forward => self.forward.as_ref(),
        }
    }

    /// Iterate over present edges as `(direction, target)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Direction, &NodeId)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.edge(d).map(|target| (d, target)))
    }

    pub fn has_forward(&self) -> bool {
        self.forward.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.edges().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_has_no_edges() {
        let node = Node::leaf("5green");
        assert_eq!(node.id, NodeId::from("5green"));
        assert!(node.is_leaf());
        assert!(!node.has_forward());
        assert_eq!(node.edges().count(), 0);
    }

    #[test]
    fn with_edge_sets_each_direction() {
        let node = Node::leaf("1")
            .with_edge(Direction::Left, "3")
            .with_edge(Direction::Right, "4")
            .with_edge(Direction::Forward, "2");
        assert_eq!(node.edge(Direction::Left), Some(&NodeId::from("3")));
        assert_eq!(node.edge(Direction::Right), Some(&NodeId::from("4")));
        assert_eq!(node.edge(Direction::Forward), Some(&NodeId::from("2")));
        assert!(node.has_forward());
        assert!(!node.is_leaf());
    }

    #[test]
    fn edges_skip_absent_directions() {
        let node = Node::leaf("2")
            .with_edge(Direction::Left, "1")
            .with_edge(Direction::Right, "4");
        let edges: Vec<_> = node.edges().map(|(d, t)| (d, t.as_str())).collect();
        assert_eq!(edges, vec![(Direction::Left, "1"), (Direction::Right, "4")]);
    }

    #[test]
    fn direction_tokens() {
        assert_eq!(Direction::Left.token(), "left");
        assert_eq!(Direction::Right.to_string(), "right");
        assert_eq!(Direction::Forward.token(), "forward");
    }

    #[test]
    fn node_ron_defaults_missing_edges() {
        let node: Node = ron::from_str(r#"(id: "2", left: Some("1"))"#).unwrap();
        assert_eq!(node.left, Some(NodeId::from("1")));
        assert_eq!(node.right, None);
        assert_eq!(node.forward, None);
    }
}
