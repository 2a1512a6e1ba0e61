//! Graph store: the immutable node map built once at startup.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::schema::node::{Direction, Node, NodeId};

/// Identifier of the node every new game starts on.
pub const START_NODE: &str = "1";
/// Identifier of the winning terminal node.
pub const WINNING_NODE: &str = "5green";
/// Identifier of the placeholder "not found" entry.
pub const NOT_FOUND_NODE: &str = "404";

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("duplicate node: {0}")]
    DuplicateNode(NodeId),
    #[error("node {from} has a {direction} edge to unknown node {to}")]
    DanglingEdge {
        from: NodeId,
        direction: Direction,
        to: NodeId,
    },
    #[error("winning node {0} is not in the map")]
    MissingWinner(NodeId),
}

/// Immutable mapping from node identifier to node record.
///
/// Every edge is guaranteed to resolve: `GameMapBuilder::build` rejects
/// dangling references, so a lookup miss during traversal cannot happen.
#[derive(Debug, Clone)]
pub struct GameMap {
    nodes: FxHashMap<NodeId, Node>,
    winner: NodeId,
}

/// Builder for constructing a validated `GameMap`.
#[derive(Debug, Default)]
pub struct GameMapBuilder {
    nodes: Vec<Node>,
    winner: Option<NodeId>,
}

impl GameMap {
    pub fn builder() -> GameMapBuilder {
        GameMapBuilder::default()
    }

    /// The fixed game topology served by the web game.
    pub fn standard() -> Result<GameMap, GraphError> {
        use Direction::{Forward, Left, Right};

        GameMap::builder()
            .node(
                Node::leaf("1")
                    .with_edge(Left, "3")
                    .with_edge(Right, "4")
                    .with_edge(Forward, "2"),
            )
            .node(Node::leaf("2").with_edge(Left, "1").with_edge(Right, "4"))
            .node(Node::leaf("3").with_edge(Left, "2").with_edge(Right, "1"))
            .node(
                Node::leaf("4")
                    .with_edge(Left, WINNING_NODE)
                    .with_edge(Right, "2")
                    .with_edge(Forward, "3"),
            )
            .node(Node::leaf(WINNING_NODE))
            .node(Node::leaf(NOT_FOUND_NODE))
            .winner(WINNING_NODE)
            .build()
    }

    pub fn lookup(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, sorted by identifier.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    pub fn winner(&self) -> &Node {
        &self.nodes[&self.winner]
    }

    pub fn is_winner(&self, node: &Node) -> bool {
        node.id == self.winner
    }

    /// The starting node, if the map has one under `START_NODE`.
    pub fn start(&self) -> Option<&Node> {
        self.lookup(START_NODE)
    }
}

impl GameMapBuilder {
    pub fn node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn winner(mut self, id: &str) -> Self {
        self.winner = Some(NodeId::new(id));
        self
    }

    /// Validate and freeze the map.
    ///
    /// Fails on duplicate identifiers, edges pointing at unknown nodes, and a
    /// winning identifier that is not itself a node. Without an explicit
    /// winner, `WINNING_NODE` is assumed.
    pub fn build(self) -> Result<GameMap, GraphError> {
        let mut nodes: FxHashMap<NodeId, Node> = FxHashMap::default();
        for node in self.nodes {
            if nodes.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
            nodes.insert(node.id.clone(), node);
        }

        for node in nodes.values() {
            for (direction, target) in node.edges() {
                if !nodes.contains_key(target) {
                    return Err(GraphError::DanglingEdge {
                        from: node.id.clone(),
                        direction,
                        to: target.clone(),
                    });
                }
            }
        }

        let winner = self.winner.unwrap_or_else(|| NodeId::new(WINNING_NODE));
        if !nodes.contains_key(&winner) {
            return Err(GraphError::MissingWinner(winner));
        }

        Ok(GameMap { nodes, winner })
    }
}
