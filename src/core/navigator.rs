//! Navigator: following a node's left/right/forward edges.

use crate::core::graph::GameMap;
use crate::schema::node::{Direction, Node};

impl Direction {
    /// Parse a `path` query token.
    ///
    /// Only "left" and "forward" are recognized explicitly; any other token,
    /// including "right", the empty string, and garbage, selects `Right`.
    pub fn from_token(token: &str) -> Direction {
        match token {
            "left" => Direction::Left,
            "forward" => Direction::Forward,
            _ => Direction::Right,
        }
    }
}

impl GameMap {
    /// The node reached by following `direction` out of `node`, or `None`
    /// when that edge is absent.
    pub fn step(&self, node: &Node, direction: Direction) -> Option<&Node> {
        node.edge(direction)
            .and_then(|target| self.lookup(target.as_str()))
    }

    /// `step` with a raw query token, using the right-edge fallback.
    pub fn step_token(&self, node: &Node, token: &str) -> Option<&Node> {
        self.step(node, Direction::from_token(token))
    }

    /// Follow a sequence of tokens from `start`, stopping at the first
    /// missing edge.
    pub fn walk<'a, I>(&self, start: &Node, tokens: I) -> Option<&Node>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self.lookup(start.id.as_str())?;
        for token in tokens {
            current = self.step_token(current, token)?;
        }
        Some(current)
    }
}
