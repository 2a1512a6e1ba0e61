//! Branching Game: a web-served branching narrative over a fixed node graph.
//!
//! Each node is reachable at `/game/<id>` and offers up to three exits
//! (left, right, forward) chosen with the `path` query parameter. The graph
//! is built and validated once at startup and never mutated afterwards.

pub mod config;
pub mod core;
pub mod schema;
pub mod server;
pub mod telemetry;
