//! Reusable view components.

pub mod path_graph;
