//! Skill-path map: layout engine, frontier spotlight, camera and the canvas view over them.

mod component;
/// Tunables and their defaults.
pub mod config;
pub mod edges;
/// Load and validation errors.
pub mod error;
pub mod frontier;
pub mod layout;
pub mod model;
mod render;
pub mod scene;
pub mod semantics;
pub mod session;
mod state;
mod ticker;
/// Node records and geometry primitives.
pub mod types;
pub mod viewport;

pub use component::PathGraphCanvas;
pub use config::PathGraphConfig;
pub use error::{PathGraphError, Result};
pub use frontier::{NodeStatus, Prominence, Visibility, VisibilityMode, find_frontier, is_locked, spotlight_set};
pub use layout::{Layout, layout};
pub use model::{Classification, PathGraph, classify};
pub use scene::{EdgeDescriptor, EdgeKind, NodeDescriptor, RadiusClass, Scene};
pub use session::{MemoryStore, SessionHandle, SessionStore};
pub use types::{CompletionSet, NodeId, PathNode, Point, ViewportSize};
pub use viewport::{Camera, Viewport};
