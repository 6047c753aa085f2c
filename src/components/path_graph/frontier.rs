//! Lock state, the frontier node, and the spotlight set around it.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::config::ProminenceConfig;
use super::layout::Layout;
use super::model::PathGraph;
use super::types::{CompletionSet, NodeId, PathNode};

/// A node with no prerequisites is never locked.
pub fn is_locked(node: &PathNode, completed: &CompletionSet) -> bool {
	!node.dependencies.is_empty() && !node.dependencies.iter().all(|id| completed.contains(id))
}

/// First main-path node that is unlocked and not yet complete.
pub fn find_frontier<'a>(graph: &'a PathGraph, completed: &CompletionSet) -> Option<&'a PathNode> {
	graph
		.main_nodes()
		.find(|node| !is_locked(node, completed) && !completed.contains(&node.id))
}

/// Frontier, its prerequisites, two hops of unlocks, and the competencies of
/// the frontier and its one-hop unlocks. The radius is fixed.
pub fn spotlight_set(frontier: &PathNode, graph: &PathGraph) -> IndexSet<NodeId> {
	let mut visible = IndexSet::new();
	visible.insert(frontier.id);
	visible.extend(frontier.dependencies.iter().copied());

	for &next_id in &frontier.unlocks {
		visible.insert(next_id);
		if let Some(next) = graph.get(next_id) {
			visible.extend(next.unlocks.iter().copied());
		}
	}

	visible.extend(frontier.competencies.iter().copied());
	for &next_id in &frontier.unlocks {
		if let Some(next) = graph.get(next_id) {
			visible.extend(next.competencies.iter().copied());
		}
	}
	visible
}

/// Which part of the path is drawn at full strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityMode {
	/// Only the neighbourhood of the frontier.
	#[default]
	Spotlight,
	/// The whole path.
	FullMap,
}

impl VisibilityMode {
	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			Self::Spotlight => Self::FullMap,
			Self::FullMap => Self::Spotlight,
		}
	}

	/// Stored form, as written to the session store.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Spotlight => "spotlight",
			Self::FullMap => "full-map",
		}
	}

	/// Inverse of [`as_str`](Self::as_str); unknown values yield `None`.
	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"spotlight" => Some(Self::Spotlight),
			"full-map" => Some(Self::FullMap),
			_ => None,
		}
	}
}

/// Render tiers, weakest first so `Ord` follows visual weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prominence {
	/// Outside the active spotlight.
	Ambient,
	/// Inside the spotlight window.
	Spotlight,
	/// A prerequisite of the frontier.
	Dependency,
	/// The frontier itself.
	Frontier,
}

/// Badge state shown on each node and in the command bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
	/// Proven by the learner.
	Completed,
	/// The current frontier.
	Active,
	/// Some prerequisite is still open.
	Locked,
	/// Unlocked but not the frontier.
	Ready,
}

impl NodeStatus {
	/// Short uppercase badge text.
	pub fn badge(self) -> &'static str {
		match self {
			Self::Completed => "✓ PROVED",
			Self::Active => "◉ ACTIVE",
			Self::Locked => "🔒 LOCKED",
			Self::Ready => "○ READY",
		}
	}
}

/// Frontier plus the visibility policy derived from it for one mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Visibility {
	/// Mode this was resolved for.
	pub mode: VisibilityMode,
	/// `None` once every main-path node is complete.
	pub frontier: Option<NodeId>,
	frontier_deps: Vec<NodeId>,
	/// `None` means everything is in view (full map, or nothing left to do).
	spotlight: Option<IndexSet<NodeId>>,
}

impl Visibility {
	/// Find the frontier and, in spotlight mode, the window around it.
	pub fn resolve(graph: &PathGraph, completed: &CompletionSet, mode: VisibilityMode) -> Self {
		let frontier = find_frontier(graph, completed);
		let spotlight = match (mode, frontier) {
			(VisibilityMode::Spotlight, Some(f)) => Some(spotlight_set(f, graph)),
			_ => None,
		};
		Self {
			mode,
			frontier: frontier.map(|f| f.id),
			frontier_deps: frontier.map(|f| f.dependencies.clone()).unwrap_or_default(),
			spotlight,
		}
	}

	/// True when some nodes are dimmed to ambient.
	pub fn spotlight_active(&self) -> bool {
		self.spotlight.is_some()
	}

	/// Everything counts as in the spotlight when none is active.
	pub fn in_spotlight(&self, id: NodeId) -> bool {
		self.spotlight.as_ref().is_none_or(|s| s.contains(&id))
	}

	/// Ids the camera should frame.
	pub fn visible_ids(&self, layout: &Layout) -> Vec<NodeId> {
		match &self.spotlight {
			Some(set) => set.iter().copied().filter(|id| layout.contains(*id)).collect(),
			None => layout.ids().collect(),
		}
	}

	/// Render tier for `id`.
	pub fn prominence(&self, id: NodeId) -> Prominence {
		if self.frontier == Some(id) {
			Prominence::Frontier
		} else if !self.in_spotlight(id) {
			Prominence::Ambient
		} else if self.frontier_deps.contains(&id) {
			Prominence::Dependency
		} else {
			Prominence::Spotlight
		}
	}

	/// Spotlight mode maps prominence to opacity; full-map mode only dims locked nodes.
	pub fn opacity(&self, id: NodeId, locked: bool, style: &ProminenceConfig) -> f64 {
		if !self.spotlight_active() {
			return if locked { style.full_map_locked } else { 1.0 };
		}
		match self.prominence(id) {
			Prominence::Frontier => style.frontier,
			Prominence::Dependency => style.dependency,
			Prominence::Spotlight => style.spotlight,
			Prominence::Ambient => style.ambient,
		}
	}

	/// Badge state for `node`.
	pub fn status(&self, node: &PathNode, completed: &CompletionSet) -> NodeStatus {
		if completed.contains(&node.id) {
			NodeStatus::Completed
		} else if self.frontier == Some(node.id) {
			NodeStatus::Active
		} else if is_locked(node, completed) {
			NodeStatus::Locked
		} else {
			NodeStatus::Ready
		}
	}
}
