//! Flattens layout, visibility and edge routing into draw-ready descriptors.

use std::collections::HashMap;

use serde::Serialize;

use super::config::PathGraphConfig;
use super::edges::{EdgeGeometry, route_branch_edge, route_main_edge};
use super::frontier::{NodeStatus, Prominence, Visibility, is_locked};
use super::layout::Layout;
use super::model::PathGraph;
use super::semantics::{BranchLabel, classify_branch};
use super::types::{CompletionSet, NodeId, Point};

/// Which base radius a node is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RadiusClass {
	/// Main-path node.
	Main,
	/// Branch node.
	Branch,
}

/// Everything needed to draw one node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeDescriptor {
	#[allow(missing_docs)]
	pub id: NodeId,
	/// 1-based index in the input list.
	pub ordinal: usize,
	/// Display name.
	pub name: String,
	/// Centre in world space.
	pub position: Point,
	/// Base radius class.
	pub class: RadiusClass,
	/// Drawn radius, frontier enlargement included.
	pub radius: f64,
	/// Render tier.
	pub prominence: Prominence,
	/// Final alpha in 0..=1.
	pub opacity: f64,
	/// Some prerequisite is still open.
	pub locked: bool,
	/// In the completion set.
	pub completed: bool,
	/// Badge state.
	pub status: NodeStatus,
	/// Set for branch nodes only.
	pub branch_label: Option<BranchLabel>,
}

/// Which adjacency list an edge came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EdgeKind {
	/// From `unlocks`.
	Unlock,
	/// From `competencies`.
	Competency,
}

/// Everything needed to draw one edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeDescriptor {
	#[allow(missing_docs)]
	pub source: NodeId,
	#[allow(missing_docs)]
	pub target: NodeId,
	#[allow(missing_docs)]
	pub kind: EdgeKind,
	/// Rim-to-rim route.
	pub geometry: EdgeGeometry,
	/// Target node is locked.
	pub locked: bool,
}

/// Draw-ready snapshot of the path.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene {
	/// Placed nodes in input order.
	pub nodes: Vec<NodeDescriptor>,
	/// Edges whose endpoints are both placed and apart.
	pub edges: Vec<EdgeDescriptor>,
}

impl Scene {
	/// Dangling references and unplaced nodes are skipped.
	pub fn build(
		graph: &PathGraph,
		layout: &Layout,
		visibility: &Visibility,
		completed: &CompletionSet,
		config: &PathGraphConfig,
	) -> Self {
		let style = &config.nodes;
		let mut nodes = Vec::with_capacity(layout.len());

		for (i, node) in graph.nodes().iter().enumerate() {
			let Some(position) = layout.get(node.id) else {
				continue;
			};
			let branch = graph.is_branch(node.id);
			let locked = is_locked(node, completed);
			let prominence = visibility.prominence(node.id);
			let mut radius = if branch {
				style.branch_radius
			} else {
				style.main_radius
			};
			if prominence == Prominence::Frontier {
				radius *= style.frontier_scale;
			}
			nodes.push(NodeDescriptor {
				id: node.id,
				ordinal: i + 1,
				name: node.name.clone(),
				position,
				class: if branch {
					RadiusClass::Branch
				} else {
					RadiusClass::Main
				},
				radius,
				prominence,
				opacity: visibility.opacity(node.id, locked, &config.prominence),
				locked,
				completed: completed.contains(&node.id),
				status: visibility.status(node, completed),
				branch_label: branch.then(|| classify_branch(node)),
			});
		}

		let target_locked = |id: NodeId| graph.get(id).is_some_and(|n| is_locked(n, completed));
		let radius_of: HashMap<NodeId, f64> = nodes.iter().map(|n| (n.id, n.radius)).collect();
		let mut edges = Vec::new();
		for node in graph.nodes() {
			let (Some(source), Some(&source_radius)) = (layout.get(node.id), radius_of.get(&node.id)) else {
				continue;
			};
			for &target_id in &node.unlocks {
				let (Some(target), Some(&target_radius)) = (layout.get(target_id), radius_of.get(&target_id)) else {
					continue;
				};
				if let Some(seg) = route_main_edge(source, target, source_radius, target_radius) {
					edges.push(EdgeDescriptor {
						source: node.id,
						target: target_id,
						kind: EdgeKind::Unlock,
						geometry: EdgeGeometry::Line(seg),
						locked: target_locked(target_id),
					});
				}
			}
			for &target_id in &node.competencies {
				let (Some(target), Some(&target_radius)) = (layout.get(target_id), radius_of.get(&target_id)) else {
					continue;
				};
				if let Some(curve) = route_branch_edge(source, target, source_radius, target_radius) {
					edges.push(EdgeDescriptor {
						source: node.id,
						target: target_id,
						kind: EdgeKind::Competency,
						geometry: EdgeGeometry::Curve(curve),
						locked: target_locked(target_id),
					});
				}
			}
		}

		Self { nodes, edges }
	}

	/// Descriptor for `id`.
	pub fn node(&self, id: NodeId) -> Option<&NodeDescriptor> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Topmost node whose disc contains `world`.
	pub fn hit_test(&self, world: Point, slop: f64) -> Option<NodeId> {
		self.nodes
			.iter()
			.rev()
			.find(|n| n.position.distance_to(world) <= n.radius + slop)
			.map(|n| n.id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::path_graph::frontier::VisibilityMode;
	use crate::components::path_graph::layout::layout;
	use crate::components::path_graph::types::PathNode;

	fn build(nodes: Vec<PathNode>, completed: &[NodeId], mode: VisibilityMode) -> Scene {
		let graph = PathGraph::new(nodes);
		let config = PathGraphConfig::default();
		let completed: CompletionSet = completed.iter().copied().collect();
		let l = layout(&graph, &config.layout);
		let vis = Visibility::resolve(&graph, &completed, mode);
		Scene::build(&graph, &l, &vis, &completed, &config)
	}

	fn sample() -> Vec<PathNode> {
		vec![
			PathNode::new(1, "Basics").with_unlocks([2]).with_competencies([10, 77]),
			PathNode::new(2, "Ownership").with_dependencies([1]).with_unlocks([3, 404]),
			PathNode::new(3, "Traits").with_dependencies([2]),
			PathNode::new(10, "Macro practice").with_dependencies([2]),
			PathNode::new(50, "Orphan").with_competencies([]),
		]
	}

	#[test]
	fn dangling_references_are_skipped() {
		let scene = build(sample(), &[1], VisibilityMode::FullMap);
		assert!(scene.node(404).is_none());
		assert!(scene.edges.iter().all(|e| e.target != 404 && e.target != 77));
	}

	#[test]
	fn frontier_descriptor_is_emphasised() {
		let scene = build(sample(), &[1], VisibilityMode::Spotlight);
		let frontier = scene.node(2).unwrap();
		assert_eq!(frontier.prominence, Prominence::Frontier);
		assert_eq!(frontier.status, NodeStatus::Active);
		assert!((frontier.radius - 70.0 * 1.15).abs() < 1e-9);
		assert_eq!(frontier.ordinal, 2);
		assert_eq!(scene.node(1).unwrap().prominence, Prominence::Dependency);
	}

	#[test]
	fn branch_edges_carry_target_lock_state() {
		let scene = build(sample(), &[1], VisibilityMode::FullMap);
		let branch = scene
			.edges
			.iter()
			.find(|e| e.kind == EdgeKind::Competency && e.target == 10)
			.unwrap();
		assert!(branch.locked);
		assert!(matches!(branch.geometry, EdgeGeometry::Curve(_)));

		let unlocked = build(sample(), &[1, 2], VisibilityMode::FullMap);
		let branch = unlocked.edges.iter().find(|e| e.target == 10).unwrap();
		assert!(!branch.locked);
	}

	#[test]
	fn branch_node_uses_branch_radius_and_label() {
		let scene = build(sample(), &[1], VisibilityMode::FullMap);
		let node = scene.node(10).unwrap();
		assert_eq!(node.class, RadiusClass::Branch);
		assert_eq!(node.radius, 50.0);
		assert_eq!(node.branch_label, Some(BranchLabel::Reinforcement));
		assert!(scene.node(1).unwrap().branch_label.is_none());
	}

	#[test]
	fn empty_input_renders_nothing() {
		let scene = build(Vec::new(), &[], VisibilityMode::Spotlight);
		assert!(scene.nodes.is_empty() && scene.edges.is_empty());
	}

	#[test]
	fn edges_stop_at_the_enlarged_frontier_rim() {
		let chain = vec![
			PathNode::new(1, "one").with_unlocks([2]),
			PathNode::new(2, "two").with_dependencies([1]).with_unlocks([3]),
			PathNode::new(3, "three").with_dependencies([2]),
		];
		let scene = build(chain, &[1], VisibilityMode::Spotlight);
		let frontier = scene.node(2).unwrap();
		assert_eq!(frontier.prominence, Prominence::Frontier);

		let seg = |source: NodeId, target: NodeId| match scene
			.edges
			.iter()
			.find(|e| e.source == source && e.target == target)
			.map(|e| e.geometry)
		{
			Some(EdgeGeometry::Line(seg)) => seg,
			other => panic!("expected a line for {source}->{target}, got {other:?}"),
		};
		let incoming = seg(1, 2);
		let end = Point::new(incoming.x2, incoming.y2);
		assert!((end.distance_to(frontier.position) - frontier.radius).abs() < 1e-9);
		let outgoing = seg(2, 3);
		let start = Point::new(outgoing.x1, outgoing.y1);
		assert!((start.distance_to(frontier.position) - frontier.radius).abs() < 1e-9);
		// The plain end still trims by the normal radius.
		let from = scene.node(1).unwrap();
		assert!((Point::new(incoming.x1, incoming.y1).distance_to(from.position) - 70.0).abs() < 1e-9);
	}

	#[test]
	fn hit_test_respects_radius() {
		let scene = build(sample(), &[], VisibilityMode::FullMap);
		assert_eq!(scene.hit_test(Point::new(400.0, 60.0), 0.0), Some(2));
		assert_eq!(scene.hit_test(Point::new(200.0, 0.0), 0.0), None);
	}
}
