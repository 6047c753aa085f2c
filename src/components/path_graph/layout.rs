//! Deterministic placement: main nodes on a horizontal spine, branches fanned above and below.

use indexmap::IndexMap;
use log::debug;

use super::config::LayoutConfig;
use super::model::PathGraph;
use super::types::{NodeId, Point};

/// World-space positions keyed by node id, in placement order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	positions: IndexMap<NodeId, Point>,
}

impl Layout {
	/// Position of `id`, if it was placed.
	pub fn get(&self, id: NodeId) -> Option<Point> {
		self.positions.get(&id).copied()
	}

	/// Whether `id` was placed.
	pub fn contains(&self, id: NodeId) -> bool {
		self.positions.contains_key(&id)
	}

	/// Number of placed nodes.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// True when nothing was placed.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Placed ids in placement order.
	pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.positions.keys().copied()
	}

	/// `(id, position)` pairs in placement order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
		self.positions.iter().map(|(&id, &p)| (id, p))
	}

	/// Positions for `ids`, silently skipping anything unplaced.
	pub fn points_for<'a, I>(&'a self, ids: I) -> impl Iterator<Item = Point> + 'a
	where
		I: IntoIterator<Item = NodeId>,
		I::IntoIter: 'a,
	{
		ids.into_iter().filter_map(|id| self.get(id))
	}
}

/// Place the main spine, then hang each branch off its owning parent.
/// Branches whose parent is unplaced are left out.
pub fn layout(graph: &PathGraph, config: &LayoutConfig) -> Layout {
	let mut positions = IndexMap::with_capacity(graph.nodes().len());

	for (k, id) in graph.classification().main.iter().enumerate() {
		positions.insert(*id, Point::new(k as f64 * config.horizontal_spacing, 0.0));
	}

	for parent in graph.nodes() {
		if parent.competencies.is_empty() {
			continue;
		}
		let Some(&parent_pos) = positions.get(&parent.id) else {
			continue;
		};
		for (i, &branch) in parent.competencies.iter().enumerate() {
			if graph.get(branch).is_none() || positions.contains_key(&branch) {
				continue;
			}
			let y = if i % 2 == 0 {
				-config.branch_offset_y
			} else {
				config.branch_offset_y
			};
			let x = parent_pos.x + config.branch_stagger_x * (i + 1) as f64;
			positions.insert(branch, Point::new(x, y));
		}
	}

	debug!(
		"layout: {} main, {} branch ids, {} positioned",
		graph.classification().main.len(),
		graph.classification().branches.len(),
		positions.len()
	);
	Layout { positions }
}
