//! Splits the flat node list into the main spine and its competency branches.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use log::warn;

use super::error::{PathGraphError, Result};
use super::types::{NodeId, PathNode};

/// A branch claimed by more than one parent. The first parent keeps it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ContestedBranch {
	pub branch: NodeId,
	pub owner: NodeId,
	pub claimant: NodeId,
}

/// Main/branch split of one node list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
	/// Main-path ids in input order.
	pub main: Vec<NodeId>,
	/// Every id referenced from some `competencies` list, present in the input or not.
	pub branches: IndexSet<NodeId>,
	/// Branch id -> first parent that referenced it.
	pub owners: IndexMap<NodeId, NodeId>,
	/// Second and later parents of an already-owned branch.
	pub contested: Vec<ContestedBranch>,
}

impl Classification {
	/// Whether `id` appears in some node's competencies.
	pub fn is_branch(&self, id: NodeId) -> bool {
		self.branches.contains(&id)
	}
}

/// Partition `nodes` into main-path ids and the branch id set.
pub fn classify(nodes: &[PathNode]) -> Classification {
	let mut branches = IndexSet::new();
	let mut owners = IndexMap::new();
	let mut contested = Vec::new();

	for parent in nodes {
		for &branch in &parent.competencies {
			branches.insert(branch);
			match owners.get(&branch).copied() {
				None => {
					owners.insert(branch, parent.id);
				}
				Some(owner) if owner != parent.id => contested.push(ContestedBranch {
					branch,
					owner,
					claimant: parent.id,
				}),
				Some(_) => {}
			}
		}
	}

	let main = nodes
		.iter()
		.map(|n| n.id)
		.filter(|id| !branches.contains(id))
		.collect();

	Classification {
		main,
		branches,
		owners,
		contested,
	}
}

/// The node list plus an id index and its classification.
#[derive(Clone, Debug, Default)]
pub struct PathGraph {
	nodes: Vec<PathNode>,
	index: HashMap<NodeId, usize>,
	classification: Classification,
}

impl PathGraph {
	/// Index and classify `nodes`, warning about contested branches.
	pub fn new(nodes: Vec<PathNode>) -> Self {
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			// Duplicate ids: the first occurrence wins lookups.
			index.entry(node.id).or_insert(i);
		}
		let classification = classify(&nodes);
		for c in &classification.contested {
			warn!(
				"branch {} claimed by {} and {}; keeping {}",
				c.branch, c.owner, c.claimant, c.owner
			);
		}
		Self {
			nodes,
			index,
			classification,
		}
	}

	/// Decode the backend's JSON node array.
	pub fn from_json(json: &str) -> Result<Self> {
		let nodes: Vec<PathNode> = serde_json::from_str(json)?;
		Ok(Self::new(nodes))
	}

	/// Nodes in input order.
	pub fn nodes(&self) -> &[PathNode] {
		&self.nodes
	}

	/// True for an empty path.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Node by id.
	pub fn get(&self, id: NodeId) -> Option<&PathNode> {
		self.index.get(&id).map(|&i| &self.nodes[i])
	}

	/// 1-based position of `id` in the input list.
	pub fn ordinal(&self, id: NodeId) -> Option<usize> {
		self.index.get(&id).map(|i| i + 1)
	}

	/// The main/branch split.
	pub fn classification(&self) -> &Classification {
		&self.classification
	}

	/// Shorthand for [`Classification::is_branch`].
	pub fn is_branch(&self, id: NodeId) -> bool {
		self.classification.is_branch(id)
	}

	/// Main-path nodes in sequence order.
	pub fn main_nodes(&self) -> impl Iterator<Item = &PathNode> + '_ {
		self.classification.main.iter().filter_map(|&id| self.get(id))
	}

	/// Strict mode: fail when any branch has more than one parent.
	pub fn validate_ownership(&self) -> Result<()> {
		match self.classification.contested.first() {
			Some(c) => Err(PathGraphError::ContestedBranch {
				branch: c.branch,
				owner: c.owner,
				claimant: c.claimant,
			}),
			None => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Vec<PathNode> {
		vec![
			PathNode::new(1, "Syntax").with_unlocks([2]).with_competencies([10]),
			PathNode::new(2, "Ownership").with_dependencies([1]).with_unlocks([3]),
			PathNode::new(10, "Macros"),
			PathNode::new(3, "Traits").with_dependencies([2]).with_competencies([11, 99]),
			PathNode::new(11, "Advanced trait bounds"),
		]
	}

	#[test]
	fn partitions_main_and_branch() {
		let c = classify(&sample());
		assert_eq!(c.main, vec![1, 2, 3]);
		assert!(c.is_branch(10));
		assert!(c.is_branch(11));
		// Dangling reference still counts as a branch id.
		assert!(c.is_branch(99));
		assert!(c.contested.is_empty());
	}

	#[test]
	fn main_and_branch_are_disjoint_and_cover_input() {
		let nodes = sample();
		let c = classify(&nodes);
		for node in &nodes {
			let in_main = c.main.contains(&node.id);
			assert_ne!(in_main, c.is_branch(node.id), "node {}", node.id);
		}
	}

	#[test]
	fn unreferenced_node_defaults_to_main() {
		let nodes = vec![PathNode::new(7, "Loner")];
		assert_eq!(classify(&nodes).main, vec![7]);
	}

	#[test]
	fn empty_input_yields_empty_sets() {
		let c = classify(&[]);
		assert!(c.main.is_empty());
		assert!(c.branches.is_empty());
	}

	#[test]
	fn second_parent_is_recorded_as_contested() {
		let nodes = vec![
			PathNode::new(2, "A").with_competencies([5]),
			PathNode::new(4, "B").with_competencies([5]),
			PathNode::new(5, "Shared"),
		];
		let graph = PathGraph::new(nodes);
		let c = graph.classification();
		assert_eq!(c.owners[&5], 2);
		assert_eq!(
			c.contested,
			vec![ContestedBranch {
				branch: 5,
				owner: 2,
				claimant: 4
			}]
		);
		assert!(matches!(
			graph.validate_ownership(),
			Err(PathGraphError::ContestedBranch { branch: 5, .. })
		));
	}

	#[test]
	fn decodes_backend_json() {
		let graph = PathGraph::from_json(
			r#"[
				{"skillNodeId": 1, "name": "Intro", "category": "core", "difficulty": 2,
				 "estimatedHours": 3.5, "dependencies": [], "unlocks": [2]},
				{"skillNodeId": 2, "name": "Next", "category": "core", "difficulty": 4,
				 "estimatedHours": 6, "dependencies": [1], "unlocks": [], "assessmentType": "build"}
			]"#,
		)
		.unwrap();
		let second = graph.get(2).unwrap();
		assert_eq!(second.dependencies, vec![1]);
		assert!(second.competencies.is_empty());
		assert_eq!(second.assessment_type, "build");
		assert_eq!(graph.ordinal(2), Some(2));
		graph.validate_ownership().unwrap();
	}

	#[test]
	fn null_fields_decode_to_defaults() {
		let graph = PathGraph::from_json(
			r#"[
				{"skillNodeId": 1, "name": "Intro", "category": null, "assessmentType": null,
				 "difficulty": null, "estimatedHours": null, "dependencies": null,
				 "unlocks": [2], "competencies": null},
				{"skillNodeId": 2, "name": null, "dependencies": [1]}
			]"#,
		)
		.unwrap();
		let first = graph.get(1).unwrap();
		assert_eq!(first.category, "");
		assert_eq!(first.assessment_type, "");
		assert_eq!(first.difficulty, 0);
		assert_eq!(first.estimated_hours, 0.0);
		assert!(first.dependencies.is_empty() && first.competencies.is_empty());
		assert_eq!(first.unlocks, vec![2]);
		assert_eq!(graph.get(2).unwrap().name, "");
		assert_eq!(graph.classification().main, vec![1, 2]);
	}
}
