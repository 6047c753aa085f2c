use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Integer identifier of a skill node, as issued by the backend.
pub type NodeId = i64;

/// Ids of nodes the learner has proven. Owned by the evidence flow, read-only here.
pub type CompletionSet = HashSet<NodeId>;

/// A node in the skill graph.
///
/// The backend serializes unset fields as `null`; those decode to the field default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathNode {
	/// Backend id; also accepted as `skillNodeId`.
	#[serde(alias = "skillNodeId")]
	pub id: NodeId,
	/// Display name.
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	/// Free-form category, e.g. `foundations` or `specialized`.
	#[serde(deserialize_with = "null_as_default")]
	pub category: String,
	/// Ordinal 0..=10.
	#[serde(deserialize_with = "null_as_default")]
	pub difficulty: u8,
	/// Expected effort.
	#[serde(deserialize_with = "null_as_default")]
	pub estimated_hours: f64,
	/// How the skill is proven: `quiz`, `build`, `apply`, ...
	#[serde(deserialize_with = "null_as_default")]
	pub assessment_type: String,
	/// Prerequisites. All must be complete before this node unlocks.
	#[serde(deserialize_with = "null_as_default")]
	pub dependencies: Vec<NodeId>,
	/// Forward edges; the main sequence is a chain of these.
	#[serde(deserialize_with = "null_as_default")]
	pub unlocks: Vec<NodeId>,
	/// Optional depth nodes hanging off this node.
	#[serde(deserialize_with = "null_as_default")]
	pub competencies: Vec<NodeId>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PathNode {
	/// Node with no edges and default metadata.
	pub fn new(id: NodeId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			..Self::default()
		}
	}

	/// Replace the prerequisite list.
	pub fn with_dependencies(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
		self.dependencies = ids.into_iter().collect();
		self
	}

	/// Replace the unlock list.
	pub fn with_unlocks(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
		self.unlocks = ids.into_iter().collect();
		self
	}

	/// Replace the branch list.
	pub fn with_competencies(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
		self.competencies = ids.into_iter().collect();
		self
	}
}

/// A point in world (layout) or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	#[allow(missing_docs)]
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance.
	pub fn distance_to(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Size of the drawing surface in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct ViewportSize {
	pub width: f64,
	pub height: f64,
}

impl ViewportSize {
	#[allow(missing_docs)]
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Middle of the surface.
	pub fn center(self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}
