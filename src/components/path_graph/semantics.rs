//! Presentation-only label for branch nodes, picked from difficulty, category,
//! assessment type and name keywords. Knows nothing about layout.

use serde::Serialize;

use super::types::PathNode;

/// Why a branch is worth taking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BranchLabel {
	/// Hard or explicitly advanced material.
	Advanced,
	/// Patterns, architecture, design.
	Specialization,
	/// Hands-on practice of a core skill.
	Reinforcement,
	/// Anything else.
	DepthModule,
}

impl BranchLabel {
	/// Badge text.
	pub fn label(self) -> &'static str {
		match self {
			Self::Advanced => "🔴 Advanced",
			Self::Specialization => "🟡 Specialization",
			Self::Reinforcement => "🔵 Reinforcement",
			Self::DepthModule => "🟣 Depth Module",
		}
	}

	/// One-line explanation.
	pub fn tooltip(self) -> &'static str {
		match self {
			Self::Advanced => "Advanced optional skill: for deeper expertise",
			Self::Specialization => "Specialization: builds unique expertise",
			Self::Reinforcement => "Reinforcement: strengthens core skills",
			Self::DepthModule => "Optional depth: strengthens long-term mastery",
		}
	}

	/// Accent colour used for the hover badge.
	pub fn color(self) -> &'static str {
		match self {
			Self::Advanced => "#ef4444",
			Self::Specialization => "#eab308",
			Self::Reinforcement => "#3b82f6",
			Self::DepthModule => "#a855f7",
		}
	}
}

const ADVANCED_DIFFICULTY: u8 = 7;

/// First matching rule wins: advanced, specialization, reinforcement, then depth.
pub fn classify_branch(node: &PathNode) -> BranchLabel {
	let name = node.name.to_lowercase();
	let category = node.category.to_lowercase();
	let name_has = |words: &[&str]| words.iter().any(|w| name.contains(w));

	if node.difficulty >= ADVANCED_DIFFICULTY
		|| category == "specialized"
		|| name_has(&["advanced", "deep"])
	{
		BranchLabel::Advanced
	} else if name_has(&["pattern", "architecture", "design"]) {
		BranchLabel::Specialization
	} else if matches!(node.assessment_type.as_str(), "build" | "apply")
		|| name_has(&["practice", "exercise"])
	{
		BranchLabel::Reinforcement
	} else {
		BranchLabel::DepthModule
	}
}
