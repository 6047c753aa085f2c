use super::types::NodeId;

/// Result alias for path graph operations.
pub type Result<T> = std::result::Result<T, PathGraphError>;

/// Errors raised while loading a path or its config.
#[derive(Debug, thiserror::Error)]
pub enum PathGraphError {
	/// A branch node listed under more than one parent's competencies.
	#[error("branch node {branch} is owned by {owner} but also claimed by {claimant}")]
	ContestedBranch {
		/// The shared branch.
		branch: NodeId,
		/// First parent, which keeps it.
		owner: NodeId,
		/// Later parent whose claim is ignored.
		claimant: NodeId,
	},
	/// Config values the camera or layout can't use.
	#[error("invalid path graph config: {message}")]
	InvalidConfig {
		/// What was wrong.
		message: String,
	},
	/// Malformed path or config JSON.
	#[error("path graph JSON error: {0}")]
	Json(#[from] serde_json::Error),
}
