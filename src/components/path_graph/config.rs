use serde::{Deserialize, Serialize};

use super::error::{PathGraphError, Result};

/// Placement constants for the main spine and its branches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Distance between consecutive main-path nodes.
	pub horizontal_spacing: f64,
	/// Vertical distance from a parent to its branches.
	pub branch_offset_y: f64,
	/// Extra x shift per branch index, so siblings don't stack.
	pub branch_stagger_x: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			horizontal_spacing: 400.0,
			branch_offset_y: 200.0,
			branch_stagger_x: 50.0,
		}
	}
}

/// Camera limits and gesture tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
	/// Lower zoom clamp.
	pub min_zoom: f64,
	/// Upper zoom clamp.
	pub max_zoom: f64,
	/// Multiplier applied per wheel notch when zooming in; zooming out uses its inverse.
	pub zoom_step: f64,
	/// Screen margin (px) kept around the fitted bounds.
	pub fit_padding: f64,
	/// Fit never zooms in past this.
	pub fit_max_zoom: f64,
	/// Zoom used when centring on a single node.
	pub focus_zoom: f64,
	/// Pointer travel (px) below which a press-release counts as a click.
	pub click_slop: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.3,
			max_zoom: 3.0,
			zoom_step: 1.1,
			fit_padding: 150.0,
			fit_max_zoom: 1.5,
			focus_zoom: 1.2,
			click_slop: 4.0,
		}
	}
}

/// Node sizes in world units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyleConfig {
	/// Radius of main-path nodes.
	pub main_radius: f64,
	/// Radius of branch nodes.
	pub branch_radius: f64,
	/// Radius multiplier for the frontier node.
	pub frontier_scale: f64,
	/// Extra world-space tolerance for hit testing.
	pub hit_slop: f64,
}

impl Default for NodeStyleConfig {
	fn default() -> Self {
		Self {
			main_radius: 70.0,
			branch_radius: 50.0,
			frontier_scale: 1.15,
			hit_slop: 0.0,
		}
	}
}

/// Opacity per prominence tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProminenceConfig {
	/// The frontier node.
	pub frontier: f64,
	/// Completed prerequisites of the frontier.
	pub dependency: f64,
	/// The rest of the spotlight window.
	pub spotlight: f64,
	/// Nodes outside the spotlight while it is active.
	pub ambient: f64,
	/// Locked nodes in full-map mode.
	pub full_map_locked: f64,
}

impl Default for ProminenceConfig {
	fn default() -> Self {
		Self {
			frontier: 1.0,
			dependency: 0.6,
			spotlight: 0.4,
			ambient: 0.15,
			full_map_locked: 0.2,
		}
	}
}

/// Everything tunable about the path view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathGraphConfig {
	/// Node placement.
	pub layout: LayoutConfig,
	/// Camera limits.
	pub viewport: ViewportConfig,
	/// Node sizes.
	pub nodes: NodeStyleConfig,
	/// Opacity tiers.
	pub prominence: ProminenceConfig,
}

impl PathGraphConfig {
	/// Parse a (possibly partial) JSON config; missing keys keep their defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Reject zoom ranges, steps and radii the camera can't work with.
	pub fn validate(&self) -> Result<()> {
		let v = &self.viewport;
		if !(v.min_zoom > 0.0 && v.min_zoom < v.max_zoom) {
			return Err(invalid(format!(
				"zoom range [{}, {}] is empty or non-positive",
				v.min_zoom, v.max_zoom
			)));
		}
		if v.zoom_step <= 1.0 {
			return Err(invalid(format!("zoom_step must exceed 1, got {}", v.zoom_step)));
		}
		if v.fit_max_zoom <= 0.0 || v.focus_zoom <= 0.0 {
			return Err(invalid("fit_max_zoom and focus_zoom must be positive".into()));
		}
		if self.layout.horizontal_spacing <= 0.0 {
			return Err(invalid("horizontal_spacing must be positive".into()));
		}
		let n = &self.nodes;
		if n.main_radius <= 0.0 || n.branch_radius <= 0.0 || n.frontier_scale <= 0.0 {
			return Err(invalid("node radii and frontier_scale must be positive".into()));
		}
		let p = &self.prominence;
		if !(p.frontier > p.dependency && p.dependency > p.spotlight && p.spotlight > p.ambient) {
			return Err(invalid(
				"prominence must be ordered frontier > dependency > spotlight > ambient".into(),
			));
		}
		Ok(())
	}
}

fn invalid(message: String) -> PathGraphError {
	PathGraphError::InvalidConfig { message }
}
