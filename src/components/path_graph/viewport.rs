//! Camera state: zoom, pan, and the drag gesture that moves it.

use log::debug;

use super::config::ViewportConfig;
use super::layout::Layout;
use super::types::{NodeId, Point, ViewportSize};

const EPSILON: f64 = 1e-6;

/// `screen = world * zoom + pan`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	/// Scale factor.
	pub zoom: f64,
	/// Screen-space offset.
	pub pan: Point,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			pan: Point::default(),
		}
	}
}

impl Camera {
	/// Inverse of [`world_to_screen`](Self::world_to_screen).
	pub fn screen_to_world(&self, p: Point) -> Point {
		Point::new((p.x - self.pan.x) / self.zoom, (p.y - self.pan.y) / self.zoom)
	}

	#[allow(missing_docs)]
	pub fn world_to_screen(&self, p: Point) -> Point {
		Point::new(p.x * self.zoom + self.pan.x, p.y * self.zoom + self.pan.y)
	}
}

/// Pointer gesture state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragPhase {
	/// No button held.
	#[default]
	Idle,
	/// Panning with the pointer.
	Dragging {
		/// Pointer position minus pan at drag start.
		anchor: Point,
	},
}

/// Camera that frames the points' bounding box, centred, capped at `max_zoom`.
/// A flat axis (all points share it) places no constraint on zoom.
pub fn fit_camera(
	points: impl IntoIterator<Item = Point>,
	size: ViewportSize,
	padding: f64,
	max_zoom: f64,
) -> Option<Camera> {
	let mut it = points.into_iter();
	let first = it.next()?;
	let (mut min, mut max) = (first, first);
	for p in it {
		min = Point::new(min.x.min(p.x), min.y.min(p.y));
		max = Point::new(max.x.max(p.x), max.y.max(p.y));
	}

	let (graph_w, graph_h) = (max.x - min.x, max.y - min.y);
	let center = Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
	let scale = |extent: f64, available: f64| {
		if extent <= EPSILON {
			max_zoom
		} else {
			padded(available, padding) / extent
		}
	};
	let zoom = scale(graph_w, size.width)
		.min(scale(graph_h, size.height))
		.min(max_zoom);

	Some(Camera {
		zoom,
		pan: centered_pan(center, size, zoom),
	})
}

/// Camera at `zoom` with `target` in the middle of the viewport.
pub fn center_camera(target: Point, size: ViewportSize, zoom: f64) -> Camera {
	Camera {
		zoom,
		pan: centered_pan(target, size, zoom),
	}
}

fn centered_pan(world: Point, size: ViewportSize, zoom: f64) -> Point {
	let c = size.center();
	Point::new(c.x - world.x * zoom, c.y - world.y * zoom)
}

// Padding larger than the viewport would flip the sign; fall back to the raw size.
fn padded(available: f64, padding: f64) -> f64 {
	let inner = available - padding * 2.0;
	if inner > EPSILON { inner } else { available.max(EPSILON) }
}

/// Camera plus the pointer state machine that drives it.
#[derive(Clone, Debug)]
pub struct Viewport {
	/// Current transform.
	pub camera: Camera,
	/// Surface size in screen pixels.
	pub size: ViewportSize,
	phase: DragPhase,
	config: ViewportConfig,
}

impl Viewport {
	/// Identity camera, idle.
	pub fn new(size: ViewportSize, config: ViewportConfig) -> Self {
		Self {
			camera: Camera::default(),
			size,
			phase: DragPhase::Idle,
			config,
		}
	}

	#[allow(missing_docs)]
	pub fn is_dragging(&self) -> bool {
		matches!(self.phase, DragPhase::Dragging { .. })
	}

	/// Current gesture state.
	pub fn phase(&self) -> DragPhase {
		self.phase
	}

	/// Limits this viewport was built with.
	pub fn config(&self) -> &ViewportConfig {
		&self.config
	}

	/// New surface size; the camera is left alone.
	pub fn resize(&mut self, size: ViewportSize) {
		self.size = size;
	}

	/// Idle -> dragging, anchored at `at`.
	pub fn pointer_down(&mut self, at: Point) {
		let pan = self.camera.pan;
		self.phase = DragPhase::Dragging {
			anchor: Point::new(at.x - pan.x, at.y - pan.y),
		};
	}

	/// Returns true when the pan changed.
	pub fn pointer_move(&mut self, at: Point) -> bool {
		match self.phase {
			DragPhase::Dragging { anchor } => {
				self.camera.pan = Point::new(at.x - anchor.x, at.y - anchor.y);
				true
			}
			DragPhase::Idle => false,
		}
	}

	/// Back to idle.
	pub fn pointer_up(&mut self) {
		self.phase = DragPhase::Idle;
	}

	/// Leaving the surface ends any drag.
	pub fn pointer_leave(&mut self) {
		self.phase = DragPhase::Idle;
	}

	/// Shift the pan by a screen-space delta.
	pub fn pan_by(&mut self, delta: Point) {
		self.camera.pan.x += delta.x;
		self.camera.pan.y += delta.y;
	}

	/// Scale zoom by `factor` about the world origin, clamped to the configured range.
	pub fn zoom_by(&mut self, factor: f64) {
		self.camera.zoom = self.clamp_zoom(self.camera.zoom * factor);
	}

	/// Scale zoom keeping the world point under `anchor` (screen space) fixed.
	pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
		let new_zoom = self.clamp_zoom(self.camera.zoom * factor);
		let ratio = new_zoom / self.camera.zoom;
		self.camera.pan = Point::new(
			anchor.x - (anchor.x - self.camera.pan.x) * ratio,
			anchor.y - (anchor.y - self.camera.pan.y) * ratio,
		);
		self.camera.zoom = new_zoom;
	}

	/// One wheel notch: positive `delta_y` zooms out.
	pub fn wheel(&mut self, delta_y: f64, anchor: Point) {
		let factor = if delta_y > 0.0 {
			1.0 / self.config.zoom_step
		} else {
			self.config.zoom_step
		};
		self.zoom_at(factor, anchor);
	}

	fn clamp_zoom(&self, zoom: f64) -> f64 {
		zoom.clamp(self.config.min_zoom, self.config.max_zoom)
	}

	/// Frame `ids`. No-op (returns `None`) when none of them are positioned.
	pub fn fit_to_graph(&mut self, ids: &[NodeId], layout: &Layout) -> Option<Camera> {
		let camera = fit_camera(
			layout.points_for(ids.iter().copied()),
			self.size,
			self.config.fit_padding,
			self.config.fit_max_zoom,
		)?;
		debug!(
			"fit_to_graph: {} ids -> zoom {:.3}, pan ({:.1}, {:.1})",
			ids.len(),
			camera.zoom,
			camera.pan.x,
			camera.pan.y
		);
		self.camera = camera;
		Some(camera)
	}

	/// Centre `id` at the focus zoom. No-op when it has no position.
	pub fn center_on_node(&mut self, id: NodeId, layout: &Layout) -> Option<Camera> {
		let target = layout.get(id)?;
		let camera = center_camera(target, self.size, self.config.focus_zoom);
		debug!("center_on_node {id}: zoom {:.3}", camera.zoom);
		self.camera = camera;
		Some(camera)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::path_graph::config::LayoutConfig;
	use crate::components::path_graph::layout::layout;
	use crate::components::path_graph::model::PathGraph;
	use crate::components::path_graph::types::PathNode;

	const SIZE: ViewportSize = ViewportSize::new(1200.0, 800.0);

	fn viewport() -> Viewport {
		Viewport::new(SIZE, ViewportConfig::default())
	}

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn single_point_fits_at_cap_and_is_centred() {
		let cam = fit_camera([Point::new(400.0, 0.0)], SIZE, 150.0, 1.5).unwrap();
		assert_eq!(cam.zoom, 1.5);
		let on_screen = cam.world_to_screen(Point::new(400.0, 0.0));
		assert!(approx(on_screen.x, 600.0) && approx(on_screen.y, 400.0));
	}

	#[test]
	fn horizontal_line_fits_by_width() {
		let points = [Point::new(0.0, 0.0), Point::new(1800.0, 0.0)];
		let cam = fit_camera(points, SIZE, 150.0, 1.5).unwrap();
		// (1200 - 300) / 1800
		assert!(approx(cam.zoom, 0.5));
		assert!(approx(cam.pan.x, 600.0 - 900.0 * 0.5));
		assert!(approx(cam.pan.y, 400.0));
	}

	#[test]
	fn tighter_axis_wins() {
		let points = [Point::new(0.0, -200.0), Point::new(400.0, 200.0)];
		let cam = fit_camera(points, SIZE, 150.0, 1.5).unwrap();
		// x: 900/400 = 2.25, y: 500/400 = 1.25
		assert!(approx(cam.zoom, 1.25));
	}

	#[test]
	fn fit_of_nothing_is_none() {
		assert!(fit_camera(std::iter::empty(), SIZE, 150.0, 1.5).is_none());
	}

	#[test]
	fn oversized_padding_still_yields_positive_zoom() {
		let points = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
		let cam = fit_camera(points, ViewportSize::new(200.0, 200.0), 150.0, 1.5).unwrap();
		assert!(cam.zoom > 0.0);
	}

	#[test]
	fn wheel_zoom_is_clamped_both_ways() {
		let mut vp = viewport();
		for _ in 0..100 {
			vp.wheel(-1.0, Point::new(10.0, 10.0));
			assert!(vp.camera.zoom <= 3.0);
		}
		assert!(approx(vp.camera.zoom, 3.0));
		for _ in 0..100 {
			vp.wheel(1.0, Point::new(10.0, 10.0));
			assert!(vp.camera.zoom >= 0.3);
		}
		assert!(approx(vp.camera.zoom, 0.3));
	}

	#[test]
	fn zoom_by_clamps_and_keeps_pan() {
		let mut vp = viewport();
		vp.pan_by(Point::new(5.0, -5.0));
		vp.zoom_by(100.0);
		assert_eq!(vp.camera.zoom, 3.0);
		assert_eq!(vp.camera.pan, Point::new(5.0, -5.0));
	}

	#[test]
	fn zoom_at_keeps_anchor_fixed() {
		let mut vp = viewport();
		let anchor = Point::new(300.0, 200.0);
		let before = vp.camera.screen_to_world(anchor);
		vp.zoom_at(1.1, anchor);
		let after = vp.camera.screen_to_world(anchor);
		assert!(approx(before.x, after.x) && approx(before.y, after.y));
	}

	#[test]
	fn drag_tracks_pointer_delta_and_ends_on_leave() {
		let mut vp = viewport();
		vp.pan_by(Point::new(10.0, 20.0));
		assert!(!vp.pointer_move(Point::new(50.0, 50.0)));

		vp.pointer_down(Point::new(100.0, 100.0));
		assert!(vp.is_dragging());
		assert!(vp.pointer_move(Point::new(130.0, 90.0)));
		assert_eq!(vp.camera.pan, Point::new(40.0, 10.0));

		vp.pointer_leave();
		assert_eq!(vp.phase(), DragPhase::Idle);
		assert!(!vp.pointer_move(Point::new(0.0, 0.0)));
		assert_eq!(vp.camera.pan, Point::new(40.0, 10.0));
	}

	#[test]
	fn wheel_while_dragging_still_zooms() {
		let mut vp = viewport();
		vp.pointer_down(Point::new(0.0, 0.0));
		vp.wheel(-1.0, Point::new(0.0, 0.0));
		assert!(approx(vp.camera.zoom, 1.1));
		assert!(vp.is_dragging());
	}

	#[test]
	fn camera_commands_on_unknown_nodes_are_no_ops() {
		let graph = PathGraph::new(vec![PathNode::new(1, "only")]);
		let l = layout(&graph, &LayoutConfig::default());
		let mut vp = viewport();
		vp.pan_by(Point::new(3.0, 4.0));
		let before = vp.camera;
		assert!(vp.center_on_node(42, &l).is_none());
		assert!(vp.fit_to_graph(&[42, 43], &l).is_none());
		assert_eq!(vp.camera, before);
	}

	#[test]
	fn center_on_node_uses_focus_zoom() {
		let graph = PathGraph::new(vec![
			PathNode::new(1, "a").with_unlocks([2]),
			PathNode::new(2, "b"),
		]);
		let l = layout(&graph, &LayoutConfig::default());
		let mut vp = viewport();
		let cam = vp.center_on_node(2, &l).unwrap();
		assert_eq!(cam.zoom, 1.2);
		assert!(approx(cam.pan.x, 600.0 - 400.0 * 1.2));
	}
}
