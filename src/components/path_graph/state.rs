use log::{debug, info};

use super::config::PathGraphConfig;
use super::frontier::{Visibility, VisibilityMode, is_locked};
use super::layout::{Layout, layout};
use super::model::PathGraph;
use super::scene::Scene;
use super::session::{SessionHandle, VISIBILITY_MODE_KEY};
use super::types::{CompletionSet, NodeId, PathNode, Point, ViewportSize};
use super::viewport::{Camera, Viewport};

/// Press position kept to tell a click from a drag.
#[derive(Clone, Copy, Debug, Default)]
struct Press {
	at: Point,
	moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
	/// Eases 0 -> 1 while a node is hovered.
	pub highlight_t: f64,
}

/// Everything the path canvas needs between frames.
pub struct PathViewState {
	pub graph: PathGraph,
	pub layout: Layout,
	pub visibility: Visibility,
	pub scene: Scene,
	pub completed: CompletionSet,
	pub viewport: Viewport,
	pub hover: HoverState,
	pub pulse_time: f64,
	config: PathGraphConfig,
	store: Option<SessionHandle>,
	press: Option<Press>,
}

impl PathViewState {
	pub fn new(
		nodes: Vec<PathNode>,
		completed: CompletionSet,
		size: ViewportSize,
		config: PathGraphConfig,
		store: Option<SessionHandle>,
	) -> Self {
		let mode = store
			.as_ref()
			.and_then(|s| s.get(VISIBILITY_MODE_KEY))
			.and_then(|v| VisibilityMode::parse(&v))
			.unwrap_or_default();
		let graph = PathGraph::new(nodes);
		let layout = layout(&graph, &config.layout);
		let visibility = Visibility::resolve(&graph, &completed, mode);
		let scene = Scene::build(&graph, &layout, &visibility, &completed, &config);
		let mut state = Self {
			graph,
			layout,
			visibility,
			scene,
			completed,
			viewport: Viewport::new(size, config.viewport.clone()),
			hover: HoverState::default(),
			pulse_time: 0.0,
			config,
			store,
			press: None,
		};
		state.fit_to_graph();
		info!(
			"path view: {} nodes, {} positioned, mode {}",
			state.graph.nodes().len(),
			state.layout.len(),
			mode.as_str()
		);
		state
	}

	pub fn frontier(&self) -> Option<&PathNode> {
		self.visibility.frontier.and_then(|id| self.graph.get(id))
	}

	/// New node list: relayout and refit.
	pub fn set_nodes(&mut self, nodes: Vec<PathNode>) {
		self.graph = PathGraph::new(nodes);
		self.layout = layout(&self.graph, &self.config.layout);
		self.hover = HoverState::default();
		self.refresh();
		self.fit_to_graph();
	}

	/// Positions stay put; only visibility and lock state change.
	pub fn set_completed(&mut self, completed: CompletionSet) {
		self.completed = completed;
		self.refresh();
	}

	pub fn set_mode(&mut self, mode: VisibilityMode) {
		if mode == self.visibility.mode {
			return;
		}
		if let Some(store) = &self.store {
			store.set(VISIBILITY_MODE_KEY, mode.as_str());
		}
		self.visibility = Visibility::resolve(&self.graph, &self.completed, mode);
		self.rebuild_scene();
		self.fit_to_graph();
	}

	fn refresh(&mut self) {
		self.visibility = Visibility::resolve(&self.graph, &self.completed, self.visibility.mode);
		self.rebuild_scene();
	}

	fn rebuild_scene(&mut self) {
		self.scene = Scene::build(
			&self.graph,
			&self.layout,
			&self.visibility,
			&self.completed,
			&self.config,
		);
	}

	pub fn fit_to_graph(&mut self) -> Option<Camera> {
		let ids = self.visibility.visible_ids(&self.layout);
		self.viewport.fit_to_graph(&ids, &self.layout)
	}

	pub fn center_on_frontier(&mut self) -> Option<Camera> {
		let id = self.visibility.frontier?;
		self.viewport.center_on_node(id, &self.layout)
	}

	pub fn node_at_position(&self, screen: Point) -> Option<NodeId> {
		let world = self.viewport.camera.screen_to_world(screen);
		self.scene.hit_test(world, self.config.nodes.hit_slop)
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		if self.hover.node != node {
			self.hover.node = node;
			self.hover.highlight_t = 0.0;
		}
	}

	pub fn pointer_down(&mut self, at: Point) {
		self.press = Some(Press { at, moved: false });
		self.viewport.pointer_down(at);
	}

	pub fn pointer_move(&mut self, at: Point) {
		if let Some(press) = self.press.as_mut() {
			if press.at.distance_to(at) > self.config.viewport.click_slop {
				press.moved = true;
			}
		}
		if !self.viewport.pointer_move(at) {
			let hovered = self.node_at_position(at);
			self.set_hover(hovered);
		}
	}

	/// Ends the drag; a press that never moved activates the node under it.
	/// Locked nodes are never activated.
	pub fn pointer_up(&mut self, at: Point) -> Option<PathNode> {
		self.viewport.pointer_up();
		let press = self.press.take()?;
		if press.moved {
			return None;
		}
		let id = self.node_at_position(at)?;
		let node = self.graph.get(id)?;
		if is_locked(node, &self.completed) {
			debug!("ignoring click on locked node {id}");
			return None;
		}
		Some(node.clone())
	}

	pub fn pointer_leave(&mut self) {
		self.viewport.pointer_leave();
		self.press = None;
		self.set_hover(None);
	}

	/// Drop in-flight gesture state before the view is torn down.
	pub fn cancel_gestures(&mut self) {
		self.pointer_leave();
	}

	pub fn wheel(&mut self, delta_y: f64, at: Point) {
		self.viewport.wheel(delta_y, at);
	}

	pub fn tick(&mut self, dt: f64) {
		self.pulse_time += dt;
		if self.hover.node.is_some() {
			self.hover.highlight_t = (self.hover.highlight_t + dt * 4.0).min(1.0);
		}
	}

	pub fn resize(&mut self, size: ViewportSize) {
		self.viewport.resize(size);
	}
}
