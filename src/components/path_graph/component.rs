use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::config::PathGraphConfig;
use super::frontier::{NodeStatus, VisibilityMode};
use super::render;
use super::session::{SessionHandle, VISIBILITY_MODE_KEY};
use super::state::PathViewState;
use super::ticker::FrameTicker;
use super::types::{CompletionSet, NodeId, PathNode, Point, ViewportSize};

type SharedState = Rc<RefCell<Option<PathViewState>>>;

fn surface_size(canvas: &HtmlCanvasElement, fullscreen: bool) -> ViewportSize {
	if fullscreen {
		if let Some(win) = web_sys::window() {
			let dim = |v: Result<JsValue, JsValue>, fallback| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
			return ViewportSize::new(dim(win.inner_width(), 800.0), dim(win.inner_height(), 600.0));
		}
	}
	let parent = canvas.parent_element();
	ViewportSize::new(
		parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0),
		parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0),
	)
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn with_state(state: &SharedState, f: impl FnOnce(&mut PathViewState)) {
	if let Some(ref mut s) = *state.borrow_mut() {
		f(s);
	}
}

/// Empties the slot, discarding any press or drag still in flight.
fn release_state(state: &SharedState) -> Option<PathViewState> {
	let mut released = state.borrow_mut().take();
	if let Some(s) = released.as_mut() {
		s.cancel_gestures();
	}
	released
}

fn current_frontier(state: &SharedState) -> Option<PathNode> {
	state.borrow().as_ref().and_then(|s| s.frontier().cloned())
}

/// Interactive path map: spine plus branches, spotlight around the frontier,
/// drag to pan, wheel to zoom.
#[component]
pub fn PathGraphCanvas(
	/// Path in sequence order; changing it relayouts and refits.
	#[prop(into)]
	nodes: Signal<Vec<PathNode>>,
	/// Proven node ids. Positions never move when this changes.
	#[prop(into)]
	completed: Signal<CompletionSet>,
	/// Invoked when the learner starts a session on a node.
	on_select: Callback<PathNode>,
	/// Invoked by the header's back button.
	on_back: Callback<()>,
	/// Node to centre on whenever it changes.
	#[prop(optional, into)]
	focus: MaybeProp<NodeId>,
	/// Where the spotlight/full-map choice is kept.
	#[prop(optional)]
	store: Option<SessionHandle>,
	/// Layout, camera and style tunables.
	#[prop(optional)]
	config: PathGraphConfig,
	/// Size to the window instead of the parent element.
	#[prop(default = true)]
	fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));

	let initial_mode = store
		.as_ref()
		.and_then(|s| s.get(VISIBILITY_MODE_KEY))
		.and_then(|v| VisibilityMode::parse(&v))
		.unwrap_or_default();
	let mode = RwSignal::new(initial_mode);
	let dragging = RwSignal::new(false);
	let selected = RwSignal::new(None::<PathNode>);

	let frontier = RwSignal::new(None::<PathNode>);

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let size = surface_size(&canvas, fullscreen);
		canvas.set_width(size.width as u32);
		canvas.set_height(size.height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("path canvas: 2d context unavailable");
			return;
		};
		*state_init.borrow_mut() = Some(PathViewState::new(
			nodes.get_untracked(),
			completed.get_untracked(),
			size,
			config.clone(),
			store.clone(),
		));
		frontier.set(current_frontier(&state_init));

		let mut resize_listener = None;
		if fullscreen {
			let state_resize = state_init.clone();
			let resize_cb = Closure::<dyn FnMut()>::new(move || {
				let size = surface_size(&canvas, true);
				canvas.set_width(size.width as u32);
				canvas.set_height(size.height as u32);
				with_state(&state_resize, |s| s.resize(size));
			});
			if let Some(window) = web_sys::window() {
				let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
			}
			resize_listener = Some(resize_cb);
		}

		let (state_anim, state_teardown) = (state_init.clone(), state_init.clone());
		let ticker = FrameTicker::start(
			move |dt| {
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					s.tick(dt);
					render::render(s, &ctx);
				}
			},
			move || {
				if let (Some(window), Some(cb)) = (web_sys::window(), resize_listener.as_ref()) {
					let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				drop(resize_listener);
				release_state(&state_teardown);
			},
		);

		// Unmount stops the loop; its last frame removes the listener and drops the view state.
		on_cleanup(move || ticker.stop());
	});

	let state_nodes = state.clone();
	Effect::new(move |prev: Option<()>| {
		let list = nodes.get();
		if prev.is_some() {
			with_state(&state_nodes, |s| s.set_nodes(list));
			frontier.set(current_frontier(&state_nodes));
			selected.set(None);
		}
	});

	let state_done = state.clone();
	Effect::new(move |prev: Option<()>| {
		let done = completed.get();
		if prev.is_some() {
			with_state(&state_done, |s| s.set_completed(done));
			frontier.set(current_frontier(&state_done));
		}
	});

	let state_mode = state.clone();
	Effect::new(move |_| {
		let m = mode.get();
		with_state(&state_mode, |s| s.set_mode(m));
	});

	let state_focus = state.clone();
	Effect::new(move |_| {
		if let Some(id) = focus.get() {
			with_state(&state_focus, |s| {
				s.viewport.center_on_node(id, &s.layout);
			});
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(at) = local_point(canvas_ref, &ev) else {
			return;
		};
		with_state(&state_md, |s| s.pointer_down(at));
		dragging.set(true);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(at) = local_point(canvas_ref, &ev) else {
			return;
		};
		with_state(&state_mm, |s| s.pointer_move(at));
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let at = local_point(canvas_ref, &ev);
		let mut activated = None;
		with_state(&state_mu, |s| match at {
			Some(at) => activated = s.pointer_up(at),
			None => s.pointer_leave(),
		});
		dragging.set(false);
		if activated.is_some() {
			selected.set(activated);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_state(&state_ml, |s| s.pointer_leave());
		dragging.set(false);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(at) = local_point(canvas_ref, &ev) else {
			return;
		};
		with_state(&state_wh, |s| s.wheel(ev.delta_y(), at));
	};

	// Camera buttons live in reactive views, which can't hold the Rc'd state;
	// they bump these counters and an effect does the work.
	let fit_requests = RwSignal::new(0u32);
	let center_requests = RwSignal::new(0u32);
	let state_cam = state.clone();
	Effect::new(move |prev: Option<(u32, u32)>| {
		let now = (fit_requests.get(), center_requests.get());
		if let Some((fits, centers)) = prev {
			with_state(&state_cam, |s| {
				if now.0 != fits {
					s.fit_to_graph();
				}
				if now.1 != centers {
					s.center_on_frontier();
				}
			});
		}
		now
	});
	let fit = move |_| fit_requests.update(|n| *n += 1);
	let center = move |_| center_requests.update(|n| *n += 1);

	let mode_button = move |target: VisibilityMode, label: &'static str| {
		view! {
			<button
				class="mode-toggle"
				class:active=move || mode.get() == target
				on:click=move |_| mode.set(target)
			>
				{label}
			</button>
		}
	};

	let command_bar = move || match frontier.get() {
		Some(node) => {
			let (start_node, view_node) = (node.clone(), node.clone());
			view! {
				<div class="command-bar">
					<div class="mission">
						<span class="mission-name">{node.name.clone()}</span>
						<span class="mission-state">{NodeStatus::Active.badge()}</span>
						<span class="mission-meta">
							{format!("{}h • {}/10", node.estimated_hours, node.difficulty)}
						</span>
					</div>
					<button on:click=move |_| on_select.run(start_node.clone())>"START SESSION"</button>
					<button on:click=move |_| selected.set(Some(view_node.clone()))>"VIEW"</button>
					<button title="Center on node" on:click=center>"◎"</button>
					<button title="Reset view" on:click=fit>"⤢"</button>
				</div>
			}
			.into_any()
		}
		None => view! {
			<div class="command-bar complete">
				<span>"Path complete. Every skill on this path is proven."</span>
				<button title="Reset view" on:click=fit>"⤢"</button>
			</div>
		}
		.into_any(),
	};

	let detail_panel = move || {
		selected.get().map(|node| {
			let prereqs = node
				.dependencies
				.iter()
				.filter_map(|dep| {
					let name = nodes.with(|ns| ns.iter().find(|n| n.id == *dep).map(|n| n.name.clone()))?;
					let done = completed.with(|c| c.contains(dep));
					Some(view! {
						<li class:done=done>{if done { "✓ " } else { "○ " }}{name}</li>
					})
				})
				.collect_view();
			let start_node = node.clone();
			view! {
				<aside class="detail-panel">
					<button class="close" on:click=move |_| selected.set(None)>"×"</button>
					<h2>{node.name.clone()}</h2>
					<p class="meta">
						{format!("{}h • Difficulty {}/10", node.estimated_hours, node.difficulty)}
					</p>
					<h3>"Prerequisites"</h3>
					<ul>{prereqs}</ul>
					<button
						class="start"
						on:click=move |_| {
							on_select.run(start_node.clone());
							selected.set(None);
						}
					>
						"START SESSION"
					</button>
				</aside>
			}
		})
	};

	view! {
		<div class="path-graph">
			<canvas
				node_ref=canvas_ref
				class="path-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style:display="block"
				style:cursor=move || if dragging.get() { "grabbing" } else { "grab" }
			/>
			<header class="path-header">
				<button class="back" on:click=move |_| on_back.run(())>"← Back"</button>
				<div class="mode-switch">
					{mode_button(VisibilityMode::Spotlight, "Spotlight")}
					{mode_button(VisibilityMode::FullMap, "Full Map")}
				</div>
			</header>
			{detail_panel}
			{command_bar}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn release_empties_slot_and_cancels_drag() {
		let nodes = vec![
			PathNode::new(1, "one").with_unlocks([2]),
			PathNode::new(2, "two").with_dependencies([1]),
		];
		let state: SharedState = Rc::new(RefCell::new(Some(PathViewState::new(
			nodes,
			CompletionSet::from([1]),
			ViewportSize::new(800.0, 600.0),
			PathGraphConfig::default(),
			None,
		))));
		with_state(&state, |s| s.pointer_down(Point::new(10.0, 10.0)));
		assert_eq!(current_frontier(&state).map(|n| n.id), Some(2));

		let released = release_state(&state).unwrap();
		assert!(state.borrow().is_none());
		assert!(!released.viewport.is_dragging());
		assert!(current_frontier(&state).is_none());
		assert!(release_state(&state).is_none());
	}
}
