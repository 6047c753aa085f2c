use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::edges::{CubicCurve, EdgeGeometry, Segment};
use super::frontier::{NodeStatus, Prominence};
use super::scene::{EdgeDescriptor, EdgeKind, NodeDescriptor, RadiusClass};
use super::state::PathViewState;

const BACKGROUND: &str = "#000000";
const UNLOCK_EDGE: &str = "59, 130, 246";
const BRANCH_EDGE: &str = "168, 85, 247";
const BRANCH_EDGE_LOCKED: &str = "100, 116, 139";
const FRONTIER_RING: &str = "250, 204, 21";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &PathViewState, ctx: &CanvasRenderingContext2d) {
	let size = state.viewport.size;
	let camera = state.viewport.camera;
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, size.width, size.height);
	ctx.save();
	let _ = ctx.translate(camera.pan.x, camera.pan.y);
	let _ = ctx.scale(camera.zoom, camera.zoom);
	for edge in &state.scene.edges {
		draw_edge(edge, ctx);
	}
	for node in &state.scene.nodes {
		draw_node(state, node, ctx);
	}
	if let Some(node) = state.hover.node.and_then(|id| state.scene.node(id)) {
		draw_branch_label(state, node, ctx);
	}
	ctx.restore();
}

fn draw_edge(edge: &EdgeDescriptor, ctx: &CanvasRenderingContext2d) {
	let (rgb, alpha, width, arrow) = match (edge.kind, edge.locked) {
		(EdgeKind::Unlock, _) => (UNLOCK_EDGE, 0.8, 5.0, 16.0),
		(EdgeKind::Competency, false) => (BRANCH_EDGE, 0.6, 2.0, 10.0),
		(EdgeKind::Competency, true) => (BRANCH_EDGE_LOCKED, 0.3, 2.0, 10.0),
	};
	ctx.set_stroke_style_str(&format!("rgba({rgb}, {alpha})"));
	ctx.set_fill_style_str(&format!("rgba({rgb}, {alpha})"));
	ctx.set_line_width(width);
	ctx.set_line_cap("round");

	// Arrowhead direction: along the segment, or along the final tangent of the curve.
	let (tip, from) = match edge.geometry {
		EdgeGeometry::Line(Segment { x1, y1, x2, y2 }) => {
			ctx.begin_path();
			ctx.move_to(x1, y1);
			ctx.line_to(x2, y2);
			ctx.stroke();
			((x2, y2), (x1, y1))
		}
		EdgeGeometry::Curve(CubicCurve {
			start,
			control1,
			control2,
			end,
		}) => {
			ctx.begin_path();
			ctx.move_to(start.x, start.y);
			ctx.bezier_curve_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y);
			ctx.stroke();
			((end.x, end.y), (control2.x, control2.y))
		}
	};
	draw_arrowhead(ctx, tip, from, arrow);
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, tip: (f64, f64), from: (f64, f64), size: f64) {
	let (dx, dy) = (tip.0 - from.0, tip.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let (back_x, back_y) = (tip.0 - ux * size, tip.1 - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.0, tip.1);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn node_fill(node: &NodeDescriptor) -> &'static str {
	match (node.status, node.class) {
		(NodeStatus::Locked, RadiusClass::Branch) => "rgba(51, 65, 85, 0.3)",
		(NodeStatus::Locked, RadiusClass::Main) => "rgba(30, 41, 59, 0.5)",
		(NodeStatus::Completed, _) => "#059669",
		_ => "#4f46e5",
	}
}

fn draw_node(state: &PathViewState, node: &NodeDescriptor, ctx: &CanvasRenderingContext2d) {
	let (x, y, r) = (node.position.x, node.position.y, node.radius);
	ctx.set_global_alpha(node.opacity);

	if node.prominence == Prominence::Frontier {
		// Pulse period of two seconds.
		let pulse = 0.5 + 0.5 * (state.pulse_time * PI).sin();
		if let Ok(glow) = ctx.create_radial_gradient(x, y, r * 0.8, x, y, r * 1.6) {
			let _ = glow.add_color_stop(0.0, &format!("rgba({FRONTIER_RING}, {})", 0.35 * pulse));
			let _ = glow.add_color_stop(1.0, &format!("rgba({FRONTIER_RING}, 0)"));
			ctx.begin_path();
			let _ = ctx.arc(x, y, r * 1.6, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&glow);
			ctx.fill();
		}
	}

	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(node_fill(node));
	ctx.fill();

	let hovered = state.hover.node == Some(node.id) && !node.locked;
	let (ring, ring_width) = if node.prominence == Prominence::Frontier {
		(format!("rgb({FRONTIER_RING})"), 4.0)
	} else if node.locked {
		("rgba(51, 65, 85, 1)".to_owned(), 2.0)
	} else {
		let t = if hovered {
			ease_out_cubic(state.hover.highlight_t)
		} else {
			0.0
		};
		(format!("rgba(255, 255, 255, {})", 0.3 + 0.5 * t), 2.0 + 2.0 * t)
	};
	ctx.set_stroke_style_str(&ring);
	ctx.set_line_width(ring_width);
	ctx.stroke();

	ctx.set_text_align("center");
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
	ctx.set_font("bold 14px sans-serif");
	let _ = ctx.fill_text(&node.ordinal.to_string(), x - r * 0.6, y - r * 0.6);

	if node.locked {
		ctx.set_font("24px sans-serif");
		let _ = ctx.fill_text("🔒", x, y + 8.0);
	} else {
		ctx.set_font(&format!("600 {}px sans-serif", if node.class == RadiusClass::Branch { 12 } else { 15 }));
		let _ = ctx.fill_text(&truncate(&node.name, 18), x, y + 5.0);
	}

	ctx.set_font("bold 11px sans-serif");
	ctx.set_fill_style_str(badge_color(node.status));
	let _ = ctx.fill_text(node.status.badge(), x, y + r + 18.0);
	ctx.set_global_alpha(1.0);
}

fn badge_color(status: NodeStatus) -> &'static str {
	match status {
		NodeStatus::Completed => "#4ade80",
		NodeStatus::Active => "#facc15",
		NodeStatus::Locked => "#64748b",
		NodeStatus::Ready => "#60a5fa",
	}
}

fn draw_branch_label(state: &PathViewState, node: &NodeDescriptor, ctx: &CanvasRenderingContext2d) {
	let Some(label) = node.branch_label else {
		return;
	};
	let t = ease_out_cubic(state.hover.highlight_t);
	if t < 0.01 {
		return;
	}
	let (x, y) = (node.position.x, node.position.y - node.radius - 36.0);
	ctx.set_global_alpha(t);
	ctx.set_text_align("center");
	ctx.set_font("bold 13px sans-serif");
	ctx.set_fill_style_str(label.color());
	let _ = ctx.fill_text(label.label(), x, y);
	ctx.set_font("11px sans-serif");
	ctx.set_fill_style_str("rgba(226, 232, 240, 0.9)");
	let _ = ctx.fill_text(label.tooltip(), x, y + 16.0);
	ctx.set_global_alpha(1.0);
}

fn truncate(name: &str, max: usize) -> String {
	if name.chars().count() <= max {
		return name.to_owned();
	}
	let mut out: String = name.chars().take(max - 1).collect();
	out.push('…');
	out
}
