//! Edge geometry between node rims rather than centres.

use serde::Serialize;

use super::types::Point;

const MIN_EDGE_LENGTH: f64 = 0.001;

/// Fraction of the x-span used to place each bezier control point.
const CURVE_TENSION: f64 = 0.3;

/// Straight line from `(x1, y1)` to `(x2, y2)`, arrowhead at the second point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct Segment {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// Cubic bezier in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CubicCurve {
	/// On the source rim.
	pub start: Point,
	/// Level with `start`.
	pub control1: Point,
	/// Level with `end`.
	pub control2: Point,
	/// On the target rim.
	pub end: Point,
}

/// Routed shape of one edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum EdgeGeometry {
	/// Unlock edges.
	Line(Segment),
	/// Competency edges.
	Curve(CubicCurve),
}

// Unit direction from `source` to `target`, or None when they coincide.
fn direction(source: Point, target: Point) -> Option<(f64, f64)> {
	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < MIN_EDGE_LENGTH {
		return None;
	}
	Some((dx / dist, dy / dist))
}

fn rims(source: Point, target: Point, source_radius: f64, target_radius: f64) -> Option<(Point, Point)> {
	let (ux, uy) = direction(source, target)?;
	Some((
		Point::new(source.x + ux * source_radius, source.y + uy * source_radius),
		Point::new(target.x - ux * target_radius, target.y - uy * target_radius),
	))
}

/// Straight unlock edge, trimmed by each node's radius so the arrowhead sits on the rim.
pub fn route_main_edge(
	source: Point,
	target: Point,
	source_radius: f64,
	target_radius: f64,
) -> Option<Segment> {
	let (a, b) = rims(source, target, source_radius, target_radius)?;
	Some(Segment {
		x1: a.x,
		y1: a.y,
		x2: b.x,
		y2: b.y,
	})
}

/// S-curve from a parent node's rim to a branch node's rim.
pub fn route_branch_edge(
	source: Point,
	target: Point,
	source_radius: f64,
	target_radius: f64,
) -> Option<CubicCurve> {
	let (start, end) = rims(source, target, source_radius, target_radius)?;
	let span = end.x - start.x;
	Some(CubicCurve {
		start,
		control1: Point::new(start.x + span * CURVE_TENSION, start.y),
		control2: Point::new(end.x - span * CURVE_TENSION, end.y),
		end,
	})
}
