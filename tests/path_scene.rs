//! End-to-end runs of the path engine over backend-shaped JSON.

use frontier_path_canvas::components::path_graph::viewport::fit_camera;
use frontier_path_canvas::components::path_graph::{
	CompletionSet, EdgeKind, PathGraph, PathGraphConfig, Prominence, Scene, ViewportSize, Visibility,
	VisibilityMode, find_frontier, layout, spotlight_set,
};

const PATH_JSON: &str = r#"[
	{"skillNodeId": 1, "name": "Syntax", "category": "foundations", "difficulty": 1,
	 "estimatedHours": 4, "dependencies": [], "unlocks": [2]},
	{"skillNodeId": 2, "name": "Ownership", "category": "foundations", "difficulty": 3,
	 "estimatedHours": 6, "dependencies": [1], "unlocks": [3], "competencies": [5]},
	{"skillNodeId": 3, "name": "Traits", "category": "core", "difficulty": 5,
	 "estimatedHours": 8, "dependencies": [2], "unlocks": []},
	{"skillNodeId": 4, "name": "Extra", "category": "core", "difficulty": 4,
	 "estimatedHours": 2, "dependencies": [], "unlocks": [], "competencies": [5]},
	{"skillNodeId": 5, "name": "Lifetimes deep dive", "category": "core", "difficulty": 8,
	 "estimatedHours": 5, "dependencies": [2], "unlocks": []}
]"#;

fn completed(ids: &[i64]) -> CompletionSet {
	ids.iter().copied().collect()
}

#[test]
fn frontier_follows_completion() {
	let graph = PathGraph::from_json(PATH_JSON).unwrap();
	assert_eq!(find_frontier(&graph, &completed(&[1])).map(|n| n.id), Some(2));
	// Node 4 has no prerequisites, so it becomes the frontier once 1-3 are done.
	assert_eq!(find_frontier(&graph, &completed(&[1, 2, 3])).map(|n| n.id), Some(4));
	assert!(find_frontier(&graph, &completed(&[1, 2, 3, 4])).is_none());
}

#[test]
fn shared_branch_is_placed_once_and_flagged() {
	let graph = PathGraph::from_json(PATH_JSON).unwrap();
	let config = PathGraphConfig::default();
	let l = layout(&graph, &config.layout);

	assert_eq!(l.ids().filter(|&id| id == 5).count(), 1);
	// Owned by node 2 (x = 400), first slot above the spine.
	assert_eq!(l.get(5).map(|p| (p.x, p.y)), Some((450.0, -200.0)));
	assert!(graph.validate_ownership().is_err());
}

#[test]
fn scene_is_deterministic_and_ordered() {
	let graph = PathGraph::from_json(PATH_JSON).unwrap();
	let config = PathGraphConfig::default();
	let done = completed(&[1]);
	let build = || {
		let l = layout(&graph, &config.layout);
		let vis = Visibility::resolve(&graph, &done, VisibilityMode::Spotlight);
		Scene::build(&graph, &l, &vis, &done, &config)
	};
	let scene = build();
	assert_eq!(scene, build());

	let frontier = find_frontier(&graph, &done).unwrap();
	let spot = spotlight_set(frontier, &graph);
	assert!(spot.contains(&5) && spot.contains(&3) && !spot.contains(&4));

	let prominence = |id| scene.node(id).unwrap().prominence;
	assert_eq!(prominence(2), Prominence::Frontier);
	assert_eq!(prominence(1), Prominence::Dependency);
	assert_eq!(prominence(3), Prominence::Spotlight);
	assert_eq!(prominence(4), Prominence::Ambient);

	// Branch 5 depends on 2, which is not complete yet.
	let competency = scene.edges.iter().find(|e| e.kind == EdgeKind::Competency).unwrap();
	assert!(competency.locked);
}

#[test]
fn spotlight_frames_fewer_nodes_than_full_map() {
	let graph = PathGraph::from_json(PATH_JSON).unwrap();
	let config = PathGraphConfig::default();
	let l = layout(&graph, &config.layout);
	let done = completed(&[1]);
	let size = ViewportSize::new(1280.0, 720.0);
	let zoom_for = |mode| {
		let ids = Visibility::resolve(&graph, &done, mode).visible_ids(&l);
		fit_camera(l.points_for(ids), size, config.viewport.fit_padding, config.viewport.fit_max_zoom)
			.unwrap()
			.zoom
	};
	assert!(zoom_for(VisibilityMode::Spotlight) > zoom_for(VisibilityMode::FullMap));
}
