use leptos::prelude::*;
use log::info;

use crate::components::path_graph::session::default_store;
use crate::components::path_graph::{CompletionSet, PathGraphCanvas, PathNode};

const TOPICS: &[(&str, &str)] = &[
	("Rust Syntax", "foundations"),
	("Ownership & Borrowing", "foundations"),
	("Structs and Enums", "foundations"),
	("Error Handling", "core"),
	("Traits and Generics", "core"),
	("Iterators", "core"),
	("Smart Pointers", "core"),
	("Concurrency", "systems"),
	("Async Rust", "systems"),
	("Unsafe Rust", "specialized"),
];

const BRANCHES: &[(&str, &str)] = &[
	("Pattern Matching Practice", "apply"),
	("Advanced Lifetimes", "quiz"),
	("API Design Patterns", "quiz"),
	("Macro Exercises", "build"),
	("Allocator Internals", "quiz"),
];

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Sample path: a chained spine with a couple of branches on every other node.
fn generate_sample_path() -> Vec<PathNode> {
	let main_ids: Vec<i64> = (1..=TOPICS.len() as i64).collect();
	let mut nodes = Vec::new();
	let mut branch_id = 100;
	let mut branch_topic = 0;

	for (i, &(name, category)) in TOPICS.iter().enumerate() {
		let id = main_ids[i];
		let mut node = PathNode {
			id,
			name: name.into(),
			category: category.into(),
			difficulty: (2 + i * 8 / TOPICS.len()) as u8,
			estimated_hours: (4.0 + rand_simple(i) * 8.0).round(),
			assessment_type: "quiz".into(),
			dependencies: if i == 0 { vec![] } else { vec![main_ids[i - 1]] },
			unlocks: main_ids.get(i + 1).map(|&n| vec![n]).unwrap_or_default(),
			competencies: vec![],
		};
		let mut branches = Vec::new();
		if i % 2 == 1 {
			for _ in 0..(1 + i % 3).min(2) {
				let (bname, assessment) = BRANCHES[branch_topic % BRANCHES.len()];
				branch_topic += 1;
				branches.push(PathNode {
					id: branch_id,
					name: bname.into(),
					category: category.into(),
					difficulty: (3 + (rand_simple(branch_id as usize) * 6.0) as u8).min(10),
					estimated_hours: 3.0,
					assessment_type: assessment.into(),
					dependencies: vec![id],
					unlocks: vec![],
					competencies: vec![],
				});
				node.competencies.push(branch_id);
				branch_id += 1;
			}
		}
		nodes.push(node);
		nodes.extend(branches);
	}
	nodes
}

/// Demo learning path for a single role.
#[component]
pub fn PathPage() -> impl IntoView {
	let nodes = Signal::derive(generate_sample_path);
	let completed = RwSignal::new(CompletionSet::from([1, 2]));

	// Finishing a session here just marks the node proven.
	let on_select = Callback::new(move |node: PathNode| {
		info!("session finished: {} ({})", node.name, node.id);
		completed.update(|done| {
			done.insert(node.id);
		});
	});
	let on_back = Callback::new(move |_: ()| {
		info!("back requested");
		if let Ok(history) = window().history() {
			let _ = history.back();
		}
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<PathGraphCanvas
					nodes=nodes
					completed=completed
					on_select=on_select
					on_back=on_back
					store=default_store("frontier")
				/>
			</div>
		</ErrorBoundary>
	}
}
