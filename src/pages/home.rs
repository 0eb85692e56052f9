use leptos::prelude::*;
use log::info;

use crate::components::chord_pack::{ChordPackCanvas, ChordPackData, ItemInfo};

/// Generate a sample matrix: each row links up to ten distinct columns with
/// weights in `1..=1000`, and some rows link nothing.
fn generate_sample_data(rows: usize, cols: usize) -> ChordPackData {
	let mut seed = 0;
	let mut next = move || {
		seed += 1;
		rand_simple(seed)
	};

	let mut matrix = vec![vec![0.0; cols]; rows];
	for row in &mut matrix {
		let count = ((next() * 11.0) as usize).min(cols);
		let mut assigned = 0;
		while assigned < count {
			let col = (next() * cols as f64) as usize;
			if row[col] == 0.0 {
				row[col] = (1 + (next() * 1000.0) as usize) as f64;
				assigned += 1;
			}
		}
	}

	ChordPackData {
		chord_names: (0..rows).map(|i| format!("site-{i}.example")).collect(),
		circle_names: (0..cols).map(|j| format!("User {j}")).collect(),
		matrix,
	}
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn describe(info: &ItemInfo) -> String {
	match info {
		ItemInfo::Chord(d) => format!("chord {} ({})", d.name, d.value),
		ItemInfo::Circle(d) => format!("circle {} ({})", d.name, d.value),
		ItemInfo::Link(l) => format!("link {} -> {}", l.chord_name, l.circle_name),
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let chart_data = Signal::derive(move || generate_sample_data(12, 30));
	let (selected, set_selected) = signal(Vec::<String>::new());

	let on_select = Callback::new(move |item: ItemInfo| {
		let label = describe(&item);
		info!("select {label}");
		set_selected.update(|s| s.push(label));
	});
	let on_unselect = Callback::new(move |item: ItemInfo| {
		let label = describe(&item);
		info!("unselect {label}");
		set_selected.update(|s| s.retain(|l| *l != label));
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
				<ChordPackCanvas
					data=chart_data
					fullscreen=true
					on_item_select=on_select
					on_item_unselect=on_unselect
				/>
				<div class="graph-overlay">
					<h1>"Chord Pack"</h1>
					<p class="subtitle">
						"Hover to preview links. Click an arc, circle or ribbon to select it."
					</p>
					<ul>
						{move || {
							selected
								.get()
								.into_iter()
								.map(|label| view! { <li>{label}</li> })
								.collect_view()
						}}
					</ul>
				</div>
			</div>
		</ErrorBoundary>
	}
}
