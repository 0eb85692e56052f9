//! Chord diagram with a circle pack in its middle, drawn on a canvas by Leptos.
//!
//! Rows of a weight matrix become segments of the outer ring, columns become
//! packed circles, and every non-zero cell becomes a ribbon between the two.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

pub use components::chord_pack::{
	ChordPackCanvas, ChordPackConfig, ChordPackData, ChordPackError, DataItem, ItemInfo, LinkInfo,
};

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Route `log` output to the browser console and report panics there.
pub fn init_logging() {
	let level = if cfg!(debug_assertions) {
		Level::Debug
	} else {
		Level::Info
	};
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("chord pack logging at {level}");
}

/// Demo app: the sample diagram at `/`, a 404 page elsewhere.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Chord Pack" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
