use leptos::prelude::*;

/// Shown for any route other than the diagram.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Nothing to chart here"</h1>
			<p>
				<a href="/">"Back to the diagram"</a>
			</p>
		</div>
	}
}
