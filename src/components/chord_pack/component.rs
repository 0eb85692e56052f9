use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::ChordPackConfig;
use super::render;
use super::selection::SelectionEvent;
use super::state::ChordPackState;
use super::types::{ChordPackData, ItemInfo};

type Shared<T> = Rc<RefCell<Option<T>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn canvas_point(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Detach the resize listener and drop everything the canvas owned.
fn teardown(
	state: &Shared<ChordPackState>,
	ctx: &Shared<CanvasRenderingContext2d>,
	resize_cb: &Shared<Closure<dyn FnMut()>>,
) {
	if let (Some(window), Some(cb)) = (web_sys::window(), resize_cb.borrow_mut().take()) {
		let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
	state.borrow_mut().take();
	ctx.borrow_mut().take();
}

/// Canvas chord ring around a circle pack, with hover and click selection.
#[component]
pub fn ChordPackCanvas(
	/// Names and weight matrix to draw.
	#[prop(into)]
	data: Signal<ChordPackData>,
	/// Ring and pack geometry.
	#[prop(default = ChordPackConfig::default())]
	config: ChordPackConfig,
	/// Size the canvas to the window and follow resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
	/// Called for every element that joins the clicked selection.
	#[prop(optional, into)]
	on_item_select: Option<Callback<ItemInfo>>,
	/// Called for every element that leaves the clicked selection.
	#[prop(optional, into)]
	on_item_unselect: Option<Callback<ItemInfo>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let state: Shared<ChordPackState> = Rc::new(RefCell::new(None));
	let ctx: Shared<CanvasRenderingContext2d> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));

	let redraw = {
		let (state, ctx) = (state.clone(), ctx.clone());
		move || {
			if let (Some(s), Some(c)) = (&*state.borrow(), &*ctx.borrow()) {
				render::render(s, c);
			}
		}
	};

	// Callbacks run after every borrow is released so hosts may update `data`.
	let dispatch = move |events: Vec<SelectionEvent>| {
		for event in events {
			match event {
				SelectionEvent::Select(info) => {
					if let Some(cb) = on_item_select {
						cb.run(info);
					}
				}
				SelectionEvent::Unselect(info) => {
					if let Some(cb) = on_item_unselect {
						cb.run(info);
					}
				}
			}
		}
	};

	let (state_init, ctx_init, resize_cb_init, redraw_init) =
		(state.clone(), ctx.clone(), resize_cb.clone(), redraw.clone());

	Effect::new(move |_| {
		let data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if state_init.borrow().is_some() {
			if let Some(s) = state_init.borrow_mut().as_mut() {
				s.set_data(data);
			}
			redraw_init();
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(context) = context_2d(&canvas) else {
			log::error!("canvas has no 2d context");
			return;
		};
		*ctx_init.borrow_mut() = Some(context);
		*state_init.borrow_mut() = Some(ChordPackState::new(data, config.clone(), w, h));

		if fullscreen {
			let (state_resize, canvas_resize, redraw_resize) =
				(state_init.clone(), canvas.clone(), redraw_init.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(s) = state_resize.borrow_mut().as_mut() {
					s.resize(nw, nh);
				}
				redraw_resize();
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		redraw_init();
	});

	let (state_ck, ctx_ck, redraw_ck) = (state.clone(), ctx.clone(), redraw.clone());
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let events = {
			let ctx = ctx_ck.borrow();
			let mut guard = state_ck.borrow_mut();
			let (Some(s), Some(c)) = (guard.as_mut(), ctx.as_ref()) else {
				return;
			};
			let hit = s.element_at(c, x, y);
			s.click(hit)
		};
		redraw_ck();
		dispatch(events);
	};

	let (state_mm, ctx_mm, redraw_mm) = (state.clone(), ctx.clone(), redraw.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let changed = {
			let ctx = ctx_mm.borrow();
			let mut guard = state_mm.borrow_mut();
			let (Some(s), Some(c)) = (guard.as_mut(), ctx.as_ref()) else {
				return;
			};
			let hit = s.element_at(c, x, y);
			s.set_hover(hit)
		};
		if changed {
			redraw_mm();
		}
	};

	let (state_ml, redraw_ml) = (state.clone(), redraw.clone());
	let on_mouseleave = move |_: MouseEvent| {
		let changed = state_ml
			.borrow_mut()
			.as_mut()
			.is_some_and(|s| s.set_hover(None));
		if changed {
			redraw_ml();
		}
	};

	// Cleanups run before the owner's stored values are disposed.
	let owned = StoredValue::new_local((state, ctx, resize_cb));
	on_cleanup(move || {
		owned.try_with_value(|(state, ctx, resize_cb)| teardown(state, ctx, resize_cb));
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="chord-pack-canvas"
			on:click=on_click
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; cursor: pointer;"
		/>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;

	use wasm_bindgen_test::*;
	use web_sys::Event;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn data() -> ChordPackData {
		ChordPackData {
			chord_names: vec!["A".into()],
			circle_names: vec!["X".into()],
			matrix: vec![vec![1.0]],
		}
	}

	#[wasm_bindgen_test]
	fn teardown_detaches_resize_and_drops_state() {
		let window = web_sys::window().unwrap();
		let state: Shared<ChordPackState> = Rc::new(RefCell::new(Some(ChordPackState::new(
			data(),
			ChordPackConfig::default(),
			800.0,
			600.0,
		))));
		let ctx: Shared<CanvasRenderingContext2d> = Rc::new(RefCell::new(None));
		let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));

		let resizes = Rc::new(Cell::new(0));
		let counter = resizes.clone();
		*resize_cb.borrow_mut() = Some(Closure::new(move || counter.set(counter.get() + 1)));
		if let Some(ref cb) = *resize_cb.borrow() {
			window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				.unwrap();
		}

		window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
		assert_eq!(resizes.get(), 1);

		teardown(&state, &ctx, &resize_cb);
		window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
		assert_eq!(resizes.get(), 1);
		assert!(state.borrow().is_none());
		assert!(resize_cb.borrow().is_none());
	}
}
