use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::layout::ChordPackLayout;
use super::path::Point;
use super::selection::Classification;
use super::state::{ChordPackState, color, rgba};
use super::types::Element;

/// Distance of chord labels outside their baseline arc.
const LABEL_OFFSET: f64 = 13.0;

pub fn render(state: &ChordPackState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.model.width, state.model.height);
	let Some(layout) = state.layout() else {
		return;
	};
	ctx.save();
	let _ = ctx.translate(state.model.width / 2.0, state.model.height / 2.0);
	draw_ribbons(state, ctx);
	draw_chords(state, layout, ctx);
	draw_circles(state, layout, ctx);
	ctx.restore();
}

/// Opacity multiplier for a chord or circle.
fn node_alpha(c: Classification) -> f64 {
	if c.focused || c.hovered {
		1.0
	} else if c.blurred {
		0.2
	} else if c.muted {
		0.3
	} else {
		1.0
	}
}

fn ribbon_alpha(c: Classification) -> f64 {
	if c.focused || c.hovered {
		0.75
	} else if c.blurred {
		0.08
	} else {
		0.35
	}
}

fn draw_ribbons(state: &ChordPackState, ctx: &CanvasRenderingContext2d) {
	let Some(layout) = state.layout() else {
		return;
	};
	for (ribbon, path) in layout.ribbons.iter().zip(&state.paths.ribbons) {
		let Some(path) = path else {
			continue;
		};
		let class = state.model.selection.classify(Element::Link {
			chord: ribbon.chord_index,
			circle: ribbon.circle_index,
		});
		ctx.set_fill_style_str(&rgba(ribbon.chord_index, ribbon_alpha(class)));
		ctx.fill_with_path_2d(path);
		if class.clicked {
			ctx.set_stroke_style_str("black");
			ctx.set_line_width(1.0);
			ctx.stroke_with_path(path);
		}
	}
}

fn draw_chords(state: &ChordPackState, layout: &ChordPackLayout, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(&format!("{}px sans-serif", state.model.config.label_font_px));
	ctx.set_text_align("center");
	for (arc, path) in layout.arcs.iter().zip(&state.paths.arcs) {
		let Some(path) = path else {
			continue;
		};
		let class = state.model.selection.classify(Element::Chord(arc.chord_index));
		ctx.set_global_alpha(node_alpha(class));
		ctx.set_fill_style_str(color(arc.chord_index));
		ctx.fill_with_path_2d(path);
		if class.clicked {
			ctx.set_stroke_style_str("black");
			ctx.set_line_width(1.5);
			ctx.stroke_with_path(path);
		}
		ctx.set_global_alpha(1.0);

		if !class.emphasized {
			continue;
		}
		let Some(chord) = layout.chords.get(arc.chord_index) else {
			continue;
		};
		let mid = arc.mid_angle();
		let anchor = Point::polar(arc.label_radius(layout.radii.outer), mid);
		// Labels on the lower half are flipped so they read left to right.
		let flip = mid.rem_euclid(TAU) > TAU / 4.0 && mid.rem_euclid(TAU) < TAU * 0.75;
		ctx.save();
		let _ = ctx.translate(anchor.x, anchor.y);
		let _ = ctx.rotate(if flip { mid + TAU / 2.0 } else { mid });
		ctx.set_fill_style_str("black");
		let dy = if flip {
			LABEL_OFFSET + state.model.config.label_font_px
		} else {
			-LABEL_OFFSET
		};
		let _ = ctx.fill_text(&chord.name, 0.0, dy);
		ctx.restore();
	}
}

fn draw_circles(state: &ChordPackState, layout: &ChordPackLayout, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(&format!("{}px sans-serif", state.model.config.label_font_px));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for circle in layout.packed_circles() {
		let class = state.model.selection.classify(Element::Circle(circle.circle_index));
		ctx.set_global_alpha(0.6 * node_alpha(class));
		ctx.begin_path();
		let _ = ctx.arc(circle.center_x, circle.center_y, circle.radius, 0.0, TAU);
		ctx.set_fill_style_str(color(circle.circle_index));
		ctx.fill();
		ctx.set_stroke_style_str("black");
		ctx.set_line_width(if class.clicked { 2.0 } else { 1.0 });
		ctx.stroke();
		ctx.set_global_alpha(1.0);

		let Some(item) = layout.circles.get(circle.circle_index) else {
			continue;
		};
		// Names wider than the circle only show while emphasized.
		let fits = ctx
			.measure_text(&item.name)
			.map(|m| m.width() <= circle.radius * 2.0)
			.unwrap_or(false);
		if fits || class.emphasized {
			let ink = if class.blurred || class.muted {
				"rgba(0, 0, 0, 0.3)"
			} else {
				"black"
			};
			ctx.set_fill_style_str(ink);
			let _ = ctx.fill_text(&item.name, circle.center_x, circle.center_y);
		}
	}
	ctx.set_text_baseline("alphabetic");
}
