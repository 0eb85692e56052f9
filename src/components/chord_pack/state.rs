use log::warn;
use web_sys::{CanvasRenderingContext2d, Path2d};

use super::config::ChordPackConfig;
use super::error::Result;
use super::layout::ChordPackLayout;
use super::model::ChordPackModel;
use super::path::Path;
use super::selection::SelectionEvent;
use super::types::{ChordPackData, Element};

pub const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Canvas-side paths of the current layout, rebuilt with it.
#[derive(Default)]
pub struct CanvasPaths {
	pub arcs: Vec<Option<Path2d>>,
	pub ribbons: Vec<Option<Path2d>>,
}

impl CanvasPaths {
	fn build(layout: &ChordPackLayout) -> Self {
		Self {
			arcs: layout.arc_paths.iter().map(to_path2d).collect(),
			ribbons: layout.ribbons.iter().map(|r| to_path2d(&r.path)).collect(),
		}
	}
}

fn to_path2d(path: &Path) -> Option<Path2d> {
	Path2d::new_with_path_string(&path.to_svg()).ok()
}

/// Everything one mounted diagram owns between events.
pub struct ChordPackState {
	pub model: ChordPackModel,
	pub paths: CanvasPaths,
}

impl ChordPackState {
	pub fn new(data: ChordPackData, config: ChordPackConfig, width: f64, height: f64) -> Self {
		let mut state = Self {
			model: ChordPackModel::new(data, config, width, height),
			paths: CanvasPaths::default(),
		};
		state.refresh_layout();
		state
	}

	pub fn layout(&self) -> Option<&ChordPackLayout> {
		self.model.layout()
	}

	/// Rebuild the canvas paths whenever the model recomputed its layout.
	fn refresh_layout(&mut self) {
		let updated = self.model.refresh();
		self.sync_paths(updated);
	}

	fn sync_paths(&mut self, updated: Result<bool>) {
		match updated {
			Ok(false) => {}
			Ok(true) => {
				self.paths = self
					.model
					.layout()
					.map(CanvasPaths::build)
					.unwrap_or_default();
			}
			Err(err) => {
				warn!("chord pack layout failed: {err}");
				self.paths = CanvasPaths::default();
			}
		}
	}

	pub fn set_data(&mut self, data: ChordPackData) {
		let updated = self.model.set_data(data);
		self.sync_paths(updated);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		let updated = self.model.resize(width, height);
		self.sync_paths(updated);
	}

	/// Element under the canvas point. Circles sit above the ring, which sits
	/// above the ribbons.
	pub fn element_at(&self, ctx: &CanvasRenderingContext2d, sx: f64, sy: f64) -> Option<Element> {
		let layout = self.layout()?;
		let (x, y) = self.model.screen_to_diagram(sx, sy);
		if let Some(j) = layout.circle_at(x, y) {
			return Some(Element::Circle(j));
		}
		if let Some(i) = layout.chord_at(x, y) {
			return Some(Element::Chord(i));
		}

		ctx.save();
		let _ = ctx.translate(self.model.width / 2.0, self.model.height / 2.0);
		let hit = layout
			.ribbons
			.iter()
			.zip(&self.paths.ribbons)
			.rev()
			.find(|(_, path)| {
				path.as_ref()
					.is_some_and(|p| ctx.is_point_in_path_with_path_2d_and_f64(p, sx, sy))
			})
			.map(|(r, _)| Element::Link {
				chord: r.chord_index,
				circle: r.circle_index,
			});
		ctx.restore();
		hit
	}

	pub fn click(&mut self, element: Option<Element>) -> Vec<SelectionEvent> {
		self.model.click(element)
	}

	pub fn set_hover(&mut self, element: Option<Element>) -> bool {
		self.model.set_hover(element)
	}
}

/// Fill color of chord or circle `index`.
pub fn color(index: usize) -> &'static str {
	COLORS[index % COLORS.len()]
}

/// Palette color `index` with an alpha channel.
pub fn rgba(index: usize, alpha: f64) -> String {
	let hex = color(index).trim_start_matches('#');
	let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
	format!(
		"rgba({}, {}, {}, {alpha})",
		channel(0),
		channel(2),
		channel(4)
	)
}
