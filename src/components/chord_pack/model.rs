//! Data, layout and selection of one diagram, without any canvas handles.

use log::debug;

use super::config::ChordPackConfig;
use super::error::Result;
use super::layout::{ChordPackLayout, LayoutCache};
use super::selection::{SelectionEvent, SelectionState};
use super::types::{ChordPackData, Element};

pub struct ChordPackModel {
	pub data: ChordPackData,
	pub config: ChordPackConfig,
	pub cache: LayoutCache,
	pub selection: SelectionState,
	pub width: f64,
	pub height: f64,
}

impl ChordPackModel {
	/// Model with no layout yet; call [`ChordPackModel::refresh`] to build one.
	pub fn new(data: ChordPackData, config: ChordPackConfig, width: f64, height: f64) -> Self {
		Self {
			data,
			config,
			cache: LayoutCache::new(),
			selection: SelectionState::new(),
			width,
			height,
		}
	}

	pub fn layout(&self) -> Option<&ChordPackLayout> {
		self.cache.layout()
	}

	/// Recompute the layout if its inputs changed. A recomputed or failed
	/// layout starts over with an empty selection.
	pub fn refresh(&mut self) -> Result<bool> {
		let updated = self
			.cache
			.update(&self.data, self.width, self.height, &self.config);
		if !matches!(updated, Ok(false)) {
			self.selection.reset();
		}
		updated
	}

	pub fn set_data(&mut self, data: ChordPackData) -> Result<bool> {
		self.data = data;
		self.refresh()
	}

	pub fn resize(&mut self, width: f64, height: f64) -> Result<bool> {
		self.width = width;
		self.height = height;
		self.refresh()
	}

	/// Canvas pixel coordinates to diagram coordinates.
	pub fn screen_to_diagram(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx - self.width / 2.0, sy - self.height / 2.0)
	}

	/// Click on `element`; a click on empty space changes nothing.
	pub fn click(&mut self, element: Option<Element>) -> Vec<SelectionEvent> {
		let Some(element) = element else {
			return Vec::new();
		};
		let events = self.selection.click(element, &self.data);
		debug!("click {element:?}: {} notifications", events.len());
		events
	}

	/// Track the pointer; returns `true` when the hovered element changed.
	pub fn set_hover(&mut self, element: Option<Element>) -> bool {
		let before = self.selection.hovered();
		match element {
			Some(e) => {
				if before != Some(e) {
					self.selection.leave();
				}
				self.selection.hover(e, &self.data);
			}
			None => self.selection.leave(),
		}
		self.selection.hovered() != before
	}
}
