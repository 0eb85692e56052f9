//! The static geometry of one render: ring, pack and ribbons, all in diagram
//! coordinates (origin at the center of the container).

use log::debug;

use super::aggregate::aggregate;
use super::arc::{ArcSegment, annular_sector, partition};
use super::config::ChordPackConfig;
use super::error::Result;
use super::pack::{PackBounds, PackedCircle, pack};
use super::path::Path;
use super::ribbon::{Ribbon, synthesize};
use super::scale::{LogScale, Radii};
use super::types::{ChordItem, ChordPackData, CircleItem};

#[derive(Clone, Debug, PartialEq)]
pub struct ChordPackLayout {
	pub width: f64,
	pub height: f64,
	pub radii: Radii,
	pub chords: Vec<ChordItem>,
	pub circles: Vec<CircleItem>,
	pub arcs: Vec<ArcSegment>,
	/// Ring sector outline per arc, same order as `arcs`.
	pub arc_paths: Vec<Path>,
	/// Indexed by column; `None` for circles with a zero total.
	pub packed: Vec<Option<PackedCircle>>,
	pub ribbons: Vec<Ribbon>,
}

impl ChordPackLayout {
	pub fn compute(
		data: &ChordPackData,
		width: f64,
		height: f64,
		config: &ChordPackConfig,
	) -> Result<Self> {
		let aggregates = aggregate(data)?;
		let radii = Radii::new(width, height, config)?;

		let chord_totals = aggregates.chord_totals();
		let circle_totals = aggregates.circle_totals();
		let chord_scale = LogScale::from_totals(&chord_totals, config.weight_range);
		let circle_scale = LogScale::from_totals(&circle_totals, config.weight_range);

		let chord_weights: Vec<f64> = chord_totals.iter().map(|v| chord_scale.scale(*v)).collect();
		let arcs = partition(&chord_weights, radii.pad_angle());
		let arc_paths = arcs
			.iter()
			.map(|a| annular_sector(radii.inner, radii.outer, a.start_angle, a.end_angle))
			.collect();

		// Zero columns stay out of the pack; the rest are log-weighted.
		let circle_weights: Vec<f64> = circle_totals
			.iter()
			.map(|&v| if v > 0.0 { circle_scale.scale(v) } else { 0.0 })
			.collect();
		let packed = pack(
			&circle_weights,
			PackBounds::for_container(width, height),
			config.pack_padding,
		);

		let ribbons = synthesize(data, &aggregates, &arcs, &packed, radii.inner);
		debug!(
			"layout {width}x{height}: {} arcs, {} packed circles, {} ribbons",
			arcs.len(),
			packed.iter().flatten().count(),
			ribbons.len()
		);

		Ok(Self {
			width,
			height,
			radii,
			chords: aggregates.chords,
			circles: aggregates.circles,
			arcs,
			arc_paths,
			packed,
			ribbons,
		})
	}

	pub fn packed_circles(&self) -> impl DoubleEndedIterator<Item = &PackedCircle> {
		self.packed.iter().flatten()
	}

	/// Chord whose ring sector contains the diagram point `(x, y)`.
	pub fn chord_at(&self, x: f64, y: f64) -> Option<usize> {
		let r = x.hypot(y);
		if r < self.radii.inner || r > self.radii.outer {
			return None;
		}
		let angle = x.atan2(-y);
		self.arcs.iter().find(|a| a.contains(angle)).map(|a| a.chord_index)
	}

	/// Topmost packed circle containing the diagram point `(x, y)`.
	pub fn circle_at(&self, x: f64, y: f64) -> Option<usize> {
		self.packed_circles()
			.rev()
			.find(|c| c.contains(x, y))
			.map(|c| c.circle_index)
	}
}

#[derive(Clone, Debug, PartialEq)]
struct LayoutKey {
	data: ChordPackData,
	width: f64,
	height: f64,
	config: ChordPackConfig,
}

/// Recomputes the layout only when its inputs change.
#[derive(Clone, Debug, Default)]
pub struct LayoutCache {
	key: Option<LayoutKey>,
	layout: Option<ChordPackLayout>,
}

impl LayoutCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn layout(&self) -> Option<&ChordPackLayout> {
		self.layout.as_ref()
	}

	/// Bring the cached layout up to date. Returns `true` if it was recomputed.
	pub fn update(
		&mut self,
		data: &ChordPackData,
		width: f64,
		height: f64,
		config: &ChordPackConfig,
	) -> Result<bool> {
		let fresh = self.key.as_ref().is_some_and(|k| {
			k.width == width && k.height == height && k.config == *config && k.data == *data
		});
		if fresh && self.layout.is_some() {
			return Ok(false);
		}
		self.key = None;
		self.layout = None;

		let layout = ChordPackLayout::compute(data, width, height, config)?;
		self.layout = Some(layout);
		self.key = Some(LayoutKey {
			data: data.clone(),
			width,
			height,
			config: config.clone(),
		});
		Ok(true)
	}
}
