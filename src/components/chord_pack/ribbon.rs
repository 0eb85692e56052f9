//! Connectors between chord subdivisions and packed circle centers.

use log::trace;

use super::aggregate::Aggregates;
use super::arc::{ArcSegment, annular_sector};
use super::pack::PackedCircle;
use super::path::{Path, Point};
use super::types::ChordPackData;

/// Endpoint/origin/center angle above which a control point collapses to the origin.
const CROSSOVER_DEGREES: f64 = 90.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Ribbon {
	pub chord_index: usize,
	pub circle_index: usize,
	pub value: f64,
	pub path: Path,
	pub chord_name: String,
	pub circle_name: String,
}

/// Build one ribbon per non-zero cell whose circle was packed.
///
/// Each arc is split among its row's cells in descending weight order (ties
/// keep column order), each cell taking a share of the span proportional to
/// its weight.
pub fn synthesize(
	data: &ChordPackData,
	aggregates: &Aggregates,
	arcs: &[ArcSegment],
	packed: &[Option<PackedCircle>],
	inner_radius: f64,
) -> Vec<Ribbon> {
	let mut ribbons = Vec::new();
	for arc in arcs {
		let Some(chord) = aggregates.chords.get(arc.chord_index) else {
			continue;
		};
		let Some(row) = data.matrix.get(arc.chord_index) else {
			continue;
		};

		let mut cells: Vec<(usize, f64)> = row
			.iter()
			.copied()
			.enumerate()
			.filter(|(_, v)| *v > 0.0)
			.collect();
		cells.sort_by(|a, b| b.1.total_cmp(&a.1));

		let span = arc.span();
		let mut offset = arc.start_angle;
		for (circle_index, value) in cells {
			let start = offset;
			let end = start + value / chord.value * span;
			offset = end;

			let Some(target) = packed.get(circle_index).copied().flatten() else {
				continue;
			};
			let Some(path) = ribbon_path(inner_radius, start, end, &target) else {
				trace!(
					"dropping degenerate ribbon {}->{} over [{start}, {end}]",
					arc.chord_index, circle_index
				);
				continue;
			};
			ribbons.push(Ribbon {
				chord_index: arc.chord_index,
				circle_index,
				value,
				path,
				chord_name: chord.name.clone(),
				circle_name: aggregates
					.circles
					.get(circle_index)
					.map(|c| c.name.clone())
					.unwrap_or_default(),
			});
		}
	}
	ribbons
}

/// Anchor edge on the inner radius from `start` to `end`, a curve to the
/// circle center and a curve back to the start point.
fn ribbon_path(inner: f64, start: f64, end: f64, target: &PackedCircle) -> Option<Path> {
	if !(end - start > 0.0) {
		return None;
	}
	let mut path = annular_sector(inner - 1.0, inner, start, end).truncated(2);

	let start_point = Point::polar(inner, start);
	let end_point = Point::polar(inner, end);
	let center = Point::new(target.center_x, target.center_y);

	path.quad_to(control_point(end_point, center, 3.0), center)
		.quad_to(control_point(start_point, center, 4.0), start_point);

	path.is_finite().then_some(path)
}

/// Endpoint pulled towards the origin, or the origin itself when the target
/// lies behind the center as seen from the endpoint.
fn control_point(endpoint: Point, center: Point, divisor: f64) -> Point {
	if endpoint.angle_at(Point::ORIGIN, center) > CROSSOVER_DEGREES {
		Point::ORIGIN
	} else {
		endpoint.scaled(1.0 / divisor)
	}
}
