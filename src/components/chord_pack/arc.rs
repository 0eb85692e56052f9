//! Pie partition of the chord ring and annular sector outlines.

use std::f64::consts::{PI, TAU};

use super::path::{Path, Point};

const EPSILON: f64 = 1e-12;

/// Visible angular span of one chord; half a pad sits on each side of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
	pub chord_index: usize,
	pub start_angle: f64,
	pub end_angle: f64,
	pub pad_angle: f64,
}

impl ArcSegment {
	pub fn span(&self) -> f64 {
		self.end_angle - self.start_angle
	}

	pub fn mid_angle(&self) -> f64 {
		(self.start_angle + self.end_angle) / 2.0
	}

	/// Whether the normalized diagram angle `angle` falls inside the span.
	pub fn contains(&self, angle: f64) -> bool {
		let a = angle.rem_euclid(TAU);
		a >= self.start_angle && a < self.end_angle
	}

	/// Label baselines are staggered on three rings so neighbours do not collide.
	pub fn label_radius(&self, outer_radius: f64) -> f64 {
		outer_radius + 20.0 * (self.chord_index % 3) as f64
	}
}

/// Partition a full turn among `weights`, keeping their order.
///
/// Each weight receives a span proportional to it after removing one
/// `pad_angle` per segment. The pad is capped so that padding alone never
/// exceeds the full turn. A zero weight sum splits the ring evenly.
pub fn partition(weights: &[f64], pad_angle: f64) -> Vec<ArcSegment> {
	let n = weights.len();
	if n == 0 {
		return Vec::new();
	}
	let pad = pad_angle.max(0.0).min(TAU / n as f64);
	let sum: f64 = weights.iter().filter(|w| **w > 0.0).sum();
	let free = TAU - n as f64 * pad;

	let mut a0 = 0.0;
	weights
		.iter()
		.enumerate()
		.map(|(chord_index, &w)| {
			let span = if sum > 0.0 {
				if w > 0.0 { w * free / sum } else { 0.0 }
			} else {
				free / n as f64
			};
			let a1 = a0 + span + pad;
			let segment = ArcSegment {
				chord_index,
				start_angle: a0 + pad / 2.0,
				end_angle: a1 - pad / 2.0,
				pad_angle: pad,
			};
			a0 = a1;
			segment
		})
		.collect()
}

/// Outline of the ring sector between `inner` and `outer` radii.
///
/// The outer edge comes first (`M`, `A`), so callers can keep just that edge by
/// truncating to two commands.
pub fn annular_sector(inner: f64, outer: f64, start_angle: f64, end_angle: f64) -> Path {
	let mut path = Path::new();
	if end_angle - start_angle >= TAU - EPSILON {
		let half = start_angle + PI;
		let full = start_angle + TAU;
		path.move_to(Point::polar(outer, start_angle))
			.arc_to(outer, start_angle, half)
			.arc_to(outer, half, full);
		if inner > EPSILON {
			path.move_to(Point::polar(inner, full))
				.arc_to(inner, full, half)
				.arc_to(inner, half, start_angle);
		}
		path.close();
		return path;
	}

	path.move_to(Point::polar(outer, start_angle))
		.arc_to(outer, start_angle, end_angle);
	if inner > EPSILON {
		path.line_to(Point::polar(inner, end_angle))
			.arc_to(inner, end_angle, start_angle);
	} else {
		path.line_to(Point::ORIGIN);
	}
	path.close();
	path
}
