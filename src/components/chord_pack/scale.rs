//! Radii and logarithmic weight scales.

use super::config::ChordPackConfig;
use super::error::{ChordPackError, Result};

/// Relative widening applied to a zero-width log domain.
const DOMAIN_EPSILON: f64 = 1e-9;

/// Ring radii derived from the container size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Radii {
	pub outer: f64,
	pub inner: f64,
}

impl Radii {
	pub fn new(width: f64, height: f64, config: &ChordPackConfig) -> Result<Self> {
		let outer = width.min(height) * 0.5 - config.padding;
		let inner = outer - config.arc_thickness;
		if !width.is_finite() || !height.is_finite() || !(inner > 0.0) {
			return Err(ChordPackError::InvalidSize { width, height });
		}
		Ok(Self { outer, inner })
	}

	/// Angular pad between chord segments: a fixed 2px arc length on the outer radius.
	pub fn pad_angle(&self) -> f64 {
		2.0 / self.outer
	}
}

/// Maps `[min, max]` of the positive totals onto a visual weight range on a
/// log axis. Zero totals sit at the bottom of the range without stretching
/// the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogScale {
	domain: (f64, f64),
	ln_lo: f64,
	ln_hi: f64,
	range: (f64, f64),
}

impl LogScale {
	pub fn from_totals(totals: &[f64], range: (f64, f64)) -> Self {
		let (lo, hi) = totals
			.iter()
			.copied()
			.filter(|v| *v > 0.0)
			.map(floor)
			.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
				(lo.min(v), hi.max(v))
			});
		let (lo, hi) = if lo.is_finite() {
			(lo, hi)
		} else {
			(f64::MIN_POSITIVE, f64::MIN_POSITIVE)
		};

		let ln_lo = lo.ln();
		let mut ln_hi = hi.ln();
		if ln_hi - ln_lo <= 0.0 {
			ln_hi = ln_lo + ln_lo.abs().max(1.0) * DOMAIN_EPSILON;
		}
		Self {
			domain: (lo, ln_hi.exp().max(hi)),
			ln_lo,
			ln_hi,
			range,
		}
	}

	pub fn domain(&self) -> (f64, f64) {
		self.domain
	}

	pub fn scale(&self, value: f64) -> f64 {
		if !(value > 0.0) {
			return self.range.0;
		}
		let t = ((floor(value).ln() - self.ln_lo) / (self.ln_hi - self.ln_lo)).clamp(0.0, 1.0);
		self.range.0 + (self.range.1 - self.range.0) * t
	}
}

/// Log scales require a strictly positive domain.
fn floor(value: f64) -> f64 {
	value.max(f64::MIN_POSITIVE)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn radii_follow_container() {
		let config = ChordPackConfig::default();
		let radii = Radii::new(800.0, 600.0, &config).unwrap();
		assert_eq!(radii.outer, 250.0);
		assert_eq!(radii.inner, 220.0);
		assert!((radii.pad_angle() - 0.008).abs() < 1e-12);
	}

	#[test]
	fn radii_reject_tiny_container() {
		let config = ChordPackConfig::default();
		assert!(Radii::new(100.0, 100.0, &config).is_err());
		assert!(Radii::new(f64::NAN, 500.0, &config).is_err());
	}

	#[test]
	fn maps_domain_bounds_to_range() {
		let scale = LogScale::from_totals(&[10.0, 100.0, 1000.0], (1.0, 100.0));
		assert!((scale.scale(10.0) - 1.0).abs() < 1e-9);
		assert!((scale.scale(100.0) - 50.5).abs() < 1e-9);
		assert!((scale.scale(1000.0) - 100.0).abs() < 1e-9);
	}

	#[test]
	fn zero_totals_fall_to_range_minimum() {
		let scale = LogScale::from_totals(&[0.0, 5.0, 10.0], (1.0, 100.0));
		assert_eq!(scale.domain(), (5.0, 10.0));
		assert_eq!(scale.scale(0.0), 1.0);
		assert_eq!(scale.scale(5.0), 1.0);
		assert!((scale.scale(10.0) - 100.0).abs() < 1e-9);
	}

	#[test]
	fn zero_totals_keep_positive_ratios() {
		let with_zero = LogScale::from_totals(&[1.0, 1000.0, 0.0], (1.0, 100.0));
		let without = LogScale::from_totals(&[1.0, 1000.0], (1.0, 100.0));
		assert_eq!(with_zero, without);
		assert!((with_zero.scale(1.0) - 1.0).abs() < 1e-9);
		assert!((with_zero.scale(1000.0) - 100.0).abs() < 1e-9);
	}

	#[test]
	fn degenerate_domain_is_widened() {
		let scale = LogScale::from_totals(&[7.0, 7.0], (1.0, 100.0));
		let (lo, hi) = scale.domain();
		assert!(hi > lo);
		assert_eq!(scale.scale(7.0), 1.0);

		let all_zero = LogScale::from_totals(&[0.0, 0.0], (1.0, 100.0));
		assert!(all_zero.scale(0.0).is_finite());
		assert_eq!(all_zero.scale(0.0), 1.0);
	}
}
