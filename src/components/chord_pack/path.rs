//! Path geometry shared by the ring, the ribbons and the canvas renderer.
//!
//! Angles follow the diagram convention: radians, clockwise, zero at 12 o'clock.
//! Every arc is centered on the diagram origin.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Point at `radius` along a diagram angle.
	pub fn polar(radius: f64, angle: f64) -> Self {
		Self {
			x: radius * (angle - FRAC_PI_2).cos(),
			y: radius * (angle - FRAC_PI_2).sin(),
		}
	}

	pub fn scaled(self, k: f64) -> Self {
		Self {
			x: self.x * k,
			y: self.y * k,
		}
	}

	pub fn is_finite(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}

	/// Angle at `vertex` between the rays towards `self` and `other`, in degrees.
	pub fn angle_at(self, vertex: Point, other: Point) -> f64 {
		let (ax, ay) = (self.x - vertex.x, self.y - vertex.y);
		let (bx, by) = (other.x - vertex.x, other.y - vertex.y);
		let cross = ax * by - ay * bx;
		let dot = ax * bx + ay * by;
		cross.abs().atan2(dot).to_degrees()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
	MoveTo(Point),
	LineTo(Point),
	/// Arc around the origin from the current point to `to`.
	Arc {
		radius: f64,
		start_angle: f64,
		end_angle: f64,
		to: Point,
	},
	QuadTo {
		ctrl: Point,
		to: Point,
	},
	Close,
}

impl PathCommand {
	fn is_finite(&self) -> bool {
		match self {
			Self::MoveTo(p) | Self::LineTo(p) => p.is_finite(),
			Self::Arc {
				radius,
				start_angle,
				end_angle,
				to,
			} => {
				radius.is_finite()
					&& start_angle.is_finite()
					&& end_angle.is_finite()
					&& to.is_finite()
			}
			Self::QuadTo { ctrl, to } => ctrl.is_finite() && to.is_finite(),
			Self::Close => true,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
	commands: Vec<PathCommand>,
}

impl Path {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn commands(&self) -> &[PathCommand] {
		&self.commands
	}

	pub fn move_to(&mut self, p: Point) -> &mut Self {
		self.commands.push(PathCommand::MoveTo(p));
		self
	}

	pub fn line_to(&mut self, p: Point) -> &mut Self {
		self.commands.push(PathCommand::LineTo(p));
		self
	}

	/// Arc around the origin; assumes the current point is already on it.
	pub fn arc_to(&mut self, radius: f64, start_angle: f64, end_angle: f64) -> &mut Self {
		self.commands.push(PathCommand::Arc {
			radius,
			start_angle,
			end_angle,
			to: Point::polar(radius, end_angle),
		});
		self
	}

	pub fn quad_to(&mut self, ctrl: Point, to: Point) -> &mut Self {
		self.commands.push(PathCommand::QuadTo { ctrl, to });
		self
	}

	pub fn close(&mut self) -> &mut Self {
		self.commands.push(PathCommand::Close);
		self
	}

	/// Keep only the first `n` commands.
	pub fn truncated(mut self, n: usize) -> Self {
		self.commands.truncate(n);
		self
	}

	pub fn is_finite(&self) -> bool {
		self.commands.iter().all(PathCommand::is_finite)
	}

	/// SVG path data, usable with `Path2D` or an SVG `d` attribute.
	pub fn to_svg(&self) -> String {
		let mut out = String::new();
		for cmd in &self.commands {
			let _ = match cmd {
				PathCommand::MoveTo(p) => write!(out, "M{},{}", p.x, p.y),
				PathCommand::LineTo(p) => write!(out, "L{},{}", p.x, p.y),
				PathCommand::Arc {
					radius,
					start_angle,
					end_angle,
					to,
				} => {
					let da = end_angle - start_angle;
					write!(
						out,
						"A{r},{r},0,{},{},{},{}",
						u8::from(da.abs() >= PI),
						u8::from(da > 0.0),
						to.x,
						to.y,
						r = radius
					)
				}
				PathCommand::QuadTo { ctrl, to } => {
					write!(out, "Q{},{},{},{}", ctrl.x, ctrl.y, to.x, to.y)
				}
				PathCommand::Close => write!(out, "Z"),
			};
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
	}

	#[test]
	fn polar_starts_at_twelve_oclock_and_turns_clockwise() {
		assert!(close(Point::polar(10.0, 0.0), Point::new(0.0, -10.0)));
		assert!(close(Point::polar(10.0, FRAC_PI_2), Point::new(10.0, 0.0)));
		assert!(close(Point::polar(10.0, PI), Point::new(0.0, 10.0)));
	}

	#[test]
	fn angle_at_vertex() {
		let a = Point::new(1.0, 0.0);
		assert!((a.angle_at(Point::ORIGIN, Point::new(0.0, 5.0)) - 90.0).abs() < 1e-9);
		assert!((a.angle_at(Point::ORIGIN, Point::new(-3.0, 0.0)) - 180.0).abs() < 1e-9);
		assert!((a.angle_at(Point::ORIGIN, Point::new(2.0, 2.0)) - 45.0).abs() < 1e-9);
	}

	#[test]
	fn serializes_svg_commands() {
		let mut path = Path::new();
		path.move_to(Point::new(0.0, -10.0))
			.arc_to(10.0, 0.0, FRAC_PI_2)
			.quad_to(Point::new(1.0, 2.0), Point::new(3.0, 4.0))
			.close();
		let svg = path.to_svg();
		assert!(svg.starts_with("M0,-10A10,10,0,0,1,"));
		assert!(svg.ends_with("Q1,2,3,4Z"));
		assert_eq!(path.clone().truncated(2).commands().len(), 2);
	}

	#[test]
	fn detects_non_finite_coordinates() {
		let mut path = Path::new();
		path.move_to(Point::new(0.0, 0.0));
		assert!(path.is_finite());
		path.line_to(Point::new(f64::NAN, 1.0));
		assert!(!path.is_finite());
		assert!(path.to_svg().contains("NaN"));
	}
}
