//! Circle packing of the column weights.
//!
//! Leaves get a radius of `sqrt(weight)` and are placed with the front-chain
//! algorithm (Wang et al., "Visualization of large hierarchical data by circle
//! packing"). The smallest enclosing circle of the front chain is found with
//! Welzl's move-to-front scheme over a seeded shuffle. The packing is then
//! scaled to fit the bounding box:
//!
//! 1. pack with no padding to learn the unpadded root radius,
//! 2. pack again with every radius inflated by the padding, converted to pack
//!    units with the scale factor from pass 1,
//! 3. scale positions and radii so the root fills the box.
//!
//! The seed is fixed, so the same weights always give the same layout.

use log::warn;

/// A circle in pack or diagram coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
	pub x: f64,
	pub y: f64,
	pub r: f64,
}

/// A packed column, positioned in diagram coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackedCircle {
	pub circle_index: usize,
	pub center_x: f64,
	pub center_y: f64,
	pub radius: f64,
}

impl PackedCircle {
	pub fn contains(&self, x: f64, y: f64) -> bool {
		let (dx, dy) = (x - self.center_x, y - self.center_y);
		dx * dx + dy * dy <= self.radius * self.radius
	}
}

/// Extent of the pack relative to the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackBounds {
	pub width: f64,
	pub height: f64,
	/// Translation from pack coordinates to diagram coordinates.
	pub offset_x: f64,
	pub offset_y: f64,
}

impl PackBounds {
	pub fn for_container(width: f64, height: f64) -> Self {
		Self {
			width: (width / 2.0 - 20.0).max(0.0),
			height: (height / 2.0 - 20.0).max(0.0),
			offset_x: -width / 4.0,
			offset_y: -height / 4.0,
		}
	}
}

/// Pack `weights` into `bounds`. Weights that are not strictly positive stay
/// unpacked and yield `None` at their index.
pub fn pack(weights: &[f64], bounds: PackBounds, padding: f64) -> Vec<Option<PackedCircle>> {
	let members: Vec<usize> = (0..weights.len())
		.filter(|&i| weights[i] > 0.0 && weights[i].is_finite())
		.collect();
	let mut out = vec![None; weights.len()];
	if members.is_empty() {
		return out;
	}

	let leaves: Vec<f64> = members.iter().map(|&i| weights[i].sqrt()).collect();
	let (dx, dy) = (bounds.width, bounds.height);
	let side = dx.min(dy);

	let mut random = Lcg::new();
	let (_, unpadded_r) = pack_children(&leaves, 0.0, &mut random);
	let inflate = if unpadded_r > 0.0 {
		padding * unpadded_r / side
	} else {
		0.0
	};
	let (children, root_r) = pack_children(&leaves, inflate, &mut random);
	let k = if root_r > 0.0 { side / (2.0 * root_r) } else { 0.0 };

	let (cx, cy) = (dx / 2.0, dy / 2.0);
	for (&index, c) in members.iter().zip(children) {
		out[index] = Some(PackedCircle {
			circle_index: index,
			center_x: cx + k * c.x + bounds.offset_x,
			center_y: cy + k * c.y + bounds.offset_y,
			radius: c.r * k,
		});
	}
	out
}

/// Pack leaf radii inflated by `pad`, then deflate. Returns positions relative
/// to the enclosing circle's center and the enclosing radius.
fn pack_children(radii: &[f64], pad: f64, random: &mut Lcg) -> (Vec<Circle>, f64) {
	let mut circles: Vec<Circle> = radii
		.iter()
		.map(|&r| Circle {
			x: 0.0,
			y: 0.0,
			r: r + pad,
		})
		.collect();
	let e = pack_siblings(&mut circles, random);
	for c in &mut circles {
		c.r -= pad;
	}
	(circles, e + pad)
}

/// Place `circles` (radii set) tangent to each other around the origin and
/// center them on their enclosing circle. Returns the enclosing radius.
pub fn pack_siblings(circles: &mut [Circle], random: &mut Lcg) -> f64 {
	let n = circles.len();
	if n == 0 {
		return 0.0;
	}
	circles[0].x = 0.0;
	circles[0].y = 0.0;
	if n == 1 {
		return circles[0].r;
	}
	circles[0].x = -circles[1].r;
	circles[1].x = circles[0].r;
	circles[1].y = 0.0;
	if n == 2 {
		return circles[0].r + circles[1].r;
	}

	let c2 = place(circles[1], circles[0], circles[2].r);
	circles[2].x = c2.0;
	circles[2].y = c2.1;

	// Front chain as a doubly linked ring over circle indices.
	let mut next = vec![0usize; n];
	let mut prev = vec![0usize; n];
	let (mut a, mut b) = (0usize, 1usize);
	next[0] = 1;
	prev[1] = 0;
	next[1] = 2;
	prev[2] = 1;
	next[2] = 0;
	prev[0] = 2;

	let mut i = 3;
	'pack: while i < n {
		let (px, py) = place(circles[a], circles[b], circles[i].r);
		circles[i].x = px;
		circles[i].y = py;
		let c = i;

		let (mut j, mut k) = (next[b], prev[a]);
		let (mut sj, mut sk) = (circles[b].r, circles[a].r);
		loop {
			if sj <= sk {
				if intersects(circles[j], circles[c]) {
					b = j;
					next[a] = b;
					prev[b] = a;
					continue 'pack;
				}
				sj += circles[j].r;
				j = next[j];
			} else {
				if intersects(circles[k], circles[c]) {
					a = k;
					next[a] = b;
					prev[b] = a;
					continue 'pack;
				}
				sk += circles[k].r;
				k = prev[k];
			}
			if j == next[k] {
				break;
			}
		}

		prev[c] = a;
		next[c] = b;
		next[a] = c;
		prev[b] = c;
		b = c;

		let mut best = a;
		let mut best_score = score(circles, a, next[a]);
		let mut node = next[c];
		while node != b {
			let s = score(circles, node, next[node]);
			if s < best_score {
				best = node;
				best_score = s;
			}
			node = next[node];
		}
		a = best;
		b = next[a];
		i += 1;
	}

	let mut chain = vec![circles[b]];
	let mut node = next[b];
	while node != b {
		chain.push(circles[node]);
		node = next[node];
	}
	let e = enclose(&chain, random);
	for c in circles.iter_mut() {
		c.x -= e.x;
		c.y -= e.y;
	}
	e.r
}

/// Position of a circle of radius `r` tangent to both `b` and `a`.
fn place(b: Circle, a: Circle, r: f64) -> (f64, f64) {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let d2 = dx * dx + dy * dy;
	if d2 == 0.0 {
		return (a.x + r, a.y);
	}
	let a2 = (a.r + r) * (a.r + r);
	let b2 = (b.r + r) * (b.r + r);
	if a2 > b2 {
		let x = (d2 + b2 - a2) / (2.0 * d2);
		let y = (b2 / d2 - x * x).max(0.0).sqrt();
		(b.x - x * dx - y * dy, b.y - x * dy + y * dx)
	} else {
		let x = (d2 + a2 - b2) / (2.0 * d2);
		let y = (a2 / d2 - x * x).max(0.0).sqrt();
		(a.x + x * dx - y * dy, a.y + x * dy + y * dx)
	}
}

fn intersects(a: Circle, b: Circle) -> bool {
	let dr = a.r + b.r - 1e-6;
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Squared distance from the origin to the weighted midpoint of `a` and `b`.
fn score(circles: &[Circle], a: usize, b: usize) -> f64 {
	let (a, b) = (circles[a], circles[b]);
	let ab = a.r + b.r;
	let dx = (a.x * b.r + b.x * a.r) / ab;
	let dy = (a.y * b.r + b.y * a.r) / ab;
	dx * dx + dy * dy
}

/// Smallest circle enclosing all of `circles`.
pub fn enclose(circles: &[Circle], random: &mut Lcg) -> Circle {
	let mut shuffled = circles.to_vec();
	random.shuffle(&mut shuffled);

	let mut basis: Vec<Circle> = Vec::new();
	let mut e: Option<Circle> = None;
	let mut i = 0;
	while i < shuffled.len() {
		let p = shuffled[i];
		if e.is_some_and(|e| encloses_weak(e, p)) {
			i += 1;
			continue;
		}
		match extend_basis(&basis, p) {
			Some(next) => {
				e = Some(enclose_basis(&next));
				basis = next;
				i = 0;
			}
			None => {
				warn!("enclosing circle did not converge, using bounding fallback");
				return enclose_fallback(circles);
			}
		}
	}
	e.unwrap_or_default()
}

fn extend_basis(basis: &[Circle], p: Circle) -> Option<Vec<Circle>> {
	if encloses_weak_all(p, basis) {
		return Some(vec![p]);
	}
	for &b in basis {
		if encloses_not(p, b) && encloses_weak_all(enclose_basis2(b, p), basis) {
			return Some(vec![b, p]);
		}
	}
	for i in 0..basis.len().saturating_sub(1) {
		for j in i + 1..basis.len() {
			let (bi, bj) = (basis[i], basis[j]);
			if encloses_not(enclose_basis2(bi, bj), p)
				&& encloses_not(enclose_basis2(bi, p), bj)
				&& encloses_not(enclose_basis2(bj, p), bi)
				&& encloses_weak_all(enclose_basis3(bi, bj, p), basis)
			{
				return Some(vec![bi, bj, p]);
			}
		}
	}
	None
}

fn encloses_not(a: Circle, b: Circle) -> bool {
	let dr = a.r - b.r;
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: Circle, b: Circle) -> bool {
	let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: Circle, basis: &[Circle]) -> bool {
	basis.iter().all(|&b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
	match basis {
		[a] => *a,
		[a, b] => enclose_basis2(*a, *b),
		[a, b, c] => enclose_basis3(*a, *b, *c),
		_ => Circle::default(),
	}
}

fn enclose_basis2(a: Circle, b: Circle) -> Circle {
	let (x21, y21, r21) = (b.x - a.x, b.y - a.y, b.r - a.r);
	let l = (x21 * x21 + y21 * y21).sqrt();
	Circle {
		x: (a.x + b.x + x21 / l * r21) / 2.0,
		y: (a.y + b.y + y21 / l * r21) / 2.0,
		r: (l + a.r + b.r) / 2.0,
	}
}

fn enclose_basis3(a: Circle, b: Circle, c: Circle) -> Circle {
	let (x1, y1, r1) = (a.x, a.y, a.r);
	let (a2, a3) = (x1 - b.x, x1 - c.x);
	let (b2, b3) = (y1 - b.y, y1 - c.y);
	let (c2, c3) = (b.r - r1, c.r - r1);
	let d1 = x1 * x1 + y1 * y1 - r1 * r1;
	let d2 = d1 - b.x * b.x - b.y * b.y + b.r * b.r;
	let d3 = d1 - c.x * c.x - c.y * c.y + c.r * c.r;
	let ab = a3 * b2 - a2 * b3;
	let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
	let xb = (b3 * c2 - b2 * c3) / ab;
	let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
	let yb = (a2 * c3 - a3 * c2) / ab;
	let qa = xb * xb + yb * yb - 1.0;
	let qb = 2.0 * (r1 + xa * xb + ya * yb);
	let qc = xa * xa + ya * ya - r1 * r1;
	let r = -(if qa.abs() > 1e-6 {
		(qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
	} else {
		qc / qb
	});
	Circle {
		x: x1 + xa + xb * r,
		y: y1 + ya + yb * r,
		r,
	}
}

/// Centroid-based enclosure used if the exact search breaks down numerically.
fn enclose_fallback(circles: &[Circle]) -> Circle {
	let n = circles.len().max(1) as f64;
	let x = circles.iter().map(|c| c.x).sum::<f64>() / n;
	let y = circles.iter().map(|c| c.y).sum::<f64>() / n;
	let r = circles
		.iter()
		.map(|c| ((c.x - x).powi(2) + (c.y - y).powi(2)).sqrt() + c.r)
		.fold(0.0, f64::max);
	Circle { x, y, r }
}

/// Linear congruential generator with a fixed seed.
#[derive(Clone, Debug)]
pub struct Lcg {
	state: u64,
}

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	pub fn new() -> Self {
		Self { state: 1 }
	}

	/// Next value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.state = (Self::A * self.state + Self::C) % Self::M;
		self.state as f64 / Self::M as f64
	}

	pub fn shuffle<T>(&mut self, items: &mut [T]) {
		let mut m = items.len();
		while m > 0 {
			let i = (self.next_f64() * m as f64) as usize;
			m -= 1;
			items.swap(m, i);
		}
	}
}

impl Default for Lcg {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn bounds() -> PackBounds {
		PackBounds {
			width: 400.0,
			height: 300.0,
			offset_x: 0.0,
			offset_y: 0.0,
		}
	}

	fn packed(weights: &[f64], padding: f64) -> Vec<PackedCircle> {
		pack(weights, bounds(), padding).into_iter().flatten().collect()
	}

	fn assert_no_overlap(circles: &[PackedCircle]) {
		for (i, a) in circles.iter().enumerate() {
			for b in &circles[i + 1..] {
				let d = (a.center_x - b.center_x).hypot(a.center_y - b.center_y);
				assert!(d + 1e-4 >= a.radius + b.radius, "{a:?} overlaps {b:?}");
			}
		}
	}

	fn assert_inside_bounds(circles: &[PackedCircle]) {
		let b = bounds();
		let (cx, cy, r) = (b.width / 2.0, b.height / 2.0, b.width.min(b.height) / 2.0);
		for c in circles {
			let d = ((c.center_x - cx).powi(2) + (c.center_y - cy).powi(2)).sqrt();
			assert!(d + c.radius <= r + 1e-4, "{c:?} escapes the root circle");
			assert!(c.center_x - c.radius >= -1e-4 && c.center_x + c.radius <= b.width + 1e-4);
			assert!(c.center_y - c.radius >= -1e-4 && c.center_y + c.radius <= b.height + 1e-4);
		}
	}

	#[test]
	fn single_circle_fills_the_box() {
		let circles = packed(&[25.0], 0.0);
		assert_eq!(circles.len(), 1);
		assert!((circles[0].radius - 150.0).abs() < 1e-9);
		assert!((circles[0].center_x - 200.0).abs() < 1e-9);
		assert!((circles[0].center_y - 150.0).abs() < 1e-9);
	}

	#[test]
	fn many_circles_never_overlap() {
		let weights: Vec<f64> = (0..40).map(|i| 1.0 + ((i * 37) % 100) as f64).collect();
		let circles = packed(&weights, 0.0);
		assert_eq!(circles.len(), 40);
		assert_no_overlap(&circles);
		assert_inside_bounds(&circles);
	}

	#[test]
	fn padding_keeps_circles_apart() {
		let weights = [10.0, 40.0, 90.0, 5.0, 60.0, 1.0, 100.0];
		let circles = packed(&weights, 10.0);
		assert_no_overlap(&circles);
		assert_inside_bounds(&circles);
		let tight = packed(&weights, 0.0);
		let sum_padded: f64 = circles.iter().map(|c| c.radius).sum();
		let sum_tight: f64 = tight.iter().map(|c| c.radius).sum();
		assert!(sum_padded < sum_tight);
	}

	#[test]
	fn radius_tracks_square_root_of_weight() {
		let circles = packed(&[4.0, 16.0, 1.0], 0.0);
		assert!((circles[1].radius / circles[0].radius - 2.0).abs() < 1e-9);
		assert!((circles[0].radius / circles[2].radius - 2.0).abs() < 1e-9);
	}

	#[test]
	fn non_positive_weights_are_not_packed() {
		let out = pack(&[3.0, 0.0, 7.0, -1.0], bounds(), 0.0);
		assert!(out[0].is_some());
		assert!(out[1].is_none());
		assert_eq!(out[2].map(|c| c.circle_index), Some(2));
		assert!(out[3].is_none());
		assert!(pack(&[0.0, 0.0], bounds(), 0.0).iter().all(Option::is_none));
	}

	#[test]
	fn packing_is_deterministic() {
		let weights: Vec<f64> = (1..=25).map(|i| (i * i % 17 + 1) as f64).collect();
		assert_eq!(pack(&weights, bounds(), 10.0), pack(&weights, bounds(), 10.0));
	}

	#[test]
	fn offsets_translate_into_diagram_space() {
		let b = PackBounds::for_container(800.0, 600.0);
		assert_eq!((b.width, b.height), (380.0, 280.0));
		let out = pack(&[1.0], b, 0.0);
		let c = out[0].unwrap();
		assert!((c.center_x - (190.0 - 200.0)).abs() < 1e-9);
		assert!((c.center_y - (140.0 - 150.0)).abs() < 1e-9);
		assert!(c.contains(c.center_x, c.center_y));
	}

	#[test]
	fn enclose_covers_inputs() {
		let mut random = Lcg::new();
		let circles = [
			Circle { x: 0.0, y: 0.0, r: 1.0 },
			Circle { x: 5.0, y: 0.0, r: 2.0 },
			Circle { x: 2.0, y: 4.0, r: 1.5 },
		];
		let e = enclose(&circles, &mut random);
		for c in &circles {
			let d = ((c.x - e.x).powi(2) + (c.y - e.y).powi(2)).sqrt();
			assert!(d + c.r <= e.r + 1e-6);
		}
	}

	#[test]
	fn lcg_matches_reference_sequence() {
		let mut random = Lcg::new();
		let first = random.next_f64();
		assert!((first - 1_015_568_748.0 / 4_294_967_296.0).abs() < 1e-15);
		assert!((0.0..1.0).contains(&random.next_f64()));
	}
}
