/// Visual parameters of the diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct ChordPackConfig {
	/// Gap between the container edge and the outer radius of the ring.
	pub padding: f64,
	/// Radial thickness of the chord ring.
	pub arc_thickness: f64,
	/// Padding between packed circles, in pack units before scaling.
	pub pack_padding: f64,
	/// Output range of both logarithmic weight scales.
	pub weight_range: (f64, f64),
	/// Label font size in pixels.
	pub label_font_px: f64,
}

impl Default for ChordPackConfig {
	fn default() -> Self {
		Self {
			padding: 50.0,
			arc_thickness: 30.0,
			pack_padding: 10.0,
			weight_range: (1.0, 100.0),
			label_font_px: 12.0,
		}
	}
}
