/// Input of the diagram: row names, column names and the weight matrix.
///
/// `matrix[i][j]` is the weight between chord `i` and circle `j`. A zero cell
/// means there is no link.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChordPackData {
	/// One name per matrix row, drawn as ring segments.
	pub chord_names: Vec<String>,
	/// One name per matrix column, drawn as packed circles.
	pub circle_names: Vec<String>,
	/// Row-major weights, non-negative and finite.
	pub matrix: Vec<Vec<f64>>,
}

impl ChordPackData {
	/// Weight of the link between `chord` and `circle`, zero when out of range.
	pub fn weight(&self, chord: usize, circle: usize) -> f64 {
		self.matrix
			.get(chord)
			.and_then(|row| row.get(circle))
			.copied()
			.unwrap_or(0.0)
	}

	/// Circles linked to `chord`, in ascending column order.
	pub fn circles_of(&self, chord: usize) -> Vec<usize> {
		self.matrix
			.get(chord)
			.map(|row| {
				row.iter()
					.enumerate()
					.filter(|(_, v)| **v != 0.0)
					.map(|(j, _)| j)
					.collect()
			})
			.unwrap_or_default()
	}

	/// Chords linked to `circle`, in ascending row order.
	pub fn chords_of(&self, circle: usize) -> Vec<usize> {
		self.matrix
			.iter()
			.enumerate()
			.filter(|(_, row)| row.get(circle).is_some_and(|v| *v != 0.0))
			.map(|(i, _)| i)
			.collect()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChordItem {
	pub name: String,
	pub value: f64,
	pub row_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleItem {
	pub name: String,
	pub value: f64,
	pub col_index: usize,
}

/// Name and aggregate value of a chord or circle, as reported to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct DataItem {
	/// Chord or circle name.
	pub name: String,
	/// Row or column total.
	pub value: f64,
}

/// The two ends of a ribbon.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkInfo {
	/// Name of the row end.
	pub chord_name: String,
	/// Name of the column end.
	pub circle_name: String,
	/// Matrix row.
	pub chord_index: usize,
	/// Matrix column.
	pub circle_index: usize,
}

/// Payload of the select/unselect callbacks.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemInfo {
	/// A ring segment.
	Chord(DataItem),
	/// A packed circle.
	Circle(DataItem),
	/// A ribbon.
	Link(LinkInfo),
}

/// An interactive element of the diagram, addressed by matrix indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
	Chord(usize),
	Circle(usize),
	Link { chord: usize, circle: usize },
}
