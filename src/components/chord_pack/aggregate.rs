use super::error::{ChordPackError, Result};
use super::types::{ChordItem, ChordPackData, CircleItem};

/// Row and column totals of a validated matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregates {
	pub chords: Vec<ChordItem>,
	pub circles: Vec<CircleItem>,
}

impl Aggregates {
	pub fn chord_totals(&self) -> Vec<f64> {
		self.chords.iter().map(|c| c.value).collect()
	}

	pub fn circle_totals(&self) -> Vec<f64> {
		self.circles.iter().map(|c| c.value).collect()
	}
}

/// Validate `data` and sum its rows and columns.
pub fn aggregate(data: &ChordPackData) -> Result<Aggregates> {
	let rows = data.matrix.len();
	let cols = data.circle_names.len();
	if rows == 0 {
		return Err(ChordPackError::NoChords);
	}
	if cols == 0 {
		return Err(ChordPackError::NoCircles);
	}
	if data.chord_names.len() != rows {
		return Err(ChordPackError::ChordCountMismatch {
			names: data.chord_names.len(),
			rows,
		});
	}

	let mut circle_totals = vec![0.0; cols];
	let mut chords = Vec::with_capacity(rows);
	for (row, (name, cells)) in data.chord_names.iter().zip(&data.matrix).enumerate() {
		if cells.len() != cols {
			return Err(ChordPackError::RaggedRow {
				row,
				expected: cols,
				found: cells.len(),
			});
		}
		let mut total = 0.0;
		for (col, &value) in cells.iter().enumerate() {
			if !value.is_finite() || value < 0.0 {
				return Err(ChordPackError::InvalidWeight { row, col, value });
			}
			total += value;
			circle_totals[col] += value;
		}
		chords.push(ChordItem {
			name: name.clone(),
			value: total,
			row_index: row,
		});
	}

	let circles = data
		.circle_names
		.iter()
		.zip(circle_totals)
		.enumerate()
		.map(|(col, (name, value))| CircleItem {
			name: name.clone(),
			value,
			col_index: col,
		})
		.collect();

	Ok(Aggregates { chords, circles })
}
