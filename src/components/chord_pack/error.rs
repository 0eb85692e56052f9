use thiserror::Error;

/// Input errors reported before any layout is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordPackError {
	/// The matrix has no rows.
	#[error("matrix has no rows")]
	NoChords,

	/// The matrix rows have no columns.
	#[error("matrix has no columns")]
	NoCircles,

	/// Row count and chord name count disagree.
	#[error("{names} chord names for {rows} matrix rows")]
	ChordCountMismatch {
		/// Number of chord names.
		names: usize,
		/// Number of matrix rows.
		rows: usize,
	},

	/// A row does not have one cell per circle name.
	#[error("row {row} has {found} cells, expected {expected}")]
	RaggedRow {
		/// Row index.
		row: usize,
		/// Number of circle names.
		expected: usize,
		/// Cells in the row.
		found: usize,
	},

	/// A cell is negative, NaN or infinite.
	#[error("invalid weight {value} at ({row}, {col})")]
	InvalidWeight {
		/// Row index.
		row: usize,
		/// Column index.
		col: usize,
		/// The offending weight.
		value: f64,
	},

	/// The container is too small to hold the chord ring.
	#[error("container {width}x{height} is too small for the chord ring")]
	InvalidSize {
		/// Container width in pixels.
		width: f64,
		/// Container height in pixels.
		height: f64,
	},
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, ChordPackError>;
