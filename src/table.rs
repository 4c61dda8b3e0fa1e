//! In-memory brightness table and cell validation.
//!
//! The host side owns file ingestion (spreadsheet parsing, JSON
//! decoding); the core only addresses an already-loaded grid of
//! mixed-type cells. Column 0 below the header row is the frame column;
//! the remaining columns hold brightness values on a 0-100 scale.

use serde::Deserialize;

use crate::error::LayoutError;

/// One cell of the brightness table as ingested.
///
/// Untagged so a JSON table of numbers, strings, and nulls maps straight
/// onto it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Already-numeric cell.
    Number(f64),
    /// Textual cell, possibly a number in disguise.
    Text(String),
    /// Blank cell.
    Empty,
}

impl CellValue {
    fn raw_string(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

/// Attempt integer parse, then float parse.
///
/// A single bad cell invalidates the whole timeline's numeric meaning,
/// so failure is fatal to the run; the row/column hints locate the cell
/// for the report.
pub fn validate(raw: &CellValue, row_hint: usize, col_hint: usize) -> Result<f64, LayoutError> {
    let malformed = || LayoutError::MalformedCellValue {
        row: row_hint,
        col: col_hint,
        raw: raw.raw_string(),
    };
    match raw {
        CellValue::Number(n) if n.is_finite() => Ok(*n),
        CellValue::Number(_) | CellValue::Empty => Err(malformed()),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if let Ok(int) = trimmed.parse::<i64>() {
                return Ok(int as f64);
            }
            match trimmed.parse::<f64>() {
                Ok(float) if float.is_finite() => Ok(float),
                _ => Err(malformed()),
            }
        }
    }
}

/// The raw time-series grid plus the offsets where frame/value data begins.
#[derive(Clone, Debug)]
pub struct DataTable {
    cells: Vec<Vec<CellValue>>,
    header_row: usize,
    header_col: usize,
}

impl DataTable {
    pub fn new(cells: Vec<Vec<CellValue>>, header_row: usize, header_col: usize) -> Self {
        Self {
            cells,
            header_row,
            header_col,
        }
    }

    /// Row where frame/value data begins.
    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// Column where value data begins.
    pub fn header_col(&self) -> usize {
        self.header_col
    }

    /// Number of rows in the grid, headers included.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Read and validate the cell at an absolute (row, col) address.
    ///
    /// A missing cell is reported the same way as an unparseable one.
    pub fn value_at(&self, row: usize, col: usize) -> Result<f64, LayoutError> {
        match self.cell(row, col) {
            Some(raw) => validate(raw, row, col),
            None => Err(LayoutError::MalformedCellValue {
                row,
                col,
                raw: "<missing>".to_string(),
            }),
        }
    }

    /// Extract the frame-number sequence from column 0 below the header.
    ///
    /// Values in fractional-second units are scaled to milliseconds. The
    /// first frame is always 0 whatever the units, so detection looks at
    /// the third value; tables with fewer than three frames are taken as
    /// already frame-numbered.
    pub fn frames(&self) -> Result<Vec<i64>, LayoutError> {
        let mut raw_frames = Vec::new();
        for row in self.header_row..self.cells.len() {
            raw_frames.push(self.value_at(row, 0)?);
        }

        let scale = if raw_frames.len() > 2 && raw_frames[2] < 1.0 {
            1000.0
        } else {
            1.0
        };

        Ok(raw_frames
            .into_iter()
            .map(|f| (f * scale).round() as i64)
            .collect())
    }
}
