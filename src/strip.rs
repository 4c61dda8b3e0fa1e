//! Strip declaration input model.
//!
//! A strip declaration groups a run of contiguous LED positions that share
//! one color, orientation, and direction, and names the slice of the
//! brightness table the run reads from. Declarations arrive as camelCase
//! JSON from the host side and are validated eagerly before any layout
//! work starts.

use serde::Deserialize;

use crate::error::LayoutError;

/// Fixed glow color for a strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Color {
    White,
    Yellow,
    Red,
    Black,
}

impl Color {
    /// RGBA emission tuple handed to the host, applied once per cell.
    ///
    /// Black shares Red's tuple; the host renders it dark through the
    /// intensity curve rather than the hue.
    pub fn glow(self) -> [f32; 4] {
        match self {
            Color::White => [0.625, 0.818, 1.0, 1.0],
            Color::Yellow => [0.98, 0.85, 0.22, 1.0],
            Color::Red | Color::Black => [1.0, 0.0, 0.0, 1.0],
        }
    }
}

/// One LED strip as declared by the user's strip specification.
///
/// `row` and `col` are logical grouping keys, not pixel coordinates:
/// strips that share a key sit on the same physical grid line and share
/// its resolved coordinate interval.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripDeclaration {
    /// Logical row grouping key.
    pub row: u32,

    /// Logical column grouping key.
    pub col: u32,

    /// First data column this strip reads (inclusive).
    pub start: u32,

    /// Last data column this strip reads (inclusive).
    pub end: u32,

    /// Strip runs along the row axis when true, the column axis otherwise.
    #[serde(default)]
    pub vertical: bool,

    /// Physical placement order is inverted relative to increasing
    /// data-column index.
    #[serde(default)]
    pub reverse: bool,

    /// Glow color for every cell of the strip.
    pub color: Color,

    /// Physical LED count minus one, when it differs from the
    /// data-column count. Absent means the counts are equal.
    #[serde(default)]
    pub size_override: Option<u32>,
}

impl StripDeclaration {
    /// Number of data columns the strip reads.
    pub fn data_columns(&self) -> u32 {
        self.start.abs_diff(self.end) + 1
    }

    /// Number of physical cells the strip instantiates.
    pub fn cell_count(&self) -> u32 {
        match self.size_override {
            Some(n) => n + 1,
            None => self.data_columns(),
        }
    }

    /// Whether the physical cell count is decoupled from the data columns.
    pub fn is_size_adjusted(&self) -> bool {
        self.size_override.is_some()
    }

    /// Data columns in ascending order. Reversal affects physical
    /// placement only, never the visit order of columns.
    pub fn column_range(&self) -> std::ops::RangeInclusive<u32> {
        self.start.min(self.end)..=self.start.max(self.end)
    }

    /// Reject declarations that cannot describe a real strip.
    ///
    /// `index` is the declaration's position in the input list and is
    /// carried into the error for reporting.
    pub fn validate(&self, index: usize) -> Result<(), LayoutError> {
        if self.start > self.end && !self.reverse {
            return Err(LayoutError::InconsistentStripRange {
                strip: index,
                reason: format!(
                    "start {} exceeds end {} but reverse is not set",
                    self.start, self.end
                ),
            });
        }
        if self.size_override == Some(0) {
            return Err(LayoutError::InconsistentStripRange {
                strip: index,
                reason: "sizeOverride of zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_strip() -> StripDeclaration {
        StripDeclaration {
            row: 0,
            col: 0,
            start: 0,
            end: 2,
            vertical: false,
            reverse: false,
            color: Color::White,
            size_override: None,
        }
    }

    #[test]
    fn test_counts() {
        let strip = make_test_strip();
        assert_eq!(strip.data_columns(), 3);
        assert_eq!(strip.cell_count(), 3);
        assert!(!strip.is_size_adjusted());

        let adjusted = StripDeclaration {
            size_override: Some(7),
            ..make_test_strip()
        };
        assert_eq!(adjusted.data_columns(), 3);
        assert_eq!(adjusted.cell_count(), 8);
        assert!(adjusted.is_size_adjusted());
    }

    #[test]
    fn test_column_range_ascends_for_reversed_strips() {
        let strip = StripDeclaration {
            start: 5,
            end: 2,
            reverse: true,
            ..make_test_strip()
        };
        let cols: Vec<u32> = strip.column_range().collect();
        assert_eq!(cols, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_validate_rejects_backwards_range_without_reverse() {
        let strip = StripDeclaration {
            start: 5,
            end: 2,
            ..make_test_strip()
        };
        let err = strip.validate(3).unwrap_err();
        match err {
            LayoutError::InconsistentStripRange { strip, .. } => assert_eq!(strip, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_size_override() {
        let strip = StripDeclaration {
            size_override: Some(0),
            ..make_test_strip()
        };
        assert!(strip.validate(0).is_err());
    }

    #[test]
    fn test_validate_accepts_reversed_range() {
        let strip = StripDeclaration {
            start: 5,
            end: 2,
            reverse: true,
            ..make_test_strip()
        };
        assert!(strip.validate(0).is_ok());
    }

    #[test]
    fn test_glow_tuples() {
        assert_eq!(Color::White.glow(), [0.625, 0.818, 1.0, 1.0]);
        assert_eq!(Color::Yellow.glow(), [0.98, 0.85, 0.22, 1.0]);
        assert_eq!(Color::Red.glow(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(Color::Black.glow(), Color::Red.glow());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "row": 1,
            "col": 0,
            "start": 4,
            "end": 9,
            "vertical": true,
            "reverse": false,
            "color": "Yellow",
            "sizeOverride": 11
        }"#;

        let strip: StripDeclaration = serde_json::from_str(json).unwrap();
        assert_eq!(strip.row, 1);
        assert_eq!(strip.start, 4);
        assert!(strip.vertical);
        assert_eq!(strip.color, Color::Yellow);
        assert_eq!(strip.size_override, Some(11));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"row": 0, "col": 2, "start": 0, "end": 0, "color": "Red"}"#;
        let strip: StripDeclaration = serde_json::from_str(json).unwrap();
        assert!(!strip.vertical);
        assert!(!strip.reverse);
        assert_eq!(strip.size_override, None);
    }
}
