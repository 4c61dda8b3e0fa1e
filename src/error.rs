//! Typed failures for the layout-and-mapping pipeline.
//!
//! Every variant is fatal to the run: the pipeline returns no partial
//! output once one is raised, and nothing host-visible has been mutated
//! at that point. Callers decide whether to abort or report.

use std::fmt;

use crate::grid::Axis;

/// Errors produced while resolving, instantiating, or mapping a strip list.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// A table cell is neither integer- nor float-parseable.
    MalformedCellValue {
        /// Table row of the offending cell.
        row: usize,
        /// Table column of the offending cell.
        col: usize,
        /// The raw cell content as read.
        raw: String,
    },
    /// Re-basing needed a lower neighbor for an index and found none.
    UnresolvableGap {
        /// Axis on which the gap was detected.
        axis: Axis,
        /// The index that could not be anchored.
        index: u32,
    },
    /// A strip declaration that cannot describe a real strip.
    InconsistentStripRange {
        /// Position of the declaration in the input list.
        strip: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::MalformedCellValue { row, col, raw } => write!(
                f,
                "table cell at row {row}, col {col} must be an int or a float, got {raw:?}"
            ),
            LayoutError::UnresolvableGap { axis, index } => {
                write!(f, "no lower neighbor for index {index} on the {axis} axis")
            }
            LayoutError::InconsistentStripRange { strip, reason } => {
                write!(f, "strip {strip}: {reason}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_cell_display() {
        let err = LayoutError::MalformedCellValue {
            row: 4,
            col: 7,
            raw: "N/A".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "table cell at row 4, col 7 must be an int or a float, got \"N/A\""
        );
    }

    #[test]
    fn test_gap_display() {
        let err = LayoutError::UnresolvableGap {
            axis: Axis::Row,
            index: 3,
        };
        assert_eq!(err.to_string(), "no lower neighbor for index 3 on the row axis");
    }
}
