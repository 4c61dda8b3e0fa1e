//! Full resolve → instantiate → map pipeline.
//!
//! The three passes run strictly in sequence: the interval maps are
//! frozen before any cell is placed, and the mapper indexes positionally
//! into the fully-materialized layout. A failure at any stage aborts the
//! run with no partial output.

use crate::error::LayoutError;
use crate::grid;
use crate::intensity;
use crate::layout;
use crate::scene::LedElement;
use crate::strip::StripDeclaration;
use crate::table::DataTable;

/// Edge length of one LED cell in host units.
pub const DEFAULT_CELL_SIZE: f32 = 2.0;

/// Knobs for a pipeline run.
#[derive(Clone, Copy, Debug)]
pub struct PipelineConfig {
    /// Edge length of one LED cell.
    pub cell_size: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Run the whole pipeline over an in-memory strip list and table.
///
/// Returns one element per physical LED cell, ready for the host sink.
pub fn run(
    strips: &[StripDeclaration],
    table: &DataTable,
    config: &PipelineConfig,
) -> Result<Vec<LedElement>, LayoutError> {
    for (index, strip) in strips.iter().enumerate() {
        strip.validate(index)?;
        log::debug!(
            "strip {index}: row {} col {} data {}..={} {} {}{:?}",
            strip.row,
            strip.col,
            strip.start,
            strip.end,
            if strip.vertical { "vertical" } else { "horizontal" },
            if strip.reverse { "reversed " } else { "" },
            strip.color,
        );
    }

    let maps = grid::resolve(strips, config.cell_size)?;
    log::info!(
        "resolved {} row and {} column intervals",
        maps.rows.len(),
        maps.cols.len()
    );

    let layout = layout::instantiate(strips, &maps, config.cell_size)?;
    log::info!(
        "placed {} cells ({} size-adjusted) across {} strips",
        layout.cell_count(),
        layout.size_adjusted().len(),
        strips.len()
    );

    let frames = table.frames()?;
    let elements = intensity::map_intensities(strips, &layout, table, &frames)?;
    log::info!(
        "mapped {} elements over {} frames",
        elements.len(),
        frames.len()
    );

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::Color;
    use crate::table::CellValue;

    fn make_test_strips() -> Vec<StripDeclaration> {
        vec![
            StripDeclaration {
                row: 0,
                col: 0,
                start: 0,
                end: 1,
                vertical: false,
                reverse: false,
                color: Color::White,
                size_override: None,
            },
            StripDeclaration {
                row: 1,
                col: 0,
                start: 0,
                end: 1,
                vertical: false,
                reverse: false,
                color: Color::Red,
                size_override: None,
            },
        ]
    }

    fn make_test_table() -> DataTable {
        let num = |n: f64| CellValue::Number(n);
        DataTable::new(
            vec![
                vec![num(0.0), num(0.0), num(100.0)],
                vec![num(100.0), num(50.0), num(0.0)],
            ],
            0,
            1,
        )
    }

    #[test]
    fn test_run_is_deterministic() {
        let strips = make_test_strips();
        let table = make_test_table();
        let config = PipelineConfig::default();

        let first = run(&strips, &table, &config).unwrap();
        let second = run(&strips, &table, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_rejects_bad_declarations_before_any_work() {
        let mut strips = make_test_strips();
        strips[1].start = 9;
        let err = run(&strips, &make_test_table(), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InconsistentStripRange { strip: 1, .. }
        ));
    }

    #[test]
    fn test_run_produces_one_element_per_cell() {
        let elements = run(
            &make_test_strips(),
            &make_test_table(),
            &PipelineConfig::default(),
        )
        .unwrap();
        assert_eq!(elements.len(), 4);
    }
}
