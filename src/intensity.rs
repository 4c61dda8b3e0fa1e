//! Intensity mapping from table values to per-cell timelines.
//!
//! The final pass of the pipeline: walks the strip declarations in
//! order, reads each strip's slice of the brightness table, and pairs
//! every placed cell with a keyframed intensity curve. Two explicit
//! cursors advance through the normal and size-adjusted partitions so
//! physical cells are consumed positionally, exactly as they were
//! placed.

use serde::Serialize;

use crate::error::LayoutError;
use crate::layout::Layout;
use crate::scene::LedElement;
use crate::strip::StripDeclaration;
use crate::table::DataTable;

/// Scale factor of the fixed exponential transfer curve.
const GLOW_SCALE: f64 = 0.371327;
/// Exponent coefficient of the transfer curve, applied to value/100.
const GLOW_EXPONENT: f64 = 4.20955;

/// Map a validated brightness value (0-100 scale) to emission intensity.
///
/// Zero maps to exactly zero so idle cells go dark instead of resting at
/// the curve's floor.
pub fn intensity_for(value: f64) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        (GLOW_SCALE * (GLOW_EXPONENT * value / 100.0).exp()) as f32
    }
}

/// One keyframe sample of a cell's brightness curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Keyframe {
    pub frame: i64,
    pub intensity: f32,
}

/// Full per-frame brightness curve for one physical cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IntensityTimeline {
    pub samples: Vec<Keyframe>,
}

/// Number of physical cells one logical column feeds.
///
/// Size-overridden strips spread their cells evenly over the data
/// columns, with the last column absorbing the remainder so the total
/// consumed exactly matches the cell count.
fn duplicate_count(strip: &StripDeclaration, logical_col: u32, last_col: u32) -> u32 {
    match strip.size_override {
        None => 1,
        Some(n) => {
            let columns = strip.data_columns();
            let per_column = (n + 1) / columns;
            if logical_col == last_col {
                per_column + (n + 1) - per_column * columns
            } else {
                per_column
            }
        }
    }
}

/// Build one element per placed cell, pairing it with its timeline.
///
/// `layout` must come from instantiating the same `strips` list; the
/// partitions are then guaranteed to hold exactly the cells this pass
/// consumes. `frames` is the frame-number sequence derived from the
/// table's frame column.
pub fn map_intensities(
    strips: &[StripDeclaration],
    layout: &Layout,
    table: &DataTable,
    frames: &[i64],
) -> Result<Vec<LedElement>, LayoutError> {
    let mut elements = Vec::with_capacity(layout.cell_count());
    let mut normal_cursor = 0;
    let mut adjusted_cursor = 0;

    for strip in strips {
        let glow = strip.color.glow();
        let range = strip.column_range();
        let last_col = *range.end();

        for logical_col in range {
            let mut timeline = IntensityTimeline::default();
            for (frame_index, &frame) in frames.iter().enumerate() {
                let row = table.header_row() + frame_index;
                let col = table.header_col() + logical_col as usize;
                let value = table.value_at(row, col)?;
                timeline.samples.push(Keyframe {
                    frame,
                    intensity: intensity_for(value),
                });
            }

            for _ in 0..duplicate_count(strip, logical_col, last_col) {
                let cell = if strip.is_size_adjusted() {
                    let cell = layout.size_adjusted()[adjusted_cursor];
                    adjusted_cursor += 1;
                    cell
                } else {
                    let cell = layout.normal()[normal_cursor];
                    normal_cursor += 1;
                    cell
                };
                elements.push(LedElement {
                    position: cell.position.to_array(),
                    color: glow,
                    timeline: timeline.clone(),
                });
            }
        }
    }

    log::debug!(
        "mapped {} timelines over {} frames",
        elements.len(),
        frames.len()
    );
    Ok(elements)
}
