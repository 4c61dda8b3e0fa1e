//! Physical cell placement from resolved intervals.
//!
//! Walks the strip declarations against the read-only interval maps and
//! emits one placed cell per physical LED, stepping one cell size at a
//! time along the strip's running axis. Cells from size-overridden
//! strips are kept in their own partition so the mapping pass can cursor
//! through each partition independently.

use glam::Vec3;

use crate::error::LayoutError;
use crate::grid::{Axis, GridMaps};
use crate::strip::StripDeclaration;

/// One physical LED instance.
///
/// Created once during instantiation and never moved afterwards; the
/// mapping pass only pairs it with a timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedCell {
    /// Center position handed to the host. z is always 0.
    pub position: Vec3,
    /// Index of the owning declaration in the input list.
    pub strip: usize,
    /// Cell belongs to a strip with a size override.
    pub is_size_adjusted: bool,
}

/// Placed cells partitioned by size adjustment.
///
/// Order within each partition is declaration order, then placement
/// order within a strip. The partitions are private so the positional
/// indexing of the mapping pass cannot be invalidated from outside.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    normal: Vec<PlacedCell>,
    size_adjusted: Vec<PlacedCell>,
}

impl Layout {
    /// Cells from strips without a size override, in placement order.
    pub fn normal(&self) -> &[PlacedCell] {
        &self.normal
    }

    /// Cells from size-overridden strips, in placement order.
    pub fn size_adjusted(&self) -> &[PlacedCell] {
        &self.size_adjusted
    }

    /// Total placed cells across both partitions.
    pub fn cell_count(&self) -> usize {
        self.normal.len() + self.size_adjusted.len()
    }
}

/// Place every cell of every strip.
///
/// `maps` must come from resolving the same `strips` list; an index with
/// no resolved interval is reported as a gap on its axis.
pub fn instantiate(
    strips: &[StripDeclaration],
    maps: &GridMaps,
    cell_size: f32,
) -> Result<Layout, LayoutError> {
    let mut layout = Layout::default();

    for (strip_index, strip) in strips.iter().enumerate() {
        let col_interval = maps.cols.get(strip.col).ok_or(LayoutError::UnresolvableGap {
            axis: Axis::Column,
            index: strip.col,
        })?;
        let row_interval = maps.rows.get(strip.row).ok_or(LayoutError::UnresolvableGap {
            axis: Axis::Row,
            index: strip.row,
        })?;

        // Reversed strips start from the far endpoint of their own
        // running axis and walk back toward the interval start.
        let (mut x, mut y) = if !strip.reverse {
            (col_interval.start, row_interval.start)
        } else if !strip.vertical {
            (col_interval.end, row_interval.start)
        } else {
            (col_interval.start, row_interval.end)
        };

        for _ in 0..strip.cell_count() {
            let cell = PlacedCell {
                position: Vec3::new(x, y, 0.0),
                strip: strip_index,
                is_size_adjusted: strip.is_size_adjusted(),
            };
            if strip.is_size_adjusted() {
                layout.size_adjusted.push(cell);
            } else {
                layout.normal.push(cell);
            }

            if strip.vertical {
                y += if strip.reverse { cell_size } else { -cell_size };
            } else {
                x += if strip.reverse { -cell_size } else { cell_size };
            }
        }
    }

    log::debug!(
        "instantiated {} cells ({} size-adjusted)",
        layout.cell_count(),
        layout.size_adjusted.len()
    );
    Ok(layout)
}
