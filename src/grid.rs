//! Grid coordinate resolution for strip declarations.
//!
//! Strips that share a logical row or column key must land on the same
//! physical grid line. This module builds, per axis, a mapping from
//! logical index to a coordinate interval, accepting declarations in any
//! order and converging to the same final mapping.
//!
//! # Resolution rules
//!
//! 1. An unseen index chains from the nearest lower known index on its
//!    axis (or from 0 when none exists). The axis a strip runs along gets
//!    the strip's full footprint; the axis it crosses gets a single
//!    cell-width interval.
//! 2. Cross-axis entries are provisional: a later strip running along
//!    that index widens them in place. Run-axis entries are final and
//!    later strips on the same index leave them untouched.
//! 3. Every insertion re-bases the indices above it, so out-of-order
//!    declarations splice into the chain instead of overlapping it.
//!
//! Row intervals descend (the row axis grows toward negative y); column
//! intervals ascend.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::LayoutError;
use crate::strip::StripDeclaration;

/// The two independent grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// Direction coordinates grow along this axis as indices increase.
    fn sign(self) -> f32 {
        match self {
            Axis::Row => -1.0,
            Axis::Column => 1.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Resolved coordinate span for one logical index.
///
/// `end` lies below `start` on the row axis and above it on the column
/// axis; `length` is always the unsigned extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub start: f32,
    pub end: f32,
}

impl Interval {
    pub fn length(&self) -> f32 {
        (self.end - self.start).abs()
    }

    fn anchored_at(self, new_start: f32) -> Self {
        Self {
            start: new_start,
            end: new_start + (self.end - self.start),
        }
    }
}

/// Entry status, replacing the length-sentinel convention: a cross-axis
/// insertion is a placeholder until some strip runs along the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryState {
    Placeholder,
    Final,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    interval: Interval,
    state: EntryState,
}

/// Index-to-interval mapping for one axis.
///
/// Owned and mutated exclusively during resolution; read-only once
/// layout instantiation begins.
#[derive(Clone, Debug)]
pub struct AxisMap {
    axis: Axis,
    entries: BTreeMap<u32, Entry>,
}

impl AxisMap {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            entries: BTreeMap::new(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Resolved interval for a logical index, if the index was declared.
    pub fn get(&self, index: u32) -> Option<Interval> {
        self.entries.get(&index).map(|e| e.interval)
    }

    /// Iterate resolved intervals in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Interval)> + '_ {
        self.entries.iter().map(|(&i, e)| (i, e.interval))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the strip runs along this axis (as opposed to crossing it).
    fn runs_along(&self, strip: &StripDeclaration) -> bool {
        match self.axis {
            Axis::Row => strip.vertical,
            Axis::Column => !strip.vertical,
        }
    }

    /// Record one strip's footprint at `index`.
    ///
    /// Finalized entries are left untouched; placeholders are recomputed
    /// so a run-axis strip can widen them. Indices above `index` are
    /// re-based afterwards.
    pub fn insert(
        &mut self,
        index: u32,
        strip: &StripDeclaration,
        cell_size: f32,
    ) -> Result<(), LayoutError> {
        let state = if self.runs_along(strip) {
            EntryState::Final
        } else {
            EntryState::Placeholder
        };
        let length = if self.runs_along(strip) {
            match strip.size_override {
                Some(n) => n as f32 * cell_size,
                None => strip.data_columns() as f32 * cell_size,
            }
        } else {
            cell_size
        };

        match self.entries.get(&index) {
            Some(entry) if entry.state == EntryState::Final => return Ok(()),
            _ => {}
        }

        let start = self
            .entries
            .range(..index)
            .next_back()
            .map(|(_, e)| e.interval.end)
            .unwrap_or(0.0);
        let interval = Interval {
            start,
            end: start + self.axis.sign() * length,
        };
        log::debug!(
            "{} {}: {:?} ({:?})",
            self.axis,
            index,
            interval,
            state
        );
        self.entries.insert(index, Entry { interval, state });

        self.rebase_above(index)
    }

    /// Re-anchor every index above `from` to its nearest lower neighbor's
    /// end, preserving each interval's own length. Walking upward keeps
    /// the chain consistent however the declarations were ordered.
    fn rebase_above(&mut self, from: u32) -> Result<(), LayoutError> {
        use std::ops::Bound;

        let above: Vec<u32> = self
            .entries
            .range((Bound::Excluded(from), Bound::Unbounded))
            .map(|(&i, _)| i)
            .collect();

        for index in above {
            let neighbor_end = self
                .entries
                .range(..index)
                .next_back()
                .map(|(_, e)| e.interval.end)
                .ok_or(LayoutError::UnresolvableGap {
                    axis: self.axis,
                    index,
                })?;
            if let Some(entry) = self.entries.get_mut(&index) {
                entry.interval = entry.interval.anchored_at(neighbor_end);
            }
        }
        Ok(())
    }
}

/// The two resolved interval mappings, handed read-only to the
/// instantiation pass.
#[derive(Clone, Debug)]
pub struct GridMaps {
    pub rows: AxisMap,
    pub cols: AxisMap,
}

/// Resolve row and column intervals for a full strip list.
pub fn resolve(strips: &[StripDeclaration], cell_size: f32) -> Result<GridMaps, LayoutError> {
    let mut rows = AxisMap::new(Axis::Row);
    let mut cols = AxisMap::new(Axis::Column);

    for strip in strips {
        cols.insert(strip.col, strip, cell_size)?;
        rows.insert(strip.row, strip, cell_size)?;
    }

    Ok(GridMaps { rows, cols })
}
