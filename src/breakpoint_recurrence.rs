//! Score how often each copy number alteration breakpoint recurs across a cell population
//!

use std::collections::HashMap;

use crate::cna_segment::CellCnaSegments;
use crate::int_range::IntRange;

/// Base pairs per megabase, used to convert the user breakpoint window settings
pub const WINDOW_UNIT_SIZE: f64 = 1_000_000.0;

/// A single segment from one cell, stored for breakpoint comparison
///
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedBreakpoint {
    pub range: IntRange,
    pub copy_number: i32,
    pub cell_name: String,
}

/// Segments from all cells, grouped by chromosome
///
/// Chromosomes are kept in the order they are first observed in the input, and segments within
/// each chromosome are kept in input order.
///
#[derive(Default)]
pub struct ChromosomeIndex {
    chrom_labels: Vec<String>,
    label_to_index: HashMap<String, usize>,
    breakpoints: Vec<Vec<IndexedBreakpoint>>,

    /// Number of segments dropped from the index because they start at position 0
    pub zero_start_segment_count: usize,
}

impl ChromosomeIndex {
    /// Build the index from all cells
    ///
    /// Segments starting at position 0 are placeholder calls rather than real breakpoints, so these
    /// are excluded from both scoring and output. The chromosome of such a segment is still
    /// registered, which only affects chromosome iteration order.
    ///
    pub fn from_cells(cells: &[CellCnaSegments]) -> Self {
        let mut index = Self::default();
        for cell in cells.iter() {
            for segment in cell.segments.iter() {
                let chrom_index = index.get_or_insert_chrom(&segment.chrom);
                if segment.range.start == 0 {
                    index.zero_start_segment_count += 1;
                    continue;
                }
                index.breakpoints[chrom_index].push(IndexedBreakpoint {
                    range: segment.range.clone(),
                    copy_number: segment.copy_number,
                    cell_name: cell.cell_name.clone(),
                });
            }
        }
        index
    }

    fn get_or_insert_chrom(&mut self, chrom: &str) -> usize {
        if let Some(&chrom_index) = self.label_to_index.get(chrom) {
            return chrom_index;
        }
        let chrom_index = self.chrom_labels.len();
        self.chrom_labels.push(chrom.to_string());
        self.label_to_index.insert(chrom.to_string(), chrom_index);
        self.breakpoints.push(Vec::new());
        chrom_index
    }

    /// Iterate over (chromosome, breakpoints) in chromosome observation order
    ///
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IndexedBreakpoint])> {
        self.chrom_labels
            .iter()
            .map(|x| x.as_str())
            .zip(self.breakpoints.iter().map(|x| x.as_slice()))
    }

    pub fn chrom_count(&self) -> usize {
        self.chrom_labels.len()
    }

    pub fn breakpoint_count(&self) -> usize {
        self.breakpoints.iter().map(|x| x.len()).sum()
    }
}

/// Asymmetric window around a reference breakpoint within which another breakpoint is treated as
/// the same event
///
#[derive(Clone, Debug)]
pub struct BreakpointWindow {
    pub lower_size: f64,
    pub upper_size: f64,
}

impl BreakpointWindow {
    /// Create the window from sizes given in megabases
    pub fn from_megabases(lower_mb: f64, upper_mb: f64) -> Self {
        Self {
            lower_size: lower_mb * WINDOW_UNIT_SIZE,
            upper_size: upper_mb * WINDOW_UNIT_SIZE,
        }
    }

    /// Return true if `pos` falls strictly inside the window around `reference_pos`
    ///
    pub fn contains(&self, reference_pos: i64, pos: i64) -> bool {
        let reference_pos = reference_pos as f64;
        let pos = pos as f64;
        reference_pos - self.lower_size < pos && pos < reference_pos + self.upper_size
    }
}

/// Test whether `other` supports the same breakpoint as `target`
///
/// A segment from the same cell with the same start always matches, which includes `target`
/// itself. Otherwise `target` must start strictly inside the window around the start of `other`.
///
fn is_matching_breakpoint(
    target: &IndexedBreakpoint,
    other: &IndexedBreakpoint,
    window: &BreakpointWindow,
) -> bool {
    let is_same_cell_start =
        target.range.start == other.range.start && target.cell_name == other.cell_name;

    // The window test is only reached when the same-cell rule fails, so a pair is counted once
    is_same_cell_start || window.contains(other.range.start, target.range.start)
}

/// Count the segments on the chromosome which support the `target` breakpoint
///
/// The count includes `target` itself when it is a member of `chrom_breakpoints`.
///
pub fn get_breakpoint_recurrence_count(
    chrom_breakpoints: &[IndexedBreakpoint],
    target: &IndexedBreakpoint,
    window: &BreakpointWindow,
) -> usize {
    chrom_breakpoints
        .iter()
        .filter(|other| is_matching_breakpoint(target, other, window))
        .count()
}

pub struct ScoredBreakpoint<'a> {
    pub chrom: &'a str,
    pub breakpoint: &'a IndexedBreakpoint,
    pub recurrence_count: usize,
}

/// Score every indexed breakpoint against all other breakpoints on the same chromosome
///
/// This is an all-pairs comparison per chromosome, which is acceptable at the expected scale of
/// tens to hundreds of segments per chromosome.
///
/// Scored breakpoints are returned in the iteration order of `index`.
///
pub fn score_breakpoints<'a>(
    index: &'a ChromosomeIndex,
    window: &BreakpointWindow,
) -> Vec<ScoredBreakpoint<'a>> {
    let mut scored = Vec::new();
    for (chrom, chrom_breakpoints) in index.iter() {
        for breakpoint in chrom_breakpoints.iter() {
            let recurrence_count =
                get_breakpoint_recurrence_count(chrom_breakpoints, breakpoint, window);
            scored.push(ScoredBreakpoint {
                chrom,
                breakpoint,
                recurrence_count,
            });
        }
    }
    scored
}

/// The maximum fraction of the cell population in which a breakpoint can recur and still be
/// classified as unique
///
#[derive(Clone, Debug)]
pub struct RecurrenceThreshold {
    /// Maximum number of cells in which a unique breakpoint may be found
    pub cell_threshold: u32,
    pub total_cell_count: usize,
}

impl RecurrenceThreshold {
    pub fn new(cell_threshold: u32, total_cell_count: usize) -> Self {
        assert!(total_cell_count > 0);
        Self {
            cell_threshold,
            total_cell_count,
        }
    }

    pub fn fraction(&self) -> f64 {
        self.cell_threshold as f64 / self.total_cell_count as f64
    }

    pub fn get_recurrence_fraction(&self, recurrence_count: usize) -> f64 {
        recurrence_count as f64 / self.total_cell_count as f64
    }

    /// Return true if the breakpoint is at or below the threshold fraction
    pub fn is_unique(&self, recurrence_count: usize) -> bool {
        self.get_recurrence_fraction(recurrence_count) <= self.fraction()
    }
}

/// Select the unique breakpoints from a scored breakpoint list, preserving order
///
pub fn filter_unique_breakpoints<'a>(
    scored: Vec<ScoredBreakpoint<'a>>,
    threshold: &RecurrenceThreshold,
) -> Vec<ScoredBreakpoint<'a>> {
    scored
        .into_iter()
        .filter(|x| threshold.is_unique(x.recurrence_count))
        .collect()
}
