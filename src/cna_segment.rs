use simple_error::{SimpleResult, bail};

use crate::int_range::IntRange;

/// One contiguous copy number alteration call from a single cell
///
#[derive(Clone, Debug, PartialEq)]
pub struct CnaSegment {
    pub chrom: String,

    /// Segment coordinates in bed convention: 0-indexed, half-closed, [start,end)
    pub range: IntRange,

    pub copy_number: i32,
}

impl CnaSegment {
    pub fn new(chrom: &str, start: i64, end: i64, copy_number: i32) -> Self {
        Self {
            chrom: chrom.to_string(),
            range: IntRange::from_pair(start, end),
            copy_number,
        }
    }
}

/// All copy number alteration calls for one cell, in input order
///
#[derive(Clone, Debug, Default)]
pub struct CellCnaSegments {
    pub cell_name: String,
    pub segments: Vec<CnaSegment>,
}

impl CellCnaSegments {
    pub fn new(cell_name: &str) -> Self {
        Self {
            cell_name: cell_name.to_string(),
            segments: Vec::new(),
        }
    }
}

/// Get the total segment count over a set of cells
///
pub fn get_total_segment_count(cells: &[CellCnaSegments]) -> usize {
    cells.iter().map(|x| x.segments.len()).sum()
}

/// Decode a copy number state field
///
/// The state is either a plain integer ("3") or somy-encoded as "<state>-<suffix>" ("3-somy"), in
/// which case only the integer preceding the first hyphen is used.
///
pub fn decode_copy_number_state(field: &str) -> SimpleResult<i32> {
    let state_str = field.split('-').next().unwrap_or_default().trim();
    match state_str.parse::<i32>() {
        Ok(x) => Ok(x),
        Err(_) => bail!("Can't parse copy number state from field '{field}'"),
    }
}
