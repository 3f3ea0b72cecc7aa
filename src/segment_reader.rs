//! Readers for the two copy number segment file layouts
//!
//! Track-header layout, one block per cell:
//!
//! ```text
//! track name="copy number for cell_07.bam" description="..."
//! chr1	1000	2000	3-somy
//! chr2	5000	9000	1-somy
//! ```
//!
//! Flat layout, with the cell name in column 5 of every row:
//!
//! ```text
//! chr1	1000	2000	3-somy	cell_07
//! ```
//!

use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::Utf8Path;
use log::info;
use simple_error::{SimpleResult, bail, map_err_with};

use crate::cna_segment::{CellCnaSegments, CnaSegment, decode_copy_number_state};

const TRACK_HEADER_PREFIX: &str = "track";

fn open_segment_file(filename: &Utf8Path, label: &str) -> SimpleResult<BufReader<File>> {
    let f = map_err_with!(
        File::open(filename),
        "Unable to open {label} file: '{filename}'"
    )?;
    Ok(BufReader::new(f))
}

/// Extract the cell name from a track header line
///
/// The name is taken from the first double-quoted field of the line. Within that field the last
/// space-delimited word is selected, and any text from the first '.' onward is removed, so that
/// `name="copy number for cell_07.bam"` yields `cell_07`. Any later quoted fields are ignored.
///
fn parse_track_header_cell_name(line: &str) -> SimpleResult<String> {
    let quoted = match line.split('"').nth(1) {
        Some(x) => x,
        None => bail!("Track header does not contain a quoted cell name field"),
    };
    let word = quoted.split(' ').next_back().unwrap_or_default();
    let cell_name = match word.find('.') {
        Some(pos) => &word[..pos],
        None => word,
    };
    if cell_name.is_empty() {
        bail!("Track header quoted field does not contain a cell name");
    }
    Ok(cell_name.to_string())
}

fn parse_coordinate(field: &str, label: &str) -> SimpleResult<i64> {
    match field.trim().parse::<i64>() {
        Ok(x) => Ok(x),
        Err(_) => bail!("Can't parse segment {label} coordinate from field '{field}'"),
    }
}

/// Parse the chromosome, start, end and copy number state from the leading fields of a segment
/// line
///
fn parse_segment_fields(words: &[&str]) -> SimpleResult<CnaSegment> {
    if words.len() < 4 {
        bail!(
            "Expected at least 4 tab-delimited fields in segment line, found {}",
            words.len()
        );
    }
    let chrom = words[0];
    let start = parse_coordinate(words[1], "start")?;
    let end = parse_coordinate(words[2], "end")?;
    if start >= end {
        bail!("Segment start ({start}) is not less than segment end ({end})");
    }
    let copy_number = decode_copy_number_state(words[3])?;
    Ok(CnaSegment::new(chrom, start, end, copy_number))
}

fn parse_track_bed_line(line: &str, cells: &mut Vec<CellCnaSegments>) -> SimpleResult<()> {
    if line.starts_with(TRACK_HEADER_PREFIX) {
        let cell_name = parse_track_header_cell_name(line.trim_end())?;
        cells.push(CellCnaSegments::new(&cell_name));
    } else {
        let words = line.trim_end().split('\t').collect::<Vec<_>>();
        let segment = parse_segment_fields(&words)?;
        match cells.last_mut() {
            Some(cell) => cell.segments.push(segment),
            None => bail!("Segment line found before the first track header line"),
        }
    }
    Ok(())
}

/// Parse cells from the track-header segment layout
///
/// Each track header line starts a new cell, and all following segment lines up to the next header
/// are assigned to it. Blank lines are skipped. A cell with no segment lines is still counted as a
/// member of the population.
///
/// # Arguments
/// * `label` - Used in error messages to describe the input source
///
pub fn parse_track_bed_cells(
    reader: impl BufRead,
    label: &str,
) -> SimpleResult<Vec<CellCnaSegments>> {
    let mut cells = Vec::new();
    for (line_index, line) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let line = map_err_with!(line, "Can't read line {} of {}", line_number, label)?;
        if line.trim_end().is_empty() {
            continue;
        }
        map_err_with!(
            parse_track_bed_line(&line, &mut cells),
            "Invalid input at line {} of {}",
            line_number,
            label
        )?;
    }

    if cells.is_empty() {
        bail!("No track header lines found in {label}");
    }
    Ok(cells)
}

/// Read cells from a track-header segment file
///
pub fn read_track_bed_cells(filename: &Utf8Path) -> SimpleResult<Vec<CellCnaSegments>> {
    info!("Reading per-cell copy number segments from file '{filename}'");
    let reader = open_segment_file(filename, "copy number segment")?;
    parse_track_bed_cells(reader, &format!("file '{filename}'"))
}

fn parse_flat_bed_line(line: &str) -> SimpleResult<(String, CnaSegment)> {
    let line = line.trim_end();
    let mut words = line.split('\t').collect::<Vec<_>>();

    // Rows written by the breakpoint classifier are space-delimited
    if words.len() < 5 {
        words = line.split_ascii_whitespace().collect();
    }
    if words.len() < 5 {
        bail!(
            "Expected at least 5 fields in segment line, found {}",
            words.len()
        );
    }
    let segment = parse_segment_fields(&words)?;
    let cell_name = words[4].trim();
    if cell_name.is_empty() {
        bail!("Cell name field is empty");
    }
    Ok((cell_name.to_string(), segment))
}

/// Parse cells from the flat segment layout, where each row carries its own cell name
///
/// Consecutive rows sharing a cell name are grouped into one cell, so that iterating over the
/// segments of the returned cells in order reproduces the input row order.
///
/// # Arguments
/// * `label` - Used in error messages to describe the input source
///
pub fn parse_flat_bed_cells(
    reader: impl BufRead,
    label: &str,
) -> SimpleResult<Vec<CellCnaSegments>> {
    let mut cells: Vec<CellCnaSegments> = Vec::new();
    for (line_index, line) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let line = map_err_with!(line, "Can't read line {} of {}", line_number, label)?;
        if line.trim_end().is_empty() {
            continue;
        }
        let (cell_name, segment) = map_err_with!(
            parse_flat_bed_line(&line),
            "Invalid input at line {} of {}",
            line_number,
            label
        )?;
        match cells.last_mut() {
            Some(cell) if cell.cell_name == cell_name => cell.segments.push(segment),
            _ => {
                let mut cell = CellCnaSegments::new(&cell_name);
                cell.segments.push(segment);
                cells.push(cell);
            }
        }
    }
    Ok(cells)
}

/// Read cells from a flat segment file
///
pub fn read_flat_bed_cells(filename: &Utf8Path) -> SimpleResult<Vec<CellCnaSegments>> {
    info!("Reading copy number segments from file '{filename}'");
    let reader = open_segment_file(filename, "copy number segment")?;
    parse_flat_bed_cells(reader, &format!("file '{filename}'"))
}
