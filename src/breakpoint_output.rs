use std::fs::File;
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use simple_error::{SimpleResult, map_err_with};

use crate::breakpoint_recurrence::ScoredBreakpoint;

/// Get the unique breakpoint output filename
///
/// The threshold and window settings are encoded in the filename so that results from multiple
/// parameter settings can be kept side by side.
///
pub fn get_unique_breakpoint_filename(
    output_prefix: &str,
    cell_threshold: u32,
    lower_interval_mb: f64,
    upper_interval_mb: f64,
) -> Utf8PathBuf {
    Utf8PathBuf::from(format!(
        "{output_prefix}_CellThreshold={cell_threshold}_lowerInterval={lower_interval_mb:?}mb_upperInterval={upper_interval_mb:?}mb.bed"
    ))
}

/// Write unique breakpoints as space-delimited rows of 'chrom start end copy_number cell_name'
///
pub fn write_unique_breakpoints(
    writer: &mut impl Write,
    unique_breakpoints: &[ScoredBreakpoint],
) -> std::io::Result<()> {
    for x in unique_breakpoints.iter() {
        let b = x.breakpoint;
        writeln!(
            writer,
            "{} {} {} {} {}",
            x.chrom, b.range.start, b.range.end, b.copy_number, b.cell_name
        )?;
    }
    writer.flush()
}

pub fn write_unique_breakpoint_file(
    filename: &Utf8Path,
    unique_breakpoints: &[ScoredBreakpoint],
) -> SimpleResult<()> {
    info!("Writing unique breakpoints to file: '{filename}'");

    let f = map_err_with!(
        File::create(filename),
        "Unable to create unique breakpoint file: '{filename}'"
    )?;
    let mut f = BufWriter::new(f);
    map_err_with!(
        write_unique_breakpoints(&mut f, unique_breakpoints),
        "Unable to write unique breakpoint file: '{filename}'"
    )
}
