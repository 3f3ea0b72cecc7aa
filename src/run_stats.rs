//! Track stats for a breakpoint classification run
//!

use std::fs::File;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use serde::{Deserialize, Serialize};
use simple_error::{SimpleResult, map_err_with};

use crate::cli::BreakpointSettings;

#[derive(Default, Deserialize, Serialize)]
pub struct BreakpointStats {
    pub total_cell_count: usize,
    pub total_segment_count: usize,

    /// Segments starting at position 0, which are excluded from scoring and output
    pub zero_start_segment_count: usize,

    pub scored_breakpoint_count: usize,
    pub unique_breakpoint_count: usize,

    /// The cell threshold expressed as a fraction of the total cell count
    pub threshold_fraction: f64,
}

#[derive(Serialize)]
pub struct BreakpointRunStats<'a> {
    pub settings: &'a BreakpointSettings,
    pub breakpoint_stats: BreakpointStats,
}

pub fn get_run_stats_filename(output_filename: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{output_filename}.run.stats.json"))
}

/// Write run_stats structure out in json format
pub fn write_breakpoint_run_stats(
    filename: &Utf8Path,
    run_stats: &BreakpointRunStats,
) -> SimpleResult<()> {
    info!("Writing run statistics to file: '{filename}'");

    let f = map_err_with!(
        File::create(filename),
        "Unable to create run statistics json file: '{filename}'"
    )?;

    map_err_with!(
        serde_json::to_writer_pretty(&f, &run_stats),
        "Unable to write run statistics json file: '{filename}'"
    )
}
