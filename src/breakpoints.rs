use std::error;

use log::info;
use thousands::Separable;

use crate::breakpoint_output::write_unique_breakpoint_file;
use crate::breakpoint_recurrence::{
    BreakpointWindow, ChromosomeIndex, RecurrenceThreshold, filter_unique_breakpoints,
    score_breakpoints,
};
use crate::cli;
use crate::cna_segment::get_total_segment_count;
use crate::run_stats::{
    BreakpointRunStats, BreakpointStats, get_run_stats_filename, write_breakpoint_run_stats,
};
use crate::segment_reader::read_track_bed_cells;

pub fn run_breakpoints(settings: &cli::BreakpointSettings) -> Result<(), Box<dyn error::Error>> {
    let cells = read_track_bed_cells(&settings.bed_filename)?;
    let total_segment_count = get_total_segment_count(&cells);
    info!(
        "Found {} segments from {} cells",
        total_segment_count.separate_with_commas(),
        cells.len().separate_with_commas()
    );

    let index = ChromosomeIndex::from_cells(&cells);
    info!(
        "Indexed {} breakpoints on {} chromosomes",
        index.breakpoint_count().separate_with_commas(),
        index.chrom_count()
    );
    if index.zero_start_segment_count > 0 {
        info!(
            "Excluding {} segments starting at position 0",
            index.zero_start_segment_count.separate_with_commas()
        );
    }

    let window =
        BreakpointWindow::from_megabases(settings.lower_interval_mb, settings.upper_interval_mb);
    let threshold = RecurrenceThreshold::new(settings.cell_threshold, cells.len());
    info!(
        "Reporting breakpoints found in at most {} of {} cells (fraction {:.4})",
        settings.cell_threshold,
        cells.len(),
        threshold.fraction()
    );

    let scored = score_breakpoints(&index, &window);
    let scored_breakpoint_count = scored.len();
    let unique = filter_unique_breakpoints(scored, &threshold);
    info!(
        "Found {} unique breakpoints out of {} scored breakpoints",
        unique.len().separate_with_commas(),
        scored_breakpoint_count.separate_with_commas()
    );

    let output_filename = settings.get_output_filename();
    write_unique_breakpoint_file(&output_filename, &unique)?;

    let breakpoint_stats = BreakpointStats {
        total_cell_count: cells.len(),
        total_segment_count,
        zero_start_segment_count: index.zero_start_segment_count,
        scored_breakpoint_count,
        unique_breakpoint_count: unique.len(),
        threshold_fraction: threshold.fraction(),
    };
    write_breakpoint_run_stats(
        &get_run_stats_filename(&output_filename),
        &BreakpointRunStats {
            settings,
            breakpoint_stats,
        },
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;

    const TEST_CELLS: &str = "track name=\"CN for cellA.bam\" description=\"CN\"
chr1\t1000\t2000\t3-somy
chr1\t0\t500\t1-somy
track name=\"CN for cellB.bam\" description=\"CN\"
chr1\t1000\t2000\t3-x
chr2\t20000000\t25000000\t1-somy
track name=\"CN for cellC.bam\" description=\"CN\"
chr3\t5000\t9000\t4-somy
";

    #[test]
    fn test_run_breakpoints() {
        let dir = tempfile::tempdir().unwrap();
        let dirname = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let bed_filename = dirname.join("cells.bed");
        std::fs::write(&bed_filename, TEST_CELLS).unwrap();

        let settings = cli::BreakpointSettings {
            bed_filename,
            cell_threshold: 1,
            lower_interval_mb: 1.0,
            upper_interval_mb: 1.0,
            output_prefix: dirname.join("out").to_string(),
        };
        run_breakpoints(&settings).unwrap();

        let output_filename = settings.get_output_filename();
        assert_eq!(
            output_filename.file_name(),
            Some("out_CellThreshold=1_lowerInterval=1.0mb_upperInterval=1.0mb.bed")
        );
        let output = std::fs::read_to_string(&output_filename).unwrap();
        assert_eq!(
            output,
            "chr2 20000000 25000000 1 cellB\nchr3 5000 9000 4 cellC\n"
        );

        let stats = std::fs::read_to_string(get_run_stats_filename(&output_filename)).unwrap();
        let stats: serde_json::Value = serde_json::from_str(&stats).unwrap();
        let breakpoint_stats = &stats["breakpoint_stats"];
        assert_eq!(breakpoint_stats["total_cell_count"], 3);
        assert_eq!(breakpoint_stats["total_segment_count"], 5);
        assert_eq!(breakpoint_stats["zero_start_segment_count"], 1);
        assert_eq!(breakpoint_stats["scored_breakpoint_count"], 4);
        assert_eq!(breakpoint_stats["unique_breakpoint_count"], 2);
        assert_eq!(stats["settings"]["cell_threshold"], 1);
    }
}
