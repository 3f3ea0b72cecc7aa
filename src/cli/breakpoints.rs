use camino::Utf8PathBuf;
use clap::Args;
use serde::Serialize;
use simple_error::{SimpleResult, bail};

use super::utils::{check_novel_output_filename, check_output_prefix, check_required_filename};
use crate::breakpoint_output::get_unique_breakpoint_filename;

#[derive(Args, Serialize)]
pub struct BreakpointSettings {
    /// Copy number segments for all cells, in multi-track BED format
    ///
    /// Each cell starts with a 'track' header line holding the cell name in a quoted field,
    /// followed by tab-delimited segment lines of 'chrom start end state'. The state is either an
    /// integer copy number or somy-encoded such as '3-somy'.
    ///
    #[arg(short = 'b', long = "bed", value_name = "FILE")]
    pub bed_filename: Utf8PathBuf,

    /// Maximum number of cells in which a breakpoint may be found for it to be reported as unique
    #[arg(short = 't', long, value_name = "COUNT")]
    pub cell_threshold: u32,

    /// Size of the breakpoint comparison window below each breakpoint, in megabases
    #[arg(
        short = 'l',
        long = "lower-interval",
        value_name = "MB",
        default_value_t = 1.0
    )]
    pub lower_interval_mb: f64,

    /// Size of the breakpoint comparison window above each breakpoint, in megabases
    #[arg(
        short = 'u',
        long = "upper-interval",
        value_name = "MB",
        default_value_t = 1.0
    )]
    pub upper_interval_mb: f64,

    /// Prefix for all output files
    ///
    /// Unique breakpoints are written to
    /// '<PREFIX>_CellThreshold=<COUNT>_lowerInterval=<MB>mb_upperInterval=<MB>mb.bed'
    ///
    #[arg(short = 'o', long, value_name = "PREFIX")]
    pub output_prefix: String,
}

impl BreakpointSettings {
    pub fn get_output_filename(&self) -> Utf8PathBuf {
        get_unique_breakpoint_filename(
            &self.output_prefix,
            self.cell_threshold,
            self.lower_interval_mb,
            self.upper_interval_mb,
        )
    }
}

fn check_interval_size(size: f64, label: &str) -> SimpleResult<()> {
    if !size.is_finite() || size < 0.0 {
        bail!("--{label} argument must be a non-negative number, found {size}");
    }
    Ok(())
}

/// Validate settings and update to parameters that can't be processed automatically by clap.
///
/// Assumes that the logger is not setup
///
pub fn validate_and_fix_breakpoint_settings(
    settings: BreakpointSettings,
    clobber: bool,
) -> SimpleResult<BreakpointSettings> {
    check_required_filename(&settings.bed_filename, "copy number segment")?;
    check_interval_size(settings.lower_interval_mb, "lower-interval")?;
    check_interval_size(settings.upper_interval_mb, "upper-interval")?;
    check_output_prefix(&settings.output_prefix)?;
    check_novel_output_filename(
        &settings.get_output_filename(),
        "Unique breakpoint output file",
        clobber,
    )?;

    Ok(settings)
}
