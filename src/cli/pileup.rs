use camino::Utf8PathBuf;
use clap::Args;
use simple_error::{SimpleResult, bail};

use super::utils::{check_novel_output_filename, check_output_prefix, check_required_filename};
use crate::pileup_plot::get_pileup_plot_filename;

#[derive(Args)]
pub struct PileupSettings {
    /// Copy number segments to plot, in BED format
    ///
    /// Each row holds 'chrom start end state cell_name'. Rows are expected to be tab-delimited,
    /// but space-delimited rows such as those written by the breakpoints command are also
    /// accepted. The state is either an integer copy number or somy-encoded such as '3-somy'.
    ///
    #[arg(short = 'b', long = "bed", value_name = "FILE")]
    pub bed_filename: Utf8PathBuf,

    /// Modal ploidy of the cells. Segments at this copy number are not drawn.
    #[arg(short = 'c', long, value_name = "PLOIDY", default_value_t = 2)]
    pub cell_ploidy: i32,

    /// Prefix for all output files
    ///
    /// The plot is written to '<PREFIX>_pileup_graph.svg'
    ///
    #[arg(short = 'o', long, value_name = "PREFIX")]
    pub output_prefix: String,
}

impl PileupSettings {
    pub fn get_output_filename(&self) -> Utf8PathBuf {
        get_pileup_plot_filename(&self.output_prefix)
    }
}

/// Validate settings and update to parameters that can't be processed automatically by clap.
///
/// Assumes that the logger is not setup
///
pub fn validate_and_fix_pileup_settings(
    settings: PileupSettings,
    clobber: bool,
) -> SimpleResult<PileupSettings> {
    check_required_filename(&settings.bed_filename, "copy number segment")?;
    if settings.cell_ploidy < 1 {
        bail!("--cell-ploidy argument must be greater than 0");
    }
    check_output_prefix(&settings.output_prefix)?;
    check_novel_output_filename(&settings.get_output_filename(), "Pileup plot file", clobber)?;

    Ok(settings)
}
