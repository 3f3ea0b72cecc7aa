mod breakpoint_output;
mod breakpoint_recurrence;
mod breakpoints;
mod cli;
mod cna_segment;
mod globals;
mod int_range;
mod logger;
mod os_utils;
mod pileup;
mod pileup_layout;
mod pileup_plot;
mod reference_genome;
mod run_stats;
mod segment_reader;

use std::{error, process};

use hhmmss::Hhmmss;
use itertools::Itertools;
use log::info;

use crate::breakpoints::run_breakpoints;
use crate::cli::Commands;
use crate::globals::{PROGRAM_NAME, PROGRAM_VERSION};
use crate::logger::setup_output_dir_and_logger;
use crate::pileup::run_pileup;

fn run(settings: &cli::Settings) -> Result<(), Box<dyn error::Error>> {
    info!("Starting {PROGRAM_NAME} {PROGRAM_VERSION}");
    info!("cmdline: {}", std::env::args().join(" "));

    let start = std::time::Instant::now();

    match &settings.command {
        Commands::Breakpoints(x) => {
            run_breakpoints(x)?;
        }
        Commands::Pileup(x) => {
            run_pileup(x)?;
        }
    }

    info!(
        "{PROGRAM_NAME} completed. Total Runtime: {}",
        start.elapsed().hhmmssxxx()
    );
    Ok(())
}

fn main() {
    let settings = cli::validate_and_fix_settings(cli::parse_settings());

    // Setup logger, including creation of the output directory for the log file:
    setup_output_dir_and_logger(&settings.get_log_filename(), settings.shared.debug);

    if let Err(err) = run(&settings) {
        log::error!("{err}");
        process::exit(2);
    }
}
