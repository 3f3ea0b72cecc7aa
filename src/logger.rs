//! Logger setup for all cnapileup commands
//!
//! Log records go to stderr and to a log file next to the command's other outputs.
//!

use camino::Utf8Path;

use crate::globals::PROGRAM_NAME;
use crate::os_utils::create_parent_dir_all;

fn get_log_level(debug: bool) -> log::LevelFilter {
    if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

fn setup_logger(log_filename: &Utf8Path, debug: bool) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{PROGRAM_NAME}][{}] {message}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.level(),
            ))
        })
        .level(get_log_level(debug))
        .chain(std::io::stderr())
        .chain(fern::log_file(log_filename)?)
        .apply()?;
    Ok(())
}

/// Create the directory for the log file if needed, then start logging to stderr and the log file
///
/// Exits the process if either step fails.
///
/// # Arguments
/// * `debug` - If true use debug log level, and info level otherwise
///
pub fn setup_output_dir_and_logger(log_filename: &Utf8Path, debug: bool) {
    // No logger exists yet, so failures are reported directly to stderr
    if let Err(msg) = create_parent_dir_all(log_filename, "output") {
        eprintln!("{msg}");
        std::process::exit(exitcode::CANTCREAT);
    }
    if let Err(err) = setup_logger(log_filename, debug) {
        eprintln!("Can't create log file '{log_filename}': {err}");
        std::process::exit(exitcode::CANTCREAT);
    }
}
