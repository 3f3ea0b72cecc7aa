mod breakpoints;
mod pileup;
mod shared;
mod utils;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use simple_error::SimpleResult;

pub use self::breakpoints::BreakpointSettings;
use self::breakpoints::validate_and_fix_breakpoint_settings;
pub use self::pileup::PileupSettings;
use self::pileup::validate_and_fix_pileup_settings;
pub use self::shared::SharedSettings;

#[derive(Subcommand)]
pub enum Commands {
    /// Find copy number alteration breakpoints which are unique to a small number of cells
    Breakpoints(BreakpointSettings),

    /// Plot copy number alteration segments from many cells on one genome-wide pileup graph
    Pileup(PileupSettings),
}

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}"
)]
#[clap(propagate_version = true, rename_all = "kebab_case")]
pub struct Settings {
    #[command(flatten)]
    pub shared: SharedSettings,

    #[command(subcommand)]
    pub command: Commands,
}

impl Settings {
    pub fn get_output_prefix(&self) -> &str {
        match &self.command {
            Commands::Breakpoints(x) => &x.output_prefix,
            Commands::Pileup(x) => &x.output_prefix,
        }
    }

    pub fn get_log_filename(&self) -> Utf8PathBuf {
        let command = match &self.command {
            Commands::Breakpoints(_) => "breakpoints",
            Commands::Pileup(_) => "pileup",
        };
        Utf8PathBuf::from(format!(
            "{}.{}.{command}.log",
            self.get_output_prefix(),
            crate::globals::PROGRAM_NAME
        ))
    }
}

/// Validate settings and update parameters that can't be processed by clap
///
pub fn validate_and_fix_settings_impl(mut settings: Settings) -> SimpleResult<Settings> {
    let clobber = settings.shared.clobber;
    settings.command = match settings.command {
        Commands::Breakpoints(x) => {
            let x = validate_and_fix_breakpoint_settings(x, clobber)?;
            Commands::Breakpoints(x)
        }
        Commands::Pileup(x) => {
            let x = validate_and_fix_pileup_settings(x, clobber)?;
            Commands::Pileup(x)
        }
    };

    Ok(settings)
}

/// Validate settings and update to parameters that can't be processed automatically by clap.
///
pub fn validate_and_fix_settings(settings: Settings) -> Settings {
    match validate_and_fix_settings_impl(settings) {
        Ok(x) => x,
        Err(msg) => {
            eprintln!("Invalid command-line setting: {}", msg);
            std::process::exit(exitcode::USAGE);
        }
    }
}

pub fn parse_settings() -> Settings {
    Settings::parse()
}
