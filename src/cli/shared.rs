use clap::Args;

#[derive(Args)]
pub struct SharedSettings {
    /// Overwrite existing output files
    #[arg(long, global = true)]
    pub clobber: bool,

    /// Turn on extra debug logging
    ///
    /// This option enables extra logging intended for debugging only, including the band position
    /// chosen for every segment in the pileup command.
    ///
    #[arg(long, global = true)]
    pub debug: bool,
}
