use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod freesurfer;
mod utils;

use cmd::{BatchArgs, BinarizeArgs, ConvertArgs, ListArgs, PathArgs, ReconArgs};

/// fs-recon - build FreeSurfer command lines without running them
///
/// Command layout:
///   fs-recon path <T1|aparc+aseg|brain> -s <ID> [--sdir DIR] [--json]
///   fs-recon recon -s <ID> -i <PATH> [--no-all] [--parallel [--openmp N]] [--json]
///   fs-recon convert <IN> <OUT> [--out-orientation RAS] [--resample-type TYPE] [--json]
///   fs-recon binarize <IN> <OUT> [--min V] [--erode N] [--dilate N] [--mask PATH] [--json]
///   fs-recon batch <FILE> [--json]
///   fs-recon list [EXE] [--json]
///
/// Global flags / env:
///   -v / -vv        Increase verbosity (logs go to stderr)
///   -q / --quiet    Errors only
///   SUBJECTS_DIR    Subjects directory fallback for `path` and path jobs
///
/// stdout carries only the produced command line(s) or JSON, so the output
/// can be fed straight to whatever launches the toolkit.
#[derive(Parser, Debug)]
#[command(
    name = "fs-recon",
    version,
    author,
    about = "fs-recon - typed command-line builder for FreeSurfer tools",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a subject volume path
    Path(PathArgs),

    /// Build a recon-all invocation
    Recon(ReconArgs),

    /// Build an mri_convert invocation
    Convert(ConvertArgs),

    /// Build an mri_binarize invocation
    Binarize(BinarizeArgs),

    /// Build every invocation in a job file
    Batch(BatchArgs),

    /// Show the executable / flag registry
    List(ListArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);
    log_debug!("log level: {}", level.as_str());

    match cli.command {
        Commands::Path(args) => cmd::execute_path(args),
        Commands::Recon(args) => cmd::execute_recon(args),
        Commands::Convert(args) => cmd::execute_convert(args),
        Commands::Binarize(args) => cmd::execute_binarize(args),
        Commands::Batch(args) => cmd::execute_batch(args),
        Commands::List(args) => cmd::execute_list(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_anywhere() {
        let cli = Cli::try_parse_from(["fs-recon", "recon", "-s", "S1", "-i", "in.mgz", "-vv"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Recon(_)));
    }

    #[test]
    fn quiet_flag() {
        let cli = Cli::try_parse_from(["fs-recon", "-q", "list"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
