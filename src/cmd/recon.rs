/*!
`recon.rs`

Implements the `recon` subcommand: build a `recon-all` invocation.

  fs-recon recon -s bert -i /raw/bert.nii.gz
  fs-recon recon -s bert -i /raw/bert.nii.gz --no-all --parallel --openmp 8
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::emit_command;
use crate::freesurfer::{ReconOptions, reconstruct};

/// CLI arguments for `fs-recon recon`
#[derive(Args, Debug)]
pub struct ReconArgs {
    /// Subject identifier (-subjid)
    #[arg(short = 's', long, value_name = "ID")]
    pub subject: String,

    /// Input volume (-i)
    #[arg(short = 'i', long, value_name = "PATH")]
    pub input: String,

    /// Do not append -all
    #[arg(long)]
    pub no_all: bool,

    /// Append -parallel together with -openmp
    #[arg(long)]
    pub parallel: bool,

    /// Thread count for -openmp (only with --parallel)
    #[arg(long, value_name = "N", default_value_t = 4, requires = "parallel")]
    pub openmp: u32,

    /// Output JSON instead of a shell command line
    #[arg(long)]
    pub json: bool,
}

impl ReconArgs {
    pub fn options(&self) -> ReconOptions {
        ReconOptions {
            all: !self.no_all,
            parallel: self.parallel,
            openmp: self.openmp,
        }
    }
}

/// Entry point for the recon subcommand.
pub fn execute_recon(args: ReconArgs) -> Result<()> {
    let cmd = reconstruct(&args.subject, &args.input, &args.options());
    emit_command(&cmd, args.json)
}
