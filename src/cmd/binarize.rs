/*!
`binarize.rs`

Implements the `binarize` subcommand: build an `mri_binarize` invocation.

  fs-recon binarize aseg.mgz mask.mgz --min 0 --dilate 1 --mask brain.mgz

`--min 0` is kept: only an omitted `--min` drops the flag. `--erode` and
`--dilate` are dropped when zero.
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::emit_command;
use crate::freesurfer::{BinarizeOptions, Threshold, binarize};

/// CLI arguments for `fs-recon binarize <IN> <OUT>`
#[derive(Args, Debug)]
pub struct BinarizeArgs {
    /// Input volume (--i)
    #[arg(value_name = "IN")]
    pub input: String,

    /// Output volume (--o)
    #[arg(value_name = "OUT")]
    pub output: String,

    /// Minimum threshold, integer or real (--min)
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub min: Option<Threshold>,

    /// Erosion iterations (--erode, omitted when 0)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub erode: u32,

    /// Dilation iterations (--dilate, omitted when 0)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub dilate: u32,

    /// Mask volume (--mask)
    #[arg(long, value_name = "PATH")]
    pub mask: Option<String>,

    /// Output JSON instead of a shell command line
    #[arg(long)]
    pub json: bool,
}

impl BinarizeArgs {
    pub fn options(&self) -> BinarizeOptions {
        BinarizeOptions {
            min: self.min,
            erode: self.erode,
            dilate: self.dilate,
            mask: self.mask.clone(),
        }
    }
}

/// Entry point for the binarize subcommand.
pub fn execute_binarize(args: BinarizeArgs) -> Result<()> {
    let cmd = binarize(&args.input, &args.output, &args.options());
    emit_command(&cmd, args.json)
}
