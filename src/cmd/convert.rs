/*!
`convert.rs`

Implements the `convert` subcommand: build an `mri_convert` invocation.
Input/output types are taken from the path extensions (mgz, nii, nii.gz).

  fs-recon convert T1.mgz T1.nii.gz --out-orientation RAS
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::{emit_command, output_error};
use crate::freesurfer::{ConvertOptions, OutOrientation, ResampleType, convert};

/// CLI arguments for `fs-recon convert <IN> <OUT>`
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input volume
    #[arg(value_name = "IN")]
    pub input: String,

    /// Output volume
    #[arg(value_name = "OUT")]
    pub output: String,

    /// Output orientation (--out_orientation)
    #[arg(long, value_enum, value_name = "ORI")]
    pub out_orientation: Option<OutOrientation>,

    /// Resampling strategy (--resample_type)
    #[arg(long, value_enum, value_name = "TYPE")]
    pub resample_type: Option<ResampleType>,

    /// Output JSON instead of a shell command line
    #[arg(long)]
    pub json: bool,
}

impl ConvertArgs {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            out_orientation: self.out_orientation,
            resample_type: self.resample_type,
        }
    }
}

/// Entry point for the convert subcommand.
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    match convert(&args.input, &args.output, &args.options()) {
        Ok(cmd) => emit_command(&cmd, args.json),
        Err(e) => output_error(args.json, &e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        cmd: TestSub,
    }

    #[derive(clap::Subcommand, Debug)]
    enum TestSub {
        Convert(ConvertArgs),
    }

    fn parse(argv: &[&str]) -> Result<ConvertArgs, clap::Error> {
        TestCli::try_parse_from(argv).map(|cli| match cli.cmd {
            TestSub::Convert(a) => a,
        })
    }

    #[test]
    fn clap_parses_value_enums() {
        let a = parse(&[
            "t",
            "convert",
            "a.mgz",
            "b.nii",
            "--out-orientation",
            "RAS",
            "--resample-type",
            "nearest",
        ])
        .unwrap();
        assert_eq!(a.out_orientation, Some(OutOrientation::Ras));
        assert_eq!(a.resample_type, Some(ResampleType::Nearest));
    }

    #[test]
    fn clap_rejects_unknown_orientation() {
        assert!(parse(&["t", "convert", "a.mgz", "b.nii", "--out-orientation", "LIA"]).is_err());
    }

    #[test]
    fn bad_extension_surfaces_as_error() {
        let a = parse(&["t", "convert", "a.xyz", "b.mgz", "--json"]).unwrap();
        let err = execute_convert(a).unwrap_err();
        assert!(err.to_string().contains("xyz"));
    }
}
